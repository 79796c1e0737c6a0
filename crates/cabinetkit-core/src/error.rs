//! Error handling for CabinetKit
//!
//! Error types for the layout core:
//! - Geometry errors (cabinet frame and section resolution)
//! - Layout errors (opening editing commands and strategy selection)
//!
//! Fit problems (overflow, undersized components) are not errors here. They
//! are reported by the validation layer as structured findings.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the frame geometry resolver when a cabinet cannot produce a
/// usable opening.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Cabinet dimensions or frame members cannot yield a positive opening
    #[error("Invalid frame configuration: {reason}")]
    InvalidFrameConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Section ratios are out of range or do not sum to one
    #[error("Invalid section ratios: {reason}")]
    InvalidSectionRatios {
        /// Why the ratios were rejected.
        reason: String,
    },
}

impl GeometryError {
    /// Shorthand for an `InvalidFrameConfiguration` error
    pub fn frame(reason: impl Into<String>) -> Self {
        Self::InvalidFrameConfiguration {
            reason: reason.into(),
        }
    }
}

/// Layout error type
///
/// Raised synchronously by opening editing commands and the auto-arrange
/// selector. A failed command leaves the opening unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The requested auto-arrange strategy is not registered
    #[error("Unknown strategy: {name}")]
    UnknownStrategy {
        /// The strategy name that was requested.
        name: String,
    },

    /// No component with this id exists in the opening
    #[error("Component {id} not found in opening")]
    ComponentNotFound {
        /// The missing component id.
        id: u32,
    },

    /// A component height is not a finite number
    #[error("Invalid component height: {value}")]
    InvalidHeight {
        /// The rejected height.
        value: f64,
    },

    /// A reveal or gap is negative or not finite
    #[error("Invalid gap setting '{name}': {value}")]
    InvalidGap {
        /// The gap setting name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A component width is not a positive finite number
    #[error("Invalid component width: {value}")]
    InvalidWidth {
        /// The rejected width.
        value: f64,
    },

    /// The command needs a pending add request and none is open
    #[error("No add request is open")]
    NoPendingAdd,

    /// Component ids have reached `u32::MAX`
    #[error("No component ids left after {last}")]
    IdExhausted {
        /// The highest id in use.
        last: u32,
    },

    /// Stacking order indices have reached `u32::MAX`
    #[error("No stacking order left after {last}")]
    OrderExhausted {
        /// The highest order index in use.
        last: u32,
    },

    /// A strategy returned a different number of sizes than components
    #[error("Strategy '{name}' returned {got} heights for {expected} components")]
    ArrangementMismatch {
        /// The strategy name.
        name: String,
        /// Number of components arranged.
        expected: usize,
        /// Number of heights returned.
        got: usize,
    },

    /// The strategy cannot arrange an opening laid out in this direction
    #[error("Auto-arrange does not support {direction} layout")]
    UnsupportedLayout {
        /// The opening's layout direction.
        direction: String,
    },
}

/// Main error type for CabinetKit
///
/// A unified error type that can represent any error from the core crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this error came from a caller mistake in configuration
    /// (bad frame members or an unregistered strategy)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Geometry(_) | Error::Layout(LayoutError::UnknownStrategy { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
