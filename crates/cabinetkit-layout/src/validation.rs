//! Validation Layer
//!
//! Checks an opening's stack against fit rules and returns a structured
//! report. Errors block saving; warnings are advisory. Validation never fails.
//!
//! Checks:
//! - Opening width and height are positive
//! - Every component height is positive
//! - Stacking order has no duplicates
//! - Components fit the opening height (within the overflow tolerance)
//! - Components fit the opening width: side by side as a row, stacked each on
//!   its own
//! - Near-capacity usage
//! - Type minimum heights
//! - Drawers placed above doors in mixed stacks

use crate::opening::OpeningState;
use crate::types::{ComponentType, LayoutDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Minimum drawer front height (4")
pub const MIN_DRAWER_FRONT_HEIGHT_INCHES: f64 = 4.0;

/// Minimum clearance for a shelf position (5-1/2")
pub const MIN_SHELF_OPENING_HEIGHT_INCHES: f64 = 5.5;

/// Default overflow tolerance (1/32")
pub const DEFAULT_OVERFLOW_TOLERANCE_INCHES: f64 = 0.03125;

/// Default near-capacity threshold
pub const DEFAULT_NEAR_CAPACITY_PERCENT: f64 = 90.0;

/// Per-type minimum practical heights. Zero means no minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumHeights {
    pub drawer: f64,
    pub shelf: f64,
    pub door: f64,
    pub pullout: f64,
    pub false_front: f64,
}

impl Default for MinimumHeights {
    fn default() -> Self {
        Self {
            drawer: MIN_DRAWER_FRONT_HEIGHT_INCHES,
            shelf: MIN_SHELF_OPENING_HEIGHT_INCHES,
            door: 0.0,
            pullout: 0.0,
            false_front: 0.0,
        }
    }
}

impl MinimumHeights {
    pub fn for_type(&self, component_type: ComponentType) -> f64 {
        match component_type {
            ComponentType::Drawer => self.drawer,
            ComponentType::Shelf => self.shelf,
            ComponentType::Door => self.door,
            ComponentType::Pullout => self.pullout,
            ComponentType::FalseFront => self.false_front,
        }
    }
}

/// Thresholds used by [`validate`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Overflow up to this many inches is tolerated as rounding
    pub overflow_tolerance: f64,
    /// Usage above this percentage raises a near-capacity warning
    pub near_capacity_percent: f64,
    pub minimum_heights: MinimumHeights,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            overflow_tolerance: DEFAULT_OVERFLOW_TOLERANCE_INCHES,
            near_capacity_percent: DEFAULT_NEAR_CAPACITY_PERCENT,
            minimum_heights: MinimumHeights::default(),
        }
    }
}

/// Three-state badge shown for an opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Warnings(usize),
    Errors(usize),
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Warnings(1) => write!(f, "1 Warning"),
            Self::Warnings(n) => write!(f, "{} Warnings", n),
            Self::Errors(1) => write!(f, "1 Error"),
            Self::Errors(n) => write!(f, "{} Errors", n),
        }
    }
}

/// Outcome of validating an opening
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn status(&self) -> ValidationStatus {
        if self.has_errors() {
            ValidationStatus::Errors(self.errors.len())
        } else if self.has_warnings() {
            ValidationStatus::Warnings(self.warnings.len())
        } else {
            ValidationStatus::Valid
        }
    }

    /// One-line summary, e.g. "2 error(s), 1 warning(s)"
    pub fn summary(&self) -> String {
        if self.is_valid && !self.has_warnings() {
            return "Configuration is valid".to_string();
        }

        let mut parts = Vec::new();
        if self.has_errors() {
            parts.push(format!("{} error(s)", self.errors.len()));
        }
        if self.has_warnings() {
            parts.push(format!("{} warning(s)", self.warnings.len()));
        }
        parts.join(", ")
    }

    /// Errors first, then warnings, each tagged with its severity
    pub fn messages(&self) -> impl Iterator<Item = (Severity, &str)> {
        self.errors
            .iter()
            .map(|e| (Severity::Error, e.as_str()))
            .chain(self.warnings.iter().map(|w| (Severity::Warning, w.as_str())))
    }

    pub fn has_overflow(&self) -> bool {
        self.errors.iter().any(|e| e.contains("overflow"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Validate an opening's stack
pub fn validate(state: &OpeningState, policy: &ValidationPolicy) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let opening = state.opening();

    if opening.width <= 0.0 {
        errors.push(format!(
            "Opening width {:.4}\" must be positive",
            opening.width
        ));
    }

    if opening.height <= 0.0 {
        errors.push(format!(
            "Opening height {:.4}\" must be positive",
            opening.height
        ));
    }

    for component in state.components() {
        if component.height <= 0.0 {
            errors.push(format!(
                "{} {} has non-positive height {:.4}\"",
                component.component_type, component.name, component.height
            ));
        }
    }

    let mut seen: HashMap<u32, &str> = HashMap::new();
    for component in state.components() {
        if let Some(first) = seen.insert(component.order_index, component.name.as_str()) {
            errors.push(format!(
                "Duplicate stacking order {} shared by {} and {}",
                component.order_index, first, component.name
            ));
        }
    }

    let remaining = state.remaining_height();
    let usage = state.usage_percentage();
    if remaining < -policy.overflow_tolerance {
        errors.push(format!(
            "Components overflow opening height by {:.4}\" ({:.4}\" total in {:.4}\" opening)",
            -remaining,
            state.consumed_height(),
            opening.height
        ));
    } else if opening.height > 0.0 && usage > policy.near_capacity_percent {
        warnings.push(format!(
            "Components use {:.1}% of available height ({:.4}\" of {:.4}\")",
            usage,
            state.consumed_height(),
            opening.height
        ));
    }

    if opening.width > 0.0 {
        check_width(state, policy, &mut errors);
    }

    for component in state.components() {
        let minimum = policy.minimum_heights.for_type(component.component_type);
        if component.height > 0.0 && component.height < minimum {
            warnings.push(format!(
                "{} {} has height {:.4}\" which is below minimum {:.4}\"",
                component.component_type, component.name, component.height, minimum
            ));
        }
    }

    if let Some(warning) = check_drawers_above_doors(state) {
        warnings.push(warning);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_width(state: &OpeningState, policy: &ValidationPolicy, errors: &mut Vec<String>) {
    let opening = state.opening();
    match opening.layout_direction {
        LayoutDirection::Horizontal => {
            let remaining = state.remaining_width();
            if remaining < -policy.overflow_tolerance {
                errors.push(format!(
                    "Components overflow opening width by {:.4}\" ({:.4}\" total in {:.4}\" opening)",
                    -remaining,
                    state.consumed_width(),
                    opening.width
                ));
            }
        }
        LayoutDirection::Vertical => {
            for component in state.components() {
                let width = component.width_in(opening);
                if width - opening.width > policy.overflow_tolerance {
                    errors.push(format!(
                        "{} {} width {:.4}\" overflows opening width {:.4}\"",
                        component.component_type, component.name, width, opening.width
                    ));
                }
            }
        }
    }
}

fn check_drawers_above_doors(state: &OpeningState) -> Option<String> {
    if state.opening().layout_direction != LayoutDirection::Vertical {
        return None;
    }
    let orders = |t: ComponentType| {
        state
            .components()
            .iter()
            .filter(move |c| c.component_type == t)
            .map(|c| c.order_index)
    };

    let highest_drawer = orders(ComponentType::Drawer).max()?;
    let lowest_door = orders(ComponentType::Door).min()?;
    if highest_drawer > lowest_door {
        None
    } else {
        Some("Mixed stack: drawers are typically positioned above doors".to_string())
    }
}
