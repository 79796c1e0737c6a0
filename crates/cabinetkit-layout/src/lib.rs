//! # CabinetKit Layout
//!
//! Fits drawers, shelves, doors, pull-outs and false fronts into cabinet
//! openings.
//!
//! ## Pipeline
//!
//! - **Frame Geometry Resolver** (`frame`): cabinet size and construction to
//!   usable opening(s)
//! - **Opening Layout Engine** (`opening`): ordered components with derived
//!   positions, stacked or side by side
//! - **Validation Layer** (`validation`): errors that block saving and advisory
//!   warnings
//! - **Auto-Arrange Strategy Selector** (`arrange`): named height policies
//! - **Opening Configurator** (`configurator`): command surface for a UI
//!
//! All dimensions are decimal inches.

pub mod arrange;
pub mod configurator;
pub mod frame;
pub mod opening;
pub mod types;
pub mod validation;

pub use arrange::{
    auto_arrange, ArrangeContext, ArrangeStrategy, StrategyRegistry, TypeWeights,
    DEFAULT_STRATEGY,
};
pub use configurator::{AddDefaults, AddRequest, ComponentView, OpeningConfigurator, OpeningView};
pub use frame::{
    face_frame_cut_list, normalize_ratios, resolve_opening, resolve_sections,
    DEFAULT_FRAMELESS_MARGIN,
};
pub use opening::{AddOutcome, OpeningState, RemainingSpace};
pub use types::{
    Component, ComponentType, Construction, ConstructionType, FramePart, LayoutDirection, Opening,
    OpeningSize, Section, SectionOpening, SectionType, DEFAULT_REVEAL_INCHES,
};
pub use validation::{
    validate, MinimumHeights, Severity, ValidationPolicy, ValidationReport, ValidationStatus,
};
