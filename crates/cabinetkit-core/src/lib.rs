//! # CabinetKit Core
//!
//! Core types and utilities shared by the CabinetKit crates: the error
//! taxonomy for geometry and layout commands, and inch/fraction unit handling.

pub mod error;
pub mod units;

pub use error::{Error, GeometryError, LayoutError, Result};
pub use units::{MeasurementSystem, MM_PER_INCH};
