//! # CabinetKit
//!
//! Lays out drawers, shelves, doors, pull-outs and false fronts inside cabinet
//! openings.
//!
//! ## Architecture
//!
//! CabinetKit is organized as a workspace with multiple crates:
//!
//! 1. **cabinetkit-core** - Error taxonomy, inch/fraction units
//! 2. **cabinetkit-layout** - Frame resolver, layout engine, validation,
//!    auto-arrange strategies, configurator
//! 3. **cabinetkit-settings** - Shop defaults and their persistence
//! 4. **cabinetkit** - Command line binary and layout scripts

pub mod script;

pub use cabinetkit_core::{Error, GeometryError, LayoutError, MeasurementSystem, Result};
pub use cabinetkit_layout::{
    auto_arrange, face_frame_cut_list, resolve_opening, resolve_sections, validate, Component,
    ComponentType, Construction, Opening, OpeningConfigurator, OpeningState, OpeningView,
    StrategyRegistry, ValidationReport,
};
pub use cabinetkit_settings::Config;
pub use script::{run_script, LayoutScript, ScriptCommand, ScriptError, ScriptOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, so stdout stays machine readable
/// - RUST_LOG environment variable support (default `warn`)
/// - `verbose` raises the default to `debug`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
