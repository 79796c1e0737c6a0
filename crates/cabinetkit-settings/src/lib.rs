//! CabinetKit Settings Crate
//!
//! Shop defaults (gaps, frame construction, validation thresholds, add
//! dialog heights, strategy weights) and their persistence.

pub mod config;
pub mod error;

pub use config::{
    ArrangeSettings, Config, DisplaySettings, FrameSettings, GapSettings, MeasurementSystem,
    CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
