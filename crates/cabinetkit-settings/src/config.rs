//! Shop defaults for CabinetKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files, stored by default in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Gap policy (reveals and the gap between components)
//! - Frame construction defaults (stile/rail widths, frameless margin)
//! - Validation thresholds and per-type minimum heights
//! - Add dialog default heights and weighted-distribution weights
//! - Display preferences (measurement system, fraction precision)

pub use cabinetkit_core::units::MeasurementSystem;
use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use cabinetkit_core::units::DEFAULT_FRACTION_PRECISION;
use cabinetkit_layout::{
    AddDefaults, Construction, ConstructionType, Opening, OpeningConfigurator, OpeningState,
    StrategyRegistry, TypeWeights, ValidationPolicy, DEFAULT_FRAMELESS_MARGIN,
    DEFAULT_REVEAL_INCHES, DEFAULT_STRATEGY,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "cabinetkit";

/// File name of the default config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Reveals and component gap applied to new openings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapSettings {
    pub top_reveal: f64,
    pub bottom_reveal: f64,
    pub component_gap: f64,
}

impl Default for GapSettings {
    fn default() -> Self {
        Self {
            top_reveal: DEFAULT_REVEAL_INCHES,
            bottom_reveal: DEFAULT_REVEAL_INCHES,
            component_gap: DEFAULT_REVEAL_INCHES,
        }
    }
}

/// Default cabinet construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub construction: ConstructionType,
    /// Face frame stile width in inches
    pub stile_width: f64,
    /// Face frame rail width in inches
    pub rail_width: f64,
    /// Frameless edge margin, as a fraction per side
    pub frameless_margin: f64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            construction: ConstructionType::FaceFrame,
            stile_width: 1.5,
            rail_width: 1.5,
            frameless_margin: DEFAULT_FRAMELESS_MARGIN,
        }
    }
}

impl FrameSettings {
    /// Construction of the configured type with its frame parameters
    pub fn construction(&self) -> Construction {
        match self.construction {
            ConstructionType::FaceFrame => Construction::FaceFrame {
                stile_width: self.stile_width,
                rail_width: self.rail_width,
            },
            ConstructionType::Frameless => Construction::Frameless {
                margin: self.frameless_margin,
            },
        }
    }
}

/// Strategy defaults for auto-arrange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeSettings {
    pub default_strategy: String,
    pub weights: TypeWeights,
}

impl Default for ArrangeSettings {
    fn default() -> Self {
        Self {
            default_strategy: DEFAULT_STRATEGY.to_string(),
            weights: TypeWeights::default(),
        }
    }
}

/// How lengths are shown and entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub measurement_system: MeasurementSystem,
    /// Denominator used for fractional inches (2, 4, 8, 16, 32 or 64)
    pub fraction_precision: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            measurement_system: MeasurementSystem::default(),
            fraction_precision: DEFAULT_FRACTION_PRECISION,
        }
    }
}

/// Complete shop configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gaps: GapSettings,
    pub frame: FrameSettings,
    pub validation: ValidationPolicy,
    pub add_defaults: AddDefaults,
    pub arrange: ArrangeSettings,
    pub display: DisplaySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/cabinetkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no user config directory".to_string())
        })?;
        Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!(path = %path.display(), "Loaded settings");
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Validate configuration ranges
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("gaps.top_reveal", self.gaps.top_reveal)?;
        non_negative("gaps.bottom_reveal", self.gaps.bottom_reveal)?;
        non_negative("gaps.component_gap", self.gaps.component_gap)?;

        positive("frame.stile_width", self.frame.stile_width)?;
        positive("frame.rail_width", self.frame.rail_width)?;
        let margin = self.frame.frameless_margin;
        if !(0.0..0.5).contains(&margin) {
            return Err(ConfigError::out_of_range("frame.frameless_margin", margin));
        }

        non_negative(
            "validation.overflow_tolerance",
            self.validation.overflow_tolerance,
        )?;
        let near = self.validation.near_capacity_percent;
        if !(near > 0.0 && near <= 100.0) {
            return Err(ConfigError::out_of_range(
                "validation.near_capacity_percent",
                near,
            ));
        }
        let minimums = &self.validation.minimum_heights;
        non_negative("validation.minimum_heights.drawer", minimums.drawer)?;
        non_negative("validation.minimum_heights.shelf", minimums.shelf)?;
        non_negative("validation.minimum_heights.door", minimums.door)?;
        non_negative("validation.minimum_heights.pullout", minimums.pullout)?;
        non_negative(
            "validation.minimum_heights.false_front",
            minimums.false_front,
        )?;

        positive("add_defaults.drawer", self.add_defaults.drawer)?;
        positive("add_defaults.shelf", self.add_defaults.shelf)?;
        positive("add_defaults.pullout", self.add_defaults.pullout)?;
        positive("add_defaults.false_front", self.add_defaults.false_front)?;

        let weights = &self.arrange.weights;
        non_negative("arrange.weights.drawer", weights.drawer)?;
        non_negative("arrange.weights.shelf", weights.shelf)?;
        non_negative("arrange.weights.door", weights.door)?;
        non_negative("arrange.weights.pullout", weights.pullout)?;
        non_negative("arrange.weights.false_front", weights.false_front)?;

        if !self.registry().contains(&self.arrange.default_strategy) {
            return Err(ConfigError::UnknownStrategy(
                self.arrange.default_strategy.clone(),
            ));
        }

        let precision = self.display.fraction_precision;
        if !(2..=64).contains(&precision) || !precision.is_power_of_two() {
            return Err(ConfigError::ValueOutOfRange {
                key: "display.fraction_precision".to_string(),
                value: precision.to_string(),
            });
        }

        Ok(())
    }

    /// Opening of the given size with the configured gap policy
    pub fn opening(&self, width: f64, height: f64) -> Opening {
        Opening::new(width, height).with_gaps(
            self.gaps.top_reveal,
            self.gaps.bottom_reveal,
            self.gaps.component_gap,
        )
    }

    /// Built-in strategies using the configured type weights
    pub fn registry(&self) -> StrategyRegistry {
        StrategyRegistry::with_weights(self.arrange.weights)
    }

    /// Configurator for an opening with these defaults and the default
    /// strategy selected
    pub fn configurator(&self, state: OpeningState) -> SettingsResult<OpeningConfigurator> {
        let mut configurator =
            OpeningConfigurator::new(state, self.registry(), self.validation, self.add_defaults);
        configurator.select_strategy(&self.arrange.default_strategy)?;
        Ok(configurator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}
