//! Layout scripts
//!
//! A layout script describes one opening (directly, or as a cabinet whose
//! opening is resolved from its construction), optional existing component
//! records, and a list of configurator commands to replay:
//!
//! ```json
//! {
//!   "cabinet": { "width": 18, "height": 30,
//!                "construction": { "type": "face_frame", "stile_width": 1.5, "rail_width": 1.5 } },
//!   "commands": [
//!     { "command": "add", "type": "door", "height": 15 },
//!     { "command": "add", "type": "drawer" },
//!     { "command": "auto_arrange", "strategy": "proportional" }
//!   ]
//! }
//! ```
//!
//! Side-by-side openings set `"layout_direction": "horizontal"` on the opening
//! or cabinet and give each component a `width`.

use cabinetkit_core::{GeometryError, LayoutError};
use cabinetkit_layout::{
    resolve_opening, Component, ComponentType, Construction, LayoutDirection, Opening,
    OpeningState, OpeningView,
};
use cabinetkit_settings::{Config, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Script must give either an opening or a cabinet")]
    MissingOpening,

    #[error("Script gives both an opening and a cabinet")]
    AmbiguousOpening,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Invalid component records: {0}")]
    Records(#[source] LayoutError),

    #[error("Command {index} ({command}) failed: {source}")]
    Command {
        index: usize,
        command: String,
        #[source]
        source: LayoutError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opening size; reveals and gap fall back to the configured defaults
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OpeningSpec {
    pub width: f64,
    pub height: f64,
    pub top_reveal: Option<f64>,
    pub bottom_reveal: Option<f64>,
    pub component_gap: Option<f64>,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
}

/// Cabinet outer size; construction falls back to the configured frame
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CabinetSpec {
    pub width: f64,
    pub height: f64,
    pub construction: Option<Construction>,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Add a component; without a height the add dialog default is used
    Add {
        #[serde(rename = "type")]
        component_type: ComponentType,
        #[serde(default)]
        height: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
    },
    Remove {
        id: u32,
    },
    MoveUp {
        id: u32,
    },
    MoveDown {
        id: u32,
    },
    /// Without a width the component spans the opening
    SetWidth {
        id: u32,
        #[serde(default)]
        width: Option<f64>,
    },
    SetLayoutDirection {
        direction: LayoutDirection,
    },
    SelectStrategy {
        strategy: String,
    },
    /// Without a strategy the selected one is applied
    AutoArrange {
        #[serde(default)]
        strategy: Option<String>,
    },
    UpdateGaps {
        top_reveal: f64,
        bottom_reveal: f64,
        component_gap: f64,
    },
}

impl ScriptCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::MoveUp { .. } => "move_up",
            Self::MoveDown { .. } => "move_down",
            Self::SetWidth { .. } => "set_width",
            Self::SetLayoutDirection { .. } => "set_layout_direction",
            Self::SelectStrategy { .. } => "select_strategy",
            Self::AutoArrange { .. } => "auto_arrange",
            Self::UpdateGaps { .. } => "update_gaps",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutScript {
    #[serde(default)]
    pub opening: Option<OpeningSpec>,
    #[serde(default)]
    pub cabinet: Option<CabinetSpec>,
    /// Existing component records, loaded as given
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub commands: Vec<ScriptCommand>,
}

impl LayoutScript {
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The opening this script lays out
    pub fn opening(&self, config: &Config) -> Result<Opening, ScriptError> {
        match (&self.opening, &self.cabinet) {
            (Some(given), None) => Ok(Opening::new(given.width, given.height)
                .with_gaps(
                    given.top_reveal.unwrap_or(config.gaps.top_reveal),
                    given.bottom_reveal.unwrap_or(config.gaps.bottom_reveal),
                    given.component_gap.unwrap_or(config.gaps.component_gap),
                )
                .with_direction(given.layout_direction)),
            (None, Some(cabinet)) => {
                let construction = cabinet
                    .construction
                    .unwrap_or_else(|| config.frame.construction());
                let size = resolve_opening(cabinet.width, cabinet.height, &construction)?;
                Ok(config
                    .opening(size.width, size.height)
                    .with_direction(cabinet.layout_direction))
            }
            (None, None) => Err(ScriptError::MissingOpening),
            (Some(_), Some(_)) => Err(ScriptError::AmbiguousOpening),
        }
    }
}

/// Final state of a replayed script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptOutput {
    pub opening: Opening,
    pub strategy: String,
    pub summary: String,
    pub view: OpeningView,
}

/// Replay a script through an opening configurator
///
/// Stops at the first failing command.
pub fn run_script(script: &LayoutScript, config: &Config) -> Result<ScriptOutput, ScriptError> {
    let opening = script.opening(config)?;
    let state = OpeningState::from_records(opening, script.components.clone())
        .map_err(ScriptError::Records)?;
    let mut configurator = config.configurator(state)?;

    for (index, command) in script.commands.iter().enumerate() {
        debug!(index, command = command.name(), "Applying script command");
        let result = match command {
            ScriptCommand::Add {
                component_type,
                height,
                width,
            } => {
                configurator.open_add_modal(*component_type);
                let sized = match height {
                    Some(h) => configurator.set_pending_height(*h),
                    None => Ok(()),
                };
                sized
                    .and_then(|_| configurator.confirm_add())
                    .and_then(|outcome| match width {
                        Some(_) => configurator.set_component_width(outcome.component.id, *width),
                        None => Ok(()),
                    })
            }
            ScriptCommand::Remove { id } => configurator.remove_component(*id).map(|_| ()),
            ScriptCommand::MoveUp { id } => configurator.move_up(*id).map(|_| ()),
            ScriptCommand::MoveDown { id } => configurator.move_down(*id).map(|_| ()),
            ScriptCommand::SetWidth { id, width } => configurator.set_component_width(*id, *width),
            ScriptCommand::SetLayoutDirection { direction } => {
                configurator.set_layout_direction(*direction);
                Ok(())
            }
            ScriptCommand::SelectStrategy { strategy } => configurator.select_strategy(strategy),
            ScriptCommand::AutoArrange { strategy: Some(s) } => configurator.auto_arrange(s),
            ScriptCommand::AutoArrange { strategy: None } => configurator.auto_arrange_selected(),
            ScriptCommand::UpdateGaps {
                top_reveal,
                bottom_reveal,
                component_gap,
            } => configurator.update_gap_settings(*top_reveal, *bottom_reveal, *component_gap),
        };

        result.map_err(|source| ScriptError::Command {
            index,
            command: command.name().to_string(),
            source,
        })?;
    }

    let report = configurator.report();
    info!(
        commands = script.commands.len(),
        status = %report.status(),
        "Script replayed"
    );

    Ok(ScriptOutput {
        opening: *configurator.state().opening(),
        strategy: configurator.selected_strategy().to_string(),
        summary: report.summary(),
        view: configurator.view(),
    })
}
