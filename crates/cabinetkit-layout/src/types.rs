//! Type definitions shared by the frame resolver, layout engine and validator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shop standard reveal and gap (1/8")
pub const DEFAULT_REVEAL_INCHES: f64 = 0.125;

/// Kind of component stacked inside an opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Drawer,
    Shelf,
    Door,
    Pullout,
    FalseFront,
}

impl ComponentType {
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Drawer,
        ComponentType::Shelf,
        ComponentType::Door,
        ComponentType::Pullout,
        ComponentType::FalseFront,
    ];

    /// Short prefix used for generated names (`DR1`, `S2`, ...)
    pub fn name_prefix(&self) -> &'static str {
        match self {
            Self::Drawer => "DR",
            Self::Shelf => "S",
            Self::Door => "D",
            Self::Pullout => "P",
            Self::FalseFront => "FF",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drawer => "drawer",
            Self::Shelf => "shelf",
            Self::Door => "door",
            Self::Pullout => "pullout",
            Self::FalseFront => "false_front",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drawer => write!(f, "Drawer"),
            Self::Shelf => write!(f, "Shelf"),
            Self::Door => write!(f, "Door"),
            Self::Pullout => write!(f, "Pull-out"),
            Self::FalseFront => write!(f, "False Front"),
        }
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drawer" => Ok(Self::Drawer),
            "shelf" => Ok(Self::Shelf),
            "door" => Ok(Self::Door),
            "pullout" | "pull_out" | "pull-out" => Ok(Self::Pullout),
            "false_front" | "false-front" | "falsefront" => Ok(Self::FalseFront),
            other => Err(format!("Unknown component type: {}", other)),
        }
    }
}

/// How components are placed inside an opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Stacked bottom to top (drawer banks)
    #[default]
    Vertical,
    /// Side by side, left to right (paired doors)
    Horizontal,
}

impl LayoutDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "Vertical"),
            Self::Horizontal => write!(f, "Horizontal"),
        }
    }
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertical" | "stacked" => Ok(Self::Vertical),
            "horizontal" | "side_by_side" | "side-by-side" => Ok(Self::Horizontal),
            other => Err(format!("Unknown layout direction: {}", other)),
        }
    }
}

/// Usable rectangle of a cabinet section plus its gap policy, in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_reveal")]
    pub top_reveal: f64,
    #[serde(default = "default_reveal")]
    pub bottom_reveal: f64,
    #[serde(default = "default_reveal")]
    pub component_gap: f64,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
}

fn default_reveal() -> f64 {
    DEFAULT_REVEAL_INCHES
}

impl Opening {
    /// Opening with shop standard 1/8" reveals and gap
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top_reveal: DEFAULT_REVEAL_INCHES,
            bottom_reveal: DEFAULT_REVEAL_INCHES,
            component_gap: DEFAULT_REVEAL_INCHES,
            layout_direction: LayoutDirection::Vertical,
        }
    }

    pub fn with_gaps(mut self, top_reveal: f64, bottom_reveal: f64, component_gap: f64) -> Self {
        self.top_reveal = top_reveal;
        self.bottom_reveal = bottom_reveal;
        self.component_gap = component_gap;
        self
    }

    pub fn with_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    /// Height between the reveals
    pub fn usable_height(&self) -> f64 {
        self.height - self.top_reveal - self.bottom_reveal
    }

    /// Total gap height between `count` stacked components
    pub fn total_gaps(&self, count: usize) -> f64 {
        count.saturating_sub(1) as f64 * self.component_gap
    }
}

/// A drawer, shelf, door, pull-out or false front placed in an opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: u32,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    pub height: f64,
    /// Front width. `None` spans the full opening width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Inches from the bottom of the opening. Always derived from order,
    /// heights and gaps.
    #[serde(default)]
    pub position: f64,
    /// Inches from the left of the opening. Always derived; zero when stacked.
    #[serde(default)]
    pub position_left: f64,
    pub order_index: u32,
}

impl Component {
    /// Top edge of the component
    pub fn top(&self) -> f64 {
        self.position + self.height
    }

    /// Width the component takes up in `opening`
    pub fn width_in(&self, opening: &Opening) -> f64 {
        self.width.unwrap_or(opening.width)
    }
}

/// Cabinet construction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    FaceFrame,
    Frameless,
}

impl fmt::Display for ConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceFrame => write!(f, "Face Frame"),
            Self::Frameless => write!(f, "Frameless"),
        }
    }
}

impl FromStr for ConstructionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "face_frame" | "face-frame" | "faceframe" => Ok(Self::FaceFrame),
            "frameless" | "euro" | "european" => Ok(Self::Frameless),
            other => Err(format!("Unknown construction type: {}", other)),
        }
    }
}

/// Construction with the frame parameters each type needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Construction {
    /// Opening bordered by stiles (vertical) and rails (horizontal)
    FaceFrame { stile_width: f64, rail_width: f64 },
    /// Box interior minus an edge margin, as a fraction per side
    Frameless { margin: f64 },
}

impl Construction {
    pub fn construction_type(&self) -> ConstructionType {
        match self {
            Self::FaceFrame { .. } => ConstructionType::FaceFrame,
            Self::Frameless { .. } => ConstructionType::Frameless,
        }
    }
}

/// Width and height of a resolved opening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningSize {
    pub width: f64,
    pub height: f64,
}

/// Kind of front partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Door,
    Drawer,
    OpenShelf,
    PullOut,
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "Door"),
            Self::Drawer => write!(f, "Drawer"),
            Self::OpenShelf => write!(f, "Open Shelf"),
            Self::PullOut => write!(f, "Pull-out"),
        }
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "drawer" => Ok(Self::Drawer),
            "open_shelf" | "open-shelf" | "shelf" => Ok(Self::OpenShelf),
            "pull_out" | "pull-out" | "pullout" => Ok(Self::PullOut),
            other => Err(format!("Unknown section type: {}", other)),
        }
    }
}

/// A named partition of the cabinet front and its share of the opening width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub section_type: SectionType,
    pub ratio: f64,
}

impl Section {
    pub fn new(name: impl Into<String>, section_type: SectionType, ratio: f64) -> Self {
        Self {
            name: name.into(),
            section_type,
            ratio,
        }
    }
}

/// Resolved opening of one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOpening {
    pub name: String,
    pub section_type: SectionType,
    /// Offset of the section's left edge from the cabinet's left edge
    pub offset_x: f64,
    pub width: f64,
    pub height: f64,
}

impl SectionOpening {
    /// Opening for this section with the given gap policy
    pub fn to_opening(&self, top_reveal: f64, bottom_reveal: f64, component_gap: f64) -> Opening {
        Opening::new(self.width, self.height).with_gaps(top_reveal, bottom_reveal, component_gap)
    }
}

/// One line of a face-frame cut list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePart {
    pub part: String,
    pub quantity: u32,
    pub width: f64,
    pub length: f64,
}
