//! Opening Layout Engine
//!
//! [`OpeningState`] owns the components of one opening and keeps their
//! positions derived from stacking order, sizes and the gap policy.
//!
//! Vertical openings stack from the bottom:
//! - bottom reveal
//! - component 0 (position = bottom reveal)
//! - gap
//! - component 1 (position = previous position + previous height + gap)
//! - ...
//! - top reveal
//!
//! Horizontal openings place components side by side from the left edge,
//! each `position_left` being the previous offset plus its width and the gap.
//! Every component sits on the bottom reveal.

use crate::types::{Component, ComponentType, LayoutDirection, Opening};
use crate::validation::MinimumHeights;
use cabinetkit_core::LayoutError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of adding a component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOutcome {
    pub component: Component,
    /// The components no longer fit the opening. The component is added anyway.
    pub overflow: bool,
}

/// Remaining space summary after the current stack
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemainingSpace {
    pub remaining_height: f64,
    pub remaining_width: f64,
    pub can_fit_drawer: bool,
    pub can_fit_shelf: bool,
}

/// One opening and its ordered components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningState {
    opening: Opening,
    components: Vec<Component>,
    next_id: u32,
}

impl OpeningState {
    pub fn new(opening: Opening) -> Self {
        Self {
            opening,
            components: Vec::new(),
            next_id: 1,
        }
    }

    /// Load existing component records as given
    ///
    /// Order indices are kept verbatim, duplicates included, so validation can
    /// report them. Positions are recomputed. Fails when a record already
    /// holds the last possible id.
    pub fn from_records(opening: Opening, records: Vec<Component>) -> Result<Self, LayoutError> {
        let next_id = match records.iter().map(|c| c.id).max() {
            Some(last) => last
                .checked_add(1)
                .ok_or(LayoutError::IdExhausted { last })?,
            None => 1,
        };
        let mut state = Self {
            opening,
            components: records,
            next_id,
        };
        state.recompute_positions();
        Ok(state)
    }

    pub fn opening(&self) -> &Opening {
        &self.opening
    }

    /// Components in stacking order, bottom first
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: u32) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Append a component at the top of the stack
    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        height: f64,
    ) -> Result<AddOutcome, LayoutError> {
        if !height.is_finite() {
            return Err(LayoutError::InvalidHeight { value: height });
        }

        let order_index = match self.components.iter().map(|c| c.order_index).max() {
            Some(last) => last
                .checked_add(1)
                .ok_or(LayoutError::OrderExhausted { last })?,
            None => 0,
        };
        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or(LayoutError::IdExhausted { last: id })?;
        let name = self.next_name(component_type);

        self.next_id = next_id;
        self.components.push(Component {
            id,
            component_type,
            name,
            height,
            width: None,
            position: 0.0,
            position_left: 0.0,
            order_index,
        });
        self.recompute_positions();

        let overflow = self.remaining_height() < 0.0
            || (self.opening.layout_direction == LayoutDirection::Horizontal
                && self.remaining_width() < 0.0);
        if overflow {
            warn!(
                id,
                remaining_height = self.remaining_height(),
                remaining_width = self.remaining_width(),
                "Added component overflows opening"
            );
        } else {
            debug!(id, %component_type, height, "Added component");
        }

        let component = self
            .component(id)
            .cloned()
            .ok_or(LayoutError::ComponentNotFound { id })?;
        Ok(AddOutcome {
            component,
            overflow,
        })
    }

    /// Remove a component and compact the stacking order
    pub fn remove_component(&mut self, id: u32) -> Result<Component, LayoutError> {
        let index = self.index_of(id)?;
        let removed = self.components.remove(index);
        self.compact_order();
        self.recompute_positions();
        debug!(id, "Removed component");
        Ok(removed)
    }

    /// Swap with the component above. Returns `false` at the top.
    pub fn move_up(&mut self, id: u32) -> Result<bool, LayoutError> {
        let index = self.index_of(id)?;
        if index + 1 >= self.components.len() {
            return Ok(false);
        }
        self.swap_order(index, index + 1);
        debug!(id, "Moved component up");
        Ok(true)
    }

    /// Swap with the component below. Returns `false` at the bottom.
    pub fn move_down(&mut self, id: u32) -> Result<bool, LayoutError> {
        let index = self.index_of(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap_order(index, index - 1);
        debug!(id, "Moved component down");
        Ok(true)
    }

    /// Replace the reveals and gap, then re-derive positions
    pub fn update_gap_settings(
        &mut self,
        top_reveal: f64,
        bottom_reveal: f64,
        component_gap: f64,
    ) -> Result<(), LayoutError> {
        for (name, value) in [
            ("top_reveal", top_reveal),
            ("bottom_reveal", bottom_reveal),
            ("component_gap", component_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidGap {
                    name: name.to_string(),
                    value,
                });
            }
        }

        self.opening.top_reveal = top_reveal;
        self.opening.bottom_reveal = bottom_reveal;
        self.opening.component_gap = component_gap;
        self.recompute_positions();
        Ok(())
    }

    /// Switch between stacked and side-by-side placement
    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.opening.layout_direction = layout_direction;
        self.recompute_positions();
        debug!(direction = layout_direction.as_str(), "Changed layout direction");
    }

    /// Set a component's front width. `None` spans the full opening width.
    pub fn set_component_width(&mut self, id: u32, width: Option<f64>) -> Result<(), LayoutError> {
        if let Some(value) = width {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidWidth { value });
            }
        }
        let index = self.index_of(id)?;
        self.components[index].width = width;
        self.recompute_positions();
        debug!(id, ?width, "Set component width");
        Ok(())
    }

    /// Re-derive every position from order, sizes and gaps
    pub fn recompute_positions(&mut self) {
        self.components.sort_by_key(|c| c.order_index);

        let gap = self.opening.component_gap;
        match self.opening.layout_direction {
            LayoutDirection::Vertical => {
                let mut cursor = self.opening.bottom_reveal;
                for component in &mut self.components {
                    component.position = cursor;
                    component.position_left = 0.0;
                    cursor += component.height + gap;
                }
            }
            LayoutDirection::Horizontal => {
                let mut cursor = 0.0;
                for component in &mut self.components {
                    component.position = self.opening.bottom_reveal;
                    component.position_left = cursor;
                    cursor += component.width_in(&self.opening) + gap;
                }
            }
        }
    }

    /// Reveals plus the vertical extent of the components
    ///
    /// Stacked components add their heights and the gaps between them. Side by
    /// side, the tallest component counts.
    pub fn consumed_height(&self) -> f64 {
        let extent = match self.opening.layout_direction {
            LayoutDirection::Vertical => {
                let heights: f64 = self.components.iter().map(|c| c.height).sum();
                heights + self.opening.total_gaps(self.components.len())
            }
            LayoutDirection::Horizontal => self
                .components
                .iter()
                .map(|c| c.height)
                .fold(0.0, f64::max),
        };
        self.opening.top_reveal + self.opening.bottom_reveal + extent
    }

    /// Opening height minus consumed height. Negative when overflowing.
    pub fn remaining_height(&self) -> f64 {
        self.opening.height - self.consumed_height()
    }

    /// Horizontal extent of the components
    ///
    /// Side by side, widths plus the gaps between them. Stacked, the widest
    /// component.
    pub fn consumed_width(&self) -> f64 {
        let widths = self.components.iter().map(|c| c.width_in(&self.opening));
        match self.opening.layout_direction {
            LayoutDirection::Vertical => widths.fold(0.0, f64::max),
            LayoutDirection::Horizontal => {
                widths.sum::<f64>() + self.opening.total_gaps(self.components.len())
            }
        }
    }

    /// Opening width minus consumed width. Negative when overflowing.
    pub fn remaining_width(&self) -> f64 {
        self.opening.width - self.consumed_width()
    }

    /// Share of the opening height in use, rounded to one decimal
    pub fn usage_percentage(&self) -> f64 {
        if self.opening.height <= 0.0 {
            return 0.0;
        }
        (self.consumed_height() / self.opening.height * 1000.0).round() / 10.0
    }

    /// Whether a component of this type and height fits in the remaining space
    ///
    /// The required height is raised to the type's minimum. Stacked, it
    /// includes one gap when the stack already has components. Side by side,
    /// it must fit between the reveals and some width must be left past the gap.
    pub fn would_fit(
        &self,
        component_type: ComponentType,
        height: f64,
        minimums: &MinimumHeights,
    ) -> bool {
        let required = height.max(minimums.for_type(component_type));
        let gap = if self.components.is_empty() {
            0.0
        } else {
            self.opening.component_gap
        };
        match self.opening.layout_direction {
            LayoutDirection::Vertical => self.remaining_height() >= required + gap,
            LayoutDirection::Horizontal => {
                self.opening.usable_height() >= required && self.remaining_width() > gap
            }
        }
    }

    pub fn remaining_space(&self, minimums: &MinimumHeights) -> RemainingSpace {
        RemainingSpace {
            remaining_height: self.remaining_height(),
            remaining_width: self.remaining_width(),
            can_fit_drawer: self.would_fit(ComponentType::Drawer, 0.0, minimums),
            can_fit_shelf: self.would_fit(ComponentType::Shelf, 0.0, minimums),
        }
    }

    /// Replace heights in stacking order (used by auto-arrange)
    pub(crate) fn apply_arrangement(&mut self, arranged: Vec<Component>) {
        self.components = arranged;
        self.recompute_positions();
    }

    /// Prefix plus one past the highest number already used for this type
    fn next_name(&self, component_type: ComponentType) -> String {
        let prefix = component_type.name_prefix();
        let highest = self
            .components
            .iter()
            .filter(|c| c.component_type == component_type)
            .filter_map(|c| c.name.strip_prefix(prefix)?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{}", prefix, highest.saturating_add(1))
    }

    fn index_of(&self, id: u32) -> Result<usize, LayoutError> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or(LayoutError::ComponentNotFound { id })
    }

    fn swap_order(&mut self, a: usize, b: usize) {
        let order_a = self.components[a].order_index;
        self.components[a].order_index = self.components[b].order_index;
        self.components[b].order_index = order_a;
        self.components.swap(a, b);
        self.recompute_positions();
    }

    fn compact_order(&mut self) {
        self.components.sort_by_key(|c| c.order_index);
        for (index, component) in self.components.iter_mut().enumerate() {
            component.order_index = index as u32;
        }
    }
}
