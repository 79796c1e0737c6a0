//! Opening Configurator
//!
//! Thin command adapter a UI drives: each command mutates the
//! [`OpeningState`], re-runs validation and leaves a fresh [`OpeningView`]
//! ready to render. Failed commands leave the state unchanged.

use crate::arrange::{StrategyRegistry, DEFAULT_STRATEGY};
use crate::opening::{AddOutcome, OpeningState, RemainingSpace};
use crate::types::{Component, ComponentType, LayoutDirection, Opening};
use crate::validation::{validate, ValidationPolicy, ValidationReport};
use cabinetkit_core::LayoutError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Suggested heights when the add dialog opens. Doors default to the full
/// opening height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddDefaults {
    pub drawer: f64,
    pub shelf: f64,
    pub pullout: f64,
    pub false_front: f64,
}

impl Default for AddDefaults {
    fn default() -> Self {
        Self {
            drawer: 6.0,
            shelf: 5.5,
            pullout: 12.0,
            false_front: 4.0,
        }
    }
}

impl AddDefaults {
    pub fn height_for(&self, component_type: ComponentType, opening: &Opening) -> f64 {
        match component_type {
            ComponentType::Drawer => self.drawer,
            ComponentType::Shelf => self.shelf,
            ComponentType::Door => opening.height,
            ComponentType::Pullout => self.pullout,
            ComponentType::FalseFront => self.false_front,
        }
    }
}

/// An open add dialog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub height: f64,
}

/// What the UI draws for one component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub height: f64,
    /// Effective width, the opening width unless set
    pub width: f64,
    pub position: f64,
    pub position_left: f64,
}

impl ComponentView {
    pub fn new(component: &Component, opening: &Opening) -> Self {
        Self {
            id: component.id,
            name: component.name.clone(),
            component_type: component.component_type,
            height: component.height,
            width: component.width_in(opening),
            position: component.position,
            position_left: component.position_left,
        }
    }
}

/// Opening-level output for the status badge and usage bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningView {
    pub layout_direction: LayoutDirection,
    pub components: Vec<ComponentView>,
    pub usage_percentage: f64,
    pub remaining_height: f64,
    pub remaining_width: f64,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub status: String,
}

pub struct OpeningConfigurator {
    state: OpeningState,
    registry: StrategyRegistry,
    policy: ValidationPolicy,
    add_defaults: AddDefaults,
    pending_add: Option<AddRequest>,
    selected_strategy: String,
    report: ValidationReport,
}

impl OpeningConfigurator {
    pub fn new(
        state: OpeningState,
        registry: StrategyRegistry,
        policy: ValidationPolicy,
        add_defaults: AddDefaults,
    ) -> Self {
        let report = validate(&state, &policy);
        Self {
            state,
            registry,
            policy,
            add_defaults,
            pending_add: None,
            selected_strategy: DEFAULT_STRATEGY.to_string(),
            report,
        }
    }

    /// Configurator with built-in strategies and default policies
    pub fn with_defaults(state: OpeningState) -> Self {
        Self::new(
            state,
            StrategyRegistry::default(),
            ValidationPolicy::default(),
            AddDefaults::default(),
        )
    }

    pub fn state(&self) -> &OpeningState {
        &self.state
    }

    pub fn into_state(self) -> OpeningState {
        self.state
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn pending_add(&self) -> Option<&AddRequest> {
        self.pending_add.as_ref()
    }

    pub fn selected_strategy(&self) -> &str {
        &self.selected_strategy
    }

    pub fn select_strategy(&mut self, name: &str) -> Result<(), LayoutError> {
        if !self.registry.contains(name) {
            return Err(LayoutError::UnknownStrategy {
                name: name.to_string(),
            });
        }
        self.selected_strategy = name.to_string();
        Ok(())
    }

    /// `(name, label)` pairs of the registered strategies
    pub fn strategies(&self) -> Vec<(String, String)> {
        self.registry.catalog()
    }

    /// Open the add dialog with the type's suggested height
    pub fn open_add_modal(&mut self, component_type: ComponentType) -> AddRequest {
        let request = AddRequest {
            component_type,
            height: self
                .add_defaults
                .height_for(component_type, self.state.opening()),
        };
        self.pending_add = Some(request);
        request
    }

    /// Change the height in the open add dialog
    pub fn set_pending_height(&mut self, height: f64) -> Result<(), LayoutError> {
        let request = self.pending_add.as_mut().ok_or(LayoutError::NoPendingAdd)?;
        request.height = height;
        Ok(())
    }

    /// Add the component described by the open add dialog and close it
    pub fn confirm_add(&mut self) -> Result<AddOutcome, LayoutError> {
        let request = self.pending_add.ok_or(LayoutError::NoPendingAdd)?;
        let outcome = self.add_component(request.component_type, request.height)?;
        self.pending_add = None;
        Ok(outcome)
    }

    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        height: f64,
    ) -> Result<AddOutcome, LayoutError> {
        let outcome = self.state.add_component(component_type, height)?;
        self.revalidate("add_component");
        Ok(outcome)
    }

    pub fn remove_component(&mut self, id: u32) -> Result<Component, LayoutError> {
        let removed = self.state.remove_component(id)?;
        self.revalidate("remove_component");
        Ok(removed)
    }

    pub fn move_up(&mut self, id: u32) -> Result<bool, LayoutError> {
        let moved = self.state.move_up(id)?;
        self.revalidate("move_up");
        Ok(moved)
    }

    pub fn move_down(&mut self, id: u32) -> Result<bool, LayoutError> {
        let moved = self.state.move_down(id)?;
        self.revalidate("move_down");
        Ok(moved)
    }

    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.state.set_layout_direction(layout_direction);
        self.revalidate("set_layout_direction");
    }

    pub fn set_component_width(&mut self, id: u32, width: Option<f64>) -> Result<(), LayoutError> {
        self.state.set_component_width(id, width)?;
        self.revalidate("set_component_width");
        Ok(())
    }

    /// Apply a named strategy and remember it as the selected one
    pub fn auto_arrange(&mut self, strategy_name: &str) -> Result<(), LayoutError> {
        self.state.auto_arrange(&self.registry, strategy_name)?;
        self.selected_strategy = strategy_name.to_string();
        self.revalidate("auto_arrange");
        Ok(())
    }

    /// Apply the currently selected strategy
    pub fn auto_arrange_selected(&mut self) -> Result<(), LayoutError> {
        let name = self.selected_strategy.clone();
        self.auto_arrange(&name)
    }

    pub fn update_gap_settings(
        &mut self,
        top_reveal: f64,
        bottom_reveal: f64,
        component_gap: f64,
    ) -> Result<(), LayoutError> {
        self.state
            .update_gap_settings(top_reveal, bottom_reveal, component_gap)?;
        self.revalidate("update_gap_settings");
        Ok(())
    }

    pub fn would_fit(&self, component_type: ComponentType, height: f64) -> bool {
        self.state
            .would_fit(component_type, height, &self.policy.minimum_heights)
    }

    pub fn remaining_space(&self) -> RemainingSpace {
        self.state.remaining_space(&self.policy.minimum_heights)
    }

    pub fn view(&self) -> OpeningView {
        let opening = self.state.opening();
        OpeningView {
            layout_direction: opening.layout_direction,
            components: self
                .state
                .components()
                .iter()
                .map(|c| ComponentView::new(c, opening))
                .collect(),
            usage_percentage: self.state.usage_percentage(),
            remaining_height: self.state.remaining_height(),
            remaining_width: self.state.remaining_width(),
            is_valid: self.report.is_valid,
            errors: self.report.errors.clone(),
            warnings: self.report.warnings.clone(),
            status: self.report.status().to_string(),
        }
    }

    fn revalidate(&mut self, command: &str) {
        self.report = validate(&self.state, &self.policy);
        if self.report.is_valid {
            debug!(command, status = %self.report.status(), "Opening revalidated");
        } else {
            warn!(
                command,
                errors = self.report.errors.len(),
                "Opening has validation errors"
            );
        }
    }
}
