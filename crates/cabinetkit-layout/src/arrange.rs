//! Auto-Arrange Strategy Selector
//!
//! Strategies are named, swappable policies registered in a
//! [`StrategyRegistry`]. A strategy receives the opening and the components in
//! stacking order and returns one height per component. Positions are always
//! re-derived afterwards. Only vertically stacked openings can be arranged.
//!
//! Strategies:
//! - `stack_from_bottom`: keep heights, compact the stacking order
//! - `equal_distribution`: divide the fill height equally
//! - `proportional`: scale existing heights to the fill height
//! - `weighted_distribution`: divide the fill height by per-type weights

use crate::opening::OpeningState;
use crate::types::{Component, ComponentType, LayoutDirection, Opening};
use cabinetkit_core::LayoutError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strategy used when none is selected
pub const DEFAULT_STRATEGY: &str = "stack_from_bottom";

/// Opening data a strategy sizes components against
#[derive(Debug, Clone, Copy)]
pub struct ArrangeContext {
    pub opening: Opening,
    pub count: usize,
}

impl ArrangeContext {
    pub fn new(opening: Opening, count: usize) -> Self {
        Self { opening, count }
    }

    /// Opening height between the reveals
    pub fn usable_height(&self) -> f64 {
        self.opening.usable_height()
    }

    pub fn total_gaps(&self) -> f64 {
        self.opening.total_gaps(self.count)
    }

    /// Height left for the components themselves
    pub fn fill_height(&self) -> f64 {
        self.usable_height() - self.total_gaps()
    }
}

/// A named auto-arrange policy
pub trait ArrangeStrategy: Send + Sync {
    /// Registry key, e.g. `equal_distribution`
    fn name(&self) -> &str;

    /// Human readable label for strategy pickers
    fn label(&self) -> &str;

    /// Whether the returned heights must sum exactly to the fill height
    fn fills_opening(&self) -> bool {
        true
    }

    /// One height per component, in the order given
    fn heights(&self, ctx: &ArrangeContext, components: &[Component]) -> Vec<f64>;
}

/// Keeps heights as they are; only the order is compacted
#[derive(Debug, Default, Clone, Copy)]
pub struct StackFromBottom;

impl ArrangeStrategy for StackFromBottom {
    fn name(&self) -> &str {
        "stack_from_bottom"
    }

    fn label(&self) -> &str {
        "Stack from Bottom (Drawer Banks)"
    }

    fn fills_opening(&self) -> bool {
        false
    }

    fn heights(&self, _ctx: &ArrangeContext, components: &[Component]) -> Vec<f64> {
        components.iter().map(|c| c.height).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EqualDistribution;

impl ArrangeStrategy for EqualDistribution {
    fn name(&self) -> &str {
        "equal_distribution"
    }

    fn label(&self) -> &str {
        "Equal Heights"
    }

    fn heights(&self, ctx: &ArrangeContext, components: &[Component]) -> Vec<f64> {
        equal_heights(ctx.fill_height(), components.len())
    }
}

/// Keeps each component's share of the current total
#[derive(Debug, Default, Clone, Copy)]
pub struct Proportional;

impl ArrangeStrategy for Proportional {
    fn name(&self) -> &str {
        "proportional"
    }

    fn label(&self) -> &str {
        "Proportional to Current Heights"
    }

    fn heights(&self, ctx: &ArrangeContext, components: &[Component]) -> Vec<f64> {
        let weights: Vec<f64> = components.iter().map(|c| c.height.max(0.0)).collect();
        weighted_heights(ctx.fill_height(), &weights)
    }
}

/// Relative share each component type receives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeWeights {
    pub drawer: f64,
    pub shelf: f64,
    pub door: f64,
    pub pullout: f64,
    pub false_front: f64,
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            drawer: 1.0,
            shelf: 1.0,
            door: 2.0,
            pullout: 1.5,
            false_front: 0.5,
        }
    }
}

impl TypeWeights {
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

/// Larger component types (doors, pull-outs) get proportionally more space
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedDistribution {
    pub weights: TypeWeights,
}

impl ArrangeStrategy for WeightedDistribution {
    fn name(&self) -> &str {
        "weighted_distribution"
    }

    fn label(&self) -> &str {
        "Weighted by Component Type"
    }

    fn heights(&self, ctx: &ArrangeContext, components: &[Component]) -> Vec<f64> {
        let weights: Vec<f64> = components
            .iter()
            .map(|c| self.weights.for_type(c.component_type).max(0.0))
            .collect();
        weighted_heights(ctx.fill_height(), &weights)
    }
}

fn equal_heights(fill: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![fill / count as f64; count]
}

fn weighted_heights(fill: f64, weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return equal_heights(fill, weights.len());
    }
    weights.iter().map(|w| fill * w / total).collect()
}

/// Name-keyed set of strategies, in registration order
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn ArrangeStrategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_weights(TypeWeights::default())
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

impl StrategyRegistry {
    /// A registry with no strategies
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The built-in strategies, with custom type weights
    pub fn with_weights(weights: TypeWeights) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(StackFromBottom));
        registry.register(Box::new(EqualDistribution));
        registry.register(Box::new(Proportional));
        registry.register(Box::new(WeightedDistribution { weights }));
        registry
    }

    /// Add a strategy, replacing any with the same name
    pub fn register(&mut self, strategy: Box<dyn ArrangeStrategy>) {
        match self
            .strategies
            .iter()
            .position(|s| s.name() == strategy.name())
        {
            Some(index) => self.strategies[index] = strategy,
            None => self.strategies.push(strategy),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn ArrangeStrategy> {
        self.strategies
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// `(name, label)` pairs for strategy pickers
    pub fn catalog(&self) -> Vec<(String, String)> {
        self.strategies
            .iter()
            .map(|s| (s.name().to_string(), s.label().to_string()))
            .collect()
    }
}

/// Apply a named strategy to a component list
///
/// Returns the components in stacking order with compacted order indices,
/// new heights and re-derived positions. The input is never modified; an
/// unknown strategy returns [`LayoutError::UnknownStrategy`] and a strategy
/// returning the wrong number of heights returns
/// [`LayoutError::ArrangementMismatch`].
pub fn auto_arrange(
    components: &[Component],
    opening: &Opening,
    strategy_name: &str,
    registry: &StrategyRegistry,
) -> Result<Vec<Component>, LayoutError> {
    let strategy = registry
        .get(strategy_name)
        .ok_or_else(|| LayoutError::UnknownStrategy {
            name: strategy_name.to_string(),
        })?;

    if opening.layout_direction != LayoutDirection::Vertical {
        return Err(LayoutError::UnsupportedLayout {
            direction: opening.layout_direction.as_str().to_string(),
        });
    }

    if components.is_empty() {
        return Ok(Vec::new());
    }

    let mut arranged = components.to_vec();
    arranged.sort_by_key(|c| c.order_index);
    for (index, component) in arranged.iter_mut().enumerate() {
        component.order_index = index as u32;
    }

    let ctx = ArrangeContext::new(*opening, arranged.len());
    let heights = strategy.heights(&ctx, &arranged);
    if heights.len() != arranged.len() {
        return Err(LayoutError::ArrangementMismatch {
            name: strategy_name.to_string(),
            expected: arranged.len(),
            got: heights.len(),
        });
    }
    for (component, height) in arranged.iter_mut().zip(heights) {
        component.height = height;
    }

    if strategy.fills_opening() {
        // Last component absorbs rounding so the stack fills exactly
        let fill = ctx.fill_height();
        let last = arranged.len() - 1;
        let others: f64 = arranged[..last].iter().map(|c| c.height).sum();
        arranged[last].height = fill - others;
    }

    let mut cursor = opening.bottom_reveal;
    for component in &mut arranged {
        component.position = cursor;
        component.position_left = 0.0;
        cursor += component.height + opening.component_gap;
    }

    debug!(
        strategy = strategy_name,
        count = arranged.len(),
        "Auto-arranged components"
    );
    Ok(arranged)
}

impl OpeningState {
    /// Apply a named strategy to this opening
    ///
    /// On error the opening is left untouched.
    pub fn auto_arrange(
        &mut self,
        registry: &StrategyRegistry,
        strategy_name: &str,
    ) -> Result<(), LayoutError> {
        let arranged = auto_arrange(self.components(), self.opening(), strategy_name, registry)?;
        self.apply_arrangement(arranged);
        Ok(())
    }
}
