use crate::approx;
use cabinetkit_core::LayoutError;
use cabinetkit_layout::{
    Component, ComponentType, LayoutDirection, MinimumHeights, Opening, OpeningState,
};

fn drawer_bank() -> OpeningState {
    let opening = Opening::new(18.0, 30.0).with_gaps(0.5, 0.5, 0.125);
    let mut state = OpeningState::new(opening);
    state.add_component(ComponentType::Drawer, 10.0).unwrap();
    state.add_component(ComponentType::Drawer, 8.0).unwrap();
    state.add_component(ComponentType::Drawer, 6.0).unwrap();
    state
}

fn ids(state: &OpeningState) -> Vec<u32> {
    state.components().iter().map(|c| c.id).collect()
}

#[test]
fn test_positions_stack_from_bottom_reveal() {
    let state = drawer_bank();
    let positions: Vec<f64> = state.components().iter().map(|c| c.position).collect();
    assert!(approx(positions[0], 0.5));
    assert!(approx(positions[1], 10.625));
    assert!(approx(positions[2], 18.75));
}

#[test]
fn test_recompute_is_idempotent() {
    let mut state = drawer_bank();
    state.recompute_positions();
    let first = state.clone();
    state.recompute_positions();
    assert_eq!(state, first);
}

#[test]
fn test_add_appends_at_top_and_keeps_order() {
    let mut state = drawer_bank();
    let before = ids(&state);

    let outcome = state.add_component(ComponentType::Shelf, 2.0).unwrap();
    assert_eq!(outcome.component.order_index, 3);
    assert!(!outcome.overflow);

    let after = ids(&state);
    assert_eq!(&after[..3], &before[..]);
    assert_eq!(after[3], outcome.component.id);
}

#[test]
fn test_add_reports_overflow_but_keeps_component() {
    let opening = Opening::new(18.0, 30.0).with_gaps(0.5, 0.5, 0.125);
    let mut state = OpeningState::new(opening);
    state.add_component(ComponentType::Drawer, 10.0).unwrap();
    state.add_component(ComponentType::Drawer, 10.0).unwrap();
    let outcome = state.add_component(ComponentType::Drawer, 10.0).unwrap();

    assert!(outcome.overflow);
    assert_eq!(state.len(), 3);
    assert!(approx(state.usage_percentage(), 104.2));
    assert!(state.remaining_height() < 0.0);
    assert!(approx(state.remaining_height(), -1.25));
}

#[test]
fn test_move_boundaries_are_noops() {
    let mut state = drawer_bank();
    let top = state.components()[2].id;
    let bottom = state.components()[0].id;
    let before = state.clone();

    assert!(!state.move_up(top).unwrap());
    assert!(!state.move_down(bottom).unwrap());
    assert_eq!(state, before);
}

#[test]
fn test_move_up_swaps_with_neighbor() {
    let mut state = drawer_bank();
    let [a, b, c]: [u32; 3] = ids(&state).try_into().unwrap();

    assert!(state.move_up(a).unwrap());
    assert_eq!(ids(&state), vec![b, a, c]);

    let moved = state.component(a).unwrap();
    assert_eq!(moved.order_index, 1);
    assert!(approx(moved.position, 0.5 + 8.0 + 0.125));
}

#[test]
fn test_move_down_swaps_with_neighbor() {
    let mut state = drawer_bank();
    let [a, b, c]: [u32; 3] = ids(&state).try_into().unwrap();

    assert!(state.move_down(c).unwrap());
    assert_eq!(ids(&state), vec![a, c, b]);
}

#[test]
fn test_remove_compacts_order() {
    let mut state = drawer_bank();
    let middle = state.components()[1].id;

    let removed = state.remove_component(middle).unwrap();
    assert!(approx(removed.height, 8.0));

    let orders: Vec<u32> = state.components().iter().map(|c| c.order_index).collect();
    assert_eq!(orders, vec![0, 1]);
    assert!(approx(state.components()[1].position, 10.625));
}

#[test]
fn test_unknown_component_id() {
    let mut state = drawer_bank();
    assert_eq!(
        state.remove_component(99),
        Err(LayoutError::ComponentNotFound { id: 99 })
    );
    assert!(state.move_up(99).is_err());
    assert!(state.move_down(99).is_err());
}

#[test]
fn test_ids_are_not_reused_after_remove() {
    let mut state = drawer_bank();
    let last = state.components()[2].id;
    state.remove_component(last).unwrap();
    let outcome = state.add_component(ComponentType::Door, 5.0).unwrap();
    assert!(outcome.component.id > last);
}

#[test]
fn test_update_gap_settings_rederives_positions() {
    let mut state = drawer_bank();
    state.update_gap_settings(0.25, 1.0, 0.25).unwrap();

    assert!(approx(state.components()[0].position, 1.0));
    assert!(approx(state.components()[1].position, 11.25));
    assert!(approx(state.consumed_height(), 0.25 + 1.0 + 24.0 + 0.5));
}

#[test]
fn test_update_gap_settings_rejects_negative() {
    let mut state = drawer_bank();
    let before = state.clone();
    let err = state.update_gap_settings(0.125, -0.1, 0.125).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidGap { .. }));
    assert_eq!(state, before);
}

#[test]
fn test_from_records_sorts_and_keeps_duplicates() {
    let opening = Opening::new(18.0, 30.0);
    let records = vec![
        Component {
            id: 7,
            component_type: ComponentType::Door,
            name: "D1".to_string(),
            height: 12.0,
            width: None,
            position: 0.0,
            position_left: 0.0,
            order_index: 1,
        },
        Component {
            id: 3,
            component_type: ComponentType::Drawer,
            name: "DR1".to_string(),
            height: 6.0,
            width: None,
            position: 42.0,
            position_left: 0.0,
            order_index: 0,
        },
        Component {
            id: 4,
            component_type: ComponentType::Drawer,
            name: "DR2".to_string(),
            height: 6.0,
            width: None,
            position: 0.0,
            position_left: 0.0,
            order_index: 1,
        },
    ];
    let mut state = OpeningState::from_records(opening, records).unwrap();

    assert_eq!(ids(&state), vec![3, 7, 4]);
    assert!(approx(state.components()[0].position, 0.125));

    let outcome = state.add_component(ComponentType::Shelf, 5.5).unwrap();
    assert_eq!(outcome.component.id, 8);
    assert_eq!(outcome.component.order_index, 2);
}

#[test]
fn test_usage_of_zero_height_opening() {
    let state = OpeningState::new(Opening::new(18.0, 0.0));
    assert_eq!(state.usage_percentage(), 0.0);
}

#[test]
fn test_would_fit_accounts_for_minimum_and_gap() {
    let minimums = MinimumHeights::default();
    let mut state = OpeningState::new(Opening::new(18.0, 20.0));

    assert!(state.would_fit(ComponentType::Drawer, 3.0, &minimums));

    state.add_component(ComponentType::Door, 15.0).unwrap();
    assert!(state.would_fit(ComponentType::Drawer, 4.5, &minimums));
    assert!(!state.would_fit(ComponentType::Drawer, 4.7, &minimums));
    assert!(!state.would_fit(ComponentType::Shelf, 0.0, &minimums));

    let space = state.remaining_space(&minimums);
    assert!(space.can_fit_drawer);
    assert!(!space.can_fit_shelf);
    assert!(approx(space.remaining_height, 4.75));
}

fn record(id: u32, order_index: u32) -> Component {
    Component {
        id,
        component_type: ComponentType::Drawer,
        name: format!("DR{}", id),
        height: 6.0,
        width: None,
        position: 0.0,
        position_left: 0.0,
        order_index,
    }
}

#[test]
fn test_from_records_with_last_id_is_rejected() {
    let opening = Opening::new(18.0, 30.0);
    let err = OpeningState::from_records(opening, vec![record(u32::MAX, 0)]).unwrap_err();
    assert_eq!(err, LayoutError::IdExhausted { last: u32::MAX });
}

#[test]
fn test_add_after_last_order_index_is_rejected() {
    let opening = Opening::new(18.0, 30.0);
    let mut state = OpeningState::from_records(opening, vec![record(1, u32::MAX)]).unwrap();
    let before = state.clone();

    let err = state.add_component(ComponentType::Shelf, 6.0).unwrap_err();
    assert_eq!(err, LayoutError::OrderExhausted { last: u32::MAX });
    assert_eq!(state, before);
}

#[test]
fn test_add_with_last_id_is_rejected() {
    let opening = Opening::new(18.0, 30.0);
    let mut state = OpeningState::from_records(opening, vec![record(u32::MAX - 1, 0)]).unwrap();
    let before = state.clone();

    let err = state.add_component(ComponentType::Drawer, 6.0).unwrap_err();
    assert_eq!(err, LayoutError::IdExhausted { last: u32::MAX });
    assert_eq!(state, before);
}

fn paired_doors() -> OpeningState {
    let opening = Opening::new(30.0, 24.0).with_direction(LayoutDirection::Horizontal);
    let mut state = OpeningState::new(opening);
    let left = state.add_component(ComponentType::Door, 23.75).unwrap();
    let right = state.add_component(ComponentType::Door, 23.75).unwrap();
    state
        .set_component_width(left.component.id, Some(14.9375))
        .unwrap();
    state
        .set_component_width(right.component.id, Some(14.9375))
        .unwrap();
    state
}

#[test]
fn test_side_by_side_positions_from_left() {
    let state = paired_doors();
    let components = state.components();

    assert!(approx(components[0].position_left, 0.0));
    assert!(approx(components[1].position_left, 14.9375 + 0.125));
    assert!(components.iter().all(|c| approx(c.position, 0.125)));
    assert!(approx(state.consumed_width(), 30.0));
    assert!(approx(state.remaining_width(), 0.0));
    assert!(approx(state.consumed_height(), 24.0));
}

#[test]
fn test_changing_direction_rederives_positions() {
    let mut state = paired_doors();
    state.set_layout_direction(LayoutDirection::Vertical);

    let components = state.components();
    assert!(components.iter().all(|c| c.position_left == 0.0));
    assert!(approx(components[1].position, 0.125 + 23.75 + 0.125));
    assert!(approx(state.consumed_width(), 14.9375));
}

#[test]
fn test_full_width_default_in_side_by_side() {
    let opening = Opening::new(30.0, 24.0).with_direction(LayoutDirection::Horizontal);
    let mut state = OpeningState::new(opening);
    state.add_component(ComponentType::Door, 20.0).unwrap();
    assert!(approx(state.remaining_width(), 0.0));

    state.add_component(ComponentType::Door, 20.0).unwrap();
    assert!(approx(state.consumed_width(), 60.125));
    assert!(state.remaining_width() < 0.0);
}

#[test]
fn test_invalid_width_rejected() {
    let mut state = paired_doors();
    let before = state.clone();
    let id = state.components()[0].id;

    assert_eq!(
        state.set_component_width(id, Some(0.0)).unwrap_err(),
        LayoutError::InvalidWidth { value: 0.0 }
    );
    assert!(state.set_component_width(id, Some(f64::INFINITY)).is_err());
    assert_eq!(
        state.set_component_width(99, Some(10.0)).unwrap_err(),
        LayoutError::ComponentNotFound { id: 99 }
    );
    assert_eq!(state, before);
}

#[test]
fn test_would_fit_side_by_side() {
    let minimums = MinimumHeights::default();
    let opening = Opening::new(30.0, 24.0).with_direction(LayoutDirection::Horizontal);
    let mut state = OpeningState::new(opening);
    let door = state.add_component(ComponentType::Door, 23.75).unwrap();
    state.set_component_width(door.component.id, Some(15.0)).unwrap();

    assert!(state.would_fit(ComponentType::Door, 23.75, &minimums));
    assert!(!state.would_fit(ComponentType::Door, 23.8, &minimums));

    let space = state.remaining_space(&minimums);
    assert!(approx(space.remaining_width, 15.0));
}
