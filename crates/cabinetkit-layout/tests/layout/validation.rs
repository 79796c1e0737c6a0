use cabinetkit_layout::{
    validate, Component, ComponentType, LayoutDirection, Opening, OpeningState, ValidationPolicy,
    ValidationStatus,
};

fn opening_30() -> OpeningState {
    OpeningState::new(Opening::new(18.0, 30.0))
}

#[test]
fn test_valid_layout() {
    let mut state = opening_30();
    state.add_component(ComponentType::Door, 15.0).unwrap();
    state.add_component(ComponentType::Drawer, 6.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.status(), ValidationStatus::Valid);
}

#[test]
fn test_overflow_is_an_error() {
    let opening = Opening::new(18.0, 30.0).with_gaps(0.5, 0.5, 0.125);
    let mut state = OpeningState::new(opening);
    for _ in 0..3 {
        state.add_component(ComponentType::Drawer, 10.0).unwrap();
    }

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert!(report.has_overflow());
    assert!(report.errors.iter().any(|e| e.contains("overflow")));
    assert_eq!(report.status(), ValidationStatus::Errors(1));
}

#[test]
fn test_near_capacity_warning() {
    let mut state = opening_30();
    state.add_component(ComponentType::Door, 28.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("94.2%"));
    assert_eq!(report.status().to_string(), "1 Warning");
}

#[test]
fn test_overflow_within_tolerance_only_warns() {
    let mut state = opening_30();
    state.add_component(ComponentType::Door, 29.77).unwrap();
    assert!(state.remaining_height() < 0.0);

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert!(!report.has_overflow());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_tighter_tolerance_turns_rounding_into_error() {
    let mut state = opening_30();
    state.add_component(ComponentType::Door, 29.77).unwrap();

    let policy = ValidationPolicy {
        overflow_tolerance: 0.0,
        ..ValidationPolicy::default()
    };
    assert!(validate(&state, &policy).has_overflow());
}

#[test]
fn test_zero_height_component_is_an_error() {
    let mut state = opening_30();
    state.add_component(ComponentType::Shelf, 0.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert!(report.errors[0].contains("S1"));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_duplicate_order_is_an_error() {
    let records = vec![
        Component {
            id: 1,
            component_type: ComponentType::Drawer,
            name: "DR1".to_string(),
            height: 6.0,
            width: None,
            position: 0.0,
            position_left: 0.0,
            order_index: 0,
        },
        Component {
            id: 2,
            component_type: ComponentType::Drawer,
            name: "DR2".to_string(),
            height: 6.0,
            width: None,
            position: 0.0,
            position_left: 0.0,
            order_index: 0,
        },
    ];
    let state = OpeningState::from_records(Opening::new(18.0, 30.0), records).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec!["Duplicate stacking order 0 shared by DR1 and DR2".to_string()]
    );
}

#[test]
fn test_drawer_below_minimum_warns() {
    let mut state = opening_30();
    state.add_component(ComponentType::Drawer, 3.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("below minimum"));
}

#[test]
fn test_drawers_under_doors_warn() {
    let mut state = opening_30();
    state.add_component(ComponentType::Drawer, 6.0).unwrap();
    state.add_component(ComponentType::Door, 10.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert_eq!(
        report.warnings,
        vec!["Mixed stack: drawers are typically positioned above doors".to_string()]
    );
}

#[test]
fn test_drawers_over_doors_do_not_warn() {
    let mut state = opening_30();
    state.add_component(ComponentType::Door, 10.0).unwrap();
    state.add_component(ComponentType::Drawer, 6.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_zero_height_opening_is_an_error() {
    let state = OpeningState::new(Opening::new(18.0, 0.0));

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert!(report.errors[0].starts_with("Opening height"));
}

#[test]
fn test_near_capacity_threshold_is_exclusive() {
    let mut state = OpeningState::new(Opening::new(18.0, 20.0));
    state.add_component(ComponentType::Drawer, 17.75).unwrap();
    assert_eq!(state.usage_percentage(), 90.0);
    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.warnings.is_empty());

    let mut state = OpeningState::new(Opening::new(18.0, 20.0));
    state.add_component(ComponentType::Drawer, 17.77).unwrap();
    assert_eq!(state.usage_percentage(), 90.1);
    let report = validate(&state, &ValidationPolicy::default());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("90.1%"));
}

#[test]
fn test_non_positive_opening_width_is_an_error() {
    let mut state = OpeningState::new(Opening::new(-5.0, 30.0));
    state.add_component(ComponentType::Drawer, 6.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Opening width"));
}

#[test]
fn test_side_by_side_width_overflow_is_an_error() {
    let opening = Opening::new(30.0, 24.0).with_direction(LayoutDirection::Horizontal);
    let mut state = OpeningState::new(opening);
    state.add_component(ComponentType::Door, 20.0).unwrap();
    state.add_component(ComponentType::Door, 20.0).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert!(report.has_overflow());
    assert_eq!(
        report.errors,
        vec![
            "Components overflow opening width by 30.1250\" (60.1250\" total in 30.0000\" opening)"
                .to_string()
        ]
    );
}

#[test]
fn test_side_by_side_skips_mixed_stack_rule() {
    let opening = Opening::new(30.0, 24.0).with_direction(LayoutDirection::Horizontal);
    let mut state = OpeningState::new(opening);
    let drawer = state.add_component(ComponentType::Drawer, 6.0).unwrap();
    let door = state.add_component(ComponentType::Door, 20.0).unwrap();
    state
        .set_component_width(drawer.component.id, Some(10.0))
        .unwrap();
    state.set_component_width(door.component.id, Some(10.0)).unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_stacked_component_wider_than_opening_is_an_error() {
    let mut state = opening_30();
    let drawer = state.add_component(ComponentType::Drawer, 6.0).unwrap();
    state
        .set_component_width(drawer.component.id, Some(18.5))
        .unwrap();

    let report = validate(&state, &ValidationPolicy::default());
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec!["Drawer DR1 width 18.5000\" overflows opening width 18.0000\"".to_string()]
    );
}
