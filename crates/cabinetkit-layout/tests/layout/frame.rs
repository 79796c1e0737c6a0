use crate::approx;
use cabinetkit_core::GeometryError;
use cabinetkit_layout::{
    face_frame_cut_list, resolve_opening, resolve_sections, Construction, Section, SectionType,
    DEFAULT_FRAMELESS_MARGIN,
};

fn face_frame() -> Construction {
    Construction::FaceFrame {
        stile_width: 1.5,
        rail_width: 1.5,
    }
}

#[test]
fn test_face_frame_opening() {
    let size = resolve_opening(36.0, 30.0, &face_frame()).unwrap();
    assert!(approx(size.width, 33.0));
    assert!(approx(size.height, 27.0));
}

#[test]
fn test_frameless_opening_uses_margin() {
    let construction = Construction::Frameless {
        margin: DEFAULT_FRAMELESS_MARGIN,
    };
    let size = resolve_opening(36.0, 30.0, &construction).unwrap();
    assert!(approx(size.width, 34.56));
    assert!(approx(size.height, 28.8));
}

#[test]
fn test_zero_width_rejected_for_any_construction() {
    for construction in [
        face_frame(),
        Construction::Frameless { margin: 0.02 },
    ] {
        let err = resolve_opening(0.0, 30.0, &construction).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidFrameConfiguration { .. }
        ));
    }
}

#[test]
fn test_members_consuming_cabinet_rejected() {
    let construction = Construction::FaceFrame {
        stile_width: 1.5,
        rail_width: 15.0,
    };
    assert!(resolve_opening(36.0, 30.0, &construction).is_err());

    let construction = Construction::FaceFrame {
        stile_width: 0.0,
        rail_width: 1.5,
    };
    assert!(resolve_opening(36.0, 30.0, &construction).is_err());
}

#[test]
fn test_frameless_margin_out_of_range() {
    let construction = Construction::Frameless { margin: 0.5 };
    assert!(resolve_opening(36.0, 30.0, &construction).is_err());

    let construction = Construction::Frameless { margin: -0.01 };
    assert!(resolve_opening(36.0, 30.0, &construction).is_err());
}

#[test]
fn test_face_frame_sections_insert_mid_stiles() {
    let sections = vec![
        Section::new("Left", SectionType::Door, 0.5),
        Section::new("Right", SectionType::Drawer, 0.5),
    ];
    let resolved = resolve_sections(36.0, 30.0, &face_frame(), &sections).unwrap();

    assert_eq!(resolved.len(), 2);
    assert!(approx(resolved[0].width, 15.75));
    assert!(approx(resolved[1].width, 15.75));
    assert!(approx(resolved[0].offset_x, 1.5));
    assert!(approx(resolved[1].offset_x, 18.75));
    assert!(approx(resolved[0].height, 27.0));
    assert_eq!(resolved[1].section_type, SectionType::Drawer);
}

#[test]
fn test_frameless_sections_share_full_width() {
    let sections = vec![
        Section::new("Left", SectionType::OpenShelf, 0.25),
        Section::new("Right", SectionType::PullOut, 0.75),
    ];
    let construction = Construction::Frameless { margin: 0.02 };
    let resolved = resolve_sections(36.0, 30.0, &construction, &sections).unwrap();

    assert!(approx(resolved[0].width + resolved[1].width, 34.56));
    assert!(approx(resolved[0].offset_x, 0.72));
    assert!(approx(resolved[1].offset_x, 0.72 + 8.64));
}

#[test]
fn test_section_ratios_must_sum_to_one() {
    let sections = vec![
        Section::new("Left", SectionType::Door, 0.5),
        Section::new("Right", SectionType::Door, 0.6),
    ];
    let err = resolve_sections(36.0, 30.0, &face_frame(), &sections).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidSectionRatios { .. }));
}

#[test]
fn test_section_opening_carries_gap_policy() {
    let sections = vec![Section::new("Only", SectionType::Drawer, 1.0)];
    let resolved = resolve_sections(36.0, 30.0, &face_frame(), &sections).unwrap();
    let opening = resolved[0].to_opening(0.5, 0.25, 0.125);

    assert!(approx(opening.width, 33.0));
    assert!(approx(opening.usable_height(), 26.25));
}

#[test]
fn test_face_frame_cut_list() {
    let parts = face_frame_cut_list(36.0, 30.0, 1.5, 1.5, 3).unwrap();
    assert_eq!(parts.len(), 4);

    let stiles = &parts[0];
    assert_eq!(stiles.quantity, 2);
    assert!(approx(stiles.length, 30.0));

    let top_rail = &parts[1];
    assert!(approx(top_rail.length, 33.0));

    let mid = &parts[3];
    assert_eq!(mid.part, "Mid Stile");
    assert_eq!(mid.quantity, 2);
    assert!(approx(mid.length, 27.0));
}

#[test]
fn test_single_section_cut_list_has_no_mid_stile() {
    let parts = face_frame_cut_list(24.0, 30.0, 1.75, 1.5, 1).unwrap();
    assert!(parts.iter().all(|p| p.part != "Mid Stile"));
}
