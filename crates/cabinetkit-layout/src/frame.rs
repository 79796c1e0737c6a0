//! Frame Geometry Resolver
//!
//! Turns cabinet outer dimensions and construction parameters into the usable
//! opening rectangle(s) that the layout engine fills.
//!
//! - Face frame: two stiles and two rails are subtracted from the outer size,
//!   and N sections are separated by N-1 mid-stiles.
//! - Frameless: a margin fraction per side stands in for reveals and edge
//!   banding.

use crate::types::{Construction, FramePart, OpeningSize, Section, SectionOpening};
use cabinetkit_core::GeometryError;
use tracing::debug;

/// Default frameless edge margin, as a fraction of each dimension per side
pub const DEFAULT_FRAMELESS_MARGIN: f64 = 0.02;

/// Tolerance for section ratios summing to one
pub const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Resolve the usable opening of a cabinet
pub fn resolve_opening(
    cabinet_width: f64,
    cabinet_height: f64,
    construction: &Construction,
) -> Result<OpeningSize, GeometryError> {
    validate_cabinet(cabinet_width, cabinet_height)?;

    let size = match *construction {
        Construction::FaceFrame {
            stile_width,
            rail_width,
        } => {
            validate_member("stile width", stile_width, "width", cabinet_width)?;
            validate_member("rail width", rail_width, "height", cabinet_height)?;
            OpeningSize {
                width: cabinet_width - 2.0 * stile_width,
                height: cabinet_height - 2.0 * rail_width,
            }
        }
        Construction::Frameless { margin } => {
            if !margin.is_finite() || !(0.0..0.5).contains(&margin) {
                return Err(GeometryError::frame(format!(
                    "frameless margin {} must be in [0, 0.5)",
                    margin
                )));
            }
            OpeningSize {
                width: cabinet_width * (1.0 - 2.0 * margin),
                height: cabinet_height * (1.0 - 2.0 * margin),
            }
        }
    };

    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(GeometryError::frame(format!(
            "resolved opening {:.4}\" x {:.4}\" is not positive",
            size.width, size.height
        )));
    }

    debug!(
        construction = %construction.construction_type(),
        width = size.width,
        height = size.height,
        "Resolved cabinet opening"
    );

    Ok(size)
}

/// Resolve one opening per section, left to right
///
/// Ratios must each be in `(0, 1]` and sum to one. Callers normalize ratios
/// (see [`normalize_ratios`]); the resolver does not correct them.
pub fn resolve_sections(
    cabinet_width: f64,
    cabinet_height: f64,
    construction: &Construction,
    sections: &[Section],
) -> Result<Vec<SectionOpening>, GeometryError> {
    let opening = resolve_opening(cabinet_width, cabinet_height, construction)?;

    if sections.is_empty() {
        return Ok(Vec::new());
    }
    validate_ratios(sections)?;

    let (mid_stile, left_edge) = match *construction {
        Construction::FaceFrame { stile_width, .. } => (stile_width, stile_width),
        Construction::Frameless { .. } => (0.0, (cabinet_width - opening.width) / 2.0),
    };

    let shared_width = opening.width - mid_stile * (sections.len() - 1) as f64;
    if shared_width <= 0.0 {
        return Err(GeometryError::frame(format!(
            "{} mid-stiles of {:.4}\" leave no width for sections",
            sections.len() - 1,
            mid_stile
        )));
    }

    let mut offset_x = left_edge;
    let mut resolved = Vec::with_capacity(sections.len());
    for section in sections {
        let width = shared_width * section.ratio;
        resolved.push(SectionOpening {
            name: section.name.clone(),
            section_type: section.section_type,
            offset_x,
            width,
            height: opening.height,
        });
        offset_x += width + mid_stile;
    }

    Ok(resolved)
}

/// Scale ratios in place so they sum to one
///
/// Non-positive or non-finite ratios are treated as an equal share.
pub fn normalize_ratios(sections: &mut [Section]) {
    if sections.is_empty() {
        return;
    }
    let equal = 1.0 / sections.len() as f64;
    for section in sections.iter_mut() {
        if !section.ratio.is_finite() || section.ratio <= 0.0 {
            section.ratio = equal;
        }
    }
    let total: f64 = sections.iter().map(|s| s.ratio).sum();
    for section in sections.iter_mut() {
        section.ratio /= total;
    }
}

/// Cut list for a face frame with `section_count` openings
pub fn face_frame_cut_list(
    cabinet_width: f64,
    cabinet_height: f64,
    stile_width: f64,
    rail_width: f64,
    section_count: u32,
) -> Result<Vec<FramePart>, GeometryError> {
    let construction = Construction::FaceFrame {
        stile_width,
        rail_width,
    };
    let opening = resolve_opening(cabinet_width, cabinet_height, &construction)?;

    let mut parts = vec![
        FramePart {
            part: "Stile".to_string(),
            quantity: 2,
            width: stile_width,
            length: cabinet_height,
        },
        FramePart {
            part: "Top Rail".to_string(),
            quantity: 1,
            width: rail_width,
            length: opening.width,
        },
        FramePart {
            part: "Bottom Rail".to_string(),
            quantity: 1,
            width: rail_width,
            length: opening.width,
        },
    ];

    if section_count > 1 {
        parts.push(FramePart {
            part: "Mid Stile".to_string(),
            quantity: section_count - 1,
            width: stile_width,
            length: opening.height,
        });
    }

    Ok(parts)
}

fn validate_cabinet(width: f64, height: f64) -> Result<(), GeometryError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(GeometryError::frame(format!(
            "cabinet width {} must be positive",
            width
        )));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(GeometryError::frame(format!(
            "cabinet height {} must be positive",
            height
        )));
    }
    Ok(())
}

fn validate_member(
    member: &str,
    value: f64,
    dimension: &str,
    cabinet_value: f64,
) -> Result<(), GeometryError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::frame(format!(
            "{} {} must be positive",
            member, value
        )));
    }
    if value >= cabinet_value / 2.0 {
        return Err(GeometryError::frame(format!(
            "{} {} consumes cabinet {} {}",
            member, value, dimension, cabinet_value
        )));
    }
    Ok(())
}

fn validate_ratios(sections: &[Section]) -> Result<(), GeometryError> {
    for section in sections {
        if !section.ratio.is_finite() || section.ratio <= 0.0 || section.ratio > 1.0 {
            return Err(GeometryError::InvalidSectionRatios {
                reason: format!(
                    "section '{}' ratio {} must be in (0, 1]",
                    section.name, section.ratio
                ),
            });
        }
    }

    let total: f64 = sections.iter().map(|s| s.ratio).sum();
    if (total - 1.0).abs() > RATIO_SUM_TOLERANCE {
        return Err(GeometryError::InvalidSectionRatios {
            reason: format!("ratios sum to {:.6}, expected 1", total),
        });
    }
    Ok(())
}
