//! Admission checks for derived annotations.
//!
//! An annotation is kept only if it has at least one polygon, its area
//! reaches the area threshold, and its bounding box reaches the minimum
//! width and height. Comparisons are strict less-than, so a value exactly
//! equal to its threshold passes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ir::Annotation;

/// Minimum-size thresholds an annotation must reach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// Annotations with `area < area_threshold` are rejected.
    pub area_threshold: f64,
    /// Annotations with `bbox.width < min_box_width` are rejected.
    pub min_box_width: f64,
    /// Annotations with `bbox.height < min_box_height` are rejected.
    pub min_box_height: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            area_threshold: 25.0,
            min_box_width: 5.0,
            min_box_height: 5.0,
        }
    }
}

/// Why an annotation was not admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    /// No polygon survived contour extraction.
    EmptySegmentation,
    /// Area below the area threshold.
    AreaTooSmall,
    /// Bounding box narrower or shorter than the minimum.
    BoxTooSmall,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::EmptySegmentation => "empty segmentation",
            RejectReason::AreaTooSmall => "area below threshold",
            RejectReason::BoxTooSmall => "bounding box below minimum size",
        };
        f.write_str(text)
    }
}

/// Checks an annotation against the thresholds, reporting the first failed
/// check in the order: segmentation, area, box size.
pub fn check_annotation(
    annotation: &Annotation,
    thresholds: &ValidationThresholds,
) -> Result<(), RejectReason> {
    if annotation.segmentation.is_empty() {
        return Err(RejectReason::EmptySegmentation);
    }

    if annotation.area < thresholds.area_threshold {
        return Err(RejectReason::AreaTooSmall);
    }

    let bbox = &annotation.bbox;
    if (bbox.width as f64) < thresholds.min_box_width
        || (bbox.height as f64) < thresholds.min_box_height
    {
        return Err(RejectReason::BoxTooSmall);
    }

    Ok(())
}

/// Returns true if the annotation passes every check.
pub fn is_valid(annotation: &Annotation, thresholds: &ValidationThresholds) -> bool {
    check_annotation(annotation, thresholds).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AnnotationId, BBoxXYWH, CategoryId, ImageId, Polygon};

    fn annotation(area: f64, width: u32, height: u32, polygons: usize) -> Annotation {
        Annotation {
            id: AnnotationId(0),
            image_id: ImageId(0),
            category_id: CategoryId(1),
            segmentation: vec![Polygon(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0]); polygons],
            area,
            bbox: BBoxXYWH::new(0, 0, width, height),
            iscrowd: 0,
        }
    }

    #[test]
    fn test_defaults() {
        let t = ValidationThresholds::default();
        assert_eq!((t.area_threshold, t.min_box_width, t.min_box_height), (25.0, 5.0, 5.0));
    }

    #[test]
    fn test_accepts_large_annotation() {
        assert!(is_valid(&annotation(100.0, 10, 10, 1), &ValidationThresholds::default()));
    }

    #[test]
    fn test_rejects_empty_segmentation() {
        assert_eq!(
            check_annotation(&annotation(100.0, 10, 10, 0), &ValidationThresholds::default()),
            Err(RejectReason::EmptySegmentation)
        );
    }

    #[test]
    fn test_area_boundary() {
        let t = ValidationThresholds::default();
        assert_eq!(
            check_annotation(&annotation(24.0, 10, 10, 1), &t),
            Err(RejectReason::AreaTooSmall)
        );
        assert!(is_valid(&annotation(25.0, 10, 10, 1), &t));
        assert!(is_valid(&annotation(25.0 + 1e-9, 10, 10, 1), &t));
    }

    #[test]
    fn test_box_boundary() {
        let t = ValidationThresholds::default();
        assert_eq!(
            check_annotation(&annotation(100.0, 4, 30, 1), &t),
            Err(RejectReason::BoxTooSmall)
        );
        assert_eq!(
            check_annotation(&annotation(100.0, 30, 4, 1), &t),
            Err(RejectReason::BoxTooSmall)
        );
        assert!(is_valid(&annotation(100.0, 5, 5, 1), &t));
    }

    #[test]
    fn test_custom_thresholds() {
        let t = ValidationThresholds {
            area_threshold: 0.0,
            min_box_width: 0.0,
            min_box_height: 0.0,
        };
        assert!(is_valid(&annotation(1.0, 1, 1, 1), &t));
    }
}
