//! Turns one `(mask, category)` pair into an annotation record.

use crate::geometry;
use crate::ir::{Annotation, AnnotationId, BinaryMask, CategoryId, ImageId};
use crate::validation::{self, RejectReason, ValidationThresholds};

/// Result of deriving an annotation from a mask.
///
/// The record is always complete; `rejection` says whether it was admitted.
/// A rejected record must not consume its annotation id.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltAnnotation {
    pub annotation: Annotation,
    pub rejection: Option<RejectReason>,
}

impl BuiltAnnotation {
    /// Returns true if the annotation passed validation.
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// Returns the annotation if it was accepted.
    pub fn accepted(self) -> Option<Annotation> {
        match self.rejection {
            None => Some(self.annotation),
            Some(_) => None,
        }
    }
}

/// Derives area, bounding box and polygons from `mask`, assembles the
/// record with the caller's ids, and validates it.
///
/// `iscrowd` is always 0: only polygon-form annotations are produced.
pub fn build_annotation(
    annotation_id: AnnotationId,
    image_id: ImageId,
    category_id: CategoryId,
    mask: &BinaryMask,
    thresholds: &ValidationThresholds,
) -> BuiltAnnotation {
    let encoded = geometry::encode(mask);
    let area = geometry::area(&encoded);
    let bbox = geometry::bounding_box(&encoded);
    let segmentation = geometry::polygons(mask, 0.0);

    let annotation = Annotation {
        id: annotation_id,
        image_id,
        category_id,
        segmentation,
        area,
        bbox,
        iscrowd: 0,
    };

    let rejection = validation::check_annotation(&annotation, thresholds).err();
    BuiltAnnotation {
        annotation,
        rejection,
    }
}
