//! Integer bounding boxes in COCO `[x, y, width, height]` layout.

use serde::{Deserialize, Serialize};

/// A tight, axis-aligned pixel box around a mask's foreground.
///
/// `(x, y)` is the top-left pixel; `width`/`height` count pixels, so a
/// single foreground pixel has a 1x1 box. An empty mask yields the all-zero
/// box. Serializes as a four-element integer array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BBoxXYWH {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BBoxXYWH {
    /// Creates a box from its top-left corner and extent.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the box covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the box as `[x, y, width, height]`.
    #[inline]
    pub fn to_array(&self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl From<[u32; 4]> for BBoxXYWH {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BBoxXYWH> for [u32; 4] {
    fn from(bbox: BBoxXYWH) -> Self {
        bbox.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_integer_array() {
        let json = serde_json::to_string(&BBoxXYWH::new(5, 5, 10, 10)).unwrap();
        assert_eq!(json, "[5,5,10,10]");
    }

    #[test]
    fn test_empty_box() {
        assert!(BBoxXYWH::default().is_empty());
        assert!(!BBoxXYWH::new(0, 0, 1, 1).is_empty());
    }
}
