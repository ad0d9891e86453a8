//! Geometry derived from binary masks.
//!
//! Pure functions, no state:
//! - [`encode`], [`area`], [`bounding_box`]: column-major run-length
//!   encoding and the statistics read off it
//! - [`polygons`]: closed boundary rings as flattened `x, y` sequences

mod contours;
mod rle;
mod simplify;

pub use contours::{find_contours, HalfPoint};
pub use rle::{area, bounding_box, encode, EncodedMask};
pub use simplify::approximate_polygon;

use crate::ir::{BinaryMask, Polygon};

/// Extracts the boundary rings of a mask's foreground.
///
/// Contours are traced on a one-pixel background-padded copy of the mask and
/// shifted back into mask coordinates. Each ring is closed, simplified with
/// `tolerance` (0 keeps every traced point), dropped if fewer than three
/// points remain, and flattened to `x0, y0, x1, y1, ...`. Negative
/// coordinates produced by the padding shift are clamped to 0.
///
/// Disconnected regions and holes each produce their own ring.
pub fn polygons(mask: &BinaryMask, tolerance: f64) -> Vec<Polygon> {
    let mut out = Vec::new();

    for contour in find_contours(mask) {
        let mut ring: Vec<[f64; 2]> = contour.iter().map(|p| p.to_row_col()).collect();
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first);
            }
        }

        let ring = approximate_polygon(&ring, tolerance);
        if ring.len() < 3 {
            continue;
        }

        let flat = ring
            .iter()
            .flat_map(|&[row, col]| [col, row])
            .map(|v| if v < 0.0 { 0.0 } else { v })
            .collect();
        out.push(Polygon(flat));
    }

    out
}
