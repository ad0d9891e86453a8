//! Column-major run-length encoding of binary masks.
//!
//! Follows the COCO mask convention: runs alternate background/foreground
//! starting with background, so `counts[0]` may be zero when the first
//! pixel (top-left) is foreground. Pixels are visited column by column,
//! i.e. pixel `(x, y)` is at position `y + height * x`.

use crate::ir::{BBoxXYWH, BinaryMask};

/// Compact run-length representation of a [`BinaryMask`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMask {
    pub height: u32,
    pub width: u32,
    pub counts: Vec<u32>,
}

/// Encodes a mask. Lossless: the counts sum to `width * height`.
pub fn encode(mask: &BinaryMask) -> EncodedMask {
    let (width, height) = mask.dimensions();
    let mut counts = Vec::new();
    let mut current = false;
    let mut run = 0u32;

    for x in 0..width {
        for y in 0..height {
            let value = mask.get(x, y);
            if value != current {
                counts.push(run);
                run = 0;
                current = value;
            }
            run += 1;
        }
    }
    counts.push(run);

    EncodedMask {
        height,
        width,
        counts,
    }
}

/// Number of foreground pixels: the sum of the odd-indexed runs.
pub fn area(encoded: &EncodedMask) -> f64 {
    encoded
        .counts
        .iter()
        .skip(1)
        .step_by(2)
        .map(|&c| c as u64)
        .sum::<u64>() as f64
}

/// Tight bounding box around the foreground; all zeros for an empty mask.
pub fn bounding_box(encoded: &EncodedMask) -> BBoxXYWH {
    let h = encoded.height as u64;
    // Only complete background/foreground pairs describe foreground.
    let paired = (encoded.counts.len() / 2) * 2;
    if h == 0 || encoded.width == 0 || paired == 0 {
        return BBoxXYWH::default();
    }

    let (mut xs, mut xe) = (u64::MAX, 0u64);
    let (mut ys, mut ye) = (u64::MAX, 0u64);
    let mut cumulative = 0u64;
    let mut run_start_x = 0u64;

    for (j, &count) in encoded.counts[..paired].iter().enumerate() {
        cumulative += count as u64;
        // Even j: first pixel of a foreground run. Odd j: its last pixel.
        let pos = cumulative - (j as u64 % 2);
        let y = pos % h;
        let x = pos / h;
        if j % 2 == 0 {
            run_start_x = x;
        } else if run_start_x < x {
            // The run wraps into a later column, covering every row between.
            ys = 0;
            ye = h - 1;
        }
        xs = xs.min(x);
        xe = xe.max(x);
        ys = ys.min(y);
        ye = ye.max(y);
    }

    BBoxXYWH::new(
        xs as u32,
        ys as u32,
        (xe - xs + 1) as u32,
        (ye - ys + 1) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32, start: u32, side: u32) -> BinaryMask {
        BinaryMask::from_fn(size, size, |x, y| {
            (start..start + side).contains(&x) && (start..start + side).contains(&y)
        })
    }

    #[test]
    fn test_encode_is_column_major() {
        // 2x2 mask with only the top-right pixel set:
        // column 0 = [0, 0], column 1 = [1, 0]
        let mask = BinaryMask::new(2, 2, vec![0, 1, 0, 0]).unwrap();
        let rle = encode(&mask);
        assert_eq!(rle.counts, vec![2, 1, 1]);
    }

    #[test]
    fn test_encode_leading_foreground_has_zero_run() {
        let mask = BinaryMask::new(1, 2, vec![1, 0]).unwrap();
        assert_eq!(encode(&mask).counts, vec![0, 1, 1]);
    }

    #[test]
    fn test_counts_cover_all_pixels() {
        let mask = square(20, 5, 10);
        let rle = encode(&mask);
        assert_eq!(rle.counts.iter().sum::<u32>(), 400);
    }

    #[test]
    fn test_area_and_bbox_of_square() {
        let rle = encode(&square(20, 5, 10));
        assert_eq!(area(&rle), 100.0);
        assert_eq!(bounding_box(&rle), BBoxXYWH::new(5, 5, 10, 10));
    }

    #[test]
    fn test_empty_mask() {
        let rle = encode(&BinaryMask::empty(8, 6));
        assert_eq!(rle.counts, vec![48]);
        assert_eq!(area(&rle), 0.0);
        assert_eq!(bounding_box(&rle), BBoxXYWH::default());
    }

    #[test]
    fn test_zero_sized_mask() {
        let rle = encode(&BinaryMask::empty(0, 0));
        assert_eq!(area(&rle), 0.0);
        assert_eq!(bounding_box(&rle), BBoxXYWH::default());
    }

    #[test]
    fn test_full_mask() {
        let rle = encode(&BinaryMask::from_fn(4, 3, |_, _| true));
        assert_eq!(rle.counts, vec![0, 12]);
        assert_eq!(area(&rle), 12.0);
        assert_eq!(bounding_box(&rle), BBoxXYWH::new(0, 0, 4, 3));
    }

    #[test]
    fn test_bbox_of_disjoint_pixels() {
        let mask = BinaryMask::from_fn(10, 10, |x, y| (x, y) == (2, 7) || (x, y) == (6, 1));
        let rle = encode(&mask);
        assert_eq!(area(&rle), 2.0);
        assert_eq!(bounding_box(&rle), BBoxXYWH::new(2, 1, 5, 7));
    }

    #[test]
    fn test_bbox_of_run_wrapping_columns() {
        // Foreground from the bottom of column 0 into the top of column 1.
        let mask = BinaryMask::from_fn(3, 4, |x, y| (x == 0 && y == 3) || (x == 1 && y == 0));
        let rle = encode(&mask);
        assert_eq!(rle.counts, vec![3, 2, 7]);
        assert_eq!(bounding_box(&rle), BBoxXYWH::new(0, 0, 2, 4));
    }
}
