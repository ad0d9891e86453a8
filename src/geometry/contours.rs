//! Iso-line contour extraction (marching squares) for binary masks.
//!
//! The mask is traced at level 0.5 on a grid padded with one pixel of
//! background on every side, so shapes touching the raster edge still yield
//! closed rings. On a 0/1 grid every crossing sits exactly halfway between
//! two pixel centres, so points are kept in half-pixel integer units and
//! compared exactly.
//!
//! Segment orientation follows the "low" connectivity convention: diagonal
//! saddle cells keep background connected, and rings are traced with the
//! foreground on the same side throughout. Contours come out in the order
//! their first segment was produced, scanning the padded grid row by row.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::ir::BinaryMask;

/// A contour vertex in padded half-pixel units: `(2 * row, 2 * col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfPoint {
    pub row2: u32,
    pub col2: u32,
}

impl HalfPoint {
    #[inline]
    fn new(row2: u32, col2: u32) -> Self {
        Self { row2, col2 }
    }

    /// `(row, col)` in unpadded pixel coordinates.
    #[inline]
    pub fn to_row_col(self) -> [f64; 2] {
        [
            self.row2 as f64 / 2.0 - 1.0,
            self.col2 as f64 / 2.0 - 1.0,
        ]
    }
}

/// Traces every iso-contour of `mask` on its one-pixel padded grid.
///
/// Closed contours repeat their first point at the end.
pub fn find_contours(mask: &BinaryMask) -> Vec<Vec<HalfPoint>> {
    assemble(segments(mask))
}

fn segments(mask: &BinaryMask) -> Vec<(HalfPoint, HalfPoint)> {
    let (width, height) = mask.dimensions();
    let rows = height + 2;
    let cols = width + 2;

    // Padded lookup: row/col 0 and the last row/col are background.
    let value = |r: u32, c: u32| r > 0 && c > 0 && mask.get(c - 1, r - 1);

    let mut out = Vec::new();
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let mut case = 0u8;
            if value(r, c) {
                case |= 1;
            }
            if value(r, c + 1) {
                case |= 2;
            }
            if value(r + 1, c) {
                case |= 4;
            }
            if value(r + 1, c + 1) {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let top = HalfPoint::new(2 * r, 2 * c + 1);
            let bottom = HalfPoint::new(2 * r + 2, 2 * c + 1);
            let left = HalfPoint::new(2 * r + 1, 2 * c);
            let right = HalfPoint::new(2 * r + 1, 2 * c + 2);

            match case {
                1 => out.push((top, left)),
                2 => out.push((right, top)),
                3 => out.push((right, left)),
                4 => out.push((left, bottom)),
                5 => out.push((top, bottom)),
                6 => {
                    out.push((right, top));
                    out.push((left, bottom));
                }
                7 => out.push((right, bottom)),
                8 => out.push((bottom, right)),
                9 => {
                    out.push((top, left));
                    out.push((bottom, right));
                }
                10 => out.push((bottom, top)),
                11 => out.push((bottom, left)),
                12 => out.push((left, right)),
                13 => out.push((top, right)),
                14 => out.push((left, top)),
                _ => unreachable!("cases 0 and 15 emit no segment"),
            }
        }
    }
    out
}

/// Chains directed segments into contours.
///
/// Each open contour is indexed by its first and last point. A new segment
/// either starts a contour, extends one at either end, joins two contours,
/// or closes a contour onto itself. When two contours merge, the one created
/// first keeps its slot so output order stays top-to-bottom, left-to-right.
fn assemble(segments: Vec<(HalfPoint, HalfPoint)>) -> Vec<Vec<HalfPoint>> {
    let mut contours: BTreeMap<usize, VecDeque<HalfPoint>> = BTreeMap::new();
    let mut starts: HashMap<HalfPoint, usize> = HashMap::new();
    let mut ends: HashMap<HalfPoint, usize> = HashMap::new();
    let mut next_index = 0usize;

    for (from, to) in segments {
        if from == to {
            continue;
        }
        let tail = starts.remove(&to);
        let head = ends.remove(&from);

        match (tail, head) {
            (Some(t), Some(h)) if t == h => {
                if let Some(contour) = contours.get_mut(&h) {
                    contour.push_back(to);
                }
            }
            (Some(t), Some(h)) if t > h => {
                // Tail was created later: append it to head.
                let Some(tail_contour) = contours.remove(&t) else {
                    continue;
                };
                if let Some(head_contour) = contours.get_mut(&h) {
                    head_contour.extend(tail_contour);
                    if let (Some(&first), Some(&last)) = (head_contour.front(), head_contour.back())
                    {
                        starts.insert(first, h);
                        ends.insert(last, h);
                    }
                }
            }
            (Some(t), Some(h)) => {
                // Head was created later: prepend it to tail.
                let Some(head_contour) = contours.remove(&h) else {
                    continue;
                };
                if let Some(&first) = head_contour.front() {
                    starts.remove(&first);
                }
                if let Some(tail_contour) = contours.get_mut(&t) {
                    for point in head_contour.into_iter().rev() {
                        tail_contour.push_front(point);
                    }
                    if let (Some(&first), Some(&last)) = (tail_contour.front(), tail_contour.back())
                    {
                        starts.insert(first, t);
                        ends.insert(last, t);
                    }
                }
            }
            (None, None) => {
                contours.insert(next_index, VecDeque::from([from, to]));
                starts.insert(from, next_index);
                ends.insert(to, next_index);
                next_index += 1;
            }
            (Some(t), None) => {
                if let Some(contour) = contours.get_mut(&t) {
                    contour.push_front(from);
                    starts.insert(from, t);
                }
            }
            (None, Some(h)) => {
                if let Some(contour) = contours.get_mut(&h) {
                    contour.push_back(to);
                    ends.insert(to, h);
                }
            }
        }
    }

    contours
        .into_values()
        .map(|contour| contour.into_iter().collect())
        .collect()
}
