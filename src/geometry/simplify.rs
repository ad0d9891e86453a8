//! Douglas-Peucker polyline simplification.

/// Simplifies a polyline of `[row, col]` points.
///
/// Keeps the first and last points and recursively keeps the point farthest
/// from each chord while that distance exceeds `tolerance`. Distances to a
/// chord are perpendicular when the point projects inside the chord and
/// otherwise the distance to the nearer endpoint. A `tolerance` of zero or
/// less returns the input unchanged.
pub fn approximate_polygon(coords: &[[f64; 2]], tolerance: f64) -> Vec<[f64; 2]> {
    if tolerance <= 0.0 || coords.len() <= 2 {
        return coords.to_vec();
    }

    let mut keep = vec![false; coords.len()];
    keep[0] = true;
    keep[coords.len() - 1] = true;

    let mut stack = vec![(0usize, coords.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let [r0, c0] = coords[start];
        let [r1, c1] = coords[end];
        let dr = r1 - r0;
        let dc = c1 - c0;
        let angle = -dr.atan2(dc);
        let (sin, cos) = angle.sin_cos();
        let offset = c0 * sin + r0 * cos;

        let mut farthest = (0usize, f64::NEG_INFINITY);
        for (i, &[r, c]) in coords.iter().enumerate().take(end).skip(start + 1) {
            let along_start = (r - r0) * dr + (c - c0) * dc;
            let along_end = -(r - r1) * dr - (c - c1) * dc;
            let dist = if along_start > 0.0 && along_end > 0.0 {
                (r * cos + c * sin - offset).abs()
            } else {
                let d0 = (r - r0).hypot(c - c0);
                let d1 = (r - r1).hypot(c - c1);
                d0.min(d1)
            };
            if dist > farthest.1 {
                farthest = (i, dist);
            }
        }

        if farthest.1 > tolerance {
            let split = farthest.0;
            keep[split] = true;
            stack.push((split, end));
            stack.push((start, split));
        }
    }

    coords
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}
