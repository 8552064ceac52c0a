use nalgebra::Point3;

/// Smallest distance between any point of `coords1` and any point of `coords2`.
///
/// Returns `None` if either set is empty.
pub fn min_pairwise_distance(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    coords1
        .iter()
        .flat_map(|p1| coords2.iter().map(move |p2| (p1 - p2).norm_squared()))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(f64::sqrt)
}

/// Counts pairs `(p1, p2)` with `|p1 - p2| <= cutoff`.
pub fn count_pairs_within(coords1: &[Point3<f64>], coords2: &[Point3<f64>], cutoff: f64) -> usize {
    let cutoff_sq = cutoff * cutoff;
    coords1
        .iter()
        .map(|p1| {
            coords2
                .iter()
                .filter(|p2| (p1 - *p2).norm_squared() <= cutoff_sq)
                .count()
        })
        .sum()
}
