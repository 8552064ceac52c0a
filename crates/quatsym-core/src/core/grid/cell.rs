use nalgebra::Point3;

/// Integer coordinates of one grid cell.
///
/// Each axis is stored independently, so distinct cells never alias no matter
/// how far from the origin they lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub i: i64,
    pub j: i64,
    pub k: i64,
}

impl CellKey {
    pub const fn new(i: i64, j: i64, k: i64) -> Self {
        Self { i, j, k }
    }

    /// Bins a point with the given bin width, rounding half away from zero.
    ///
    /// Returns `None` if any coordinate is not finite or the bin index does not
    /// fit in an `i64`.
    pub fn from_point(point: &Point3<f64>, bin_width: f64) -> Option<Self> {
        Some(Self {
            i: bin_index(point.x, bin_width)?,
            j: bin_index(point.y, bin_width)?,
            k: bin_index(point.z, bin_width)?,
        })
    }

    /// The cell itself followed by its 26 face, edge and corner neighbors.
    pub fn neighborhood(self) -> impl Iterator<Item = CellKey> {
        NEIGHBOR_OFFSETS.iter().map(move |&(di, dj, dk)| CellKey {
            i: self.i.wrapping_add(di),
            j: self.j.wrapping_add(dj),
            k: self.k.wrapping_add(dk),
        })
    }
}

fn bin_index(coordinate: f64, bin_width: f64) -> Option<i64> {
    let scaled = (coordinate / bin_width).round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
        Some(scaled as i64)
    } else {
        None
    }
}

// Own cell first so that single-cell hits come out ahead of neighbors.
const NEIGHBOR_OFFSETS: [(i64, i64, i64); 27] = [
    (0, 0, 0),
    (-1, -1, -1),
    (-1, -1, 0),
    (-1, -1, 1),
    (-1, 0, -1),
    (-1, 0, 0),
    (-1, 0, 1),
    (-1, 1, -1),
    (-1, 1, 0),
    (-1, 1, 1),
    (0, -1, -1),
    (0, -1, 0),
    (0, -1, 1),
    (0, 0, -1),
    (0, 0, 1),
    (0, 1, -1),
    (0, 1, 0),
    (0, 1, 1),
    (1, -1, -1),
    (1, -1, 0),
    (1, -1, 1),
    (1, 0, -1),
    (1, 0, 0),
    (1, 0, 1),
    (1, 1, -1),
    (1, 1, 0),
    (1, 1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_point_rounds_half_away_from_zero() {
        let key = CellKey::from_point(&Point3::new(0.5, -0.5, 1.49), 1.0).unwrap();
        assert_eq!(key, CellKey::new(1, -1, 1));

        let key = CellKey::from_point(&Point3::new(2.5, -2.5, 0.0), 1.0).unwrap();
        assert_eq!(key, CellKey::new(3, -3, 0));
    }

    #[test]
    fn from_point_scales_by_bin_width() {
        let key = CellKey::from_point(&Point3::new(9.9, 10.1, -25.0), 10.0).unwrap();
        assert_eq!(key, CellKey::new(1, 1, -3));
    }

    #[test]
    fn from_point_rejects_non_finite_coordinates() {
        assert!(CellKey::from_point(&Point3::new(f64::NAN, 0.0, 0.0), 1.0).is_none());
        assert!(CellKey::from_point(&Point3::new(0.0, f64::INFINITY, 0.0), 1.0).is_none());
        assert!(CellKey::from_point(&Point3::new(0.0, 0.0, 1e300), 1e-300).is_none());
    }

    #[test]
    fn far_cells_do_not_alias() {
        // 10_000 bins apart on x would collide with one bin on y under a
        // base-10^4 packed key.
        let a = CellKey::from_point(&Point3::new(10_000.0, 0.0, 0.0), 1.0).unwrap();
        let b = CellKey::from_point(&Point3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn neighborhood_covers_the_full_block_once() {
        let center = CellKey::new(5, -2, 7);
        let cells: Vec<CellKey> = center.neighborhood().collect();
        assert_eq!(cells.len(), 27);
        assert_eq!(cells[0], center);

        let unique: HashSet<CellKey> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 27);
        for cell in unique {
            assert!((cell.i - center.i).abs() <= 1);
            assert!((cell.j - center.j).abs() <= 1);
            assert!((cell.k - center.k).abs() <= 1);
        }
    }
}
