use super::cache::NeighborCache;
use super::cell::CellKey;
use super::neighbors::Neighbors;
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Bin width must be a positive finite number, got {0}")]
    InvalidBinWidth(f64),

    #[error("Cannot bin point ({x}, {y}, {z}): coordinates must be finite and in range")]
    UnbinnablePoint { x: f64, y: f64, z: f64 },

    #[error("Cannot intersect grids with bin widths {expected} and {found}")]
    BinWidthMismatch { expected: f64, found: f64 },
}

/// A uniform 3D bucket index mapping cells to the elements inserted in them.
///
/// ```ignore
/// let mut grid = SpatialGrid::new(1.0)?;
/// grid.insert(&Point3::new(0.0, 0.0, 0.0), "a")?;
/// grid.insert(&Point3::new(0.9, 0.0, 0.0), "b")?;
/// assert_eq!(grid.neighbors_of(&Point3::origin()).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    bin_width: f64,
    buckets: HashMap<CellKey, Vec<T>>,
    /// Occupied cells in the order they were first filled.
    cell_order: Vec<CellKey>,
    len: usize,
    /// Bumped on every insertion; the cache is only valid for one generation.
    generation: u64,
    cache: NeighborCache<T>,
}

impl<T> SpatialGrid<T> {
    pub fn new(bin_width: f64) -> Result<Self, GridError> {
        if !bin_width.is_finite() || bin_width <= 0.0 {
            return Err(GridError::InvalidBinWidth(bin_width));
        }
        Ok(Self {
            bin_width,
            buckets: HashMap::new(),
            cell_order: Vec::new(),
            len: 0,
            generation: 0,
            cache: NeighborCache::new(0),
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of inserted elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of insertions performed so far. Any cached neighborhood computed
    /// under an older generation is discarded before it can be served.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The cell a point falls into, or `None` for non-finite coordinates.
    pub fn cell_of(&self, point: &Point3<f64>) -> Option<CellKey> {
        CellKey::from_point(point, self.bin_width)
    }

    /// Occupied cells in first-insertion order.
    pub fn occupied_cells(&self) -> &[CellKey] {
        &self.cell_order
    }

    pub fn contains_cell(&self, cell: &CellKey) -> bool {
        self.buckets.contains_key(cell)
    }

    /// Elements stored in exactly this cell.
    pub fn bucket(&self, cell: &CellKey) -> &[T] {
        self.buckets.get(cell).map_or([].as_slice(), |v| v.as_slice())
    }

    /// Stores `element` in the cell containing `point` and invalidates the
    /// neighbor cache.
    pub fn insert(&mut self, point: &Point3<f64>, element: T) -> Result<CellKey, GridError> {
        let cell = self.cell_of(point).ok_or(GridError::UnbinnablePoint {
            x: point.x,
            y: point.y,
            z: point.z,
        })?;

        match self.buckets.get_mut(&cell) {
            Some(bucket) => bucket.push(element),
            None => {
                self.buckets.insert(cell, vec![element]);
                self.cell_order.push(cell);
            }
        }
        self.len += 1;
        self.generation += 1;
        Ok(cell)
    }
}

impl<T: Clone> SpatialGrid<T> {
    /// All elements in the 27-cell block around `point`: its own cell first,
    /// then neighbors, each bucket in insertion order.
    ///
    /// Non-finite query points have no cell and yield [`Neighbors::Empty`].
    pub fn neighbors_of(&self, point: &Point3<f64>) -> Neighbors<T> {
        match self.cell_of(point) {
            Some(cell) => self.collect_block(cell),
            None => Neighbors::Empty,
        }
    }

    /// Same result as [`SpatialGrid::neighbors_of`], memoized per cell until the
    /// next insertion.
    pub fn neighbors_of_cached(&mut self, point: &Point3<f64>) -> &Neighbors<T> {
        self.cache.sync(self.generation);
        let Some(cell) = self.cell_of(point) else {
            return self.cache.empty();
        };
        let buckets = &self.buckets;
        self.cache
            .get_or_insert_with(cell, || collect_block(buckets, cell))
    }

    /// Batch form of [`SpatialGrid::neighbors_of`], one result per point.
    #[cfg(not(feature = "parallel"))]
    pub fn neighbors_of_all(&self, points: &[Point3<f64>]) -> Vec<Neighbors<T>> {
        points.iter().map(|p| self.neighbors_of(p)).collect()
    }

    /// Batch form of [`SpatialGrid::neighbors_of`], one result per point.
    #[cfg(feature = "parallel")]
    pub fn neighbors_of_all(&self, points: &[Point3<f64>]) -> Vec<Neighbors<T>>
    where
        T: Send + Sync,
    {
        points.par_iter().map(|p| self.neighbors_of(p)).collect()
    }

    /// Coarse spatial join: the elements of `self` lying within one
    /// neighborhood block of some element of `other`.
    ///
    /// For every occupied cell of `self` whose block touches an occupied cell of
    /// `other`, the elements of every occupied cell in that block are collected.
    /// Each cell contributes at most once per call. The result may contain
    /// elements up to about `sqrt(3)` bin widths beyond a true contact and is
    /// meant to be refined by exact distance tests.
    ///
    /// Both grids must share the same bin width, otherwise their cell keys
    /// describe different regions of space.
    pub fn intersection<U>(&self, other: &SpatialGrid<U>) -> Result<Vec<T>, GridError> {
        if self.bin_width != other.bin_width {
            return Err(GridError::BinWidthMismatch {
                expected: self.bin_width,
                found: other.bin_width,
            });
        }
        let mut intersection = Vec::new();
        let mut checked: HashSet<CellKey> = HashSet::new();

        for &cell in &self.cell_order {
            let overlaps = cell.neighborhood().any(|c| other.contains_cell(&c));
            if !overlaps {
                continue;
            }
            for neighbor in cell.neighborhood() {
                if !checked.insert(neighbor) {
                    continue;
                }
                if let Some(bucket) = self.buckets.get(&neighbor) {
                    intersection.extend(bucket.iter().cloned());
                }
            }
        }
        Ok(intersection)
    }

    fn collect_block(&self, cell: CellKey) -> Neighbors<T> {
        collect_block(&self.buckets, cell)
    }
}

fn collect_block<T: Clone>(buckets: &HashMap<CellKey, Vec<T>>, cell: CellKey) -> Neighbors<T> {
    let mut found = Vec::new();
    for neighbor in cell.neighborhood() {
        if let Some(bucket) = buckets.get(&neighbor) {
            found.extend(bucket.iter().cloned());
        }
    }
    Neighbors::from(found)
}
