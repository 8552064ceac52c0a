use super::cell::CellKey;
use super::neighbors::Neighbors;
use std::collections::HashMap;

/// Memoized neighborhood results, valid for exactly one grid generation.
///
/// The owning grid bumps its generation on every insertion; [`NeighborCache::sync`]
/// drops every entry as soon as the generation it was filled under is stale.
#[derive(Debug, Clone)]
pub(crate) struct NeighborCache<T> {
    generation: u64,
    entries: HashMap<CellKey, Neighbors<T>>,
    /// Served for queries that have no cell.
    empty: Neighbors<T>,
}

impl<T> NeighborCache<T> {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            entries: HashMap::new(),
            empty: Neighbors::Empty,
        }
    }

    /// Invalidates the whole cache if it was filled under another generation.
    pub(crate) fn sync(&mut self, generation: u64) {
        if self.generation != generation {
            self.entries.clear();
            self.generation = generation;
        }
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn empty(&self) -> &Neighbors<T> {
        &self.empty
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, key: CellKey, compute: F) -> &Neighbors<T>
    where
        F: FnOnce() -> Neighbors<T>,
    {
        self.entries.entry(key).or_insert_with(compute)
    }
}
