use crate::core::grid::{GridError, SpatialGrid};
use crate::core::models::record::ChainRecord;
use crate::core::utils::geometry::{count_pairs_within, min_pairwise_distance};
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use itertools::Itertools;
use nalgebra::Point3;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Two chains whose traces come within the contact cutoff.
///
/// `first` and `second` index into the record slice passed to
/// [`find_chain_contacts`], with `first < second`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainContact {
    pub first: usize,
    pub second: usize,
    /// Trace-atom pairs closer than the cutoff.
    pub contact_count: usize,
    pub min_distance: f64,
}

/// Finds every pair of chains with at least one trace-atom pair within
/// `config.cutoff`.
///
/// Each chain trace is binned into its own [`SpatialGrid`]; grid intersection
/// narrows both traces to the atoms near the other chain before the exact
/// distance test. Contacts are returned in pair order.
#[instrument(skip_all, name = "contact_search", fields(num_chains = records.len()))]
pub fn find_chain_contacts(
    records: &[ChainRecord],
    config: &ContactConfig,
) -> Result<Vec<ChainContact>, EngineError> {
    let config = ContactConfig::new(config.bin_width, config.cutoff)?;
    info!(
        bin_width = config.bin_width,
        cutoff = config.cutoff,
        "Searching for inter-chain contacts."
    );

    let grids = records
        .iter()
        .map(|record| build_trace_grid(record, config.bin_width))
        .collect::<Result<Vec<_>, EngineError>>()?;

    let pairs: Vec<(usize, usize)> = (0..records.len()).tuple_combinations().collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let contacts: Vec<ChainContact> = iterator
        .map(|&(first, second)| -> Result<Option<ChainContact>, EngineError> {
            let found = contact_between(
                &records[first],
                &records[second],
                &grids[first],
                &grids[second],
                config.cutoff,
            )?;
            Ok(found.map(|(contact_count, min_distance)| ChainContact {
                first,
                second,
                contact_count,
                min_distance,
            }))
        })
        .collect::<Result<Vec<_>, EngineError>>()?
        .into_iter()
        .flatten()
        .collect();

    info!(
        num_pairs = pairs.len(),
        num_contacts = contacts.len(),
        "Contact search complete."
    );
    Ok(contacts)
}

fn build_trace_grid(record: &ChainRecord, bin_width: f64) -> Result<SpatialGrid<usize>, EngineError> {
    let mut grid = SpatialGrid::new(bin_width)?;
    for (index, atom) in record.atoms().iter().enumerate() {
        grid.insert(&atom.position, index)?;
    }
    Ok(grid)
}

fn contact_between(
    first: &ChainRecord,
    second: &ChainRecord,
    first_grid: &SpatialGrid<usize>,
    second_grid: &SpatialGrid<usize>,
    cutoff: f64,
) -> Result<Option<(usize, f64)>, GridError> {
    let near_second = first_grid.intersection(second_grid)?;
    if near_second.is_empty() {
        return Ok(None);
    }
    let near_first = second_grid.intersection(first_grid)?;

    let positions = |record: &ChainRecord, indices: &[usize]| -> Vec<Point3<f64>> {
        indices
            .iter()
            .filter_map(|&i| record.atoms().get(i).map(|a| a.position))
            .collect()
    };
    let candidates_first = positions(first, &near_second);
    let candidates_second = positions(second, &near_first);
    debug!(
        first = first.chain_id(),
        second = second.chain_id(),
        candidates = candidates_first.len() + candidates_second.len(),
        "Grid pre-filter passed."
    );

    let contact_count = count_pairs_within(&candidates_first, &candidates_second, cutoff);
    if contact_count == 0 {
        return Ok(None);
    }
    Ok(min_pairwise_distance(&candidates_first, &candidates_second)
        .map(|min_distance| (contact_count, min_distance)))
}
