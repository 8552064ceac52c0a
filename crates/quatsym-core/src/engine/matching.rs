use super::cluster::{ClusterRepresentative, ResidueAlignment};
use super::config::{ConfigError, MergePolicy, validate_min_identity};
use crate::core::models::record::ChainRecord;
use std::collections::HashMap;
use std::fmt::Debug;

/// Decides whether a chain belongs to the cluster of a representative.
///
/// A match yields the residue correspondence between the representative
/// (`alignment1`) and the candidate (`alignment2`).
pub trait ClusterMatcher: Debug + Send + Sync {
    fn matches(
        &self,
        representative: &ClusterRepresentative,
        candidate: &ChainRecord,
    ) -> Option<ResidueAlignment>;
}

/// Matches only chains whose sequence key equals the representative's.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSequenceMatcher;

impl ClusterMatcher for ExactSequenceMatcher {
    fn matches(
        &self,
        representative: &ClusterRepresentative,
        candidate: &ChainRecord,
    ) -> Option<ResidueAlignment> {
        representative
            .is_match(candidate)
            .then(|| ResidueAlignment::identity(candidate.len()))
    }
}

/// Matches chains sharing at least `min_identity` of their residue tokens
/// with the representative.
///
/// Residues are paired by residue number; a pair counts as identical when
/// the residue names agree. Identity is the number of identical pairs divided
/// by the longer of the two traces.
#[derive(Debug, Clone, Copy)]
pub struct TolerantSequenceMatcher {
    min_identity: f64,
}

impl TolerantSequenceMatcher {
    /// Fails unless `min_identity` lies in (0, 1].
    pub fn new(min_identity: f64) -> Result<Self, ConfigError> {
        validate_min_identity(min_identity)?;
        Ok(Self { min_identity })
    }

    pub fn min_identity(&self) -> f64 {
        self.min_identity
    }

    /// Identical residue pairs as a fraction of the longer trace, along with
    /// their correspondence.
    pub fn identity(
        representative: &ClusterRepresentative,
        candidate: &ChainRecord,
    ) -> (f64, ResidueAlignment) {
        let mut by_number: HashMap<isize, usize> = HashMap::new();
        for (i, atom) in representative.atoms().iter().enumerate() {
            by_number.entry(atom.residue_number).or_insert(i);
        }

        let mut alignment = ResidueAlignment {
            alignment1: Vec::new(),
            alignment2: Vec::new(),
        };
        for (j, atom) in candidate.atoms().iter().enumerate() {
            if let Some(&i) = by_number.get(&atom.residue_number) {
                if representative.atoms()[i].residue_name == atom.residue_name {
                    alignment.alignment1.push(i);
                    alignment.alignment2.push(j);
                }
            }
        }

        let longest = representative.atoms().len().max(candidate.len());
        if longest == 0 {
            return (0.0, alignment);
        }
        (alignment.len() as f64 / longest as f64, alignment)
    }
}

impl ClusterMatcher for TolerantSequenceMatcher {
    fn matches(
        &self,
        representative: &ClusterRepresentative,
        candidate: &ChainRecord,
    ) -> Option<ResidueAlignment> {
        let (identity, alignment) = Self::identity(representative, candidate);
        (identity >= self.min_identity && !alignment.is_empty()).then_some(alignment)
    }
}

/// The matcher implementing a merge policy, or `None` when merging is disabled.
pub fn matcher_for(policy: MergePolicy) -> Result<Option<Box<dyn ClusterMatcher>>, ConfigError> {
    Ok(match policy {
        MergePolicy::Disabled => None,
        MergePolicy::Exact => Some(Box::new(ExactSequenceMatcher)),
        MergePolicy::Tolerant { min_identity } => {
            Some(Box::new(TolerantSequenceMatcher::new(min_identity)?))
        }
    })
}
