use super::aggregation;
use super::cluster::SequenceCluster;
use crate::core::models::record::{ChainRecord, TraceAtom};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of one clustering run: clusters plus every derived view.
///
/// A result is immutable; the pipeline replaces it wholesale when it
/// recomputes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusteringResult {
    records: Vec<ChainRecord>,
    clusters: Vec<SequenceCluster>,
    traces: Vec<Vec<TraceAtom>>,
    coordinates: Vec<Vec<Point3<f64>>>,
}

impl ClusteringResult {
    pub(crate) fn new(records: Vec<ChainRecord>, clusters: Vec<SequenceCluster>) -> Self {
        let traces: Vec<Vec<TraceAtom>> =
            clusters.iter().flat_map(|c| c.aligned_traces()).collect();
        let coordinates = traces
            .iter()
            .map(|trace| trace.iter().map(|a| a.position).collect())
            .collect();
        Self {
            records,
            clusters,
            traces,
            coordinates,
        }
    }

    /// Extracted chain records in extraction order.
    pub fn records(&self) -> &[ChainRecord] {
        &self.records
    }

    pub fn clusters(&self) -> &[SequenceCluster] {
        &self.clusters
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn chain_count(&self) -> usize {
        self.records.len()
    }

    fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.member_count()).collect()
    }

    // --- Input order views ---

    pub fn chain_ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.chain_id().to_string()).collect()
    }

    pub fn model_numbers(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.model_number()).collect()
    }

    pub fn structure_ids(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.structure_id()).collect()
    }

    // --- Cluster order views ---

    pub fn chain_ids_in_cluster_order(&self) -> Vec<String> {
        self.clusters.iter().flat_map(|c| c.chain_ids()).collect()
    }

    pub fn model_numbers_in_cluster_order(&self) -> Vec<usize> {
        self.clusters.iter().flat_map(|c| c.model_numbers()).collect()
    }

    pub fn structure_ids_in_cluster_order(&self) -> Vec<usize> {
        self.clusters.iter().flat_map(|c| c.structure_ids()).collect()
    }

    /// Aligned trace atoms of every chain, in cluster order.
    pub fn aligned_traces(&self) -> &[Vec<TraceAtom>] {
        &self.traces
    }

    /// Aligned trace coordinates of every chain, in cluster order.
    pub fn trace_coordinates(&self) -> &[Vec<Point3<f64>>] {
        &self.coordinates
    }

    // --- Stoichiometry ---

    pub fn composition_formula(&self) -> String {
        aggregation::composition_formula(&self.sizes())
    }

    pub fn folds(&self) -> Vec<usize> {
        aggregation::folds(&self.sizes())
    }

    /// Cluster index of every chain, aligned with the cluster-order views.
    pub fn sequence_cluster_ids(&self) -> Vec<usize> {
        aggregation::cluster_ids(&self.sizes())
    }

    pub fn is_homomeric(&self) -> bool {
        self.clusters.len() == 1
    }

    /// Member count of the last cluster in cluster order; `None` without clusters.
    pub fn multiplicity(&self) -> Option<usize> {
        self.clusters.last().map(|c| c.member_count())
    }

    pub fn summary(&self) -> ClusterSummary {
        ClusterSummary {
            formula: self.composition_formula(),
            chain_count: self.chain_count(),
            cluster_count: self.cluster_count(),
            homomeric: self.is_homomeric(),
            multiplicity: self.multiplicity(),
            folds: self.folds(),
            clusters: self
                .clusters
                .iter()
                .enumerate()
                .map(|(index, cluster)| ClusterEntry {
                    letter: aggregation::cluster_letter(index).to_string(),
                    size: cluster.member_count(),
                    aligned_length: cluster.aligned_length(),
                    sequence: cluster
                        .members()
                        .first()
                        .map(|m| m.record.sequence().to_string())
                        .unwrap_or_default(),
                    chain_ids: cluster.chain_ids(),
                    model_numbers: cluster.model_numbers(),
                    structure_ids: cluster.structure_ids(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ClusteringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequence alignment clusters: {}", self.clusters.len())?;
        for cluster in &self.clusters {
            writeln!(
                f,
                "# seq: {} alignment length: {}",
                cluster.member_count(),
                cluster.aligned_length()
            )?;
        }
        Ok(())
    }
}

/// Serializable digest of a [`ClusteringResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterSummary {
    pub formula: String,
    pub chain_count: usize,
    pub cluster_count: usize,
    pub homomeric: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub multiplicity: Option<usize>,
    pub folds: Vec<usize>,
    pub clusters: Vec<ClusterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub letter: String,
    pub size: usize,
    pub aligned_length: usize,
    pub sequence: String,
    pub chain_ids: Vec<String>,
    pub model_numbers: Vec<usize>,
    pub structure_ids: Vec<usize>,
}
