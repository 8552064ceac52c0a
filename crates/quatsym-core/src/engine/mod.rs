//! # Engine Module
//!
//! The clustering engine: groups extracted chain records into sequence
//! clusters and derives the stoichiometry views consumed by downstream symmetry
//! analysis.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Extraction, merge and contact-search settings
//! - **Extraction** ([`extraction`]) - The [`extraction::ChainExtractor`] seam and the default protein extractor
//! - **Clusters** ([`cluster`]) - Representatives, members and residue alignments
//! - **Matching** ([`matching`]) - Pluggable "same cluster" predicates
//! - **Clustering** ([`clustering`]) - First-occurrence ordered grouping and size sorting
//! - **Aggregation** ([`aggregation`]) - Composition formula, folds and per-chain cluster ids
//! - **Results** ([`result`]) - Immutable [`result::ClusteringResult`] snapshots
//! - **State Tracking** ([`state`]) - The `Empty -> Stale -> Computed` pipeline lifecycle
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod aggregation;
pub mod cluster;
pub mod clustering;
pub mod config;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod result;
pub mod state;
