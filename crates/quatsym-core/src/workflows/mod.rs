//! # Workflows Module
//!
//! High-level entry points that tie the `core` data model and the `engine`
//! together.
//!
//! - **Chain clustering** ([`cluster`]) - The [`cluster::ChainClusterer`]
//!   pipeline: structures in, sequence clusters and stoichiometry out.
//! - **Chain contacts** ([`contacts`]) - Grid-accelerated search for chain
//!   pairs whose traces come within a distance cutoff.

pub mod cluster;
pub mod contacts;
