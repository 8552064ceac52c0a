//! # Core Module
//!
//! Stateless building blocks of the library.
//!
//! - **Structural Data** ([`models`]) - Structures, chains, residues, atoms and
//!   the extracted [`models::record::ChainRecord`]s the clustering engine consumes
//! - **Spatial Indexing** ([`grid`]) - A generic uniform bucket grid for
//!   neighbor and cross-set proximity queries over 3D coordinates
//! - **Utilities** ([`utils`]) - Residue identifiers and point-set geometry helpers
//!
//! Nothing in this module keeps state across calls beyond what the caller owns;
//! the stateful pipeline lives in [`crate::engine`] and [`crate::workflows`].

pub mod grid;
pub mod models;
pub mod utils;
