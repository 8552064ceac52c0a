//! # quatsym Core Library
//!
//! Chain clustering by sequence identity and uniform spatial hashing, the two
//! building blocks that quaternary-structure symmetry analysis runs on before
//! any structural superposition happens.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`,
//!   `ChainRecord`), residue identifiers and geometry helpers, and the generic
//!   `SpatialGrid` bucket index.
//!
//! - **[`engine`]: The Logic Core.** Chain extraction, pluggable cluster
//!   matchers, first-occurrence clustering, stoichiometry aggregation
//!   (composition formula, folds, cluster ids), configuration and errors.
//!
//! - **[`workflows`]: The Public API.** The `ChainClusterer` pipeline with its
//!   explicit `Empty -> Stale -> Computed` lifecycle, and the grid-accelerated
//!   inter-chain contact search.

pub mod core;
pub mod engine;
pub mod workflows;
