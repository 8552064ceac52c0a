//! # Core Models Module
//!
//! Data structures describing the structural input of the clustering pipeline
//! and the chain records it works on.
//!
//! ## Key Components
//!
//! - [`system`] - Arena-backed structural model (models, chains, residues, atoms)
//! - [`chain`], [`residue`], [`atom`] - The entities stored in a [`system::MolecularSystem`]
//! - [`record`] - [`record::ChainRecord`], one extracted chain trace with its identity tags
//! - [`ids`] - Stable key types for atoms, residues and chains
//!
//! ## Usage
//!
//! ```ignore
//! use quatsym::core::models::{atom::Atom, chain::ChainType, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain(1, "A", ChainType::Protein);
//! let residue_id = system.add_residue(chain_id, 1, "ALA")?;
//! system.add_atom_to_residue(residue_id, Atom::new("CA", residue_id, Point3::origin()));
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod record;
pub mod residue;
pub mod system;
