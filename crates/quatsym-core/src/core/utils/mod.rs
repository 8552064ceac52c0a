//! Small stateless helpers shared by the models and the engine: residue
//! identifiers and point-set geometry.

pub mod geometry;
pub mod identifiers;
