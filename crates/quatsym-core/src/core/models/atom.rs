use super::ids::ResidueId;
use nalgebra::Point3;

/// A single atom of a structural model.
///
/// Only the information needed to build coordinate traces is kept: the atom
/// name (used to select the trace atom of each residue, e.g. `"CA"`), the owning
/// residue and its position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            position,
        }
    }
}
