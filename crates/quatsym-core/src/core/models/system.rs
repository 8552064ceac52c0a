use super::atom::Atom;
use super::chain::{Chain, ChainType};
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("Chain does not exist in this system")]
    ChainNotFound,
    #[error("Residue {number} of chain '{chain}' is already named '{existing}', not '{requested}'")]
    ResidueNameConflict {
        chain: String,
        number: isize,
        existing: String,
        requested: String,
    },
}

/// An in-memory structural model: one or more models, each made of chains,
/// residues and atoms.
///
/// Chains are kept in insertion order, which is the order used by chain
/// extraction and therefore the order that determines cluster ordering.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in the order they were added.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain ID and residue number.
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    /// Lookup map for finding chains by model number and chain identifier.
    chain_id_map: HashMap<(usize, String), ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Iterates over all chains of all models in insertion order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Iterates over the residues of a chain in chain order.
    ///
    /// Yields nothing if the chain does not exist.
    pub fn residues_of(&self, chain_id: ChainId) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains
            .get(chain_id)
            .map(|chain| chain.residues.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    /// Returns the number of distinct models present in the system.
    pub fn model_count(&self) -> usize {
        let mut models: Vec<usize> = self.chains.values().map(|c| c.model_number).collect();
        models.sort_unstable();
        models.dedup();
        models.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Finds a chain by model number and chain identifier.
    pub fn find_chain_by_id(&self, model_number: usize, id: &str) -> Option<ChainId> {
        self.chain_id_map
            .get(&(model_number, id.to_string()))
            .copied()
    }

    /// Finds a residue ID by its chain ID and residue number.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Adds a new chain to the given model or returns the existing one.
    ///
    /// This method is idempotent; if the model already contains a chain with
    /// the given identifier, the existing chain ID is returned and its type is
    /// left untouched.
    pub fn add_chain(&mut self, model_number: usize, id: &str, chain_type: ChainType) -> ChainId {
        let key = (model_number, id.to_string());
        if let Some(&existing) = self.chain_id_map.get(&key) {
            return existing;
        }
        let chain_id = self
            .chains
            .insert(Chain::new(id, model_number, chain_type));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(key, chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// Re-adding a residue number with a different name is an error; the
    /// stored residue is left untouched.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Result<ResidueId, SystemError> {
        let chain = self
            .chains
            .get_mut(chain_id)
            .ok_or(SystemError::ChainNotFound)?;
        let key = (chain_id, residue_number);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            let existing_name = self
                .residues
                .get(existing)
                .map(|residue| residue.name.as_str())
                .unwrap_or_default();
            if existing_name != name {
                return Err(SystemError::ResidueNameConflict {
                    chain: chain.id.clone(),
                    number: residue_number,
                    existing: existing_name.to_string(),
                    requested: name.to_string(),
                });
            }
            return Ok(existing);
        }

        let residue_id = self
            .residues
            .insert(Residue::new(residue_number, name, chain_id));
        self.residue_id_map.insert(key, residue_id);
        chain.residues.push(residue_id);
        Ok(residue_id)
    }

    /// Adds an atom to a specific residue, re-parenting it onto that residue.
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }
}
