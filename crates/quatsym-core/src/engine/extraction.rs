use super::config::ExtractionConfig;
use crate::core::models::chain::ChainType;
use crate::core::models::record::{ChainRecord, TraceAtom};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::{is_amino_acid, is_unknown_residue, one_letter_code};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Non-finite trace coordinate in chain '{chain_id}' (model {model_number}), residue {residue_number}")]
    InvalidCoordinate {
        chain_id: String,
        model_number: usize,
        residue_number: isize,
    },

    #[error("{0}")]
    Custom(String),
}

/// Turns one structure into the ordered chain records the clustering step
/// consumes.
///
/// `structure_id` is the position of the structure in the unit of work and must
/// be copied onto every record produced.
pub trait ChainExtractor {
    fn extract(
        &self,
        system: &MolecularSystem,
        structure_id: usize,
    ) -> Result<Vec<ChainRecord>, ExtractionError>;
}

/// Extracts one trace per protein chain: the trace atom of every standard
/// amino-acid residue, in chain order.
///
/// Residues that are not amino acids, `UNK` residues and residues lacking the
/// trace atom are skipped. Chains whose remaining trace is shorter than the
/// configured minimum are dropped.
#[derive(Debug, Clone, Default)]
pub struct ProteinChainExtractor {
    config: ExtractionConfig,
}

impl ProteinChainExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}

impl ChainExtractor for ProteinChainExtractor {
    fn extract(
        &self,
        system: &MolecularSystem,
        structure_id: usize,
    ) -> Result<Vec<ChainRecord>, ExtractionError> {
        let mut records = Vec::new();

        for (chain_id, chain) in system.chains_iter() {
            if chain.chain_type != ChainType::Protein {
                trace!(chain = %chain.id, chain_type = %chain.chain_type, "Skipping non-protein chain.");
                continue;
            }

            let mut atoms = Vec::with_capacity(chain.residues().len());
            let mut sequence = String::with_capacity(chain.residues().len());

            for (_, residue) in system.residues_of(chain_id) {
                if !is_amino_acid(&residue.name) || is_unknown_residue(&residue.name) {
                    continue;
                }
                let Some(atom) = residue
                    .get_atom_id_by_name(&self.config.trace_atom_name)
                    .and_then(|id| system.atom(id))
                else {
                    continue;
                };
                let p = atom.position;
                if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                    return Err(ExtractionError::InvalidCoordinate {
                        chain_id: chain.id.clone(),
                        model_number: chain.model_number,
                        residue_number: residue.number,
                    });
                }
                atoms.push(TraceAtom::new(p, residue.number, residue.name.trim(), &chain.id));
                sequence.push(one_letter_code(&residue.name));
            }

            if atoms.len() < self.config.min_sequence_length {
                debug!(
                    chain = %chain.id,
                    model = chain.model_number,
                    length = atoms.len(),
                    minimum = self.config.min_sequence_length,
                    "Skipping chain shorter than the minimum sequence length."
                );
                continue;
            }

            records.push(ChainRecord::new(
                atoms,
                &chain.id,
                chain.model_number,
                structure_id,
                sequence,
            ));
        }

        Ok(records)
    }
}
