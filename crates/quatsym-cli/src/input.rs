use crate::error::{CliError, Result};
use nalgebra::Point3;
use quatsym::core::models::atom::Atom;
use quatsym::core::models::chain::ChainType;
use quatsym::core::models::system::MolecularSystem;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A structure described in TOML:
///
/// ```toml
/// [[chains]]
/// id = "A"
/// model = 1            # optional, defaults to 1
/// type = "protein"     # optional, defaults to protein
///
/// [[chains.residues]]
/// number = 1
/// name = "MET"
/// atoms = [{ name = "CA", position = [0.0, 1.5, -2.0] }]
/// ```
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssemblyFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chains: Vec<ChainEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChainEntry {
    pub id: String,
    #[serde(default = "default_model")]
    pub model: usize,
    #[serde(rename = "type", default = "default_chain_type")]
    pub chain_type: String,
    #[serde(default)]
    pub residues: Vec<ResidueEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResidueEntry {
    pub number: isize,
    pub name: String,
    #[serde(default)]
    pub atoms: Vec<AtomEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AtomEntry {
    pub name: String,
    pub position: [f64; 3],
}

fn default_model() -> usize {
    1
}

fn default_chain_type() -> String {
    "protein".to_string()
}

impl AssemblyFile {
    pub fn into_system(self) -> Result<MolecularSystem> {
        let mut system = MolecularSystem::new();
        for chain in self.chains {
            // Unrecognized chain types parse as `Other`.
            let chain_type: ChainType = chain
                .chain_type
                .parse()
                .map_err(|e| CliError::Argument(format!("{}", e)))?;
            let chain_id = system.add_chain(chain.model, &chain.id, chain_type);
            for residue in chain.residues {
                if system.find_residue_by_id(chain_id, residue.number).is_some() {
                    return Err(CliError::Argument(format!(
                        "Residue {} appears more than once in chain '{}' of model {}",
                        residue.number, chain.id, chain.model
                    )));
                }
                let residue_id = system
                    .add_residue(chain_id, residue.number, &residue.name)
                    .map_err(|e| CliError::Argument(e.to_string()))?;
                for atom in residue.atoms {
                    let [x, y, z] = atom.position;
                    system
                        .add_atom_to_residue(
                            residue_id,
                            Atom::new(&atom.name, residue_id, Point3::new(x, y, z)),
                        )
                        .ok_or_else(|| {
                            CliError::Argument(format!(
                                "Residue {} of chain '{}' vanished while loading",
                                residue.number, chain.id
                            ))
                        })?;
                }
            }
        }
        Ok(system)
    }
}

/// Reads an assembly file into a [`MolecularSystem`].
pub fn load_assembly(path: &Path) -> Result<MolecularSystem> {
    let content = std::fs::read_to_string(path)?;
    let assembly: AssemblyFile =
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    debug!(
        path = %path.display(),
        name = assembly.name.as_deref().unwrap_or("-"),
        num_chains = assembly.chains.len(),
        "Assembly file parsed."
    );
    assembly.into_system()
}
