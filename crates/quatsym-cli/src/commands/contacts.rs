use crate::cli::ContactsArgs;
use crate::config::build_contact_config;
use crate::error::Result;
use crate::input::load_assembly;
use quatsym::engine::error::EngineError;
use quatsym::engine::extraction::{ChainExtractor, ProteinChainExtractor};
use quatsym::workflows::contacts::find_chain_contacts;
use tracing::info;

pub fn run(args: ContactsArgs) -> Result<()> {
    let (clustering_config, contact_config) = build_contact_config(&args)?;

    info!("Loading input structure from {:?}", &args.input);
    let system = load_assembly(&args.input)?;

    let extractor = ProteinChainExtractor::new(clustering_config.extraction);
    let records = extractor
        .extract(&system, 0)
        .map_err(|source| EngineError::Extraction {
            structure_id: 0,
            source,
        })?;
    info!("Extracted {} chain trace(s).", records.len());

    let contacts = find_chain_contacts(&records, &contact_config)?;

    println!(
        "Chain contacts within {:.2} A: {}",
        contact_config.cutoff,
        contacts.len()
    );
    for contact in &contacts {
        let first = &records[contact.first];
        let second = &records[contact.second];
        println!(
            "  {}/{} - {}/{}: {} pair(s), min distance {:.2} A",
            first.model_number(),
            first.chain_id(),
            second.model_number(),
            second.chain_id(),
            contact.contact_count,
            contact.min_distance
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::input::tests::assembly_toml;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn runs_on_a_small_assembly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assembly.toml");
        std::fs::write(
            &path,
            assembly_toml(&[
                ("A", 1, &["GLY", "ALA"][..], [0.0, 0.0, 0.0]),
                ("B", 1, &["GLY", "ALA"][..], [0.0, 5.0, 0.0]),
            ]),
        )
        .unwrap();
        let args = ContactsArgs {
            input: path,
            set_values: vec!["extraction.min-sequence-length=2".to_string()],
            ..Default::default()
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn missing_input_fails() {
        let args = ContactsArgs {
            input: PathBuf::from("/nonexistent/assembly.toml"),
            ..Default::default()
        };
        assert!(matches!(run(args), Err(CliError::Io(_))));
    }
}
