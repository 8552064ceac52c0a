use crate::cli::ClusterArgs;
use crate::config::build_cluster_config;
use crate::error::{CliError, Result};
use crate::input::load_assembly;
use quatsym::engine::result::ClusteringResult;
use quatsym::workflows::cluster::ChainClusterer;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ClusterArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_cluster_config(&args)?;
    let mut clusterer = ChainClusterer::new(config)?;

    for path in &args.inputs {
        info!("Loading input structure from {:?}", path);
        let system = load_assembly(path)?;
        let structure_id = clusterer.add_structure(system);
        info!(structure_id, "Structure queued for clustering.");
    }

    let result = clusterer.result()?;
    if result.chain_count() == 0 {
        warn!("No protein chain passed extraction; nothing to cluster.");
    }

    print!("{}", render_report(result));

    if let Some(output) = &args.output {
        write_summary(result, output)?;
        println!("Cluster summary written to: {}", output.display());
    }
    Ok(())
}

fn render_report(result: &ClusteringResult) -> String {
    let mut report = result.to_string();
    report.push_str(&format!("Stoichiometry: {}\n", display_or_dash(&result.composition_formula())));
    report.push_str(&format!(
        "Homomeric: {}\n",
        if result.is_homomeric() { "yes" } else { "no" }
    ));
    report.push_str(&format!("Folds: {:?}\n", result.folds()));
    for (index, cluster) in result.clusters().iter().enumerate() {
        report.push_str(&format!(
            "  cluster {}: {}\n",
            index,
            cluster.chain_ids().join(" ")
        ));
    }
    report
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn write_summary(result: &ClusteringResult, path: &Path) -> Result<()> {
    let text = toml::to_string_pretty(&result.summary())
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to serialize cluster summary: {}", e)))?;
    std::fs::write(path, text)?;
    Ok(())
}
