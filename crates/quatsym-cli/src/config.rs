use crate::cli::{ClusterArgs, ContactsArgs, MergeArg};
use crate::error::{CliError, Result};
use quatsym::engine::config::{
    ClusteringConfig, ClusteringConfigBuilder, ContactConfig, MergePolicy,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialExtractionConfig {
    min_sequence_length: Option<usize>,
    trace_atom: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialMergePolicy {
    Disabled,
    Exact,
    Tolerant,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialMergeConfig {
    policy: Option<PartialMergePolicy>,
    min_identity: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialContactConfig {
    bin_width: Option<f64>,
    cutoff: Option<f64>,
}

/// Contents of a `quatsym` TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialConfig {
    extraction: Option<PartialExtractionConfig>,
    merge: Option<PartialMergeConfig>,
    sort_by_size: Option<bool>,
    contacts: Option<PartialContactConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Builds the clustering configuration: CLI flags win over `-S` values,
    /// which win over the file, which wins over library defaults.
    pub fn merge_with_cli(self, args: &ClusterArgs) -> Result<ClusteringConfig> {
        let config = apply_set_values(self, &args.set_values)?;
        let extraction = config.extraction.unwrap_or_default();
        let merge_file = config.merge.unwrap_or_default();

        let policy = args
            .merge
            .map(|m| match m {
                MergeArg::Disabled => PartialMergePolicy::Disabled,
                MergeArg::Exact => PartialMergePolicy::Exact,
                MergeArg::Tolerant => PartialMergePolicy::Tolerant,
            })
            .or(merge_file.policy);
        let min_identity = args.min_identity.or(merge_file.min_identity);

        let merge = match policy {
            None | Some(PartialMergePolicy::Disabled) => MergePolicy::Disabled,
            Some(PartialMergePolicy::Exact) => MergePolicy::Exact,
            Some(PartialMergePolicy::Tolerant) => {
                let min_identity = min_identity.ok_or_else(|| {
                    CliError::Config(
                        "The tolerant merge policy requires 'merge.min-identity' (or --min-identity)."
                            .to_string(),
                    )
                })?;
                MergePolicy::Tolerant { min_identity }
            }
        };
        // A file threshold is simply unused under another policy; a CLI one is a mistake.
        if args.min_identity.is_some() && !matches!(merge, MergePolicy::Tolerant { .. }) {
            return Err(CliError::Argument(
                "--min-identity only applies to the tolerant merge policy.".to_string(),
            ));
        }

        let mut builder = ClusteringConfigBuilder::new()
            .merge_policy(merge)
            .sort_by_size(args.sort_by_size || config.sort_by_size.unwrap_or(false));
        if let Some(length) = args.min_sequence_length.or(extraction.min_sequence_length) {
            builder = builder.min_sequence_length(length);
        }
        if let Some(atom) = extraction.trace_atom.as_deref() {
            builder = builder.trace_atom_name(atom);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// Builds the contact-search configuration along with the extraction
    /// settings used to obtain the chain traces.
    pub fn merge_with_contacts_cli(
        self,
        args: &ContactsArgs,
    ) -> Result<(ClusteringConfig, ContactConfig)> {
        let config = apply_set_values(self, &args.set_values)?;
        let contacts = config.contacts.clone().unwrap_or_default();
        let defaults = ContactConfig::default();

        let contact_config = ContactConfig::new(
            args.bin_width
                .or(contacts.bin_width)
                .unwrap_or(defaults.bin_width),
            args.cutoff.or(contacts.cutoff).unwrap_or(defaults.cutoff),
        )
        .map_err(|e| CliError::Config(e.to_string()))?;

        let extraction = config.extraction.unwrap_or_default();
        let mut builder = ClusteringConfigBuilder::new();
        if let Some(length) = extraction.min_sequence_length {
            builder = builder.min_sequence_length(length);
        }
        if let Some(atom) = extraction.trace_atom.as_deref() {
            builder = builder.trace_atom_name(atom);
        }
        let clustering_config = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        Ok((clustering_config, contact_config))
    }
}

pub fn build_cluster_config(args: &ClusterArgs) -> Result<ClusteringConfig> {
    PartialConfig::load(args.config.as_deref())?.merge_with_cli(args)
}

pub fn build_contact_config(args: &ContactsArgs) -> Result<(ClusteringConfig, ContactConfig)> {
    PartialConfig::load(args.config.as_deref())?.merge_with_contacts_cli(args)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: PartialConfig, set_values: &[String]) -> Result<PartialConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "extraction.min-sequence-length" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .min_sequence_length = Some(parse_value(key, value_str, "integer")?);
            }
            "extraction.trace-atom" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .trace_atom = Some(value_str.to_string());
            }
            "merge.policy" => {
                let policy = match value_str {
                    "disabled" => PartialMergePolicy::Disabled,
                    "exact" => PartialMergePolicy::Exact,
                    "tolerant" => PartialMergePolicy::Tolerant,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid merge policy for {}: {}. Expected disabled, exact or tolerant.",
                            key, value_str
                        )));
                    }
                };
                config.merge.get_or_insert_with(Default::default).policy = Some(policy);
            }
            "merge.min-identity" => {
                config.merge.get_or_insert_with(Default::default).min_identity =
                    Some(parse_value(key, value_str, "float")?);
            }
            "sort-by-size" => {
                config.sort_by_size = Some(parse_value(key, value_str, "boolean")?);
            }
            "contacts.bin-width" => {
                config.contacts.get_or_insert_with(Default::default).bin_width =
                    Some(parse_value(key, value_str, "float")?);
            }
            "contacts.cutoff" => {
                config.contacts.get_or_insert_with(Default::default).cutoff =
                    Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("quatsym.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn cluster_args() -> ClusterArgs {
        ClusterArgs {
            inputs: vec![PathBuf::from("assembly.toml")],
            ..Default::default()
        }
    }

    #[test]
    fn no_config_file_yields_library_defaults() {
        let config = build_cluster_config(&cluster_args()).unwrap();
        assert_eq!(config, ClusteringConfig::default());
    }

    #[test]
    fn file_values_are_applied() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
sort-by-size = true

[extraction]
min-sequence-length = 5
trace-atom = "CB"

[merge]
policy = "tolerant"
min-identity = 0.95
"#,
        );
        let args = ClusterArgs {
            config: Some(path),
            ..cluster_args()
        };
        let config = build_cluster_config(&args).unwrap();
        assert_eq!(config.extraction.min_sequence_length, 5);
        assert_eq!(config.extraction.trace_atom_name, "CB");
        assert_eq!(config.merge, MergePolicy::Tolerant { min_identity: 0.95 });
        assert!(config.sort_by_size);
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[merge]\npolicy = \"disabled\"\n");
        let args = ClusterArgs {
            config: Some(path),
            merge: Some(MergeArg::Exact),
            min_sequence_length: Some(3),
            set_values: vec![
                "merge.policy=tolerant".to_string(),
                "extraction.min-sequence-length=8".to_string(),
            ],
            ..cluster_args()
        };
        let config = build_cluster_config(&args).unwrap();
        assert_eq!(config.merge, MergePolicy::Exact);
        assert_eq!(config.extraction.min_sequence_length, 3);
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[extraction]\ntrace-atom = \"CB\"\n");
        let args = ClusterArgs {
            config: Some(path),
            set_values: vec!["extraction.trace-atom=P".to_string()],
            ..cluster_args()
        };
        let config = build_cluster_config(&args).unwrap();
        assert_eq!(config.extraction.trace_atom_name, "P");
    }

    #[test]
    fn tolerant_policy_without_threshold_is_rejected() {
        let args = ClusterArgs {
            merge: Some(MergeArg::Tolerant),
            ..cluster_args()
        };
        assert!(matches!(build_cluster_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let args = ClusterArgs {
            merge: Some(MergeArg::Tolerant),
            min_identity: Some(1.5),
            ..cluster_args()
        };
        assert!(matches!(build_cluster_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn threshold_without_tolerant_policy_is_rejected() {
        let args = ClusterArgs {
            merge: Some(MergeArg::Exact),
            min_identity: Some(0.9),
            ..cluster_args()
        };
        assert!(matches!(build_cluster_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn cli_policy_overrides_tolerant_file_with_threshold() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[merge]\npolicy = \"tolerant\"\nmin-identity = 0.9\n",
        );
        let args = ClusterArgs {
            config: Some(path),
            merge: Some(MergeArg::Exact),
            ..cluster_args()
        };
        let config = build_cluster_config(&args).unwrap();
        assert_eq!(config.merge, MergePolicy::Exact);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[merge]\nthreshold = 0.9\n");
        let err = PartialConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for value in ["merge.policy", "merge.policy=fuzzy", "sort-by-size=maybe", "nope=1"] {
            let result = apply_set_values(PartialConfig::default(), &[value.to_string()]);
            assert!(matches!(result, Err(CliError::Config(_))), "{value}");
        }
    }

    #[test]
    fn contact_config_merges_file_and_cli() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[contacts]\nbin-width = 12.0\ncutoff = 6.0\n");
        let args = ContactsArgs {
            input: PathBuf::from("assembly.toml"),
            config: Some(path),
            cutoff: Some(9.0),
            ..Default::default()
        };
        let (clustering, contacts) = build_contact_config(&args).unwrap();
        assert_eq!(contacts, ContactConfig { bin_width: 12.0, cutoff: 9.0 });
        assert_eq!(clustering.extraction, ClusteringConfig::default().extraction);
    }

    #[test]
    fn contact_cutoff_at_bin_width_is_rejected() {
        let args = ContactsArgs {
            input: PathBuf::from("assembly.toml"),
            bin_width: Some(5.0),
            cutoff: Some(5.0),
            ..Default::default()
        };
        assert!(matches!(build_contact_config(&args), Err(CliError::Config(_))));
    }
}
