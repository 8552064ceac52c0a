use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Peter Rose",
    version,
    about = "quatsym CLI - Sequence clustering of protein chains and grid-accelerated contact search for quaternary structure symmetry analysis.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster the protein chains of one or more structures by sequence and report their stoichiometry.
    Cluster(ClusterArgs),
    /// Find chain pairs of a structure whose C-alpha traces come within a distance cutoff.
    Contacts(ContactsArgs),
}

/// How chains are merged into clusters.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeArg {
    /// Every chain forms its own cluster.
    Disabled,
    /// Chains with identical residue numbering and names share a cluster.
    Exact,
    /// Chains sharing at least `--min-identity` of their residues share a cluster.
    Tolerant,
}

/// Arguments for the `cluster` subcommand.
#[derive(Args, Debug, Default)]
pub struct ClusterArgs {
    // --- Core Arguments ---
    /// Input assembly files in TOML format. Each file is one structure of the unit of work.
    #[arg(short, long = "input", required = true, num_args(1..), value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the cluster summary to this TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Clustering Overrides ---
    /// Override the merge policy from the config file.
    #[arg(short, long, value_enum, value_name = "POLICY")]
    pub merge: Option<MergeArg>,

    /// Minimum residue identity for the tolerant merge policy, in (0, 1].
    #[arg(long, value_name = "FLOAT")]
    pub min_identity: Option<f64>,

    /// Override the minimum number of trace residues a chain needs to be clustered.
    #[arg(long, value_name = "INT")]
    pub min_sequence_length: Option<usize>,

    /// Order clusters by descending size instead of first occurrence.
    #[arg(long)]
    pub sort_by_size: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S merge.policy=exact
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug, Default)]
pub struct ContactsArgs {
    /// Input assembly file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the spatial grid bin width, in Angstroms.
    #[arg(short, long, value_name = "FLOAT")]
    pub bin_width: Option<f64>,

    /// Override the contact distance cutoff, in Angstroms. Must be smaller than the bin width.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.cutoff=6.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
