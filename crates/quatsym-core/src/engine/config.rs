use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const DEFAULT_MIN_SEQUENCE_LENGTH: usize = 20;
pub const DEFAULT_TRACE_ATOM_NAME: &str = "CA";
pub const DEFAULT_CONTACT_BIN_WIDTH: f64 = 10.0;
pub const DEFAULT_CONTACT_CUTOFF: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Chains with fewer trace residues than this are skipped.
    pub min_sequence_length: usize,
    /// Name of the atom taken from each residue to build the trace.
    pub trace_atom_name: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_sequence_length: DEFAULT_MIN_SEQUENCE_LENGTH,
            trace_atom_name: DEFAULT_TRACE_ATOM_NAME.to_string(),
        }
    }
}

/// How chains are folded into existing clusters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MergePolicy {
    /// Every chain seeds its own cluster.
    #[default]
    Disabled,
    /// Chains join a cluster whose representative has an identical sequence key.
    Exact,
    /// Chains join a cluster whose representative shares at least
    /// `min_identity` of its residue tokens, paired by residue number.
    Tolerant { min_identity: f64 },
}

/// Checks a tolerant-merge threshold lies in (0, 1].
pub fn validate_min_identity(min_identity: f64) -> Result<(), ConfigError> {
    if min_identity > 0.0 && min_identity <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name: "min_identity",
            reason: format!("must lie in (0, 1], got {}", min_identity),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusteringConfig {
    pub extraction: ExtractionConfig,
    pub merge: MergePolicy,
    /// Reorder clusters by descending size (then aligned length) after clustering.
    pub sort_by_size: bool,
}

#[derive(Default)]
pub struct ClusteringConfigBuilder {
    min_sequence_length: Option<usize>,
    trace_atom_name: Option<String>,
    merge: Option<MergePolicy>,
    sort_by_size: Option<bool>,
}

impl ClusteringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_sequence_length(mut self, length: usize) -> Self {
        self.min_sequence_length = Some(length);
        self
    }
    pub fn trace_atom_name(mut self, name: &str) -> Self {
        self.trace_atom_name = Some(name.to_string());
        self
    }
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge = Some(policy);
        self
    }
    pub fn sort_by_size(mut self, enabled: bool) -> Self {
        self.sort_by_size = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ClusteringConfig, ConfigError> {
        let trace_atom_name = self
            .trace_atom_name
            .unwrap_or_else(|| DEFAULT_TRACE_ATOM_NAME.to_string());
        if trace_atom_name.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "trace_atom_name",
                reason: "must not be empty".to_string(),
            });
        }

        let merge = self.merge.unwrap_or_default();
        if let MergePolicy::Tolerant { min_identity } = merge {
            validate_min_identity(min_identity)?;
        }

        Ok(ClusteringConfig {
            extraction: ExtractionConfig {
                min_sequence_length: self
                    .min_sequence_length
                    .unwrap_or(DEFAULT_MIN_SEQUENCE_LENGTH),
                trace_atom_name: trace_atom_name.trim().to_string(),
            },
            merge,
            sort_by_size: self.sort_by_size.unwrap_or(false),
        })
    }
}

/// Parameters of the grid-accelerated inter-chain contact search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConfig {
    pub bin_width: f64,
    pub cutoff: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_CONTACT_BIN_WIDTH,
            cutoff: DEFAULT_CONTACT_CUTOFF,
        }
    }
}

impl ContactConfig {
    /// Checks that the cutoff is positive and strictly below the bin width, so
    /// every pair within the cutoff falls into adjacent grid cells.
    pub fn new(bin_width: f64, cutoff: f64) -> Result<Self, ConfigError> {
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "bin_width",
                reason: format!("must be positive and finite, got {}", bin_width),
            });
        }
        if !(cutoff.is_finite() && cutoff > 0.0 && cutoff < bin_width) {
            return Err(ConfigError::InvalidParameter {
                name: "cutoff",
                reason: format!(
                    "must be positive and smaller than the bin width ({}), got {}",
                    bin_width, cutoff
                ),
            });
        }
        Ok(Self { bin_width, cutoff })
    }
}
