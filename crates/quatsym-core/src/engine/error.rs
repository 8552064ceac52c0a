use thiserror::Error;

use super::config::ConfigError;
use super::extraction::ExtractionError;
use crate::core::grid::GridError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Chain extraction failed for structure {structure_id}: {source}")]
    Extraction {
        structure_id: usize,
        #[source]
        source: ExtractionError,
    },

    #[error("Spatial grid error: {source}")]
    Grid {
        #[from]
        source: GridError,
    },
}
