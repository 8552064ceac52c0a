use crate::core::models::system::MolecularSystem;
use crate::engine::clustering::{cluster_chains, sort_clusters_by_size};
use crate::engine::config::ClusteringConfig;
use crate::engine::error::EngineError;
use crate::engine::extraction::{ChainExtractor, ProteinChainExtractor};
use crate::engine::matching::{ClusterMatcher, matcher_for};
use crate::engine::result::ClusteringResult;
use crate::engine::state::PipelineState;
use tracing::{debug, info, instrument};

/// The clustering pipeline for one unit of work (one assembly or a set of
/// related structures).
///
/// Structures are added one at a time; each addition marks the pipeline stale.
/// [`ChainClusterer::result`] runs extraction, clustering and aggregation over
/// every structure added so far, then serves the cached result until the next
/// addition.
///
/// An instance is not meant to be shared between worker threads; build one per
/// unit of work.
pub struct ChainClusterer {
    config: ClusteringConfig,
    extractor: Box<dyn ChainExtractor>,
    matcher: Option<Box<dyn ClusterMatcher>>,
    structures: Vec<MolecularSystem>,
    state: PipelineState,
    /// Last published result; only served while the state is `Computed`.
    cached: Option<ClusteringResult>,
}

impl ChainClusterer {
    /// Fails with [`EngineError::Config`] if the merge policy carries an
    /// invalid threshold.
    pub fn new(config: ClusteringConfig) -> Result<Self, EngineError> {
        let extractor = Box::new(ProteinChainExtractor::new(config.extraction.clone()));
        let matcher = matcher_for(config.merge)?;
        Ok(Self {
            config,
            extractor,
            matcher,
            structures: Vec::new(),
            state: PipelineState::Empty,
            cached: None,
        })
    }

    /// Replaces the chain extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn ChainExtractor>) -> Self {
        self.extractor = extractor;
        self.mark_stale();
        self
    }

    /// Replaces the same-cluster predicate chosen by the merge policy.
    pub fn with_matcher(mut self, matcher: Box<dyn ClusterMatcher>) -> Self {
        self.matcher = Some(matcher);
        self.mark_stale();
        self
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The published result, if the pipeline is up to date.
    pub fn cached_result(&self) -> Option<&ClusteringResult> {
        self.cached.as_ref().filter(|_| self.state.is_computed())
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    /// Adds a structure to the unit of work and returns its structure id.
    pub fn add_structure(&mut self, system: MolecularSystem) -> usize {
        let structure_id = self.structures.len();
        self.structures.push(system);
        self.state = PipelineState::Stale;
        self.cached = None;
        debug!(structure_id, "Structure added; clustering marked stale.");
        structure_id
    }

    fn mark_stale(&mut self) {
        if !self.structures.is_empty() {
            self.state = PipelineState::Stale;
            self.cached = None;
        }
    }

    /// The clustering result, recomputed first if anything changed since the
    /// last computation.
    ///
    /// A failed computation leaves the pipeline stale and publishes nothing.
    pub fn result(&mut self) -> Result<&ClusteringResult, EngineError> {
        let result = match self.cached.take() {
            Some(result) if self.state.is_computed() => result,
            _ => self.compute()?,
        };
        self.state = PipelineState::Computed;
        Ok(self.cached.insert(result))
    }

    #[instrument(skip_all, name = "chain_clustering_pipeline", fields(num_structures = self.structures.len()))]
    fn compute(&self) -> Result<ClusteringResult, EngineError> {
        info!("Extracting chains from {} structure(s).", self.structures.len());

        let mut records = Vec::new();
        for (structure_id, system) in self.structures.iter().enumerate() {
            let extracted = self
                .extractor
                .extract(system, structure_id)
                .map_err(|source| EngineError::Extraction {
                    structure_id,
                    source,
                })?;
            debug!(structure_id, num_chains = extracted.len(), "Chains extracted.");
            records.extend(extracted);
        }

        let mut clusters = cluster_chains(&records, self.matcher.as_deref());
        if self.config.sort_by_size {
            sort_clusters_by_size(&mut clusters);
        }

        let result = ClusteringResult::new(records, clusters);
        info!(
            num_chains = result.chain_count(),
            num_clusters = result.cluster_count(),
            formula = %result.composition_formula(),
            "Clustering complete."
        );
        Ok(result)
    }
}
