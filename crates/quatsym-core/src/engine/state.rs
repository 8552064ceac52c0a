/// Lifecycle of a clustering pipeline.
///
/// `Empty` until the first structure is added; any addition moves to `Stale`;
/// a successful computation moves to `Computed` and stays there until the next
/// addition. A failed computation leaves the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Empty,
    Stale,
    Computed,
}

impl PipelineState {
    pub fn is_stale(&self) -> bool {
        matches!(self, PipelineState::Stale)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PipelineState::Computed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Empty => "empty",
            PipelineState::Stale => "stale",
            PipelineState::Computed => "computed",
        }
    }
}
