use kotomap_types::resource::ResourceKind;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Fetch or parse failure for any lazily loaded asset. Recoverable: the
    /// resource reverts to unloaded and the next triggering action retries
    #[error("Could not load {resource}: {reason}")]
    ResourceLoad {
        resource: ResourceKind,
        reason: String,
    },
    /// Embedding buffer length does not match the vocabulary. Fatal for the
    /// load attempt, same retry path as ResourceLoad
    #[error("Embedding buffer holds {actual} values, expected {expected} ({words} words x {dimension} dimensions)")]
    DataIntegrity {
        actual: usize,
        expected: usize,
        words: usize,
        dimension: usize,
    },
    /// Fewer than 2 plottable words survived filtering; the run aborts
    /// cleanly and is reported via status text rather than an alert
    #[error("Need at least 2 plottable words to draw a scatter, found {found}")]
    InsufficientInput { found: usize },
    /// Analyzer construction did not complete within its deadline
    #[error("Analyzer construction exceeded {deadline_secs}s deadline")]
    ToolingTimeout { deadline_secs: u64 },
    /// Selection index outside the last rendered plot
    #[error("Selection {selection} is outside the plotted set of {plotted} words")]
    InvalidSelection { selection: usize, plotted: usize },
}
