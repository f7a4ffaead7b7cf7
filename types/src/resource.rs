use serde::Deserialize;
use serde::Serialize;
use strum::Display;

/// The lazily loaded assets a session depends on
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize)]
pub enum ResourceKind {
    #[strum(serialize = "analyzer dictionary")]
    Analyzer,
    #[strum(serialize = "coordinate table")]
    Coordinates,
    #[strum(serialize = "vocabulary")]
    Vocabulary,
    #[strum(serialize = "embedding table")]
    Embeddings,
}

/// Lifecycle of one lazily loaded resource.
///
/// `Ready` is terminal for a session. `Failed` is observable (for status
/// reporting) but never sticky: the next ensure treats it exactly like
/// `Unloaded` and retries the load from scratch
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Display, Serialize, Deserialize)]
pub enum ResourceState {
    #[default]
    #[strum(serialize = "unloaded")]
    Unloaded,
    #[strum(serialize = "loading")]
    Loading,
    #[strum(serialize = "ready")]
    Ready,
    #[strum(serialize = "failed")]
    Failed,
}
