use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use kotomap_types::resource::{ResourceKind, ResourceState};

use crate::engine::coordinates::CoordinateTable;
use crate::engine::embedding::EmbeddingTable;
use crate::engine::vocab::Vocabulary;
use crate::errors::EngineError;
use crate::tokenize::{Analyzer, AnalyzerProvider};

/// Asset names within an asset source
pub const DICTIONARY_FILE: &str = "system.dic";
pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const COORDINATES_FILE: &str = "coordinates.csv";
pub const EMBEDDINGS_FILE: &str = "embeddings.bin";

pub const DEFAULT_EMBEDDING_DIM: usize = 100;
pub const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 30;

/// Where raw asset bytes come from. Fetches are idempotent; assets are
/// treated as immutable for the lifetime of a session
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Reads assets from a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn fetch(&self, name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.root.join(name)).await
    }
}

#[async_trait]
impl<S: AssetSource> AssetSource for std::sync::Arc<S> {
    async fn fetch(&self, name: &str) -> io::Result<Vec<u8>> {
        self.as_ref().fetch(name).await
    }
}

/// One lazily loaded resource and its lifecycle state.
///
/// `Ready` is terminal for the session: once a value is held, ensure is an
/// immediate no-op. A failed load moves to `Failed` with no value retained;
/// the next ensure treats that exactly like `Unloaded` and retries from
/// scratch, so negative results are never cached
#[derive(Debug)]
struct ResourceCell<T> {
    kind: ResourceKind,
    state: ResourceState,
    value: Option<T>,
}

impl<T> ResourceCell<T> {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            state: ResourceState::Unloaded,
            value: None,
        }
    }

    fn state(&self) -> ResourceState {
        self.state
    }

    fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    async fn ensure<F, Fut>(&mut self, load: F) -> Result<&T, EngineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, EngineError>>,
    {
        if self.state != ResourceState::Ready {
            self.state = ResourceState::Loading;
            tracing::debug!(resource = %self.kind, "loading resource");
            match load().await {
                Ok(value) => {
                    self.state = ResourceState::Ready;
                    self.value = Some(value);
                    tracing::debug!(resource = %self.kind, "resource ready");
                }
                Err(error) => {
                    self.state = ResourceState::Failed;
                    self.value = None;
                    tracing::warn!(resource = %self.kind, %error, "resource load failed");
                    return Err(error);
                }
            }
        }
        Ok(self.value.as_ref().expect("Must exist"))
    }
}

/// Lazily and idempotently materializes the session's resources from an
/// asset source. Large assets (analyzer dictionary, embedding buffer) stay
/// untouched until the feature consuming them is actually used
pub struct ResourceLoader<S> {
    source: S,
    provider: Box<dyn AnalyzerProvider>,
    dimension: usize,
    analyzer_deadline: Duration,
    analyzer: ResourceCell<Box<dyn Analyzer>>,
    coordinates: ResourceCell<CoordinateTable>,
    vocabulary: ResourceCell<Vocabulary>,
    embeddings: ResourceCell<EmbeddingTable>,
}

impl<S: AssetSource> ResourceLoader<S> {
    pub fn new(
        source: S,
        provider: Box<dyn AnalyzerProvider>,
        dimension: usize,
        analyzer_deadline: Duration,
    ) -> Self {
        Self {
            source,
            provider,
            dimension,
            analyzer_deadline,
            analyzer: ResourceCell::new(ResourceKind::Analyzer),
            coordinates: ResourceCell::new(ResourceKind::Coordinates),
            vocabulary: ResourceCell::new(ResourceKind::Vocabulary),
            embeddings: ResourceCell::new(ResourceKind::Embeddings),
        }
    }

    pub fn state(&self, kind: ResourceKind) -> ResourceState {
        match kind {
            ResourceKind::Analyzer => self.analyzer.state(),
            ResourceKind::Coordinates => self.coordinates.state(),
            ResourceKind::Vocabulary => self.vocabulary.state(),
            ResourceKind::Embeddings => self.embeddings.state(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[tracing::instrument(skip(self))]
    pub async fn ensure_analyzer(&mut self) -> Result<(), EngineError> {
        let source = &self.source;
        let provider = self.provider.as_ref();
        let deadline = self.analyzer_deadline;
        self.analyzer
            .ensure(|| async move {
                let dictionary = fetch_asset(source, ResourceKind::Analyzer, DICTIONARY_FILE).await?;
                match tokio::time::timeout(deadline, provider.build(dictionary)).await {
                    Ok(built) => built,
                    Err(_) => Err(EngineError::ToolingTimeout {
                        deadline_secs: deadline.as_secs(),
                    }),
                }
            })
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn ensure_coordinates(&mut self) -> Result<(), EngineError> {
        let source = &self.source;
        self.coordinates
            .ensure(|| async move {
                let bytes = fetch_asset(source, ResourceKind::Coordinates, COORDINATES_FILE).await?;
                CoordinateTable::from_csv(&bytes)
            })
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn ensure_vocabulary(&mut self) -> Result<(), EngineError> {
        let source = &self.source;
        self.vocabulary
            .ensure(|| async move {
                let bytes = fetch_asset(source, ResourceKind::Vocabulary, VOCABULARY_FILE).await?;
                Vocabulary::from_json(&bytes)
            })
            .await?;
        Ok(())
    }

    /// Ensures the embedding buffer, validating its length against the
    /// vocabulary (which is ensured first). On a length mismatch nothing is
    /// retained and the next ensure retries the load wholesale
    #[tracing::instrument(skip(self))]
    pub async fn ensure_embeddings(&mut self) -> Result<(), EngineError> {
        self.ensure_vocabulary().await?;
        let words = self.vocabulary.value().map_or(0, Vocabulary::len);
        let source = &self.source;
        let dimension = self.dimension;
        self.embeddings
            .ensure(|| async move {
                let bytes = fetch_asset(source, ResourceKind::Embeddings, EMBEDDINGS_FILE).await?;
                EmbeddingTable::from_le_bytes(&bytes, words, dimension)
            })
            .await?;
        Ok(())
    }

    /// The analyzer, once ensured
    pub fn analyzer(&self) -> Option<&dyn Analyzer> {
        self.analyzer.value().map(|analyzer| analyzer.as_ref())
    }

    /// Both tables a run needs for plot-eligibility filtering, once ensured
    pub fn plot_view(&self) -> Option<(&CoordinateTable, &Vocabulary)> {
        Some((self.coordinates.value()?, self.vocabulary.value()?))
    }

    /// Both tables a similarity query needs, once ensured
    pub fn similarity_view(&self) -> Option<(&Vocabulary, &EmbeddingTable)> {
        Some((self.vocabulary.value()?, self.embeddings.value()?))
    }
}

async fn fetch_asset<S: AssetSource>(
    source: &S,
    resource: ResourceKind,
    name: &str,
) -> Result<Vec<u8>, EngineError> {
    source
        .fetch(name)
        .await
        .map_err(|error| EngineError::ResourceLoad {
            resource,
            reason: error.to_string(),
        })
}
