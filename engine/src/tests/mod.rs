
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use kotomap_types::token::Token;

use crate::errors::EngineError;
use crate::loader::{
    AssetSource, COORDINATES_FILE, DICTIONARY_FILE, EMBEDDINGS_FILE, ResourceLoader,
    VOCABULARY_FILE,
};
use crate::tokenize::{Analyzer, AnalyzerProvider};

pub const CAT_DOG_COORDINATES: &str = "word,x,y\n猫,1.0,2.0\n犬,3.0,4.0\n";

pub fn embedding_bytes(values: &[f32]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|value| value.to_le_bytes())
        .collect()
}

/// In-memory asset source with per-asset fetch counters, for pinning load
/// idempotence and retry behavior
pub struct MemoryAssetSource {
    assets: Mutex<HashMap<String, Vec<u8>>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self {
            assets: Mutex::new(HashMap::new()),
            fetches: Mutex::new(HashMap::new()),
        }
    }

    /// Assets for two orthogonal unit-vector words with known coordinates
    pub fn cat_dog() -> Self {
        Self::new()
            .with_asset(DICTIONARY_FILE, vec![0u8; 4])
            .with_asset(VOCABULARY_FILE, "[\"猫\",\"犬\"]".as_bytes().to_vec())
            .with_asset(COORDINATES_FILE, CAT_DOG_COORDINATES.as_bytes().to_vec())
            .with_asset(EMBEDDINGS_FILE, embedding_bytes(&[1.0, 0.0, 0.0, 1.0]))
    }

    pub fn with_asset(self, name: &str, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&self, name: &str, bytes: Vec<u8>) {
        self.assets.lock().unwrap().insert(name.to_string(), bytes);
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl AssetSource for MemoryAssetSource {
    async fn fetch(&self, name: &str) -> io::Result<Vec<u8>> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert(0) += 1;
        self.assets
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no asset {name}")))
    }
}

/// Analyzer double: replays a scripted token stream, or splits on
/// whitespace tagging every piece a noun
pub struct StubAnalyzer {
    scripted: Option<Vec<Token>>,
}

impl Analyzer for StubAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token> {
        match &self.scripted {
            Some(tokens) => tokens.clone(),
            None => text
                .split_whitespace()
                .map(|word| Token::new(word.to_string(), "名詞".to_string(), None))
                .collect(),
        }
    }
}

pub struct StubAnalyzerProvider {
    scripted: Option<Vec<Token>>,
    hang: bool,
}

impl StubAnalyzerProvider {
    pub fn whitespace() -> Self {
        Self {
            scripted: None,
            hang: false,
        }
    }

    pub fn scripted(tokens: Vec<Token>) -> Self {
        Self {
            scripted: Some(tokens),
            hang: false,
        }
    }

    /// Never finishes building; for deadline tests
    pub fn hanging() -> Self {
        Self {
            scripted: None,
            hang: true,
        }
    }
}

#[async_trait]
impl AnalyzerProvider for StubAnalyzerProvider {
    async fn build(&self, _dictionary: Vec<u8>) -> Result<Box<dyn Analyzer>, EngineError> {
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(Box::new(StubAnalyzer {
            scripted: self.scripted.clone(),
        }))
    }
}

/// Loader over 2-dimensional fixtures with a whitespace stub analyzer
pub fn cat_dog_loader<S: AssetSource>(source: S) -> ResourceLoader<S> {
    ResourceLoader::new(
        source,
        Box::new(StubAnalyzerProvider::whitespace()),
        2,
        Duration::from_secs(5),
    )
}
