use ahash::AHashMap;
use kotomap_types::resource::ResourceKind;

use crate::errors::EngineError;

/// Ordered vocabulary plus its derived word → position index map.
///
/// The word list and the index map are built together and never mutated
/// afterwards, so index assignment is stable for the lifetime of one
/// session. Position in the source array is the embedding index
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    /// Parses a JSON array of strings; array order defines index assignment
    pub fn from_json(bytes: &[u8]) -> Result<Self, EngineError> {
        let words: Vec<String> =
            serde_json::from_slice(bytes).map_err(|error| EngineError::ResourceLoad {
                resource: ResourceKind::Vocabulary,
                reason: error.to_string(),
            })?;
        Ok(Self::from_words(words))
    }

    pub fn from_words(words: Vec<String>) -> Self {
        let mut index = AHashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            // first occurrence wins should the source ever repeat a word
            index.entry(word.clone()).or_insert(position);
        }
        Self { words, index }
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
