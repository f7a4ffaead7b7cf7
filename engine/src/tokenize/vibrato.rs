use async_trait::async_trait;
use kotomap_types::resource::ResourceKind;
use kotomap_types::token::Token;
use vibrato::{Dictionary, Tokenizer};

use super::{Analyzer, AnalyzerProvider};
use crate::errors::EngineError;

/// Field value the analyzer dictionary uses for an absent feature
const MISSING_FIELD: &str = "*";
/// Position of the dictionary base form within an ipadic-style feature list
const BASE_FORM_FIELD: usize = 6;

/// Morphological analyzer backed by a vibrato system dictionary
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
}

impl VibratoAnalyzer {
    /// Parses a binary system dictionary. CPU-bound; callers run it off the
    /// async thread
    pub fn from_dictionary_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let dictionary = Dictionary::read(bytes).map_err(|error| EngineError::ResourceLoad {
            resource: ResourceKind::Analyzer,
            reason: error.to_string(),
        })?;
        Ok(Self {
            tokenizer: Tokenizer::new(dictionary),
        })
    }
}

impl Analyzer for VibratoAnalyzer {
    #[tracing::instrument(skip_all)]
    fn analyze(&self, text: &str) -> Vec<Token> {
        let mut worker = self.tokenizer.new_worker();
        let mut tokens = Vec::new();
        // the worker analyzes one sentence at a time
        for line in text.lines() {
            worker.reset_sentence(line);
            worker.tokenize();
            for token in worker.token_iter() {
                let (pos, base_form) = parse_feature(token.feature());
                tokens.push(Token::new(token.surface().to_string(), pos, base_form));
            }
        }
        tokens
    }
}

/// Splits an ipadic-style comma-separated feature string into the major POS
/// tag and the optional base form. The dictionary marks missing fields with
/// `*`; unknown words may carry fewer fields than dictionary words
fn parse_feature(feature: &str) -> (String, Option<String>) {
    let fields: Vec<&str> = feature.split(',').collect();
    let pos = fields
        .first()
        .copied()
        .filter(|field| !field.is_empty())
        .unwrap_or(MISSING_FIELD);
    let base_form = fields
        .get(BASE_FORM_FIELD)
        .copied()
        .filter(|field| !field.is_empty() && *field != MISSING_FIELD)
        .map(str::to_string);
    (pos.to_string(), base_form)
}

/// Default analyzer provider: builds a [`VibratoAnalyzer`] on a blocking
/// thread from dictionary bytes supplied by the resource loader
#[derive(Debug, Default)]
pub struct VibratoProvider;

#[async_trait]
impl AnalyzerProvider for VibratoProvider {
    async fn build(&self, dictionary: Vec<u8>) -> Result<Box<dyn Analyzer>, EngineError> {
        let analyzer =
            tokio::task::spawn_blocking(move || VibratoAnalyzer::from_dictionary_bytes(&dictionary))
                .await
                .map_err(|error| EngineError::ResourceLoad {
                    resource: ResourceKind::Analyzer,
                    reason: error.to_string(),
                })??;
        Ok(Box::new(analyzer))
    }
}
