use serde::Deserialize;
use serde::Serialize;

/// Major part-of-speech tags considered content words for plotting purposes
pub const CONTENT_POS: [&str; 3] = ["名詞", "動詞", "形容詞"];

/// Structural contract for a single token as returned by a morphological
/// analyzer. Analyzers expose richer feature sets; everything beyond the
/// surface form, the major POS tag and the optional dictionary base form is
/// dropped at the adapter boundary
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Text exactly as it appeared in the input
    pub surface: String,
    /// Major part-of-speech tag, e.g. 名詞
    pub pos: String,
    /// Dictionary base form, None when the analyzer reported its
    /// missing-field sentinel
    pub base_form: Option<String>,
}

impl Token {
    pub fn new(surface: String, pos: String, base_form: Option<String>) -> Self {
        Self {
            surface,
            pos,
            base_form,
        }
    }

    /// True for noun/verb/adjective tokens
    pub fn is_content_word(&self) -> bool {
        CONTENT_POS.iter().any(|pos| *pos == self.pos)
    }

    /// The word form a token resolves to: the dictionary base form where one
    /// exists, otherwise the surface form
    pub fn resolved_form(&self) -> &str {
        match self.base_form.as_deref() {
            Some(base) if !base.trim().is_empty() => base,
            _ => &self.surface,
        }
    }
}
