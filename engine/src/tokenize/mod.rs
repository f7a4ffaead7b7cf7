pub mod vibrato;

use async_trait::async_trait;
use itertools::Itertools;
use kotomap_types::session::RunOptions;
use kotomap_types::token::Token;

use crate::errors::EngineError;

/// A constructed morphological analyzer. Implementations wrap an external
/// analyzer library and normalize its tokens to the [`Token`] contract
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<Token>;
}

/// Builds an [`Analyzer`] from raw dictionary bytes fetched by the resource
/// loader. Construction may be expensive; the loader bounds it with a
/// deadline
#[async_trait]
pub trait AnalyzerProvider: Send + Sync {
    async fn build(&self, dictionary: Vec<u8>) -> Result<Box<dyn Analyzer>, EngineError>;
}

/// Reduces analyzer tokens to the word forms eligible for plotting.
///
/// Pure and order-preserving: POS filtering first (when enabled, only
/// noun/verb/adjective survive), then word-form resolution (base form
/// preferred, surface fallback), then empty/whitespace drops, then optional
/// first-occurrence dedupe
#[tracing::instrument(skip(tokens), fields(token_count = tokens.len()))]
pub fn filter_tokens(tokens: Vec<Token>, options: &RunOptions) -> Vec<String> {
    let words = tokens
        .into_iter()
        .filter(|token| !options.pos_filter || token.is_content_word())
        .map(|token| token.resolved_form().to_string())
        .filter(|word| !word.trim().is_empty());
    if options.unique_only {
        words.unique().collect()
    } else {
        words.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noun(surface: &str) -> Token {
        Token::new(surface.into(), "名詞".into(), None)
    }

    #[test]
    fn test_pos_filter_keeps_content_words_only() {
        let tokens = vec![
            noun("猫"),
            Token::new("が".into(), "助詞".into(), None),
            Token::new("走っ".into(), "動詞".into(), Some("走る".into())),
            Token::new("た".into(), "助動詞".into(), None),
        ];

        let filtered = filter_tokens(tokens.clone(), &RunOptions::new(true, false));
        assert_eq!(filtered, vec!["猫", "走る"]);

        let unfiltered = filter_tokens(tokens, &RunOptions::new(false, false));
        assert_eq!(unfiltered, vec!["猫", "が", "走る", "た"]);
    }

    #[test]
    fn test_base_form_preferred_over_surface() {
        let tokens = vec![
            Token::new("食べ".into(), "動詞".into(), Some("食べる".into())),
            Token::new("高かっ".into(), "形容詞".into(), Some("高い".into())),
            // unknown word, analyzer reported no base form
            noun("グーグル"),
        ];
        let words = filter_tokens(tokens, &RunOptions::default());
        assert_eq!(words, vec!["食べる", "高い", "グーグル"]);
    }

    #[test]
    fn test_blank_resolutions_are_dropped() {
        let tokens = vec![
            noun("猫"),
            Token::new("".into(), "名詞".into(), None),
            Token::new("　".into(), "記号".into(), None),
            noun("犬"),
        ];
        let words = filter_tokens(tokens, &RunOptions::default());
        assert_eq!(words, vec!["猫", "犬"]);
    }

    #[test]
    fn test_unique_preserves_first_occurrence_order() {
        let tokens = vec![noun("猫"), noun("犬"), noun("猫"), noun("鳥"), noun("犬")];

        let all = filter_tokens(tokens.clone(), &RunOptions::new(false, false));
        let unique = filter_tokens(tokens, &RunOptions::new(false, true));

        assert_eq!(unique, vec!["猫", "犬", "鳥"]);
        // the deduplicated run is a subsequence selection of the full run
        let mut remaining = unique.iter();
        let mut current = remaining.next();
        for word in &all {
            if Some(word) == current {
                current = remaining.next();
            }
        }
        assert_eq!(current, None);
    }
}
