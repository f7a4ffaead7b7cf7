use std::num::NonZeroUsize;

use nonzero_ext::nonzero;

use kotomap_types::point::{PlotEntry, RankedWord};
use kotomap_types::resource::{ResourceKind, ResourceState};
use kotomap_types::session::RunOptions;

use crate::engine::coordinates::CoordinateTable;
use crate::engine::vocab::Vocabulary;
use crate::errors::EngineError;
use crate::loader::{AssetSource, ResourceLoader};
use crate::tokenize::filter_tokens;

/// Ranked list length for similarity queries
pub const TOP_K: NonZeroUsize = nonzero!(10usize);

/// One user session: owns the resource loader and the plotted word set of
/// the most recent run.
///
/// All entry points take `&mut self`, which is exactly the concurrency
/// model required: one run-or-selection in flight at a time, shared state
/// touched only between suspension points of a single control flow
pub struct Session<S> {
    loader: ResourceLoader<S>,
    plotted: Vec<PlotEntry>,
}

impl<S: AssetSource> Session<S> {
    pub fn new(loader: ResourceLoader<S>) -> Self {
        Self {
            loader,
            plotted: Vec::new(),
        }
    }

    /// The plotted word set of the last successful run
    pub fn plotted(&self) -> &[PlotEntry] {
        &self.plotted
    }

    pub fn resource_state(&self, kind: ResourceKind) -> ResourceState {
        self.loader.state(kind)
    }

    /// Tokenizes `text`, filters it, and replaces the plotted word set with
    /// every surviving word that has both a coordinate and a vocabulary
    /// index. Fails with `InsufficientInput` when fewer than 2 words
    /// survive; the previous plotted set is discarded either way, so a
    /// failed run never leaves stale state behind
    #[tracing::instrument(skip(self, text))]
    pub async fn run(
        &mut self,
        text: &str,
        options: &RunOptions,
    ) -> Result<&[PlotEntry], EngineError> {
        self.plotted.clear();

        self.loader.ensure_analyzer().await?;
        self.loader.ensure_coordinates().await?;
        self.loader.ensure_vocabulary().await?;

        let analyzer = self.loader.analyzer().expect("Must exist");
        let words = filter_tokens(analyzer.analyze(text), options);
        let (coordinates, vocabulary) = self.loader.plot_view().expect("Must exist");

        let (plotted, skipped) = select_plottable(&words, coordinates, vocabulary);
        if skipped > 0 {
            tracing::debug!(skipped, "words without coordinates or embeddings excluded");
        }
        if plotted.len() < 2 {
            return Err(EngineError::InsufficientInput {
                found: plotted.len(),
            });
        }
        self.plotted = plotted;
        tracing::info!(plotted = self.plotted.len(), "run complete");
        Ok(&self.plotted)
    }

    /// Ranks the plotted set against the word at `selection` (an index into
    /// the last rendered plot) and returns up to [`TOP_K`] results, best
    /// first. Ensures the embedding table on first use
    #[tracing::instrument(skip(self))]
    pub async fn rank_similar(&mut self, selection: usize) -> Result<Vec<RankedWord>, EngineError> {
        let query_word = match self.plotted.get(selection) {
            Some(entry) => entry.word.clone(),
            None => {
                return Err(EngineError::InvalidSelection {
                    selection,
                    plotted: self.plotted.len(),
                });
            }
        };

        self.loader.ensure_embeddings().await?;
        let (vocabulary, embeddings) = self.loader.similarity_view().expect("Must exist");

        let query_vector = match vocabulary
            .index_of(&query_word)
            .and_then(|index| embeddings.vector(index))
        {
            Some(vector) => vector,
            None => {
                // plot eligibility guarantees a vocabulary entry, so this
                // only fires on a degenerate table; rank nothing
                tracing::warn!(%query_word, "selected word has no embedding vector");
                return Ok(Vec::new());
            }
        };

        let mut skipped = 0;
        let candidates: Vec<(usize, &[f32])> = self
            .plotted
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.word != query_word)
            .filter_map(|(position, entry)| {
                match vocabulary
                    .index_of(&entry.word)
                    .and_then(|index| embeddings.vector(index))
                {
                    Some(vector) => Some((position, vector)),
                    None => {
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();
        if skipped > 0 {
            tracing::debug!(skipped, "candidates without embeddings excluded");
        }

        let ranked = kotomap_similarity::top_k(query_vector, candidates, TOP_K)
            .into_iter()
            .filter_map(|(position, score)| {
                self.plotted.get(position).map(|entry| RankedWord {
                    word: entry.word.clone(),
                    score,
                })
            })
            .collect();
        Ok(ranked)
    }
}

/// Keeps only words present in BOTH the coordinate table and the vocabulary
/// index: every point ever drawn must later be rankable without a secondary
/// failure path. Returns the surviving entries in input order plus the
/// count of words excluded
fn select_plottable(
    words: &[String],
    coordinates: &CoordinateTable,
    vocabulary: &Vocabulary,
) -> (Vec<PlotEntry>, usize) {
    let mut plotted = Vec::with_capacity(words.len());
    let mut skipped = 0;
    for word in words {
        match coordinates.get(word) {
            Some(point) if vocabulary.contains(word) => {
                plotted.push(PlotEntry::new(word.clone(), point));
            }
            _ => skipped += 1,
        }
    }
    (plotted, skipped)
}
