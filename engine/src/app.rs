use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use kotomap_types::point::{PlotEntry, RankedWord};
use kotomap_types::session::RunOptions;

use crate::cli::AppConfig;
use crate::errors::EngineError;
use crate::loader::{FsAssetSource, ResourceLoader};
use crate::session::Session;
use crate::tokenize::vibrato::VibratoProvider;

/// Interactive front end standing in for the charting surface: it renders
/// the plotted set as an indexed list and reads the selection index back,
/// one run-or-selection at a time
pub struct App {
    config: AppConfig,
    options: RunOptions,
    session: Session<FsAssetSource>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let source = FsAssetSource::new(config.assets.clone());
        let loader = ResourceLoader::new(
            source,
            Box::new(VibratoProvider),
            config.dimension,
            Duration::from_secs(config.analyzer_timeout_secs),
        );
        let options = RunOptions::new(config.pos_filter, config.unique);
        Self {
            config,
            options,
            session: Session::new(loader),
        }
    }

    pub async fn start(&mut self) -> std::io::Result<()> {
        if let Some(text) = self.initial_text().await? {
            self.run_and_render(&text).await;
        } else {
            println!("status: idle, type `run <text>` to plot");
        }
        self.selection_loop().await
    }

    async fn initial_text(&mut self) -> std::io::Result<Option<String>> {
        if let Some(text) = self.config.text.take() {
            return Ok(Some(text));
        }
        if let Some(path) = self.config.input_file.take() {
            return tokio::fs::read_to_string(path).await.map(Some);
        }
        Ok(None)
    }

    async fn selection_loop(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        prompt()?;
        while let Some(line) = lines.next_line().await? {
            let input = line.trim();
            if input.is_empty() || input == "exit" {
                break;
            }
            if let Some(text) = input.strip_prefix("run ") {
                self.run_and_render(text).await;
            } else {
                self.select_and_render(input).await;
            }
            prompt()?;
        }
        Ok(())
    }

    async fn run_and_render(&mut self, text: &str) {
        println!("status: loading run resources");
        match self.session.run(text, &self.options).await {
            Ok(points) => render_plot(points),
            Err(error) => report(&error),
        }
    }

    async fn select_and_render(&mut self, input: &str) {
        // a selection is the index the rendered plot displayed, or a plotted
        // word typed verbatim
        let selection = match input.parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => self
                .session
                .plotted()
                .iter()
                .position(|entry| entry.word == input),
        };
        let Some(selection) = selection else {
            println!("status: `{input}` is not a plotted word or index");
            return;
        };
        let query_word = match self.session.plotted().get(selection) {
            Some(entry) => entry.word.clone(),
            None => {
                println!("status: no point {selection} in the current plot");
                return;
            }
        };
        match self.session.rank_similar(selection).await {
            Ok(ranked) => render_ranked(&query_word, &ranked),
            Err(error) => report(&error),
        }
    }
}

fn prompt() -> std::io::Result<()> {
    print!("select> ");
    std::io::stdout().flush()
}

fn render_plot(points: &[PlotEntry]) {
    println!("status: {} words plotted", points.len());
    for (index, entry) in points.iter().enumerate() {
        println!(
            "  [{index}] {} ({:.3}, {:.3})",
            entry.word, entry.point.x, entry.point.y
        );
    }
}

fn render_ranked(query_word: &str, ranked: &[RankedWord]) {
    println!("status: {} words similar to {query_word}", ranked.len());
    for (rank, result) in ranked.iter().enumerate() {
        println!("  {:>2}. {}  {:.4}", rank + 1, result.word, result.score);
    }
}

/// Top-level failure reporting: every error surfaces as a status line and
/// leaves the prompt loop running. An insufficient-input run is ordinary
/// status; everything else is also logged for diagnostics
fn report(error: &EngineError) {
    match error {
        EngineError::InsufficientInput { .. } => {}
        _ => log::error!("request failed: {error}"),
    }
    println!("status: {error}");
}
