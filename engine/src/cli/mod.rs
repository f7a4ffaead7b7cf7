use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::loader::{DEFAULT_ANALYZER_TIMEOUT_SECS, DEFAULT_EMBEDDING_DIM};

static DEFAULT_CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenizes Japanese text, plots known words, and ranks similar words
    /// on selection
    Run(AppConfig),
}

#[derive(Args, Debug, Clone)]
pub struct AppConfig {
    /// Input text; read interactively when neither this nor --input-file is
    /// given
    #[arg(long)]
    pub text: Option<String>,

    /// Read the input text from a file instead
    #[arg(long, conflicts_with = "text")]
    pub input_file: Option<PathBuf>,

    /// Keep only noun/verb/adjective tokens
    #[arg(long, action=ArgAction::SetTrue, default_value_t =
    DEFAULT_CONFIG.get_or_init(AppConfig::default).pos_filter)]
    pub pos_filter: bool,

    /// Deduplicate tokens preserving first-occurrence order
    #[arg(long, action=ArgAction::SetTrue, default_value_t =
    DEFAULT_CONFIG.get_or_init(AppConfig::default).unique)]
    pub unique: bool,

    /// Directory holding system.dic, vocabulary.json, coordinates.csv and
    /// embeddings.bin
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Embedding vector width
    #[arg(long, default_value_t =
    DEFAULT_CONFIG.get_or_init(AppConfig::default).dimension)]
    pub dimension: usize,

    /// Deadline in seconds for analyzer dictionary construction
    #[arg(long, default_value_t =
    DEFAULT_CONFIG.get_or_init(AppConfig::default).analyzer_timeout_secs)]
    pub analyzer_timeout_secs: u64,

    ///  Log level
    #[arg(long, default_value_t =
    DEFAULT_CONFIG.get_or_init(AppConfig::default).log_level.clone())]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text: None,
            input_file: None,
            pos_filter: false,
            unique: false,
            assets: PathBuf::from("assets"),
            dimension: DEFAULT_EMBEDDING_DIM,
            analyzer_timeout_secs: DEFAULT_ANALYZER_TIMEOUT_SECS,
            log_level: String::from("info"),
        }
    }
}
