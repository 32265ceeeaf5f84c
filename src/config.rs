//! Editor configuration and the command line that produces it.

use crate::buffer::DEFAULT_BLOCK_SIZE;
use crate::search::SearchStrategy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Longest text accepted at any prompt, in characters.
pub const DEFAULT_PROMPT_MAX_LEN: usize = 255;

/// Configuration for an editing session and its terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Buffer growth granularity in bytes.
    pub block_size: usize,
    /// Maximum prompt input length in characters.
    pub prompt_max_len: usize,
    /// Matching used by both literal and hex search.
    pub search_strategy: SearchStrategy,
    /// How long the input thread waits before re-checking for shutdown.
    pub input_poll_timeout: Duration,
    /// Whether to draw on the alternate screen.
    pub alternate_screen: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            prompt_max_len: DEFAULT_PROMPT_MAX_LEN,
            search_strategy: SearchStrategy::GreedyReset,
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
        }
    }
}

/// Search strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    /// Reset-on-mismatch scan, matching classic hexedit results.
    Greedy,
    /// First true occurrence.
    Substring,
}

impl From<SearchArg> for SearchStrategy {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Greedy => Self::GreedyReset,
            SearchArg::Substring => Self::Substring,
        }
    }
}

/// Edit the raw bytes of a file.
#[derive(Debug, Parser)]
#[command(name = "hexpad", version, about)]
pub struct Cli {
    /// File to edit; created if missing. Prompted for when omitted.
    pub path: Option<PathBuf>,

    /// Buffer growth granularity in bytes.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE, value_parser = parse_block_size)]
    pub block_size: usize,

    /// Search matching strategy.
    #[arg(long, value_enum, default_value_t = SearchArg::Greedy)]
    pub search: SearchArg,

    /// Write logs to this file (filter with HEXPAD_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Draw in the main screen instead of the alternate screen.
    #[arg(long)]
    pub no_alt_screen: bool,
}

impl Cli {
    /// Build the editor configuration from parsed arguments.
    pub fn to_config(&self) -> EditorConfig {
        EditorConfig {
            block_size: self.block_size,
            search_strategy: self.search.into(),
            alternate_screen: !self.no_alt_screen,
            ..EditorConfig::default()
        }
    }
}

/// Path typed at the interactive file prompt.
///
/// Line endings and one pair of surrounding double quotes are removed, as
/// left behind by dragging a file into a terminal. Blank input gives `None`.
pub fn path_from_input(line: &str) -> Option<PathBuf> {
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_suffix('"').unwrap_or(line);
    let line = line.strip_prefix('"').unwrap_or(line);
    (!line.is_empty()).then(|| PathBuf::from(line))
}

fn parse_block_size(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(0) => Err("block size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}
