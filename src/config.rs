//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "swipe-quiz")]
#[command(about = "A gesture-driven multiple-choice quiz engine served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file with quizzes to serve instead of the bundled set
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// JSON Lines file that completed attempts are appended to
    #[arg(long, default_value = "quiz-history.jsonl")]
    pub history: PathBuf,

    /// Keep history in memory only
    #[arg(long, conflicts_with = "history")]
    pub no_history: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
