//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quotebook",
    version,
    about = "Keep a personal quote collection in sync with a remote endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML). Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "quotebook.toml", global = true)]
    pub config: PathBuf,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a random quote from the active category.
    Show,
    /// Add a quote and publish it to the remote endpoint.
    Add {
        text: String,
        category: String,
    },
    /// Select the active category (`all` clears the filter) and show a quote.
    Filter { category: String },
    /// List known categories.
    Categories,
    /// List every stored quote.
    List,
    /// Export the collection as pretty-printed JSON.
    Export {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Import quotes from a JSON file.
    Import {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Fetch the remote collection once and merge it.
    Sync,
    /// Fetch and merge on the configured interval until interrupted.
    Watch,
    /// Interactive session with background sync.
    Shell,
}
