//! Command-line interface for the askdocs binary.
//!
//! Running without a subcommand starts the TUI. Uses clap for argument
//! parsing and owo-colors for the non-TUI output helpers.

/// Config scaffolding (`askdocs init`).
pub mod init;
/// Colored terminal output helpers.
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// askdocs - terminal client for a document QA service
#[derive(Parser, Debug)]
#[command(
    name = "askdocs",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Terminal chat client for a document-ingestion and question-answering service",
    long_about = "A terminal client for a document question-answering backend:\n\
                  upload files or links for ingestion, manage the indexed document\n\
                  list, and ask questions in a chat transcript.",
    after_help = "EXAMPLES:\n    \
                  askdocs init                    # Scaffold askdocs.toml\n    \
                  askdocs                         # Start the TUI\n    \
                  askdocs --server http://qa:8000 # Override the backend URL\n    \
                  askdocs config --validate       # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "askdocs.toml", global = true)]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold an askdocs.toml configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Show or validate the resolved configuration
    Config {
        /// Validate instead of printing
        #[arg(long)]
        validate: bool,
    },
}
