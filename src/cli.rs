//! Command-line interface implementation for craft.
//! Provides argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for craft.
#[derive(Parser, Debug)]
#[command(author, version, about = "craft: keep your repository's boilerplate in sync", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the configuration file by answering a few questions
    Init {
        /// Directory of the project
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        dest: PathBuf,
    },

    /// Generate (or synchronize) the project files from its configuration
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Directory of the project
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dest: PathBuf,

    /// Read templates from this directory instead of the embedded ones
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Regenerate this file even if it has no generated marker.
    /// Can be given several times.
    #[arg(long, value_name = "NAME")]
    pub force: Vec<String>,

    /// Regenerate every file even if it has no generated marker
    #[arg(long)]
    pub force_all: bool,

    /// Start delimiter of templates no handler claims
    #[arg(long, value_name = "DELIM", default_value = "{{")]
    pub start_delim: String,

    /// End delimiter of templates no handler claims
    #[arg(long, value_name = "DELIM", default_value = "}}")]
    pub end_delim: String,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
