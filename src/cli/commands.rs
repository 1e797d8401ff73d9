//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ESI client CLI
#[derive(Parser, Debug)]
#[command(name = "esi-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Swagger document URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Datasource (e.g. tranquility, singularity)
    #[arg(short, long, global = true)]
    pub datasource: Option<String>,

    /// User agent sent with every request
    #[arg(short = 'A', long, global = true)]
    pub user_agent: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the downloaded Swagger document
    Spec,

    /// List resource names
    Resources,

    /// List the operations of a resource
    Operations {
        /// Resource name
        resource: String,
    },

    /// Invoke an operation
    Call {
        /// Resource name
        resource: String,

        /// Operation name
        operation: String,

        /// Parameter as name=value (value parsed as JSON when possible)
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Extra request header as name=value
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Bearer token
        #[arg(long)]
        token: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Indented JSON
    Pretty,
}
