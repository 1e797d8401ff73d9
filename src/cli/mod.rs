//! CLI module
//!
//! Command-line interface for exploring and calling the API.
//!
//! # Commands
//!
//! - `spec` - Print the downloaded Swagger document
//! - `resources` - List resource names
//! - `operations` - List the operations of a resource
//! - `call` - Invoke an operation

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{parse_header, parse_param, Runner};
