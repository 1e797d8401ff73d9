//! Spec loader module
//!
//! Download and parse the Swagger document describing the API.
//!
//! # Overview
//!
//! The spec module provides:
//! - `download_spec` / `fetch_spec` - fetch the raw document
//! - `parse_spec` - turn it into an immutable `ApiSpec` catalogue
//! - `Resource` / `Operation` / `Param` - the catalogue types

mod loader;
mod parser;
mod types;

pub use loader::{download_spec, fetch_spec, spec_url};
pub use parser::{parse_spec, requires_authorization, sanitize_name, DEFAULT_AUTH_SCHEME};
pub use types::{ApiSpec, Operation, Param, Resource, DATASOURCE_PARAM, PAGE_PARAM};
