// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # ESI Client
//!
//! A client for HTTP APIs described by a Swagger 2.0 document, built for the
//! EVE Swagger Interface (ESI).
//!
//! ## Features
//!
//! - **Spec-driven**: Every operation in the downloaded document is callable by name
//! - **Bearer tokens**: Authenticated operations refuse to run without a token
//! - **Transparent paging**: `X-Pages` result sets are exposed as a lazy page iterator
//! - **Caching**: Pluggable page cache honouring the API's `Expires` header
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use esi_client::{CallArgs, ClientConfig, EsiClient, EsiResponse, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .user_agent("my-app/1.0 (contact@example.com)")
//!         .build();
//!     let client = EsiClient::get_client(config).await?;
//!
//!     let orders = client
//!         .operation("Market", "get_markets_region_id_orders")?
//!         .call(CallArgs::new().param("region_id", 10000002).param("order_type", "all"))
//!         .await?;
//!
//!     if let EsiResponse::Pages(mut pages) = orders {
//!         while let Some(page) = pages.next_page().await? {
//!             // Process page
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │              EsiClient → ResourceHandle → CallableOperation  │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┼───────────────┬──────────────┐
//! │    Spec    │     Request     │     HTTP      │  Pagination  │
//! ├────────────┼─────────────────┼───────────────┼──────────────┤
//! │ Download   │ Auth check      │ Session/call  │ X-Pages      │
//! │ Parse      │ Param placement │ Bearer header │ Cache        │
//! │ Resources  │ Defaults        │ User agent    │ Error mapping│
//! └────────────┴─────────────────┴───────────────┴──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Swagger document download and parsing
pub mod spec;

/// Response cache
pub mod cache;

/// Request construction and operation invocation
pub mod request;

/// HTTP transport
pub mod http;

/// Page iteration
pub mod pagination;

/// Client facade
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use cache::{Cache, CacheKey, CachedPage, MemoryCache};
pub use client::{EsiClient, ResourceHandle};
pub use config::{ClientConfig, ESI_DATASOURCE, ESI_ENDPOINT};
pub use http::{EsiHttpClient, EsiResponse};
pub use pagination::PageIterator;
pub use request::{CallArgs, CallableOperation, RequestOptions, ResponseInfo};
pub use spec::{ApiSpec, Operation, Param, Resource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
