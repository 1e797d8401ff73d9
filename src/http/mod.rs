//! HTTP transport module
//!
//! Issues operation calls over `reqwest`.
//!
//! # Features
//!
//! - **Per-call sessions**: every call gets its own client with default headers
//! - **Bearer tokens**: `Authorization` is attached only when a token is given
//! - **Pagination**: paginated operations return a lazy page iterator

mod client;
mod response;

pub use client::{default_user_agent, EsiHttpClient};
pub use response::EsiResponse;
