//! Pagination module
//!
//! Follows `X-Pages` paginated result sets.
//!
//! # Overview
//!
//! A [`PageIterator`] wraps one built request. Each advance sets the `page`
//! query parameter, issues the call (or serves it from the cache) and reads
//! the total page count from the response. Iteration ends once every
//! reported page has been fetched.

mod iterator;
mod response;

pub use iterator::PageIterator;
pub use response::{
    classify_error, not_found_message, parse_expires, parse_num_pages, NOT_FOUND_FALLBACK,
    X_PAGES,
};

#[cfg(test)]
mod tests;
