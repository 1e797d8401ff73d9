//! Response inspection
//!
//! Reads the paging and expiry headers and maps error statuses onto the
//! crate's error variants.

use crate::error::Error;
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, EXPIRES};
use reqwest::StatusCode;

/// Header carrying the total page count
pub const X_PAGES: &str = "x-pages";

/// Message used when a 404 body is an object without an `error` field
pub const NOT_FOUND_FALLBACK: &str = "Not found";

/// Total page count from `X-Pages`, 1 when absent or unparseable
pub fn parse_num_pages(headers: &HeaderMap) -> u32 {
    headers
        .get(X_PAGES)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1)
}

/// Expiry from the RFC 2822 `Expires` header, converted to UTC
pub fn parse_expires(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(EXPIRES)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| DateTime::parse_from_rfc2822(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map a non-success response onto an error
///
/// - 500 and 400 become [`Error::Esi`]
/// - 404 becomes [`Error::NotFound`] with a best-effort message
/// - 403 becomes [`Error::Forbidden`]
/// - anything else is reported as [`Error::HttpStatus`]
pub fn classify_error(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_REQUEST => {
            Error::esi(format!("{status}: {body}"))
        }
        StatusCode::NOT_FOUND => Error::not_found(not_found_message(body)),
        StatusCode::FORBIDDEN => Error::forbidden(),
        _ => Error::http_status(status.as_u16(), body),
    }
}

/// Extract the `error` field of a 404 body
///
/// Falls back to [`NOT_FOUND_FALLBACK`] for JSON without the field and to the
/// parse error text for bodies that are not JSON at all.
pub fn not_found_message(body: &str) -> String {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => match map.get("error") {
            Some(JsonValue::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => NOT_FOUND_FALLBACK.to_string(),
        },
        Ok(_) => NOT_FOUND_FALLBACK.to_string(),
        Err(e) => e.to_string(),
    }
}
