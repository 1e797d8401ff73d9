//! Call results

use crate::error::Result;
use crate::pagination::PageIterator;
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

/// Result of an operation call
#[derive(Debug)]
pub enum EsiResponse {
    /// A non-paginated operation, already resolved
    Value(JsonValue),
    /// A paginated operation; pages are fetched on demand
    Pages(PageIterator),
}

impl EsiResponse {
    /// Check if this is a page iterator
    pub fn is_paginated(&self) -> bool {
        matches!(self, Self::Pages(_))
    }

    /// The resolved value, if not paginated
    pub fn into_value(self) -> Option<JsonValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Pages(_) => None,
        }
    }

    /// The page iterator, if paginated
    pub fn into_pages(self) -> Option<PageIterator> {
        match self {
            Self::Pages(pages) => Some(pages),
            Self::Value(_) => None,
        }
    }

    /// Every page's payload; a resolved value counts as one page
    pub async fn into_all(self) -> Result<Vec<JsonValue>> {
        match self {
            Self::Value(value) => Ok(vec![value]),
            Self::Pages(pages) => pages.collect_pages().await,
        }
    }

    /// Deserialize a resolved value into `T`
    ///
    /// Paginated responses are drained and their array pages concatenated
    /// first.
    pub async fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Self::Value(value) => value,
            Self::Pages(pages) => JsonValue::Array(pages.collect_items().await?),
        };
        Ok(serde_json::from_value(value)?)
    }
}
