//! Common types used throughout the ESI client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Ordered key-value map, so hashing and display are deterministic
pub type StringMap = BTreeMap<String, String>;

/// Ordered query map; a key may carry several values (`multi` arrays)
pub type QueryMap = BTreeMap<String, Vec<String>>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method of a declared operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
}

impl Method {
    /// All methods a Swagger path item may declare, in document key form
    pub const ALL: [Method; 7] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
    ];

    /// Lowercase key used in a Swagger path item
    pub fn as_key(self) -> &'static str {
        match self {
            Method::GET => "get",
            Method::POST => "post",
            Method::PUT => "put",
            Method::PATCH => "patch",
            Method::DELETE => "delete",
            Method::HEAD => "head",
            Method::OPTIONS => "options",
        }
    }

    /// Uppercase method name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
            Method::HEAD => reqwest::Method::HEAD,
            Method::OPTIONS => reqwest::Method::OPTIONS,
        }
    }
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Where a declared parameter is placed in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamLocation {
    /// Substituted into the path template
    #[serde(rename = "path")]
    Path,
    /// Query string
    #[serde(rename = "query")]
    Query,
    /// Request header
    #[serde(rename = "header")]
    Header,
    /// JSON request body
    #[serde(rename = "body")]
    Body,
    /// Form field
    #[serde(rename = "formData")]
    FormData,
}

impl ParamLocation {
    /// Parse the `in` field of a Swagger parameter
    pub fn from_swagger(value: &str) -> Option<Self> {
        match value {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            "formData" => Some(Self::FormData),
            _ => None,
        }
    }
}

/// How array values are serialized into a query, header or form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated
    #[default]
    Csv,
    /// Space separated
    Ssv,
    /// Tab separated
    Tsv,
    /// Pipe separated
    Pipes,
    /// Repeated key, one value per occurrence
    Multi,
}

impl CollectionFormat {
    /// Parse the `collectionFormat` field of a Swagger parameter
    pub fn from_swagger(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(Self::Csv),
            "ssv" => Some(Self::Ssv),
            "tsv" => Some(Self::Tsv),
            "pipes" => Some(Self::Pipes),
            "multi" => Some(Self::Multi),
            _ => None,
        }
    }

    /// Separator used to join array items; `None` for `multi`
    pub fn separator(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Tsv => Some("\t"),
            Self::Pipes => Some("|"),
            Self::Multi => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::DELETE), reqwest::Method::DELETE);
        assert_eq!(Method::POST.to_string(), "POST");
        assert_eq!(Method::PATCH.as_key(), "patch");
    }

    #[test]
    fn test_param_location_from_swagger() {
        assert_eq!(ParamLocation::from_swagger("query"), Some(ParamLocation::Query));
        assert_eq!(
            ParamLocation::from_swagger("formData"),
            Some(ParamLocation::FormData)
        );
        assert_eq!(ParamLocation::from_swagger("cookie"), None);
    }

    #[test]
    fn test_collection_format() {
        assert_eq!(CollectionFormat::default(), CollectionFormat::Csv);
        assert_eq!(CollectionFormat::from_swagger("pipes"), Some(CollectionFormat::Pipes));
        assert_eq!(CollectionFormat::Multi.separator(), None);
        assert_eq!(CollectionFormat::Ssv.separator(), Some(" "));
    }
}
