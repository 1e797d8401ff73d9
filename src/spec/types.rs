//! API catalogue types
//!
//! Immutable description of resources and operations, produced once from a
//! downloaded Swagger document.

use crate::types::{CollectionFormat, JsonValue, Method, ParamLocation};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the query parameter that marks an operation as paginated
pub const PAGE_PARAM: &str = "page";

/// Name of the query parameter selecting the backend dataset
pub const DATASOURCE_PARAM: &str = "datasource";

/// A single declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name as declared
    pub name: String,
    /// Where the value goes in the request
    pub location: ParamLocation,
    /// Whether the caller must supply it
    pub required: bool,
    /// Declared default value
    pub default: Option<JsonValue>,
    /// Declared array serialization
    pub collection_format: CollectionFormat,
    /// Free-form description
    pub description: String,
}

impl Param {
    /// Create a parameter with no default and csv arrays
    pub fn new(name: impl Into<String>, location: ParamLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            default: None,
            collection_format: CollectionFormat::default(),
            description: String::new(),
        }
    }
}

/// A declared API operation
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Raw operationId (may be empty when the document omits it)
    pub operation_id: String,
    /// Sanitized name used for lookups
    pub name: String,
    /// Sanitized name of the resource this operation was filed under
    pub resource: String,
    /// HTTP method
    pub method: Method,
    /// Path template, e.g. `/characters/{character_id}/`
    pub path: String,
    /// Declared parameters, path-level ones merged in
    pub params: Vec<Param>,
    /// Summary or description
    pub summary: String,
    /// Marked deprecated in the document
    pub deprecated: bool,
    /// A bearer token must accompany every call
    pub require_authorization: bool,
    /// Declares a `page` parameter
    pub paginated: bool,
}

impl Operation {
    /// Look up a declared parameter by name
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Check if a parameter is declared
    pub fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some()
    }
}

/// A named group of operations (a Swagger tag)
#[derive(Debug, Clone, Default)]
pub struct Resource {
    /// Sanitized resource name
    pub name: String,
    /// Operations keyed by sanitized name
    pub operations: BTreeMap<String, Arc<Operation>>,
}

impl Resource {
    /// Create an empty resource
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: BTreeMap::new(),
        }
    }

    /// Look up an operation by name
    pub fn operation(&self, name: &str) -> Option<&Arc<Operation>> {
        self.operations.get(name)
    }

    /// Sorted operation names
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }
}

/// Parsed API description
#[derive(Debug, Clone)]
pub struct ApiSpec {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// Scheme, host and base path every operation path is appended to
    pub base_url: String,
    /// Resources keyed by sanitized name
    pub resources: BTreeMap<String, Resource>,
}

impl ApiSpec {
    /// Look up a resource by name
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Sorted resource names
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Total number of operations across resources
    pub fn operation_count(&self) -> usize {
        self.resources.values().map(|r| r.operations.len()).sum()
    }
}
