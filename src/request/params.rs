//! Request construction
//!
//! Maps caller arguments onto an operation's declared parameters, following
//! Swagger 2.0 placement rules.

use super::options::RequestOptions;
use crate::error::{Error, Result};
use crate::spec::{Operation, Param, DATASOURCE_PARAM, PAGE_PARAM};
use crate::types::{JsonValue, Method, ParamLocation, QueryMap, StringMap};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Regex for matching path placeholders: {name}
static PATH_PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}").unwrap());

/// A fully built request, ready to send
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    /// HTTP method
    pub method: Method,
    /// Absolute URL with path parameters substituted
    pub url: String,
    /// Query parameters
    pub query: QueryMap,
    /// Request headers
    pub headers: StringMap,
    /// JSON body
    pub body: Option<JsonValue>,
    /// Form fields
    pub form: Option<StringMap>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl RequestParams {
    /// Create a bare request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set (or replace) a single-valued query parameter
    pub fn set_query(&mut self, name: impl Into<String>, value: impl ToString) {
        self.query.insert(name.into(), vec![value.to_string()]);
    }

    /// First value of a query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Flattened query pairs, repeated keys included
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
            .collect()
    }
}

/// Build request parameters for an operation
///
/// A declared `datasource` query parameter falls back to `datasource` when
/// the caller omits it; other omitted parameters fall back to their declared
/// default. `page` is never required from the caller.
pub fn construct_request(
    operation: &Operation,
    base_url: &str,
    datasource: &str,
    args: &BTreeMap<String, JsonValue>,
    options: &RequestOptions,
) -> Result<RequestParams> {
    let mut supplied = args.clone();
    let mut path_values = StringMap::new();
    let mut request = RequestParams {
        method: operation.method,
        headers: options.headers.clone(),
        timeout: options.timeout,
        ..Default::default()
    };

    for param in &operation.params {
        let value = supplied
            .remove(&param.name)
            .filter(|v| !v.is_null())
            .or_else(|| default_value(param, datasource));

        let Some(value) = value else {
            if param.required && param.name != PAGE_PARAM {
                return Err(Error::parameter(
                    &operation.name,
                    format!("missing required parameter '{}'", param.name),
                ));
            }
            continue;
        };

        match param.location {
            ParamLocation::Path => {
                path_values.insert(param.name.clone(), joined(param, &value));
            }
            ParamLocation::Query => {
                request.query.insert(param.name.clone(), query_values(param, &value));
            }
            ParamLocation::Header => {
                request.headers.insert(param.name.clone(), joined(param, &value));
            }
            ParamLocation::Body => {
                request.body = Some(value);
            }
            ParamLocation::FormData => {
                request
                    .form
                    .get_or_insert_with(StringMap::new)
                    .insert(param.name.clone(), joined(param, &value));
            }
        }
    }

    if !supplied.is_empty() {
        let unexpected: Vec<&str> = supplied.keys().map(String::as_str).collect();
        return Err(Error::parameter(
            &operation.name,
            format!("unexpected parameter(s): {}", unexpected.join(", ")),
        ));
    }

    request.url = build_url(base_url, &operation.path, &path_values)?;
    Ok(request)
}

fn default_value(param: &Param, datasource: &str) -> Option<JsonValue> {
    if param.name == DATASOURCE_PARAM && param.location == ParamLocation::Query {
        return Some(JsonValue::String(datasource.to_string()));
    }
    param.default.clone()
}

/// Render a scalar value as a parameter string
pub fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Render a value, joining arrays with the declared separator
fn joined(param: &Param, value: &JsonValue) -> String {
    match value {
        JsonValue::Array(items) => {
            let separator = param.collection_format.separator().unwrap_or(",");
            items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(separator)
        }
        other => scalar_to_string(other),
    }
}

fn query_values(param: &Param, value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) if param.collection_format.separator().is_none() => {
            items.iter().map(scalar_to_string).collect()
        }
        other => vec![joined(param, other)],
    }
}

/// Append the path template to the base URL, substituting path values
///
/// Each segment is percent-encoded on its own, so values may contain `/`.
/// Placeholders without a value are left as is.
fn build_url(base_url: &str, template: &str, values: &StringMap) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::spec(format!("base URL cannot carry a path: {base_url}")))?;
        segments.pop_if_empty();
        for segment in template.trim_start_matches('/').split('/') {
            let rendered = PATH_PARAM_REGEX.replace_all(segment, |caps: &Captures| {
                values
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            });
            segments.push(&rendered);
        }
    }
    Ok(url.to_string())
}
