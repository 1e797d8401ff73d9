//! Swagger 2.0 document parser
//!
//! Walks `paths`, resolves `$ref` parameters and files every operation under
//! its resources.

use super::types::{ApiSpec, Operation, Param, Resource, PAGE_PARAM};
use crate::error::{Error, Result};
use crate::types::{CollectionFormat, JsonValue, Method, ParamLocation};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::warn;
use url::Url;

/// Regex for characters not allowed in resource and operation names
static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Security scheme that marks an operation as requiring a bearer token
pub const DEFAULT_AUTH_SCHEME: &str = "evesso";

/// Parse a Swagger document into an [`ApiSpec`]
///
/// `origin_url` is where the document was fetched from; its scheme and host
/// are used when the document declares no `host`.
pub fn parse_spec(spec: &JsonValue, origin_url: &str, auth_scheme: &str) -> Result<ApiSpec> {
    let paths = spec
        .get("paths")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::spec("document has no 'paths' object"))?;

    let global_security = spec.get("security");
    let mut resources: BTreeMap<String, Resource> = BTreeMap::new();

    for (path, path_item) in paths {
        let path_params = path_item.get("parameters");

        for method in Method::ALL {
            let Some(op_value) = path_item.get(method.as_key()) else {
                continue;
            };

            let params = collect_params(spec, path_params, op_value.get("parameters"))?;
            let security = op_value.get("security").or(global_security);
            let operation_id = op_value
                .get("operationId")
                .and_then(JsonValue::as_str)
                .unwrap_or("")
                .to_string();
            let name = if operation_id.is_empty() {
                sanitize_name(&format!("{}_{}", method.as_key(), path.trim_matches('/')))
            } else {
                sanitize_name(&operation_id)
            };

            let template = Operation {
                operation_id,
                name,
                resource: String::new(),
                method,
                path: path.clone(),
                paginated: params
                    .iter()
                    .any(|p| p.name == PAGE_PARAM && p.location == ParamLocation::Query),
                params,
                summary: op_value
                    .get("summary")
                    .or_else(|| op_value.get("description"))
                    .and_then(JsonValue::as_str)
                    .unwrap_or("")
                    .to_string(),
                deprecated: op_value
                    .get("deprecated")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false),
                require_authorization: requires_authorization(security, auth_scheme),
            };

            for tag in operation_tags(op_value, path) {
                let resource_name = sanitize_name(&tag);
                let resource = resources
                    .entry(resource_name.clone())
                    .or_insert_with(|| Resource::new(resource_name.clone()));

                let mut op = template.clone();
                op.resource = resource_name;
                if resource.operations.contains_key(&op.name) {
                    warn!(
                        "Duplicate operation '{}' in resource '{}', keeping the last one",
                        op.name, resource.name
                    );
                }
                resource.operations.insert(op.name.clone(), Arc::new(op));
            }
        }
    }

    Ok(ApiSpec {
        title: info_field(spec, "title"),
        version: info_field(spec, "version"),
        base_url: resolve_base_url(spec, origin_url)?,
        resources,
    })
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`
pub fn sanitize_name(name: &str) -> String {
    INVALID_NAME_CHARS.replace_all(name, "_").into_owned()
}

/// Check whether any security requirement names the given scheme
pub fn requires_authorization(security: Option<&JsonValue>, scheme: &str) -> bool {
    security
        .and_then(JsonValue::as_array)
        .is_some_and(|reqs| {
            reqs.iter()
                .filter_map(JsonValue::as_object)
                .any(|req| req.contains_key(scheme))
        })
}

/// Tags of an operation, or the first path segment when it has none
fn operation_tags(op: &JsonValue, path: &str) -> Vec<String> {
    let tags: Vec<String> = op
        .get("tags")
        .and_then(JsonValue::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(JsonValue::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if tags.is_empty() {
        let segment = path
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("default");
        vec![segment.to_string()]
    } else {
        tags
    }
}

/// Merge path-level and operation-level parameters
///
/// Operation-level entries override path-level ones with the same name and
/// location. Declaration order is preserved.
fn collect_params(
    spec: &JsonValue,
    path_level: Option<&JsonValue>,
    op_level: Option<&JsonValue>,
) -> Result<Vec<Param>> {
    let mut params: Vec<Param> = Vec::new();

    for source in [path_level, op_level].into_iter().flatten() {
        let Some(list) = source.as_array() else {
            continue;
        };
        for raw in list {
            let resolved = resolve_ref(spec, raw)?;
            let Some(param) = parse_param(resolved) else {
                continue;
            };
            if let Some(existing) = params
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                *existing = param;
            } else {
                params.push(param);
            }
        }
    }

    Ok(params)
}

/// Follow a local `$ref` (`#/parameters/...`) if present
fn resolve_ref<'a>(spec: &'a JsonValue, value: &'a JsonValue) -> Result<&'a JsonValue> {
    match value.get("$ref").and_then(JsonValue::as_str) {
        Some(reference) => {
            let pointer = reference
                .strip_prefix('#')
                .ok_or_else(|| Error::spec(format!("unsupported remote reference: {reference}")))?;
            spec.pointer(pointer)
                .ok_or_else(|| Error::spec(format!("unresolvable reference: {reference}")))
        }
        None => Ok(value),
    }
}

fn parse_param(value: &JsonValue) -> Option<Param> {
    let name = value.get("name")?.as_str()?.to_string();
    let location = ParamLocation::from_swagger(value.get("in")?.as_str()?)?;

    Some(Param {
        name,
        location,
        // path parameters are always required in Swagger 2.0
        required: location == ParamLocation::Path
            || value
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        default: value.get("default").cloned(),
        collection_format: value
            .get("collectionFormat")
            .and_then(JsonValue::as_str)
            .and_then(CollectionFormat::from_swagger)
            .unwrap_or_default(),
        description: value
            .get("description")
            .and_then(JsonValue::as_str)
            .unwrap_or("")
            .to_string(),
    })
}

fn info_field(spec: &JsonValue, field: &str) -> String {
    spec.get("info")
        .and_then(|i| i.get(field))
        .and_then(JsonValue::as_str)
        .unwrap_or("")
        .to_string()
}

/// Build `<scheme>://<host><basePath>`, falling back to the origin's host
fn resolve_base_url(spec: &JsonValue, origin_url: &str) -> Result<String> {
    let origin = Url::parse(origin_url)?;
    let base_path = spec
        .get("basePath")
        .and_then(JsonValue::as_str)
        .unwrap_or("");

    let mut base = match spec.get("host").and_then(JsonValue::as_str) {
        Some(host) => {
            let scheme = spec
                .get("schemes")
                .and_then(JsonValue::as_array)
                .and_then(|s| s.first())
                .and_then(JsonValue::as_str)
                .unwrap_or_else(|| origin.scheme());
            Url::parse(&format!("{scheme}://{host}"))?
        }
        None => {
            let mut url = origin.clone();
            url.set_query(None);
            url.set_fragment(None);
            url
        }
    };
    base.set_path(base_path);

    Ok(base.as_str().trim_end_matches('/').to_string())
}
