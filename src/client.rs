//! Client facade
//!
//! Resolves resource groups and operations by name and binds them to the
//! transport.
//!
//! ```rust,ignore
//! let config = ClientConfig::builder().user_agent("my-app/1.0").build();
//! let client = EsiClient::get_client(config).await?;
//!
//! let status = client
//!     .resource("Status")?
//!     .operation("get_status")?
//!     .call(CallArgs::new())
//!     .await?;
//! ```

use crate::cache::Cache;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::EsiHttpClient;
use crate::request::CallableOperation;
use crate::spec::{self, ApiSpec, Operation, Resource};
use crate::types::JsonValue;
use std::sync::Arc;
use tracing::info;

/// An API client built from a Swagger document
#[derive(Debug)]
pub struct EsiClient {
    api: ApiSpec,
    http: EsiHttpClient,
    datasource: String,
}

impl EsiClient {
    /// Build a client from an already-parsed document
    ///
    /// `origin_url` is where the document came from; it supplies the host
    /// when the document declares none.
    pub fn new(swagger_spec: &JsonValue, origin_url: &str, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let api = spec::parse_spec(swagger_spec, origin_url, &config.auth_scheme)?;
        info!(
            "Loaded {} {} ({} resources, {} operations)",
            api.title,
            api.version,
            api.resources.len(),
            api.operation_count()
        );

        let http = EsiHttpClient::new(config.user_agent)
            .with_timeout(config.timeout)
            .with_cache(config.cache);

        Ok(Self {
            api,
            http,
            datasource: config.datasource,
        })
    }

    /// Download the document and build a fully wired client
    pub async fn get_client(config: ClientConfig) -> Result<Self> {
        let target = spec::spec_url(&config.endpoint, &config.datasource)?;
        let swagger_spec = Self::get_swagger_spec_with(&config).await?;
        Self::new(&swagger_spec, target.as_str(), config)
    }

    /// Download and parse the document only, with the default user agent
    pub async fn get_swagger_spec(endpoint: &str, datasource: &str) -> Result<JsonValue> {
        spec::download_spec(endpoint, datasource).await
    }

    /// Download and parse the document only, honouring the config's user
    /// agent and timeout
    pub async fn get_swagger_spec_with(config: &ClientConfig) -> Result<JsonValue> {
        config.validate()?;
        let session = EsiHttpClient::new(config.user_agent.clone())
            .with_timeout(config.timeout)
            .session(None)?;
        spec::fetch_spec(&session, &config.endpoint, &config.datasource).await
    }

    /// Resolve a resource group by name
    pub fn resource(&self, name: &str) -> Result<ResourceHandle<'_>> {
        let resource = self
            .api
            .resource(name)
            .ok_or_else(|| Error::ResourceNotFound {
                name: name.to_string(),
                available: self.api.resource_names().join(", "),
            })?;
        Ok(ResourceHandle {
            client: self,
            resource,
        })
    }

    /// Resolve an operation in one step
    pub fn operation(&self, resource: &str, name: &str) -> Result<CallableOperation<'_>> {
        self.resource(resource)?.operation(name)
    }

    /// Sorted resource names
    pub fn resource_names(&self) -> Vec<&str> {
        self.api.resource_names()
    }

    /// The parsed API catalogue
    pub fn api(&self) -> &ApiSpec {
        &self.api
    }

    /// Base URL operation paths are appended to
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Datasource applied to operations declaring one
    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    /// The transport
    pub fn http_client(&self) -> &EsiHttpClient {
        &self.http
    }

    /// The response cache, if any
    pub fn cache(&self) -> Option<&Arc<dyn Cache>> {
        self.http.cache()
    }

    /// Replace the response cache
    pub fn set_cache(&mut self, cache: Option<Arc<dyn Cache>>) {
        self.http.set_cache(cache);
    }
}

/// A resource group bound to its client
#[derive(Debug, Clone, Copy)]
pub struct ResourceHandle<'a> {
    client: &'a EsiClient,
    resource: &'a Resource,
}

impl<'a> ResourceHandle<'a> {
    /// Resource name
    pub fn name(&self) -> &'a str {
        &self.resource.name
    }

    /// Sorted operation names
    pub fn operation_names(&self) -> Vec<&'a str> {
        self.resource.operation_names()
    }

    /// Declared operations
    pub fn operations(&self) -> impl Iterator<Item = &'a Arc<Operation>> {
        self.resource.operations.values()
    }

    /// Resolve an operation by name
    pub fn operation(&self, name: &str) -> Result<CallableOperation<'a>> {
        let operation = self
            .resource
            .operation(name)
            .ok_or_else(|| Error::OperationNotFound {
                resource: self.resource.name.clone(),
                name: name.to_string(),
                available: self.operation_names().join(", "),
            })?;

        Ok(CallableOperation::new(
            Arc::clone(operation),
            &self.client.http,
            &self.client.api.base_url,
            &self.client.datasource,
        ))
    }
}
