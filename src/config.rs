//! Client configuration
//!
//! Built in code with [`ClientConfig::builder`] or loaded from YAML:
//!
//! ```yaml
//! endpoint: https://esi.evetech.net/latest/swagger.json
//! datasource: tranquility
//! user_agent: my-app/1.0 (contact@example.com)
//! timeout_secs: 30
//! ```

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::http::default_user_agent;
use crate::spec::DEFAULT_AUTH_SCHEME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// URL of the latest ESI Swagger document
pub const ESI_ENDPOINT: &str = "https://esi.evetech.net/latest/swagger.json";

/// Default ESI datasource
pub const ESI_DATASOURCE: &str = "tranquility";

/// Configuration for [`crate::EsiClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Swagger document URL
    pub endpoint: String,
    /// Datasource selector
    pub datasource: String,
    /// User agent sent with every call
    pub user_agent: String,
    /// Client-wide request timeout
    pub timeout: Option<Duration>,
    /// Security scheme whose presence marks an operation as authenticated
    pub auth_scheme: String,
    /// Response cache
    pub cache: Option<Arc<dyn Cache>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: ESI_ENDPOINT.to_string(),
            datasource: ESI_DATASOURCE.to_string(),
            user_agent: default_user_agent(),
            timeout: None,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            cache: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("datasource", &self.datasource)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .field("has_cache", &self.cache.is_some())
            .finish()
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load a config from a YAML string, filling unset fields with defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ClientConfigFile = serde_yaml::from_str(yaml)?;
        file.into_config()
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check the config for empty fields
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::config("endpoint cannot be empty"));
        }
        if self.datasource.is_empty() {
            return Err(Error::config("datasource cannot be empty"));
        }
        if self.user_agent.is_empty() {
            return Err(Error::config("user_agent cannot be empty"));
        }
        Ok(())
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the Swagger document URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the datasource
    pub fn datasource(mut self, datasource: impl Into<String>) -> Self {
        self.config.datasource = datasource.into();
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the authorization security scheme name
    pub fn auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.auth_scheme = scheme.into();
        self
    }

    /// Set the response cache
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.config.cache = Some(cache);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// On-disk form of [`ClientConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfigFile {
    /// Swagger document URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Datasource selector
    #[serde(default)]
    pub datasource: Option<String>,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Client-wide timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Authorization security scheme name
    #[serde(default)]
    pub auth_scheme: Option<String>,
}

impl ClientConfigFile {
    /// Apply the file's fields over the defaults
    pub fn into_config(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            datasource: self.datasource.unwrap_or(defaults.datasource),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            timeout: self.timeout_secs.map(Duration::from_secs),
            auth_scheme: self.auth_scheme.unwrap_or(defaults.auth_scheme),
            cache: None,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, ESI_ENDPOINT);
        assert_eq!(config.datasource, "tranquility");
        assert_eq!(config.auth_scheme, "evesso");
        assert!(config.user_agent.contains(env!("CARGO_PKG_VERSION")));
        assert!(config.timeout.is_none());
        assert!(config.cache.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .endpoint("http://localhost/swagger.json")
            .datasource("singularity")
            .user_agent("test-agent/1.0")
            .timeout(Duration::from_secs(5))
            .auth_scheme("oauth")
            .cache(Arc::new(MemoryCache::new()))
            .build();

        assert_eq!(config.endpoint, "http://localhost/swagger.json");
        assert_eq!(config.datasource, "singularity");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.auth_scheme, "oauth");
        assert!(config.cache.is_some());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r"
datasource: singularity
user_agent: my-app/1.0
timeout_secs: 30
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.endpoint, ESI_ENDPOINT);
        assert_eq!(config.datasource, "singularity");
        assert_eq!(config.user_agent, "my-app/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_from_yaml_rejects_unknown_fields() {
        let err = ClientConfig::from_yaml_str("use_models: true\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_config_from_yaml_rejects_empty_user_agent() {
        let err = ClientConfig::from_yaml_str("user_agent: ''\n").unwrap_err();
        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn test_config_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: http://127.0.0.1:9/swagger.json").unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9/swagger.json");
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = ClientConfig::from_yaml_file("/nonexistent/esi.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
