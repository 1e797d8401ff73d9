//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::EsiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::EsiResponse;
use crate::request::CallArgs;
use serde_json::{json, Value};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec().await,
            Commands::Resources => self.resources().await,
            Commands::Operations { resource } => self.operations(resource).await,
            Commands::Call {
                resource,
                operation,
                params,
                headers,
                token,
                max_pages,
            } => {
                self.call(
                    resource,
                    operation,
                    params,
                    headers,
                    token.as_deref(),
                    *max_pages,
                )
                .await
            }
        }
    }

    /// Build the client config from the config file and flags
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_yaml_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(datasource) = &self.cli.datasource {
            config.datasource.clone_from(datasource);
        }
        if let Some(user_agent) = &self.cli.user_agent {
            config.user_agent.clone_from(user_agent);
        }

        config.validate()?;
        Ok(config)
    }

    async fn client(&self) -> Result<EsiClient> {
        EsiClient::get_client(self.load_config()?).await
    }

    async fn spec(&self) -> Result<()> {
        let config = self.load_config()?;
        let spec = EsiClient::get_swagger_spec_with(&config).await?;
        self.output(&spec);
        Ok(())
    }

    async fn resources(&self) -> Result<()> {
        let client = self.client().await?;
        self.output(&json!(client.resource_names()));
        Ok(())
    }

    async fn operations(&self, resource: &str) -> Result<()> {
        let client = self.client().await?;
        let resource = client.resource(resource)?;

        let operations: Vec<Value> = resource
            .operations()
            .map(|op| {
                json!({
                    "name": op.name,
                    "method": op.method.as_str(),
                    "path": op.path,
                    "summary": op.summary,
                    "requires_auth": op.require_authorization,
                    "paginated": op.paginated,
                    "deprecated": op.deprecated,
                })
            })
            .collect();

        self.output(&Value::Array(operations));
        Ok(())
    }

    async fn call(
        &self,
        resource: &str,
        operation: &str,
        params: &[String],
        headers: &[String],
        token: Option<&str>,
        max_pages: Option<u32>,
    ) -> Result<()> {
        let client = self.client().await?;
        let callable = client.operation(resource, operation)?;

        let mut args = CallArgs::new();
        for raw in params {
            let (name, value) = parse_param(raw)?;
            args = args.param(name, value);
        }
        for raw in headers {
            let (name, value) = parse_header(raw)?;
            args = args.header(name, value);
        }
        if let Some(token) = token {
            args = args.token(token);
        }

        match callable.call(args).await? {
            EsiResponse::Value(value) => self.output(&value),
            EsiResponse::Pages(mut pages) => {
                let mut fetched = 0;
                while pages.has_next() {
                    if max_pages.is_some_and(|max| fetched >= max) {
                        debug!(
                            "Stopping after {fetched} of {} pages",
                            pages.num_pages()
                        );
                        break;
                    }
                    let Some(page) = pages.next_page().await? else {
                        break;
                    };
                    self.output(&page);
                    fetched += 1;
                }
            }
        }
        Ok(())
    }

    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Parse a `name=value` parameter, reading the value as JSON when possible
pub fn parse_param(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::config(format!("invalid --param format: {raw} (expected name=value)")))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

/// Parse a `name=value` header
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| Error::config(format!("invalid --header format: {raw} (expected name=value)")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_spec(server: &MockServer) {
        let spec = json!({
            "swagger": "2.0",
            "info": {"title": "ESI", "version": "1"},
            "basePath": "/latest",
            "paths": {
                "/markets/{region_id}/orders/": {
                    "get": {
                        "operationId": "get_orders",
                        "tags": ["Market"],
                        "parameters": [
                            {"name": "region_id", "in": "path", "type": "integer", "required": true},
                            {"name": "page", "in": "query", "type": "integer"}
                        ]
                    }
                }
            }
        });
        Mock::given(method("GET"))
            .and(path("/latest/swagger.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(spec))
            .mount(server)
            .await;
    }

    async fn mount_order_pages(server: &MockServer, expected_fetches: &[u64; 3]) {
        for (page, expected) in (1..=3).zip(expected_fetches) {
            Mock::given(method("GET"))
                .and(path("/latest/markets/10000002/orders/"))
                .and(query_param("page", page.to_string()))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("X-Pages", "3")
                        .set_body_json(json!([page])),
                )
                .expect(*expected)
                .mount(server)
                .await;
        }
    }

    fn call_cli(server: &MockServer, max_pages: &str) -> Cli {
        let endpoint = format!("{}/latest/swagger.json", server.uri());
        Cli::parse_from([
            "esi-client",
            "--endpoint",
            endpoint.as_str(),
            "call",
            "Market",
            "get_orders",
            "-p",
            "region_id=10000002",
            "--max-pages",
            max_pages,
        ])
    }

    #[test]
    fn test_parse_param_json_value() {
        let (name, value) = parse_param("region_id=10000002").unwrap();
        assert_eq!(name, "region_id");
        assert_eq!(value, json!(10000002));

        let (_, value) = parse_param("ids=[1,2,3]").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_param_string_fallback() {
        let (name, value) = parse_param("order_type=all").unwrap();
        assert_eq!(name, "order_type");
        assert_eq!(value, json!("all"));
    }

    #[test]
    fn test_parse_param_invalid() {
        assert!(parse_param("no-equals").is_err());
    }

    #[test]
    fn test_parse_header() {
        let (name, value) = parse_header("If-None-Match = abc").unwrap();
        assert_eq!(name, "If-None-Match");
        assert_eq!(value, "abc");
        assert!(parse_header("bad").is_err());
    }

    #[test]
    fn test_load_config_flags_override() {
        let cli = Cli::parse_from([
            "esi-client",
            "--datasource",
            "singularity",
            "-A",
            "test/1.0",
            "resources",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.datasource, "singularity");
        assert_eq!(config.user_agent, "test/1.0");
        assert_eq!(config.endpoint, crate::ESI_ENDPOINT);
    }

    #[test]
    fn test_cli_parses_call() {
        let cli = Cli::parse_from([
            "esi-client",
            "call",
            "Market",
            "get_markets_region_id_orders",
            "-p",
            "region_id=10000002",
            "-p",
            "order_type=all",
            "--max-pages",
            "2",
        ]);
        match cli.command {
            Commands::Call {
                resource,
                operation,
                params,
                max_pages,
                ..
            } => {
                assert_eq!(resource, "Market");
                assert_eq!(operation, "get_markets_region_id_orders");
                assert_eq!(params.len(), 2);
                assert_eq!(max_pages, Some(2));
            }
            other => panic!("Expected Call, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spec_command_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/swagger.json"))
            .and(header("user-agent", "cli-agent/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"swagger": "2.0"})))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/latest/swagger.json", server.uri());
        let cli = Cli::parse_from([
            "esi-client",
            "--endpoint",
            endpoint.as_str(),
            "-A",
            "cli-agent/9",
            "spec",
        ]);
        Runner::new(cli).run().await.unwrap();
    }

    #[tokio::test]
    async fn test_max_pages_zero_fetches_nothing() {
        let server = MockServer::start().await;
        mount_spec(&server).await;
        mount_order_pages(&server, &[0, 0, 0]).await;

        Runner::new(call_cli(&server, "0")).run().await.unwrap();
    }

    #[tokio::test]
    async fn test_max_pages_limits_fetches() {
        let server = MockServer::start().await;
        mount_spec(&server).await;
        mount_order_pages(&server, &[1, 1, 0]).await;

        Runner::new(call_cli(&server, "2")).run().await.unwrap();
    }
}
