//! Spec download
//!
//! Fetches the Swagger document from `{endpoint}?datasource={datasource}`.
//! Every failure on this path is reported as [`Error::Esi`].

use crate::error::{Error, Result};
use crate::http::EsiHttpClient;
use crate::types::JsonValue;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error};
use url::Url;

/// Build the spec URL for an endpoint and datasource
pub fn spec_url(endpoint: &str, datasource: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("datasource", datasource);
    Ok(url)
}

/// Download and parse the spec with the default user agent
pub async fn download_spec(endpoint: &str, datasource: &str) -> Result<JsonValue> {
    let http = EsiHttpClient::default().session(None)?;
    fetch_spec(&http, endpoint, datasource).await
}

/// Download and parse the spec with the given HTTP client
pub async fn fetch_spec(http: &Client, endpoint: &str, datasource: &str) -> Result<JsonValue> {
    let start = Instant::now();
    match try_fetch(http, endpoint, datasource).await {
        Ok(spec) => {
            debug!(
                "Swagger spec downloaded and parsed in {:?}",
                start.elapsed()
            );
            Ok(spec)
        }
        Err(e) => {
            error!("Could not connect to ESI: {e:#}");
            Err(Error::esi(format!("{e:#}")))
        }
    }
}

async fn try_fetch(http: &Client, endpoint: &str, datasource: &str) -> anyhow::Result<JsonValue> {
    let url = spec_url(endpoint, datasource)?;
    let response = http.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
