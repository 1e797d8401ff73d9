//! Callable wrapper around a declared operation

use super::options::CallArgs;
use super::params::{construct_request, RequestParams};
use crate::error::{Error, Result};
use crate::http::{EsiHttpClient, EsiResponse};
use crate::spec::Operation;
use std::sync::Arc;
use tracing::warn;

/// A declared operation bound to a transport
///
/// Checks authorization, builds the request and hands it to the transport.
#[derive(Debug, Clone)]
pub struct CallableOperation<'a> {
    operation: Arc<Operation>,
    http: &'a EsiHttpClient,
    base_url: &'a str,
    datasource: &'a str,
}

impl<'a> CallableOperation<'a> {
    /// Bind an operation to a transport
    pub fn new(
        operation: Arc<Operation>,
        http: &'a EsiHttpClient,
        base_url: &'a str,
        datasource: &'a str,
    ) -> Self {
        Self {
            operation,
            http,
            base_url,
            datasource,
        }
    }

    /// The wrapped operation
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Whether calls must carry a bearer token
    pub fn require_authorization(&self) -> bool {
        self.operation.require_authorization
    }

    /// Whether calls return a page iterator
    pub fn paginated(&self) -> bool {
        self.operation.paginated
    }

    /// Build the request for `args` without sending it
    pub fn build_request(&self, args: &CallArgs) -> Result<RequestParams> {
        construct_request(
            &self.operation,
            self.base_url,
            self.datasource,
            &args.params,
            &args.options,
        )
    }

    /// Invoke the operation
    ///
    /// Fails with [`Error::Authorization`] before any network activity when a
    /// token is required and missing.
    pub async fn call(&self, args: CallArgs) -> Result<EsiResponse> {
        if self.operation.deprecated {
            warn!(
                "[DEPRECATED] {} has now been deprecated. It will be removed in a future version.",
                self.operation.name
            );
        }

        if self.operation.require_authorization && args.bearer().is_none() {
            return Err(Error::missing_token());
        }

        let params = self.build_request(&args)?;
        self.http
            .request(
                params,
                Some(Arc::clone(&self.operation)),
                args.options.response_callbacks.clone(),
                args.bearer(),
            )
            .await
    }
}
