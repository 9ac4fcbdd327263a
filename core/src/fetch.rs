//! Blocking fetcher: build, execute once, parse.
//!
//! `Transport` is the seam between request building and the network. The
//! default `UreqTransport` returns every status as data so that
//! `SupplierClient` alone decides what a status means. There is no retry,
//! timeout configuration or pagination loop; each fetch is one GET.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::SupplierClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{supplier_today, RequestParams};

/// Executes one `HttpRequest` as a GET.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builds, sends and parses supplier requests in one call.
#[derive(Debug, Clone)]
pub struct Fetcher<T = UreqTransport> {
    client: SupplierClient,
    transport: T,
}

impl Fetcher<UreqTransport> {
    pub fn new(client: SupplierClient) -> Self {
        Self::with_transport(client, UreqTransport::new())
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(client: SupplierClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &SupplierClient {
        &self.client
    }

    pub fn fetch(&self, params: &RequestParams) -> Result<Value, ApiError> {
        self.fetch_on(params, supplier_today())
    }

    pub fn fetch_on(&self, params: &RequestParams, today: NaiveDate) -> Result<Value, ApiError> {
        self.fetch_as_on(params, today)
    }

    /// Validate keyword arguments for `key`, then fetch.
    pub fn fetch_args(&self, key: &str, args: Value) -> Result<Value, ApiError> {
        let params = RequestParams::from_args(key, args)?;
        self.fetch(&params)
    }

    pub fn fetch_as<R: DeserializeOwned>(&self, params: &RequestParams) -> Result<R, ApiError> {
        self.fetch_as_on(params, supplier_today())
    }

    pub fn fetch_as_on<R: DeserializeOwned>(
        &self,
        params: &RequestParams,
        today: NaiveDate,
    ) -> Result<R, ApiError> {
        let request = self.client.build_request_on(params, today);
        let endpoint = params.endpoint();
        let response = self.transport.execute(&request).inspect_err(|e| {
            warn!(%endpoint, error = %e, "supplier request failed");
        })?;
        debug!(%endpoint, status = response.status, "supplier response received");
        self.client.parse_response_as(response).inspect_err(|e| {
            warn!(%endpoint, error = %e, "supplier response rejected");
        })
    }
}
