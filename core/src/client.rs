//! Stateless request builder and response parser for the supplier API.
//!
//! # Design
//! `SupplierClient` holds only its `ClientConfig`. Building a request joins
//! the base URL, the endpoint path and the encoded query, then attaches the
//! header set. Parsing checks the status and decodes the JSON body. The
//! network round-trip in between belongs to the caller or to `Fetcher`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{supplier_today, RequestParams};

/// Synchronous, stateless client for the supplier API.
#[derive(Debug, Clone)]
pub struct SupplierClient {
    config: ClientConfig,
}

impl SupplierClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request, resolving date defaults against today's supplier
    /// date.
    pub fn build_request(&self, params: &RequestParams) -> HttpRequest {
        self.build_request_on(params, supplier_today())
    }

    pub fn build_request_on(&self, params: &RequestParams, today: NaiveDate) -> HttpRequest {
        let endpoint = params.endpoint();
        let url = format!(
            "{}{}{}",
            self.config.base_url(),
            endpoint.path(),
            params.to_query(today).encode()
        );
        debug!(%endpoint, %url, "built supplier request");
        HttpRequest {
            url,
            headers: self.config.headers(),
        }
    }

    /// Validate keyword arguments for `key` and build the request.
    pub fn build_from_args(&self, key: &str, args: Value) -> Result<HttpRequest, ApiError> {
        let params = RequestParams::from_args(key, args)?;
        Ok(self.build_request(&params))
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        self.parse_response_as(response)
    }

    /// Decode a 2xx body into `T`.
    pub fn parse_response_as<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
