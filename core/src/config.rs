//! Client configuration: API base URL and credential.
//!
//! Built once at startup and passed to `SupplierClient` explicitly. The token
//! is read from the environment (or any injected lookup) and never appears
//! in `Debug` output or logs.

use std::fmt;

use crate::error::ApiError;

pub const TOKEN_ENV: &str = "SUPPLIER_API_TOKEN";
pub const BASE_URL_ENV: &str = "SUPPLIER_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://suppliers-api.wildberries.ru";

/// API token sent in the `authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    token: ApiToken,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: ApiToken) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Read `SUPPLIER_API_TOKEN` (required) and `SUPPLIER_API_BASE_URL`
    /// (optional) from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingCredential(TOKEN_ENV))?;
        let base_url = lookup(BASE_URL_ENV)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(&base_url, ApiToken::new(token)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    /// The header set attached to every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), "application/json".to_string()),
            ("authorization".to_string(), self.token.expose().to_string()),
        ]
    }
}
