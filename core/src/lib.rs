//! Synchronous client core for the supplier API.
//!
//! # Overview
//! Validates filter and pagination arguments for each endpoint kind, renders
//! them into a canonical query string, and builds GET requests carrying the
//! `accept` and `authorization` headers. `Fetcher` executes a request once
//! and returns the decoded JSON body.
//!
//! # Design
//! - `RequestParams` is a sum type with one variant per endpoint family;
//!   every variant encodes through the shared `Query` encoder.
//! - Validation happens when values enter the types, before any I/O.
//! - `SupplierClient` is stateless apart from its immutable `ClientConfig`;
//!   it builds `HttpRequest` values and parses `HttpResponse` values
//!   (host-does-IO). `Fetcher` pairs it with a `Transport`.
//! - The API token comes from configuration, never from source.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod http;
pub mod params;
pub mod query;

pub use client::SupplierClient;
pub use config::{ApiToken, ClientConfig};
pub use endpoint::{Endpoint, Lookup};
pub use error::ApiError;
pub use fetch::{Fetcher, Transport, UreqTransport};
pub use http::{HttpRequest, HttpResponse};
pub use params::{
    supplier_today, CostsQuery, ExtQuery, LangCode, LookupQuery, ObjectSearchQuery, OrderStatus,
    OrdersQuery, QuantityFilter, RequestParams, SortOrder, StockSort, StocksQuery, TnvedQuery,
};
pub use query::{parse_query, Query};
