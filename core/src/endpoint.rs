//! Static endpoint table for the supplier API.
//!
//! Every request targets one `Endpoint`. The table maps each symbolic key to
//! a fixed path under the API base URL; nothing about it is configurable at
//! runtime except the base URL, which lives in `ClientConfig`.

use std::fmt;

use crate::error::ApiError;

/// Plain directory lookups that share the `top` / `pattern` / `id` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Colors,
    Kinds,
    Countries,
    Collections,
    Seasons,
    Contents,
    Consists,
    Options,
    Brands,
    Si,
}

impl Lookup {
    pub const ALL: [Lookup; 10] = [
        Lookup::Colors,
        Lookup::Kinds,
        Lookup::Countries,
        Lookup::Collections,
        Lookup::Seasons,
        Lookup::Contents,
        Lookup::Consists,
        Lookup::Options,
        Lookup::Brands,
        Lookup::Si,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Lookup::Colors => "colors",
            Lookup::Kinds => "kinds",
            Lookup::Countries => "countries",
            Lookup::Collections => "collections",
            Lookup::Seasons => "seasons",
            Lookup::Contents => "contents",
            Lookup::Consists => "consists",
            Lookup::Options => "options",
            Lookup::Brands => "brands",
            Lookup::Si => "si",
        }
    }
}

/// One resource of the supplier API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Orders,
    Warehouses,
    Stocks,
    Costs,
    Lookup(Lookup),
    Tnved,
    Ext,
    /// Config object search by name pattern (`list`).
    ObjectList,
}

impl Endpoint {
    /// Resolve a symbolic key such as `"orders"` or `"Colors"`.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn from_key(key: &str) -> Result<Endpoint, ApiError> {
        let normalized = key.trim().to_ascii_lowercase();
        let endpoint = match normalized.as_str() {
            "orders" => Endpoint::Orders,
            "warehouses" => Endpoint::Warehouses,
            "stocks" => Endpoint::Stocks,
            "costs" => Endpoint::Costs,
            "tnved" => Endpoint::Tnved,
            "ext" => Endpoint::Ext,
            "list" => Endpoint::ObjectList,
            other => Lookup::ALL
                .into_iter()
                .find(|lookup| lookup.key() == other)
                .map(Endpoint::Lookup)
                .ok_or_else(|| ApiError::UnknownEndpoint(key.to_string()))?,
        };
        Ok(endpoint)
    }

    pub fn key(self) -> &'static str {
        match self {
            Endpoint::Orders => "orders",
            Endpoint::Warehouses => "warehouses",
            Endpoint::Stocks => "stocks",
            Endpoint::Costs => "costs",
            Endpoint::Lookup(lookup) => lookup.key(),
            Endpoint::Tnved => "tnved",
            Endpoint::Ext => "ext",
            Endpoint::ObjectList => "list",
        }
    }

    /// Path under the API base URL, always starting with `/`.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Orders => "/api/v2/orders",
            Endpoint::Warehouses => "/api/v2/warehouses",
            Endpoint::Stocks => "/api/v2/stocks",
            Endpoint::Costs => "/public/api/v1/info",
            Endpoint::Lookup(Lookup::Colors) => "/api/v1/directory/colors",
            Endpoint::Lookup(Lookup::Kinds) => "/api/v1/directory/kinds",
            Endpoint::Lookup(Lookup::Countries) => "/api/v1/directory/countries",
            Endpoint::Lookup(Lookup::Collections) => "/api/v1/directory/collections",
            Endpoint::Lookup(Lookup::Seasons) => "/api/v1/directory/seasons",
            Endpoint::Lookup(Lookup::Contents) => "/api/v1/directory/contents",
            Endpoint::Lookup(Lookup::Consists) => "/api/v1/directory/consists",
            Endpoint::Lookup(Lookup::Options) => "/api/v1/directory/options",
            Endpoint::Lookup(Lookup::Brands) => "/api/v1/directory/brands",
            Endpoint::Lookup(Lookup::Si) => "/api/v1/directory/si",
            Endpoint::Tnved => "/api/v1/directory/tnved",
            Endpoint::Ext => "/api/v1/directory/ext",
            Endpoint::ObjectList => "/api/v1/config/get/object/list",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
