//! Shared query-string encoder and parser.
//!
//! Every endpoint's parameters are collected into a `Query` in a fixed field
//! order and encoded here, so there is exactly one canonical form: a
//! non-empty query starts with `?`, pairs are joined with `&`, keys and
//! values are form-urlencoded. A query with no pairs encodes to `""`.

use url::form_urlencoded;

/// Ordered list of query pairs for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Push `value` only when it is present.
    pub fn push_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `?k=v&k2=v2`, or `""` when there are no pairs.
    pub fn encode(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Decode a query string back into ordered key/value pairs.
///
/// A leading `?` is optional.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let raw = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}
