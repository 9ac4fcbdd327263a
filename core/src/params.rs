//! Typed request parameters for every endpoint kind.
//!
//! # Design
//! `RequestParams` has one variant per endpoint family. Each variant carries
//! its own struct of typed, defaulted fields; enumerated fields are enums, so
//! a constructed value is always valid and rendering it cannot fail. All
//! validation happens when values enter the type: `FromStr` / `TryFrom`
//! for individual fields, and `RequestParams::from_args` for loose keyword
//! arguments given as a JSON object. Rendering goes through the shared
//! `Query` encoder.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::endpoint::{Endpoint, Lookup};
use crate::error::{ApiError, INVALID_ARGUMENT_PREFIX};
use crate::query::Query;

const DEFAULT_TAKE: u32 = 10;
const DEFAULT_TOP: u32 = 10;
const DEFAULT_LANG: &str = "ru";

/// UTC offset the supplier API uses for order timestamps.
const SUPPLIER_UTC_OFFSET_SECS: i64 = 10 * 3600;

/// Today's calendar date at the supplier's fixed +10:00 offset.
pub fn supplier_today() -> NaiveDate {
    (Utc::now() + TimeDelta::seconds(SUPPLIER_UTC_OFFSET_SECS)).date_naive()
}

/// Render a date as midnight at the supplier offset (RFC 3339).
fn supplier_midnight(date: NaiveDate) -> String {
    format!("{}T00:00:00.000+10:00", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Order status filter. Status 4 does not exist in the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum OrderStatus {
    New = 0,
    Accepted = 1,
    AssemblyComplete = 2,
    AssemblyDeclined = 3,
    OnDelivery = 5,
    Received = 6,
    Refused = 7,
}

impl OrderStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = ApiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderStatus::New),
            1 => Ok(OrderStatus::Accepted),
            2 => Ok(OrderStatus::AssemblyComplete),
            3 => Ok(OrderStatus::AssemblyDeclined),
            5 => Ok(OrderStatus::OnDelivery),
            6 => Ok(OrderStatus::Received),
            7 => Ok(OrderStatus::Refused),
            other => Err(ApiError::invalid(format!(
                "status must be one of 0, 1, 2, 3, 5, 6, 7, got {other}"
            ))),
        }
    }
}

/// Field the stock search is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StockSort {
    Subject,
    Brand,
    Name,
    Size,
    Barcode,
    Articles,
}

impl StockSort {
    pub fn as_str(self) -> &'static str {
        match self {
            StockSort::Subject => "subject",
            StockSort::Brand => "brand",
            StockSort::Name => "name",
            StockSort::Size => "size",
            StockSort::Barcode => "barcode",
            StockSort::Articles => "articles",
        }
    }
}

impl FromStr for StockSort {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" => Ok(StockSort::Subject),
            "brand" => Ok(StockSort::Brand),
            "name" => Ok(StockSort::Name),
            "size" => Ok(StockSort::Size),
            "barcode" => Ok(StockSort::Barcode),
            "articles" => Ok(StockSort::Articles),
            other => Err(ApiError::invalid(format!(
                "sort must be one of subject, brand, name, size, barcode, articles, got {other:?}"
            ))),
        }
    }
}

impl TryFrom<String> for StockSort {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StockSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ApiError::invalid(format!(
                "order must be asc or desc, got {other:?}"
            ))),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which price rows to return, by stock quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum QuantityFilter {
    All = 0,
    #[default]
    InStock = 1,
    OutOfStock = 2,
}

impl QuantityFilter {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for QuantityFilter {
    type Error = ApiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QuantityFilter::All),
            1 => Ok(QuantityFilter::InStock),
            2 => Ok(QuantityFilter::OutOfStock),
            other => Err(ApiError::invalid(format!(
                "quantity must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// Language tag for localized names (`ru`, `en`, `zh-hans`), stored
/// lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct LangCode(String);

impl LangCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LangCode {
    fn default() -> Self {
        LangCode(DEFAULT_LANG.to_string())
    }
}

impl FromStr for LangCode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(ApiError::invalid("lang must not be empty"));
        }
        Ok(LangCode(tag.to_lowercase()))
    }
}

impl TryFrom<String> for LangCode {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Per-endpoint parameter sets
// ---------------------------------------------------------------------------

/// Filters for `orders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrdersQuery {
    /// Start of the search window; yesterday when absent.
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    /// `None` means every status.
    pub status: Option<OrderStatus>,
    pub skip: u32,
    pub take: u32,
    pub order_id: Option<u64>,
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self {
            date_start: None,
            date_end: None,
            status: None,
            skip: 0,
            take: DEFAULT_TAKE,
            order_id: None,
        }
    }
}

impl OrdersQuery {
    fn render(&self, today: NaiveDate, query: &mut Query) {
        let date_start = self
            .date_start
            .unwrap_or_else(|| today.pred_opt().unwrap_or(today));
        query
            .push("date_start", supplier_midnight(date_start))
            .push_opt("date_end", self.date_end.map(supplier_midnight))
            .push_opt("status", self.status.map(OrderStatus::code))
            .push("skip", self.skip)
            .push("take", self.take)
            .push_opt("id", self.order_id);
    }
}

/// Filters for `stocks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StocksQuery {
    /// Word or word fragment to search for.
    pub search: Option<String>,
    pub skip: u32,
    pub take: u32,
    pub sort: Option<StockSort>,
    pub order: Option<SortOrder>,
}

impl Default for StocksQuery {
    fn default() -> Self {
        Self {
            search: None,
            skip: 0,
            take: DEFAULT_TAKE,
            sort: None,
            order: None,
        }
    }
}

impl StocksQuery {
    fn render(&self, query: &mut Query) {
        query
            .push_opt("search", self.search.as_deref())
            .push("skip", self.skip)
            .push("take", self.take)
            .push_opt("sort", self.sort)
            .push_opt("order", self.order);
    }
}

/// Filters for `costs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostsQuery {
    pub quantity: QuantityFilter,
}

/// Filters shared by the plain directory lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupQuery {
    /// Result limit.
    pub top: u32,
    pub pattern: Option<String>,
    pub id: Option<u64>,
}

impl Default for LookupQuery {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            pattern: None,
            id: None,
        }
    }
}

/// Filters for the config object search (`list`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectSearchQuery {
    pub pattern: Option<String>,
    pub parent: Option<String>,
    pub lang: LangCode,
    pub id: Option<u64>,
    pub top: u32,
}

impl Default for ObjectSearchQuery {
    fn default() -> Self {
        Self {
            pattern: None,
            parent: None,
            lang: LangCode::default(),
            id: None,
            top: DEFAULT_TOP,
        }
    }
}

/// Filters for customs codes (`tnved`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TnvedQuery {
    #[serde(rename = "subjectID")]
    pub subject_id: Option<u64>,
    pub subject: Option<String>,
    pub pattern: Option<String>,
    pub top: u32,
}

impl Default for TnvedQuery {
    fn default() -> Self {
        Self {
            subject_id: None,
            subject: None,
            pattern: None,
            top: DEFAULT_TOP,
        }
    }
}

/// Filters for extended characteristic values (`ext`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtQuery {
    pub option: Option<String>,
    pub pattern: Option<String>,
    pub id: Option<u64>,
    pub top: u32,
}

impl Default for ExtQuery {
    fn default() -> Self {
        Self {
            option: None,
            pattern: None,
            id: None,
            top: DEFAULT_TOP,
        }
    }
}

/// `warehouses` takes no filters; this only rejects stray arguments.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

// ---------------------------------------------------------------------------
// RequestParams
// ---------------------------------------------------------------------------

/// Validated parameters for one request, tagged by endpoint kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestParams {
    Orders(OrdersQuery),
    Warehouses,
    Stocks(StocksQuery),
    Costs(CostsQuery),
    Lookup(Lookup, LookupQuery),
    Tnved(TnvedQuery),
    Ext(ExtQuery),
    ObjectList(ObjectSearchQuery),
}

impl RequestParams {
    /// Parameters with every field at its default.
    pub fn defaults(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Orders => RequestParams::Orders(OrdersQuery::default()),
            Endpoint::Warehouses => RequestParams::Warehouses,
            Endpoint::Stocks => RequestParams::Stocks(StocksQuery::default()),
            Endpoint::Costs => RequestParams::Costs(CostsQuery::default()),
            Endpoint::Lookup(lookup) => RequestParams::Lookup(lookup, LookupQuery::default()),
            Endpoint::Tnved => RequestParams::Tnved(TnvedQuery::default()),
            Endpoint::Ext => RequestParams::Ext(ExtQuery::default()),
            Endpoint::ObjectList => RequestParams::ObjectList(ObjectSearchQuery::default()),
        }
    }

    /// Validate loose keyword arguments for the endpoint named `key`.
    ///
    /// `args` must be a JSON object (or `null` for no filters). Unknown
    /// fields, wrong primitive types and out-of-set values all fail with
    /// `InvalidArgument`; an unknown `key` fails with `UnknownEndpoint`.
    pub fn from_args(key: &str, args: Value) -> Result<Self, ApiError> {
        let endpoint = Endpoint::from_key(key)?;
        let params = match endpoint {
            Endpoint::Orders => RequestParams::Orders(decode(endpoint, args)?),
            Endpoint::Warehouses => {
                let NoArgs {} = decode(endpoint, args)?;
                RequestParams::Warehouses
            }
            Endpoint::Stocks => RequestParams::Stocks(decode(endpoint, args)?),
            Endpoint::Costs => RequestParams::Costs(decode(endpoint, args)?),
            Endpoint::Lookup(lookup) => RequestParams::Lookup(lookup, decode(endpoint, args)?),
            Endpoint::Tnved => RequestParams::Tnved(decode(endpoint, args)?),
            Endpoint::Ext => RequestParams::Ext(decode(endpoint, args)?),
            Endpoint::ObjectList => RequestParams::ObjectList(decode(endpoint, args)?),
        };
        Ok(params)
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            RequestParams::Orders(_) => Endpoint::Orders,
            RequestParams::Warehouses => Endpoint::Warehouses,
            RequestParams::Stocks(_) => Endpoint::Stocks,
            RequestParams::Costs(_) => Endpoint::Costs,
            RequestParams::Lookup(lookup, _) => Endpoint::Lookup(*lookup),
            RequestParams::Tnved(_) => Endpoint::Tnved,
            RequestParams::Ext(_) => Endpoint::Ext,
            RequestParams::ObjectList(_) => Endpoint::ObjectList,
        }
    }

    /// Collect the query pairs. `today` resolves date defaults.
    pub fn to_query(&self, today: NaiveDate) -> Query {
        let mut query = Query::new();
        match self {
            RequestParams::Orders(orders) => orders.render(today, &mut query),
            RequestParams::Warehouses => {}
            RequestParams::Stocks(stocks) => stocks.render(&mut query),
            RequestParams::Costs(costs) => {
                query.push("quantity", costs.quantity.code());
            }
            RequestParams::Lookup(_, lookup) => {
                query
                    .push("top", lookup.top)
                    .push_opt("pattern", lookup.pattern.as_deref())
                    .push_opt("id", lookup.id);
            }
            RequestParams::Tnved(tnved) => {
                query
                    .push_opt("subjectID", tnved.subject_id)
                    .push_opt("subject", tnved.subject.as_deref())
                    .push_opt("pattern", tnved.pattern.as_deref())
                    .push("top", tnved.top);
            }
            RequestParams::Ext(ext) => {
                query
                    .push_opt("option", ext.option.as_deref())
                    .push_opt("pattern", ext.pattern.as_deref())
                    .push_opt("id", ext.id)
                    .push("top", ext.top);
            }
            RequestParams::ObjectList(search) => {
                query
                    .push_opt("pattern", search.pattern.as_deref())
                    .push_opt("parent", search.parent.as_deref())
                    .push("lang", search.lang.as_str())
                    .push_opt("id", search.id)
                    .push("top", search.top);
            }
        }
        query
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, args: Value) -> Result<T, ApiError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        Value::Object(_) => args,
        other => {
            return Err(ApiError::invalid(format!(
                "{endpoint}: arguments must be an object, got {other}"
            )))
        }
    };
    serde_json::from_value(args).map_err(|e| {
        // Field conversions fail with an `InvalidArgument` whose Display
        // serde has already captured; keep only its message.
        let message = e.to_string();
        let message = message
            .strip_prefix(INVALID_ARGUMENT_PREFIX)
            .unwrap_or(&message);
        ApiError::invalid(format!("{endpoint}: {message}"))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::parse_query;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn encode(params: &RequestParams) -> String {
        params.to_query(today()).encode()
    }

    #[test]
    fn orders_default_start_is_yesterday() {
        let params = RequestParams::defaults(Endpoint::Orders);
        assert_eq!(
            encode(&params),
            "?date_start=2024-03-14T00%3A00%3A00.000%2B10%3A00&skip=0&take=10"
        );
    }

    #[test]
    fn orders_yesterday_crosses_month_boundary() {
        let params = RequestParams::defaults(Endpoint::Orders);
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let pairs = parse_query(&params.to_query(first).encode());
        assert_eq!(pairs[0].1, "2024-02-29T00:00:00.000+10:00");
    }

    #[test]
    fn orders_render_every_field_in_order() {
        let params = RequestParams::from_args(
            "orders",
            json!({
                "date_start": "2024-01-01",
                "date_end": "2024-01-31",
                "status": 2,
                "skip": 20,
                "take": 50,
                "order_id": 12345
            }),
        )
        .unwrap();
        let keys: Vec<String> = parse_query(&encode(&params))
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["date_start", "date_end", "status", "skip", "take", "id"]);
        assert!(encode(&params).contains("&status=2&"));
        assert!(encode(&params).contains("date_end=2024-01-31T00%3A00%3A00.000%2B10%3A00"));
    }

    #[test]
    fn order_status_four_is_rejected() {
        assert!(matches!(
            OrderStatus::try_from(4),
            Err(ApiError::InvalidArgument(_))
        ));
        let err = RequestParams::from_args("orders", json!({"status": 4})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(ref m) if m.contains("status")));
    }

    #[test]
    fn order_status_accepts_valid_codes() {
        for code in [0u8, 1, 2, 3, 5, 6, 7] {
            assert_eq!(OrderStatus::try_from(code).unwrap().code(), code);
        }
        assert!(OrderStatus::try_from(8).is_err());
    }

    #[test]
    fn orders_reject_non_date_and_wrong_types() {
        for args in [
            json!({"date_start": "yesterday"}),
            json!({"date_end": 20240101}),
            json!({"order_id": "12"}),
            json!({"skip": -1}),
            json!({"take": "10"}),
        ] {
            let err = RequestParams::from_args("orders", args.clone()).unwrap_err();
            assert!(matches!(err, ApiError::InvalidArgument(_)), "{args}");
        }
    }

    #[test]
    fn stocks_reject_unknown_sort() {
        assert!("price".parse::<StockSort>().is_err());
        let err = RequestParams::from_args("stocks", json!({"sort": "price"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(ref m) if m.contains("sort")));
    }

    #[test]
    fn stocks_reject_unknown_order() {
        let err = RequestParams::from_args("stocks", json!({"order": "up"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn stocks_sort_then_order() {
        let params = RequestParams::Stocks(StocksQuery {
            sort: Some("brand".parse().unwrap()),
            order: Some("asc".parse().unwrap()),
            ..StocksQuery::default()
        });
        assert_eq!(encode(&params), "?skip=0&take=10&sort=brand&order=asc");
    }

    #[test]
    fn stocks_search_comes_first() {
        let params = RequestParams::from_args("stocks", json!({"search": "dress", "skip": 10}))
            .unwrap();
        assert_eq!(encode(&params), "?search=dress&skip=10&take=10");
    }

    #[test]
    fn costs_quantity_set() {
        for quantity in [0u8, 1, 2] {
            let params =
                RequestParams::from_args("costs", json!({ "quantity": quantity })).unwrap();
            assert_eq!(encode(&params), format!("?quantity={quantity}"));
        }
        let err = RequestParams::from_args("costs", json!({"quantity": 5})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn costs_default_quantity_is_in_stock() {
        assert_eq!(encode(&RequestParams::defaults(Endpoint::Costs)), "?quantity=1");
    }

    #[test]
    fn warehouses_have_no_query_and_no_arguments() {
        let params = RequestParams::from_args("warehouses", Value::Null).unwrap();
        assert_eq!(encode(&params), "");
        let err = RequestParams::from_args("warehouses", json!({"take": 1})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn lookups_share_filters() {
        let params =
            RequestParams::from_args("colors", json!({"top": 5, "pattern": "красн", "id": 3}))
                .unwrap();
        assert_eq!(params.endpoint(), Endpoint::Lookup(Lookup::Colors));
        let pairs = parse_query(&encode(&params));
        assert_eq!(
            pairs,
            vec![
                ("top".to_string(), "5".to_string()),
                ("pattern".to_string(), "красн".to_string()),
                ("id".to_string(), "3".to_string()),
            ]
        );
        let err = RequestParams::from_args("brands", json!({"top": "many"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn object_list_defaults_lang() {
        let params = RequestParams::from_args("list", json!({"pattern": "Платья"})).unwrap();
        let pairs = parse_query(&encode(&params));
        assert!(pairs.contains(&("lang".to_string(), "ru".to_string())));
        assert!(pairs.contains(&("top".to_string(), "10".to_string())));
    }

    #[test]
    fn object_list_validates_lang() {
        let params =
            RequestParams::from_args("list", json!({"parent": "Одежда", "lang": "EN"})).unwrap();
        assert!(encode(&params).contains("lang=en"));
        let params = RequestParams::from_args("list", json!({"lang": "zh-Hans"})).unwrap();
        assert!(encode(&params).contains("lang=zh-hans"));
        let err = RequestParams::from_args("list", json!({"lang": "  "})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        let err = RequestParams::from_args("list", json!({"lang": 7})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn ext_and_object_list_accept_id() {
        let params = RequestParams::from_args("ext", json!({"option": "Kit", "id": 3})).unwrap();
        assert_eq!(encode(&params), "?option=Kit&id=3&top=10");
        let params =
            RequestParams::from_args("list", json!({"pattern": "Dress", "id": 9})).unwrap();
        assert_eq!(encode(&params), "?pattern=Dress&lang=ru&id=9&top=10");
        let err = RequestParams::from_args("ext", json!({"id": "3"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn conversion_errors_are_not_double_prefixed() {
        let err = RequestParams::from_args("list", json!({"lang": ""})).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: list: lang must not be empty");
        let err = RequestParams::from_args("orders", json!({"status": 4})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: orders: status must be one of 0, 1, 2, 3, 5, 6, 7, got 4"
        );
    }

    #[test]
    fn supplier_today_is_utc_today_or_tomorrow() {
        let before = Utc::now().date_naive();
        let today = supplier_today();
        let after = Utc::now().date_naive();
        let tomorrow = after.succ_opt().unwrap();
        assert!(today >= before && today <= tomorrow, "{today} outside {before}..={tomorrow}");
    }

    #[test]
    fn tnved_uses_subject_id_key() {
        let params = RequestParams::from_args(
            "tnved",
            json!({"subjectID": 105, "subject": "Платья", "pattern": "6104"}),
        )
        .unwrap();
        let keys: Vec<String> = parse_query(&encode(&params))
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["subjectID", "subject", "pattern", "top"]);
        let err = RequestParams::from_args("tnved", json!({"subject_id": 105})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn ext_adds_option() {
        let params = RequestParams::from_args("ext", json!({"option": "Комплектация"})).unwrap();
        assert!(encode(&params).starts_with("?option="));
        assert!(encode(&params).ends_with("&top=10"));
    }

    #[test]
    fn unknown_fields_and_non_objects_are_rejected() {
        let err = RequestParams::from_args("stocks", json!({"limit": 3})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        let err = RequestParams::from_args("stocks", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn unknown_endpoint_from_args() {
        let err = RequestParams::from_args("carts", Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::UnknownEndpoint(_)));
    }

    #[test]
    fn supplied_values_survive_round_trip() {
        let params = RequestParams::from_args(
            "stocks",
            json!({"search": "a&b c=d", "skip": 7, "take": 3, "sort": "barcode", "order": "desc"}),
        )
        .unwrap();
        let pairs = parse_query(&encode(&params));
        assert_eq!(
            pairs,
            vec![
                ("search".to_string(), "a&b c=d".to_string()),
                ("skip".to_string(), "7".to_string()),
                ("take".to_string(), "3".to_string()),
                ("sort".to_string(), "barcode".to_string()),
                ("order".to_string(), "desc".to_string()),
            ]
        );
    }
}
