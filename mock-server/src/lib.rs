//! In-memory imitation of the supplier API.
//!
//! Serves fixed fixtures for orders, stocks, warehouses, prices, directory
//! lookups and the config object list. Every route requires the
//! `authorization` header to equal the configured token and answers 401
//! otherwise. Filters and pagination follow the real API closely enough for
//! client integration tests.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_TOKEN: &str = "mock-token";

const DIRECTORY_NAMES: [&str; 12] = [
    "colors",
    "kinds",
    "countries",
    "collections",
    "seasons",
    "contents",
    "consists",
    "options",
    "brands",
    "si",
    "tnved",
    "ext",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub rid: Uuid,
    pub date_created: String,
    pub warehouse_id: u64,
    pub status: u8,
    pub barcode: String,
    pub total_price: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stock {
    pub subject: String,
    pub brand: String,
    pub name: String,
    pub size: String,
    pub barcode: String,
    pub article: String,
    pub stock: u32,
    #[serde(rename = "warehouseId")]
    pub warehouse_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    pub nm_id: u64,
    pub price: u64,
    pub discount: u32,
    pub promo_code: u32,
    pub quantity: Option<u32>,
}

/// One row of a directory or the config object list. `parent` is the
/// subject for `tnved`, the characteristic for `ext`, and the parent
/// category for objects. `tnved` rows also carry the numeric subject id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "subjectID", skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<u64>,
}

impl DirectoryEntry {
    fn new(id: u64, name: &str, parent: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            parent: parent.map(str::to_string),
            subject_id: None,
        }
    }

    fn with_subject_id(mut self, subject_id: u64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }
}

/// Everything the mock serves.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub orders: Vec<Order>,
    pub stocks: Vec<Stock>,
    pub warehouses: Vec<Warehouse>,
    pub prices: Vec<PriceInfo>,
    pub directories: HashMap<String, Vec<DirectoryEntry>>,
    pub objects: Vec<DirectoryEntry>,
}

impl Fixtures {
    pub fn sample() -> Self {
        let order = |id: u64, date: &str, status: u8, price: u64| Order {
            id,
            rid: Uuid::new_v4(),
            date_created: format!("{date}T09:30:00.000+10:00"),
            warehouse_id: 1,
            status,
            barcode: format!("46000000{id:05}"),
            total_price: price,
        };
        let stock = |subject: &str, brand: &str, name: &str, size: &str, barcode: &str, n: u32| {
            Stock {
                subject: subject.to_string(),
                brand: brand.to_string(),
                name: name.to_string(),
                size: size.to_string(),
                barcode: barcode.to_string(),
                article: format!("ART-{barcode}"),
                stock: n,
                warehouse_id: 1,
            }
        };

        let mut directories = HashMap::new();
        directories.insert(
            "colors".to_string(),
            vec![
                DirectoryEntry::new(1, "красный", None),
                DirectoryEntry::new(2, "темно-красный", None),
                DirectoryEntry::new(3, "синий", None),
                DirectoryEntry::new(4, "черный", None),
            ],
        );
        directories.insert(
            "countries".to_string(),
            vec![
                DirectoryEntry::new(1, "Россия", None),
                DirectoryEntry::new(2, "Китай", None),
                DirectoryEntry::new(3, "Турция", None),
            ],
        );
        directories.insert(
            "brands".to_string(),
            vec![
                DirectoryEntry::new(10, "Nordic", None),
                DirectoryEntry::new(11, "Northwind", None),
                DirectoryEntry::new(12, "Sudak", None),
            ],
        );
        directories.insert(
            "seasons".to_string(),
            vec![
                DirectoryEntry::new(1, "лето", None),
                DirectoryEntry::new(2, "зима", None),
                DirectoryEntry::new(3, "демисезон", None),
            ],
        );
        directories.insert(
            "tnved".to_string(),
            vec![
                DirectoryEntry::new(6104430000, "6104430000", Some("Платья"))
                    .with_subject_id(105),
                DirectoryEntry::new(6204430000, "6204430000", Some("Платья"))
                    .with_subject_id(105),
                DirectoryEntry::new(6403990000, "6403990000", Some("Ботинки"))
                    .with_subject_id(220),
            ],
        );
        directories.insert(
            "ext".to_string(),
            vec![
                DirectoryEntry::new(1, "пояс", Some("Комплектация")),
                DirectoryEntry::new(2, "чехол", Some("Комплектация")),
                DirectoryEntry::new(3, "хлопок", Some("Состав")),
            ],
        );
        for name in DIRECTORY_NAMES {
            directories.entry(name.to_string()).or_insert_with(Vec::new);
        }

        Self {
            orders: vec![
                order(1001, "2024-03-10", 0, 150_000),
                order(1002, "2024-03-11", 1, 99_000),
                order(1003, "2024-03-12", 2, 240_000),
                order(1004, "2024-03-12", 2, 18_500),
                order(1005, "2024-03-13", 5, 72_000),
                order(1006, "2024-03-14", 7, 31_000),
            ],
            stocks: vec![
                stock("Платья", "Nordic", "Платье летнее", "44", "2000000000011", 5),
                stock("Платья", "Northwind", "Платье вечернее", "46", "2000000000028", 0),
                stock("Ботинки", "Sudak", "Ботинки зимние", "41", "2000000000035", 12),
                stock("Брюки", "Aster", "Брюки классические", "48", "2000000000042", 3),
            ],
            warehouses: vec![
                Warehouse {
                    id: 1,
                    name: "Коледино".to_string(),
                },
                Warehouse {
                    id: 2,
                    name: "Казань".to_string(),
                },
            ],
            prices: vec![
                PriceInfo {
                    nm_id: 501,
                    price: 2500,
                    discount: 10,
                    promo_code: 0,
                    quantity: Some(5),
                },
                PriceInfo {
                    nm_id: 502,
                    price: 4300,
                    discount: 0,
                    promo_code: 5,
                    quantity: None,
                },
                PriceInfo {
                    nm_id: 503,
                    price: 990,
                    discount: 25,
                    promo_code: 0,
                    quantity: Some(12),
                },
            ],
            directories,
            objects: vec![
                DirectoryEntry::new(1, "Платья", Some("Одежда")),
                DirectoryEntry::new(2, "Платья-рубашки", Some("Одежда")),
                DirectoryEntry::new(3, "Ботинки", Some("Обувь")),
            ],
        }
    }
}

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    fixtures: Arc<Fixtures>,
}

pub fn app(token: &str) -> Router {
    app_with(token, Fixtures::sample())
}

pub fn app_with(token: &str, fixtures: Fixtures) -> Router {
    let state = AppState {
        token: Arc::from(token),
        fixtures: Arc::new(fixtures),
    };
    Router::new()
        .route("/api/v2/orders", get(list_orders))
        .route("/api/v2/stocks", get(list_stocks))
        .route("/api/v2/warehouses", get(list_warehouses))
        .route("/public/api/v1/info", get(list_prices))
        .route("/api/v1/directory/{name}", get(directory))
        .route("/api/v1/config/get/object/list", get(object_list))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock supplier API listening");
    }
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        Some(token) if token == &*state.token => Ok(()),
        _ => {
            debug!("rejecting request with missing or wrong token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Calendar-day prefix of an RFC 3339 timestamp.
fn day(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn default_take() -> usize {
    10
}

fn page<T: Clone>(items: &[T], skip: usize, take: usize) -> Vec<T> {
    items.iter().skip(skip).take(take).cloned().collect()
}

#[derive(Debug, Deserialize)]
pub struct OrdersParams {
    pub date_start: String,
    pub date_end: Option<String>,
    pub status: Option<u8>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_take")]
    pub take: usize,
    pub id: Option<u64>,
}

async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<OrdersParams>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&state, &headers)?;
    if matches!(params.status, Some(4) | Some(8..)) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let start = day(&params.date_start);
    let end = params.date_end.as_deref().map(day);
    let matching: Vec<Order> = state
        .fixtures
        .orders
        .iter()
        .filter(|o| day(&o.date_created) >= start)
        .filter(|o| end.is_none_or(|end| day(&o.date_created) < end))
        .filter(|o| params.status.is_none_or(|s| o.status == s))
        .filter(|o| params.id.is_none_or(|id| o.id == id))
        .cloned()
        .collect();
    Ok(Json(json!({
        "total": matching.len(),
        "orders": page(&matching, params.skip, params.take),
    })))
}

const SORT_FIELDS: [&str; 6] = ["subject", "brand", "name", "size", "barcode", "articles"];

fn stock_field<'a>(stock: &'a Stock, sort: &str) -> &'a str {
    match sort {
        "subject" => &stock.subject,
        "brand" => &stock.brand,
        "size" => &stock.size,
        "barcode" => &stock.barcode,
        "articles" => &stock.article,
        _ => &stock.name,
    }
}

#[derive(Debug, Deserialize)]
pub struct StocksParams {
    pub search: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_take")]
    pub take: usize,
    pub sort: Option<String>,
    pub order: Option<String>,
}

async fn list_stocks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<StocksParams>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&state, &headers)?;
    let mut matching: Vec<Stock> = state
        .fixtures
        .stocks
        .iter()
        .filter(|s| {
            params.search.as_deref().is_none_or(|q| {
                [&s.subject, &s.brand, &s.name, &s.barcode, &s.article]
                    .iter()
                    .any(|field| contains_ci(field, q))
            })
        })
        .cloned()
        .collect();

    if let Some(sort) = params.sort.as_deref() {
        if !SORT_FIELDS.contains(&sort) {
            return Err(StatusCode::BAD_REQUEST);
        }
        matching.sort_by(|a, b| stock_field(a, sort).cmp(stock_field(b, sort)));
    }
    match params.order.as_deref() {
        None | Some("asc") => {}
        Some("desc") => matching.reverse(),
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    }

    Ok(Json(json!({
        "total": matching.len(),
        "stocks": page(&matching, params.skip, params.take),
    })))
}

async fn list_warehouses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Warehouse>>, StatusCode> {
    authorize(&state, &headers)?;
    Ok(Json(state.fixtures.warehouses.clone()))
}

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    #[serde(default)]
    pub quantity: u8,
}

async fn list_prices(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PriceParams>,
) -> Result<Json<Vec<PriceInfo>>, StatusCode> {
    authorize(&state, &headers)?;
    let keep: fn(&PriceInfo) -> bool = match params.quantity {
        0 => |_| true,
        1 => |p| p.quantity.is_some(),
        2 => |p| p.quantity.is_none(),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    Ok(Json(
        state
            .fixtures
            .prices
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct DirectoryParams {
    pub top: Option<usize>,
    pub pattern: Option<String>,
    pub id: Option<u64>,
    #[serde(rename = "subjectID")]
    pub subject_id: Option<u64>,
    pub subject: Option<String>,
    pub option: Option<String>,
}

fn envelope(data: Vec<DirectoryEntry>) -> Json<Value> {
    Json(json!({ "data": data, "error": false, "errorText": "" }))
}

async fn directory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(params): Query<DirectoryParams>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&state, &headers)?;
    let entries = state
        .fixtures
        .directories
        .get(&name)
        .ok_or(StatusCode::NOT_FOUND)?;
    let parent = params.subject.as_deref().or(params.option.as_deref());
    let data = entries
        .iter()
        .filter(|e| params.id.is_none_or(|id| e.id == id))
        .filter(|e| params.subject_id.is_none_or(|id| e.subject_id == Some(id)))
        .filter(|e| params.pattern.as_deref().is_none_or(|p| contains_ci(&e.name, p)))
        .filter(|e| parent.is_none_or(|p| e.parent.as_deref() == Some(p)))
        .take(params.top.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(envelope(data))
}

#[derive(Debug, Deserialize)]
pub struct ObjectParams {
    pub pattern: Option<String>,
    pub parent: Option<String>,
    pub lang: Option<String>,
    pub id: Option<u64>,
    pub top: Option<usize>,
}

async fn object_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ObjectParams>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&state, &headers)?;
    if !matches!(params.lang.as_deref(), None | Some("ru") | Some("en")) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let data = state
        .fixtures
        .objects
        .iter()
        .filter(|e| params.id.is_none_or(|id| e.id == id))
        .filter(|e| params.pattern.as_deref().is_none_or(|p| contains_ci(&e.name, p)))
        .filter(|e| {
            params
                .parent
                .as_deref()
                .is_none_or(|p| e.parent.as_deref() == Some(p))
        })
        .take(params.top.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(envelope(data))
}
