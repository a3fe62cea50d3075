//! In-process fixture server for integration tests.
//!
//! Replays the recorded catalog in `tests/fixtures/catalog.json` over real
//! HTTP. Requests without the test credentials get `403`, unknown slugs get
//! `404`, paginated endpoints echo the requested page and size, and every
//! request path is recorded so tests can assert that nothing was sent.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use strain_client::Config;

pub const APP_ID: &str = "test-app-id";
pub const APP_KEY: &str = "test-app-key";
pub const STRAIN_SLUG: &str = "la-confidential";
pub const UNKNOWN_SLUG: &str = "5d0e71bda1005d0770a4e31e1a27580d";

#[derive(Debug, Deserialize)]
struct Catalog {
    strains: Vec<Value>,
    reviews: Vec<Value>,
    photos: Vec<Value>,
    availabilities: Vec<Value>,
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    hits: Arc<Mutex<Vec<String>>>,
}

/// A running fixture server.
pub struct FixtureServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Config carrying the credentials the server accepts.
    pub fn config(&self) -> Config {
        Config::new(APP_ID, APP_KEY).with_base_url(&self.base_url)
    }

    /// Request paths received so far, with query strings.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hits lock").clone()
    }
}

/// Starts the fixture server on a random local port in a background thread.
pub fn start() -> FixtureServer {
    let catalog: Catalog =
        serde_json::from_str(include_str!("../fixtures/catalog.json")).expect("valid fixture");
    let hits = Arc::new(Mutex::new(Vec::new()));
    let state = AppState {
        catalog: Arc::new(catalog),
        hits: Arc::clone(&hits),
    };

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
    let addr = std_listener.local_addr().expect("local addr");
    std_listener.set_nonblocking(true).expect("nonblocking");

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("fixture runtime");
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).expect("listener");
            axum::serve(listener, app(state)).await
        })
        .expect("fixture server");
    });

    FixtureServer {
        base_url: format!("http://{addr}"),
        hits,
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/strains", post(search))
        .route("/strains/{slug}", get(details))
        .route("/strains/{slug}/reviews", get(reviews))
        .route("/strains/{slug}/reviews/{id}", get(review_details))
        .route("/strains/{slug}/photos", get(photos))
        .route("/strains/{slug}/availability", get(availabilities))
        .with_state(state)
}

type Reply = Result<Json<Value>, StatusCode>;

impl AppState {
    fn admit(&self, uri: &Uri, headers: &HeaderMap) -> Result<(), StatusCode> {
        self.hits.lock().expect("hits lock").push(uri.to_string());
        let credential = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
        if credential("app_id") == Some(APP_ID) && credential("app_key") == Some(APP_KEY) {
            Ok(())
        } else {
            Err(StatusCode::FORBIDDEN)
        }
    }

    fn strain(&self, slug: &str) -> Result<&Value, StatusCode> {
        self.catalog
            .strains
            .iter()
            .find(|strain| strain["slug"] == slug)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

#[derive(Deserialize)]
struct SearchBody {
    search: String,
    page: usize,
    take: usize,
    #[serde(default)]
    filters: Filters,
}

#[derive(Default, Deserialize)]
struct Filters {
    #[serde(default)]
    flavors: Vec<String>,
    #[serde(default)]
    conditions: Vec<String>,
}

#[derive(Deserialize)]
struct Paging {
    page: usize,
    take: usize,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lon: f64,
}

fn names(strain: &Value, key: &str) -> Vec<String> {
    strain[key]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|record| record["Name"].as_str())
        .map(str::to_lowercase)
        .collect()
}

fn contains_all(have: &[String], wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|name| have.contains(&name.to_lowercase()))
}

fn slice(items: Vec<Value>, page: usize, take: usize) -> Vec<Value> {
    items.into_iter().skip(page * take).take(take).collect()
}

async fn search(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<SearchBody>,
) -> Reply {
    state.admit(&uri, &headers)?;
    let term = body.search.to_lowercase();
    let matches: Vec<Value> = state
        .catalog
        .strains
        .iter()
        .filter(|strain| {
            strain["Name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term))
        })
        .filter(|strain| contains_all(&names(strain, "Flavors"), &body.filters.flavors))
        .filter(|strain| contains_all(&names(strain, "Conditions"), &body.filters.conditions))
        .cloned()
        .collect();
    let total = matches.len();
    Ok(Json(json!({
        "Strains": slice(matches, body.page, body.take),
        "Paging": { "PageIndex": body.page, "PageSize": body.take, "TotalItems": total }
    })))
}

async fn details(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Reply {
    state.admit(&uri, &headers)?;
    state.strain(&slug).cloned().map(Json)
}

async fn reviews(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(paging): Query<Paging>,
) -> Reply {
    state.admit(&uri, &headers)?;
    state.strain(&slug)?;
    let reviews = owned_by(&state.catalog.reviews, &slug);
    Ok(Json(json!({
        "reviews": slice(reviews, paging.page, paging.take),
        "pagingContext": paging_context(&paging),
    })))
}

async fn review_details(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Path((slug, id)): Path<(String, u64)>,
) -> Reply {
    state.admit(&uri, &headers)?;
    state.strain(&slug)?;
    owned_by(&state.catalog.reviews, &slug)
        .into_iter()
        .find(|review| review["id"] == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn photos(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(paging): Query<Paging>,
) -> Reply {
    state.admit(&uri, &headers)?;
    state.strain(&slug)?;
    let photos = owned_by(&state.catalog.photos, &slug);
    Ok(Json(json!({
        "photos": slice(photos, paging.page, paging.take),
        "pagingContext": paging_context(&paging),
    })))
}

async fn availabilities(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(location): Query<Location>,
) -> Reply {
    state.admit(&uri, &headers)?;
    state.strain(&slug)?;
    let nearby: Vec<Value> = owned_by(&state.catalog.availabilities, &slug)
        .into_iter()
        .map(|mut entry| {
            entry["lat"] = json!(location.lat);
            entry["lon"] = json!(location.lon);
            entry
        })
        .collect();
    Ok(Json(Value::Array(nearby)))
}

fn owned_by(items: &[Value], slug: &str) -> Vec<Value> {
    items
        .iter()
        .filter(|item| item["strainSlug"] == slug)
        .cloned()
        .collect()
}

fn paging_context(paging: &Paging) -> Value {
    json!({ "PageIndex": paging.page, "PageSize": paging.take })
}
