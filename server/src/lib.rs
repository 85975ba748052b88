use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use search_core::Index;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

pub mod title;

use title::{article_url, decode_path, title};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Corpus directory as it appears in document identifiers, with a
    /// trailing slash.
    pub corpus_prefix: String,
    pub home_page: PathBuf,
    pub redirect_base: String,
}

impl ServerConfig {
    pub fn new(corpus_dir: &Path, home_page: impl Into<PathBuf>, redirect_base: impl Into<String>) -> Self {
        let mut corpus_prefix = corpus_dir.to_string_lossy().into_owned();
        if !corpus_prefix.ends_with('/') {
            corpus_prefix.push('/');
        }
        Self { corpus_prefix, home_page: home_page.into(), redirect_base: redirect_base.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub items: Vec<QueryItem>,
}

#[derive(Debug, Serialize)]
pub struct QueryItem {
    pub url: String,
    pub title: String,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
    pub config: Arc<ServerConfig>,
}

pub fn build_app(index: Arc<Index>, config: ServerConfig) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let home = ServeFile::new(&config.home_page);
    let state = AppState { index, config: Arc::new(config) };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/query", get(query_handler))
        .route_service("/", home.clone())
        .route_service("/index.html", home)
        .fallback(corpus_redirect)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// `s` is the query text; when it is repeated only the first value counts.
pub async fn query_handler(State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Json<QueryResponse> {
    let start = std::time::Instant::now();
    let query = params
        .into_iter()
        .find(|(key, _)| key == "s")
        .map(|(_, value)| value)
        .unwrap_or_default();
    let items: Vec<QueryItem> = if query.is_empty() {
        Vec::new()
    } else {
        state
            .index
            .search(&query)
            .into_iter()
            .map(|path| QueryItem { title: title(&decode_path(&path)), url: path })
            .collect()
    };
    tracing::debug!(%query, hits = items.len(), took_s = start.elapsed().as_secs_f64(), "query served");
    Json(QueryResponse { items })
}

/// Links in query results point at corpus files; send those to the external
/// article instead of serving the local copy.
pub async fn corpus_redirect(State(state): State<AppState>, uri: Uri) -> Response {
    let path = decode_path(uri.path());
    if !path.starts_with(&state.config.corpus_prefix) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let location = article_url(&state.config.redirect_base, &title(&path));
    tracing::debug!(%path, %location, "redirecting corpus link");
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}
