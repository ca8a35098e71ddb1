use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use parking_lot::Mutex;
use search_core::{DocId, Document, DocumentStatus, RequestHistory, SearchError, SearchServer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Document>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub doc_id: DocId,
    pub status: DocumentStatus,
    pub words: Vec<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_words: usize,
    pub request_window: u64,
    pub recorded_requests: usize,
    pub no_result_requests: usize,
}

/// The search server is frozen once built; only the request history mutates.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchServer>,
    pub history: Arc<Mutex<RequestHistory>>,
}

impl AppState {
    pub fn new(engine: SearchServer) -> Self {
        let history = RequestHistory::new(engine.config().request_window);
        Self { engine: Arc::new(engine), history: Arc::new(Mutex::new(history)) }
    }
}

pub fn build_app(engine: SearchServer) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match/:doc_id", get(match_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState::new(engine))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Load a corpus file and build the router around it.
pub fn build_app_from_corpus(corpus: &std::path::Path, stop_words: Option<&str>, config: search_core::SearchConfig) -> Result<Router> {
    let engine = search_core::corpus::load_corpus_file(corpus, stop_words, config)?;
    Ok(build_app(engine))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let results = state.engine.find_top_documents_with_status(&params.q, params.status);
    state.history.lock().record(results.len());
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results })
}

pub async fn match_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
    Query(params): Query<MatchParams>,
) -> Result<Json<MatchResponse>, (StatusCode, String)> {
    match state.engine.match_document(&params.q, doc_id) {
        Ok((words, status)) => Ok(Json(MatchResponse { doc_id, status, words })),
        Err(err @ SearchError::UnknownDocument(_)) => Err((StatusCode::NOT_FOUND, err.to_string())),
        Err(err) => Err((StatusCode::BAD_REQUEST, err.to_string())),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let history = state.history.lock();
    Json(StatsResponse {
        num_docs: state.engine.document_count(),
        num_words: state.engine.index().word_count(),
        request_window: history.window(),
        recorded_requests: history.len(),
        no_result_requests: history.no_result_requests(),
    })
}
