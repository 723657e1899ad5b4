//! HTTP server mode for REST access to the directory
//!
//! The server is the one surface where multiple callers share a session,
//! so the whole [`SessionContext`] sits behind a tokio mutex; that also
//! serializes cache fills, so concurrent first requests do not hit the
//! remote source twice.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{ApiConfig, FetchPolicy};
use crate::error::Result;
use crate::fetch::{CareerNetSource, PagedFetcher};
use crate::http::HttpClient;
use crate::session::SessionContext;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Endpoint configuration
    pub api: ApiConfig,
    /// Retrieval policy
    pub policy: FetchPolicy,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    fetcher: Arc<PagedFetcher<CareerNetSource>>,
    session: Arc<tokio::sync::Mutex<SessionContext>>,
    cache_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    /// Keyword to match against majors
    q: String,
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let cache_key = config.api.region.clone();
    let ttl = config.policy.cache_ttl();
    let fetcher = PagedFetcher::careernet(config.api, config.policy, HttpClient::new())?;

    let state = AppState {
        fetcher: Arc::new(fetcher),
        session: Arc::new(tokio::sync::Mutex::new(SessionContext::new(ttl))),
        cache_key,
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/records", get(records))
        .route("/search", get(search))
        .route("/history", get(history))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn records(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session
        .load_schools(state.cache_key.clone(), &state.fetcher)
        .await
    {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "count": records.len(), "records": &*records })),
        ),
        Err(e) => retrieval_failed(&e),
    }
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session
        .load_schools(state.cache_key.clone(), &state.fetcher)
        .await
    {
        Ok(records) => {
            let hits = session.search(&records, &params.q);
            (
                StatusCode::OK,
                Json(json!({
                    "query": params.q,
                    "count": hits.len(),
                    "records": hits,
                })),
            )
        }
        Err(e) => retrieval_failed(&e),
    }
}

async fn history(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(json!({ "history": session.history() }))
}

/// All retrieval errors surface as one user-facing failure with the
/// cause as supplementary diagnostic text.
fn retrieval_failed(e: &crate::error::Error) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": "retrieval failed", "cause": e.to_string() })),
    )
}
