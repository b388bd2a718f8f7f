//! Atelier API Server — serves the projected read model.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};

use atelier_core::{Settings, telemetry};
use atelier_storage::models::{
    Auction, AuctionEvent, Collection, Designer, DayStats, GLOBAL_STATS_ID, GlobalStats,
};
use atelier_storage::{EntityStoreExt, PgStore};

/// Shared application state.
struct AppState {
    store: PgStore,
}

#[tokio::main]
async fn main() {
    telemetry::init();
    let settings = Settings::from_env().expect("Failed to load settings");

    tracing::info!("Starting Atelier API Server");

    let store = PgStore::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("../../migrations")
        .run(store.pool())
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database ready");

    let state = Arc::new(AppState { store });

    let app = Router::new()
        .route("/api/v1/designers", get(list_designers))
        .route("/api/v1/designers/:id", get(get_designer))
        .route("/api/v1/collections", get(list_collections))
        .route("/api/v1/auctions/:id", get(get_auction))
        .route("/api/v1/auctions/:id/history", get(get_auction_history))
        .route("/api/v1/stats/global", get(get_global_stats))
        .route("/api/v1/stats/day/:day", get(get_day_stats))
        .route("/health", get(health))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api_port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

// ─── Response Types ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    data: T,
}

fn json_ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

fn json_err(status: StatusCode, msg: &str) -> (StatusCode, Json<ApiResponse<String>>) {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: msg.to_string(),
        }),
    )
}

fn internal_err(msg: &str) -> (StatusCode, Json<ApiResponse<String>>) {
    json_err(StatusCode::INTERNAL_SERVER_ERROR, msg)
}

fn not_found(msg: &str) -> (StatusCode, Json<ApiResponse<String>>) {
    json_err(StatusCode::NOT_FOUND, msg)
}

// ─── Handlers ───────────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok"
}

/// GET /api/v1/designers — all registered designers.
async fn list_designers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let designers = state
        .store
        .all::<Designer>()
        .await
        .map_err(|e| internal_err(&e.to_string()))?;
    Ok(json_ok(designers))
}

/// GET /api/v1/designers/:id — single designer profile.
async fn get_designer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let designer = state
        .store
        .load::<Designer>(&id)
        .await
        .map_err(|e| internal_err(&e.to_string()))?;
    match designer {
        Some(d) => Ok(json_ok(d)),
        None => Err(not_found("Designer not found")),
    }
}

/// GET /api/v1/collections — all garment collections.
async fn list_collections(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let collections = state
        .store
        .all::<Collection>()
        .await
        .map_err(|e| internal_err(&e.to_string()))?;
    Ok(json_ok(collections))
}

/// GET /api/v1/auctions/:id — auction state for a garment token id.
async fn get_auction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let auction = state
        .store
        .load::<Auction>(&id)
        .await
        .map_err(|e| internal_err(&e.to_string()))?;
    match auction {
        Some(a) => Ok(json_ok(a)),
        None => Err(not_found("Auction not found")),
    }
}

/// GET /api/v1/auctions/:id/history — append-only auction event log.
async fn get_auction_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let mut history: Vec<AuctionEvent> = state
        .store
        .all::<AuctionEvent>()
        .await
        .map_err(|e| internal_err(&e.to_string()))?
        .into_iter()
        .filter(|entry| entry.auction == id)
        .collect();
    history.sort_by_key(|entry| entry.timestamp);
    Ok(json_ok(history))
}

/// GET /api/v1/stats/global — the global aggregate singleton.
async fn get_global_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let stats = state
        .store
        .load::<GlobalStats>(GLOBAL_STATS_ID)
        .await
        .map_err(|e| internal_err(&e.to_string()))?
        .unwrap_or_default();
    Ok(json_ok(stats))
}

/// GET /api/v1/stats/day/:day — aggregates for one `YYYY-MM-DD` day.
async fn get_day_stats(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<String>>)> {
    let stats = state
        .store
        .load::<DayStats>(&day)
        .await
        .map_err(|e| internal_err(&e.to_string()))?;
    match stats {
        Some(s) => Ok(json_ok(s)),
        None => Err(not_found("No activity recorded for that day")),
    }
}
