use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::HubError;
use crate::market::assets::ASSETS;
use crate::market::now_ms;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(api_health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/health — liveness plus how full each history buffer is.
async fn api_health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, HubError> {
    let (max_points, history) = {
        let feed = state.lock_feed()?;
        let store = feed.history();
        let history: serde_json::Map<String, Value> = ASSETS
            .iter()
            .map(|a| (a.symbol.to_string(), json!(store.len(a.id))))
            .collect();
        (store.capacity(), history)
    };
    let symbols: Vec<&str> = ASSETS.iter().map(|a| a.symbol).collect();
    Ok(Json(json!({
        "ok": true,
        "now_ts_ms": now_ms(),
        "uptime_s": state.started_at.elapsed().as_secs(),
        "assets": symbols,
        "max_points": max_points,
        "history_points": history,
    })))
}
