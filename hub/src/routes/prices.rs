use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::error::HubError;
use crate::market::now_ms;
use crate::state::AppState;

/// Every response reflects freshly generated state, so nothing may cache it.
const NO_CACHE_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/crypto-prices", get(api_crypto_prices))
}

/// GET /api/crypto-prices — one fresh sample per asset plus its rolling history.
async fn api_crypto_prices(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HubError> {
    let ts = now_ms();
    let snapshots = state.lock_feed()?.tick(ts)?;
    tracing::debug!(assets = snapshots.len(), ts, "served crypto prices");
    Ok((NO_CACHE_HEADERS, Json(snapshots)))
}
