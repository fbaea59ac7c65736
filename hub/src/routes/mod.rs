pub mod prices;
pub mod system;

use axum::Router;
use axum::http::Uri;
use std::sync::Arc;

use crate::error::HubError;
use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(prices::routes())
        .merge(system::routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> HubError {
    HubError::NotFound(uri.path().to_string())
}
