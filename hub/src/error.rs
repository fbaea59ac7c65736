use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message returned to clients whenever price generation fails.
pub const GENERATION_FAILED: &str = "Failed to fetch crypto data";

/// Unified error type for hub API responses.
#[derive(Debug)]
pub enum HubError {
    /// Mock data generation or the price store failed. The detail is logged,
    /// never sent to the client.
    Generation(String),
    NotFound(String),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation(msg) => write!(f, "generation_error: {msg}"),
            Self::NotFound(msg) => write!(f, "not_found: {msg}"),
        }
    }
}

impl std::error::Error for HubError {}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Generation(msg) => {
                tracing::error!("Error generating mock data: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED.to_string())
            }
            Self::NotFound(path) => (StatusCode::NOT_FOUND, format!("no route for {path}")),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn generation_error_hides_detail() {
        let resp = HubError::Generation("rng exploded".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, json!({ "error": GENERATION_FAILED }));
    }

    #[test]
    fn display_is_prefixed_by_kind() {
        assert_eq!(
            HubError::NotFound("/x".to_string()).to_string(),
            "not_found: /x"
        );
    }
}
