use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::model::AssetQuote;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// HTTP client for the hub's price endpoint.
pub struct PriceClient {
    http: Client,
    url: String,
}

impl PriceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<AssetQuote>, FetchError> {
        let resp = self
            .http
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        parse_payload(&body)
    }
}

/// Decode a price response. Anything other than a JSON array of quotes is
/// rejected.
pub fn parse_payload(body: &[u8]) -> Result<Vec<AssetQuote>, FetchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::Malformed(format!(
            "expected an array, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| FetchError::Malformed(e.to_string()))
}

fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "no error message".to_string())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
