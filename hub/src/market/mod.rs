//! Simulated market: the static asset table, the mock price generator and
//! the rolling per-asset history that backs `/api/crypto-prices`.

pub mod assets;
pub mod feed;
pub mod generator;
pub mod history;

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of samples kept per asset.
pub const MAX_POINTS: usize = 100;

/// Fixed USD → INR conversion rate.
pub const USD_INR_RATE: f64 = 83.0;

/// Spacing of the synthetic back-dated samples written on first observation.
pub const SAMPLE_SPACING_MS: i64 = 1_000;

/// One timestamped price observation in both denominations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub time: i64,
    pub price: f64,
    pub price_inr: f64,
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
