use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::HubConfig;
use crate::error::HubError;
use crate::market::feed::PriceFeed;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: HubConfig,
    pub started_at: Instant,

    /// Generator and rolling history. Locked only for the synchronous
    /// duration of one tick.
    pub feed: Mutex<PriceFeed>,
}

impl AppState {
    pub fn new(config: HubConfig) -> Arc<Self> {
        let feed = match config.mock_seed {
            Some(seed) => PriceFeed::seeded(seed),
            None => PriceFeed::from_os_rng(),
        };
        Self::with_feed(config, feed)
    }

    pub fn with_feed(config: HubConfig, feed: PriceFeed) -> Arc<Self> {
        Arc::new(Self {
            config,
            started_at: Instant::now(),
            feed: Mutex::new(feed),
        })
    }

    /// Lock the price feed. A poisoned lock is reported as a generation failure.
    pub fn lock_feed(&self) -> Result<MutexGuard<'_, PriceFeed>, HubError> {
        self.feed
            .lock()
            .map_err(|_| HubError::Generation("price feed lock poisoned".to_string()))
    }
}
