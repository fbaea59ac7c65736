use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::generator::{MockPriceGenerator, Quote};
use super::history::HistoryStore;
use super::PricePoint;
use crate::error::HubError;

/// Per-asset payload returned by `/api/crypto-prices`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub color: &'static str,
    pub current_price: f64,
    pub current_price_inr: f64,
    pub percent_change_24h: f64,
    pub percent_change_24h_inr: f64,
    pub price_history: Vec<PricePoint>,
}

/// Generator plus history store: one `tick` per request.
pub struct PriceFeed<R = StdRng> {
    generator: MockPriceGenerator<R>,
    history: HistoryStore,
}

impl PriceFeed<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(MockPriceGenerator::from_os_rng(), HistoryStore::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(MockPriceGenerator::seeded(seed), HistoryStore::new())
    }
}

impl<R: Rng> PriceFeed<R> {
    pub fn new(generator: MockPriceGenerator<R>, history: HistoryStore) -> Self {
        Self { generator, history }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Draw fresh quotes, fold them into the history and return every asset.
    ///
    /// All quotes are validated before the history is touched, so a failed
    /// tick leaves the store unchanged.
    pub fn tick(&mut self, now_ms: i64) -> Result<Vec<AssetSnapshot>, HubError> {
        let quotes = self.generator.sample();
        for q in &quotes {
            validate(q)?;
        }

        let out = quotes
            .into_iter()
            .map(|q| {
                let id = q.asset.id;
                self.history.ensure(id, q.price, q.price_inr, now_ms);
                self.history.append(
                    id,
                    PricePoint {
                        time: now_ms,
                        price: q.price,
                        price_inr: q.price_inr,
                    },
                );
                AssetSnapshot {
                    id,
                    name: q.asset.name,
                    symbol: q.asset.symbol,
                    color: q.asset.color,
                    current_price: q.price,
                    current_price_inr: q.price_inr,
                    percent_change_24h: q.change_pct,
                    percent_change_24h_inr: q.change_pct_inr,
                    price_history: self.history.snapshot(id),
                }
            })
            .collect();
        Ok(out)
    }
}

fn validate(q: &Quote) -> Result<(), HubError> {
    let fields = [q.price, q.price_inr, q.change_pct, q.change_pct_inr];
    if fields.iter().all(|v| v.is_finite()) && q.price > 0.0 {
        Ok(())
    } else {
        Err(HubError::Generation(format!(
            "invalid quote for {}: price={} change={}",
            q.asset.symbol, q.price, q.change_pct
        )))
    }
}
