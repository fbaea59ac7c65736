use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::USD_INR_RATE;
use super::assets::{ASSETS, Asset};

/// A freshly drawn price for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub asset: &'static Asset,
    pub price: f64,
    pub price_inr: f64,
    pub change_pct: f64,
    pub change_pct_inr: f64,
}

/// Draws random prices inside each asset's fixed band.
///
/// Generic over the RNG so tests can pin the sequence with a seed.
pub struct MockPriceGenerator<R = StdRng> {
    rng: R,
    assets: &'static [Asset],
}

impl MockPriceGenerator<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MockPriceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, assets: ASSETS }
    }

    /// One quote per asset, in table order.
    pub fn sample(&mut self) -> Vec<Quote> {
        let assets = self.assets;
        assets.iter().map(|asset| self.quote(asset)).collect()
    }

    fn quote(&mut self, asset: &'static Asset) -> Quote {
        let price = self.jitter(asset.base_price, asset.price_band);
        // The two change figures are reported independently.
        let change_pct = self.jitter(asset.base_change_pct, asset.change_band);
        let change_pct_inr = self.jitter(asset.base_change_pct, asset.change_band);
        Quote {
            asset,
            price,
            price_inr: price * USD_INR_RATE,
            change_pct,
            change_pct_inr,
        }
    }

    fn jitter(&mut self, center: f64, band: f64) -> f64 {
        if band <= 0.0 {
            return center;
        }
        self.rng.random_range(center - band..center + band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_covers_every_asset_in_order() {
        let mut generator = MockPriceGenerator::seeded(1);
        let symbols: Vec<_> = generator.sample().iter().map(|q| q.asset.symbol).collect();
        assert_eq!(symbols, vec!["BTC", "DOGE", "PI"]);
    }

    #[test]
    fn prices_and_changes_stay_inside_their_bands() {
        let mut generator = MockPriceGenerator::seeded(42);
        for _ in 0..500 {
            for q in generator.sample() {
                let a = q.asset;
                assert!((q.price - a.base_price).abs() <= a.price_band, "{} price {}", a.symbol, q.price);
                assert!((q.change_pct - a.base_change_pct).abs() <= a.change_band);
                assert!((q.change_pct_inr - a.base_change_pct).abs() <= a.change_band);
                assert!(q.price > 0.0);
            }
        }
    }

    #[test]
    fn inr_price_uses_fixed_rate() {
        let mut generator = MockPriceGenerator::seeded(7);
        for q in generator.sample() {
            assert!((q.price_inr - q.price * 83.0).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = MockPriceGenerator::seeded(99);
        let mut b = MockPriceGenerator::seeded(99);
        assert_eq!(a.sample(), b.sample());
        assert_eq!(a.sample(), b.sample());
    }

    #[test]
    fn consecutive_samples_differ() {
        let mut generator = MockPriceGenerator::seeded(3);
        let first = generator.sample();
        let second = generator.sample();
        assert_ne!(first[0].price, second[0].price);
    }
}
