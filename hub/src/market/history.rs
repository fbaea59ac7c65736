use std::collections::{HashMap, VecDeque};

use super::{MAX_POINTS, PricePoint, SAMPLE_SPACING_MS};

/// Rolling per-asset price history.
///
/// Each buffer holds at most `capacity` samples; `append` is the only place
/// samples are added and it trims the oldest entries.
#[derive(Debug)]
pub struct HistoryStore {
    buffers: HashMap<String, VecDeque<PricePoint>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_POINTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pre-fill the buffer for `asset_id` the first time it is seen.
    ///
    /// Writes `capacity` copies of the given price, one second apart, the
    /// newest at `now_ms - 1000` so the next real sample at `now_ms` keeps the
    /// spacing. Returns `true` if the buffer was created.
    pub fn ensure(&mut self, asset_id: &str, price: f64, price_inr: f64, now_ms: i64) -> bool {
        if self.buffers.contains_key(asset_id) {
            return false;
        }
        let capacity = self.capacity;
        let buf: VecDeque<PricePoint> = (1..=capacity as i64)
            .rev()
            .map(|i| PricePoint {
                time: now_ms - i * SAMPLE_SPACING_MS,
                price,
                price_inr,
            })
            .collect();
        self.buffers.insert(asset_id.to_string(), buf);
        true
    }

    /// Push a sample and drop the oldest entries beyond capacity.
    pub fn append(&mut self, asset_id: &str, point: PricePoint) {
        let capacity = self.capacity;
        let buf = self
            .buffers
            .entry(asset_id.to_string())
            .or_insert_with(|| VecDeque::with_capacity(capacity + 1));
        buf.push_back(point);
        while buf.len() > capacity {
            buf.pop_front();
        }
    }

    /// Owned copy of the buffer, oldest first. Empty for unknown ids.
    pub fn snapshot(&self, asset_id: &str) -> Vec<PricePoint> {
        self.buffers
            .get(asset_id)
            .map(|buf| buf.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, asset_id: &str) -> usize {
        self.buffers.get(asset_id).map_or(0, VecDeque::len)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn point(time: i64, price: f64) -> PricePoint {
        PricePoint {
            time,
            price,
            price_inr: price * 83.0,
        }
    }

    #[test]
    fn ensure_prefills_flat_window_one_second_apart() {
        let mut store = HistoryStore::new();
        assert!(store.ensure("1", 65_000.0, 5_395_000.0, NOW));

        let snap = store.snapshot("1");
        assert_eq!(snap.len(), MAX_POINTS);
        assert!(snap.iter().all(|p| p.price == 65_000.0 && p.price_inr == 5_395_000.0));
        for pair in snap.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, 1_000);
        }
        assert_eq!(snap.last().map(|p| p.time), Some(NOW - 1_000));
        assert_eq!(snap.first().map(|p| p.time), Some(NOW - 100_000));
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut store = HistoryStore::new();
        store.ensure("74", 0.15, 12.45, NOW);
        store.append("74", point(NOW, 0.151));
        assert!(!store.ensure("74", 0.2, 16.6, NOW + 1_000));

        let snap = store.snapshot("74");
        assert_eq!(snap.len(), MAX_POINTS);
        assert_eq!(snap.last().map(|p| p.price), Some(0.151));
        assert!(snap.iter().all(|p| p.price != 0.2));
    }

    #[test]
    fn append_keeps_most_recent_samples_in_arrival_order() {
        let mut store = HistoryStore::new();
        store.ensure("1", 1.0, 83.0, NOW);
        for i in 0..250 {
            store.append("1", point(NOW + i * 1_000, 2.0 + i as f64));
            assert!(store.len("1") <= MAX_POINTS);
        }

        let snap = store.snapshot("1");
        assert_eq!(snap.len(), MAX_POINTS);
        let prices: Vec<f64> = snap.iter().map(|p| p.price).collect();
        let expected: Vec<f64> = (150..250).map(|i| 2.0 + i as f64).collect();
        assert_eq!(prices, expected);
    }

    #[test]
    fn append_without_ensure_grows_from_empty() {
        let mut store = HistoryStore::with_capacity(3);
        for i in 0..5 {
            store.append("x", point(NOW + i, i as f64));
        }
        let prices: Vec<f64> = store.snapshot("x").iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut store = HistoryStore::with_capacity(4);
        store.ensure("21174", 0.007, 0.581, NOW);
        let before = store.snapshot("21174");
        store.append("21174", point(NOW, 0.0071));
        assert_eq!(before.len(), 4);
        assert!(before.iter().all(|p| p.price == 0.007));
    }

    #[test]
    fn unknown_asset_snapshot_is_empty() {
        let store = HistoryStore::new();
        assert!(store.snapshot("nope").is_empty());
        assert_eq!(store.len("nope"), 0);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut store = HistoryStore::with_capacity(0);
        store.append("1", point(NOW, 1.0));
        store.append("1", point(NOW + 1, 2.0));
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.snapshot("1"), vec![point(NOW + 1, 2.0)]);
    }
}
