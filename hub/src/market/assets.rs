/// Identity of a simulated asset plus the parameters its prices are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// CSS hex color used by front-ends for the card accent and chart line.
    pub color: &'static str,

    // ── Generator parameters ───────────────────────────────────────
    pub base_price: f64,
    pub price_band: f64,
    pub base_change_pct: f64,
    pub change_band: f64,
}

pub const BITCOIN: Asset = Asset {
    id: "1",
    name: "Bitcoin",
    symbol: "BTC",
    color: "#F7931A",
    base_price: 65_000.0,
    price_band: 500.0,
    base_change_pct: 2.5,
    change_band: 0.1,
};

pub const DOGECOIN: Asset = Asset {
    id: "74",
    name: "Dogecoin",
    symbol: "DOGE",
    color: "#C2A633",
    base_price: 0.15,
    price_band: 0.005,
    base_change_pct: -1.2,
    change_band: 0.1,
};

pub const PI_NETWORK: Asset = Asset {
    id: "21174",
    name: "Pi Network",
    symbol: "PI",
    color: "#8B5CF6",
    base_price: 0.007,
    price_band: 0.0005,
    base_change_pct: 0.8,
    change_band: 0.1,
};

/// Every asset the hub serves, in response order.
pub const ASSETS: &[Asset] = &[BITCOIN, DOGECOIN, PI_NETWORK];
