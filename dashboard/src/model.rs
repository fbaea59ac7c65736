use clap::ValueEnum;
use serde::Deserialize;

/// One entry of the `/api/crypto-prices` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub color: Option<String>,
    pub current_price: f64,
    pub current_price_inr: f64,
    pub percent_change_24h: f64,
    pub percent_change_24h_inr: f64,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub time: i64,
    pub price: f64,
    pub price_inr: f64,
}

/// Display currency. Switching it never triggers a refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    pub fn toggled(self) -> Self {
        match self {
            Self::Usd => Self::Inr,
            Self::Inr => Self::Usd,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Inr => "₹",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
        }
    }
}

impl AssetQuote {
    pub fn price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.current_price,
            Currency::Inr => self.current_price_inr,
        }
    }

    pub fn change(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.percent_change_24h,
            Currency::Inr => self.percent_change_24h_inr,
        }
    }
}

impl PricePoint {
    pub fn value(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.price,
            Currency::Inr => self.price_inr,
        }
    }
}
