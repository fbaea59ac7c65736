use crate::api::FetchError;
use crate::model::{AssetQuote, Currency};

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No response has arrived yet.
    Loading,
    /// The most recent poll failed. Polling continues, so a later success
    /// moves back to `Ready`.
    Error(String),
    Ready(Vec<AssetQuote>),
}

/// Client-side state: the view, the display currency and the newest poll
/// sequence number that has been applied.
#[derive(Debug)]
pub struct Dashboard {
    view: ViewState,
    currency: Currency,
    applied_seq: Option<u64>,
    last_update_ms: Option<i64>,
    stale_dropped: u64,
}

impl Dashboard {
    pub fn new(currency: Currency) -> Self {
        Self {
            view: ViewState::Loading,
            currency,
            applied_seq: None,
            last_update_ms: None,
            stale_dropped: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn last_update_ms(&self) -> Option<i64> {
        self.last_update_ms
    }

    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }

    pub fn toggle_currency(&mut self) {
        self.currency = self.currency.toggled();
    }

    /// Apply the outcome of poll number `seq`.
    ///
    /// Responses that arrive after a newer one has been applied are dropped
    /// and `false` is returned.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<AssetQuote>, FetchError>) -> bool {
        if self.applied_seq.is_some_and(|applied| seq <= applied) {
            self.stale_dropped += 1;
            tracing::debug!(seq, applied = ?self.applied_seq, "dropping stale poll response");
            return false;
        }
        self.applied_seq = Some(seq);

        match result {
            Ok(mut assets) => {
                for asset in &mut assets {
                    asset.price_history.sort_by_key(|p| p.time);
                }
                self.last_update_ms = assets
                    .iter()
                    .filter_map(|a| a.price_history.last())
                    .map(|p| p.time)
                    .max()
                    .or(self.last_update_ms);
                self.view = ViewState::Ready(assets);
            }
            Err(e) => {
                tracing::warn!(seq, "price poll failed: {e}");
                self.view = ViewState::Error(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_payload;
    use crate::api::tests::ONE_ASSET;

    fn ok() -> Result<Vec<AssetQuote>, FetchError> {
        parse_payload(ONE_ASSET.as_bytes())
    }

    fn malformed() -> Result<Vec<AssetQuote>, FetchError> {
        parse_payload(br#"{"error":"Failed to fetch crypto data"}"#)
    }

    #[test]
    fn starts_loading() {
        let d = Dashboard::new(Currency::Usd);
        assert_eq!(d.view(), &ViewState::Loading);
        assert_eq!(d.last_update_ms(), None);
    }

    #[test]
    fn first_success_becomes_ready_with_sorted_history() {
        let mut d = Dashboard::new(Currency::Usd);
        assert!(d.apply(1, ok()));
        let ViewState::Ready(assets) = d.view() else {
            panic!("expected ready, got {:?}", d.view());
        };
        let times: Vec<i64> = assets[0].price_history.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![1000, 2000]);
        assert_eq!(d.last_update_ms(), Some(2000));
    }

    #[test]
    fn malformed_payload_goes_to_error_never_ready() {
        let mut d = Dashboard::new(Currency::Usd);
        d.apply(1, malformed());
        assert!(matches!(d.view(), ViewState::Error(_)));

        let mut d = Dashboard::new(Currency::Usd);
        d.apply(1, ok());
        d.apply(2, malformed());
        assert!(matches!(d.view(), ViewState::Error(msg) if msg.contains("expected an array")));
    }

    #[test]
    fn recovers_from_error_on_next_success() {
        let mut d = Dashboard::new(Currency::Usd);
        d.apply(1, malformed());
        d.apply(2, ok());
        assert!(matches!(d.view(), ViewState::Ready(_)));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut d = Dashboard::new(Currency::Usd);
        assert!(d.apply(3, ok()));
        assert!(!d.apply(2, malformed()));
        assert!(!d.apply(3, malformed()));
        assert!(matches!(d.view(), ViewState::Ready(_)));
        assert_eq!(d.stale_dropped(), 2);

        assert!(d.apply(4, malformed()));
        assert!(matches!(d.view(), ViewState::Error(_)));
    }

    #[test]
    fn toggling_currency_keeps_data() {
        let mut d = Dashboard::new(Currency::Usd);
        d.apply(1, ok());
        let before = d.view().clone();
        d.toggle_currency();
        assert_eq!(d.currency(), Currency::Inr);
        assert_eq!(d.view(), &before);
    }
}
