use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::api::{FetchError, PriceClient};
use crate::model::AssetQuote;

/// Outcome of one poll, tagged with the order it was issued in.
#[derive(Debug)]
pub struct PollEvent {
    pub seq: u64,
    pub result: Result<Vec<AssetQuote>, FetchError>,
}

/// Background polling loop. Fetches immediately, then once per interval.
///
/// Requests may overlap on a slow network; each carries a sequence number
/// so the receiver can discard responses that arrive out of order. Dropping
/// the poller aborts the timer and every in-flight request.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(client: Arc<PriceClient>, every: Duration, tx: mpsc::Sender<PollEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut in_flight = JoinSet::new();
            let mut seq: u64 = 0;

            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = interval.tick() => {
                        seq += 1;
                        let client = Arc::clone(&client);
                        let tx = tx.clone();
                        let this_seq = seq;
                        in_flight.spawn(async move {
                            let result = client.fetch().await;
                            let _ = tx.send(PollEvent { seq: this_seq, result }).await;
                        });
                    }
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }
            tracing::debug!(issued = seq, "poller stopped");
        });
        Self { handle }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{ONE_ASSET, canned_server};
    use tokio::time::timeout;

    #[tokio::test]
    async fn polls_immediately_then_on_interval() {
        let url = canned_server("200 OK", ONE_ASSET).await;
        let client = Arc::new(PriceClient::new(url, Duration::from_secs(2)).unwrap());
        let (tx, mut rx) = mpsc::channel(16);
        let _poller = Poller::spawn(client, Duration::from_millis(50), tx);

        let mut seqs = Vec::new();
        for _ in 0..3 {
            let ev = timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("poll event in time")
                .expect("channel open");
            assert!(ev.result.is_ok());
            seqs.push(ev.seq);
        }
        seqs.sort_unstable();
        seqs.dedup();
        assert_eq!(seqs.len(), 3);
        assert!(seqs.iter().all(|&s| s >= 1));
    }

    #[tokio::test]
    async fn dropping_poller_closes_the_channel() {
        let url = canned_server("200 OK", ONE_ASSET).await;
        let client = Arc::new(PriceClient::new(url, Duration::from_secs(2)).unwrap());
        let (tx, mut rx) = mpsc::channel(16);
        let poller = Poller::spawn(client, Duration::from_millis(20), tx);

        let _ = timeout(Duration::from_secs(5), rx.recv()).await;
        drop(poller);

        let drained = timeout(Duration::from_secs(5), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "senders should be dropped after abort");
    }

    #[tokio::test]
    async fn failures_are_delivered_as_events() {
        let url = canned_server("503 Service Unavailable", r#"{"error":"down"}"#).await;
        let client = Arc::new(PriceClient::new(url, Duration::from_secs(2)).unwrap());
        let (tx, mut rx) = mpsc::channel(16);
        let _poller = Poller::spawn(client, Duration::from_secs(60), tx);

        let ev = timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
        assert_eq!(ev.seq, 1);
        assert!(matches!(ev.result, Err(FetchError::Status { status: 503, .. })));
    }
}
