//! Time-windowed cache over the feed fetch.
//!
//! The station page is polled by every chat that asks for a board, so the
//! fetch sits behind a short window: within it, every caller gets the
//! memoized result, success or failure alike. Memoizing failures is the
//! point, it keeps a broken feed from being hammered with retries.
//!
//! The state lives behind a `tokio::sync::Mutex` that is held across the
//! refresh itself: under a preemptive runtime this is the single-flight
//! guard that ensures at most one fetch per expiring window, with late
//! arrivals waiting for (and then sharing) the in-flight result.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::Station;

use super::client::FetchPage;
use super::error::FeedError;
use super::parser::parse_stations;

/// Configuration for the feed cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetch result (success or failure) stays fresh.
    pub window: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15),
        }
    }
}

/// One parsed refresh of the feed.
///
/// Parsing happens once per fetch and is memoized together with it.
#[derive(Debug)]
pub struct Snapshot {
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Stations as reported by that fetch.
    pub stations: Vec<Station>,
}

struct CachedFetch {
    at: Instant,
    result: Result<Arc<Snapshot>, FeedError>,
}

/// Time-windowed, single-flight cache around a page fetcher.
pub struct FeedCache<F> {
    fetcher: F,
    window: Duration,
    state: Mutex<Option<CachedFetch>>,
}

impl<F: FetchPage> FeedCache<F> {
    pub fn new(fetcher: F, config: &CacheConfig) -> Self {
        Self {
            fetcher,
            window: config.window,
            state: Mutex::new(None),
        }
    }

    /// The latest snapshot, fetching if the memoized one expired.
    ///
    /// A failed fetch is memoized exactly like a success: callers inside
    /// the window get the same [`FeedError`] back without a retry, and
    /// must surface it as "feed temporarily unavailable".
    pub async fn get_snapshot(&self) -> Result<Arc<Snapshot>, FeedError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if cached.at.elapsed() < self.window {
                return cached.result.clone();
            }
        }

        let result = match self.fetcher.fetch().await {
            Ok(page) => {
                let snapshot = Snapshot {
                    fetched_at: Utc::now(),
                    stations: parse_stations(&page),
                };
                tracing::debug!(stations = snapshot.stations.len(), "feed refreshed");
                Ok(Arc::new(snapshot))
            }
            Err(err) => {
                tracing::warn!(error = %err, "feed refresh failed, memoizing for the window");
                Err(err)
            }
        };

        *state = Some(CachedFetch {
            at: Instant::now(),
            result: result.clone(),
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetcher that serves a scripted sequence of pages, repeating the
    /// last entry once the script runs out.
    struct ScriptedFetcher {
        calls: AtomicUsize,
        script: Vec<Result<String, FeedError>>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<String, FeedError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                script,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FetchPage for ScriptedFetcher {
        async fn fetch(&self) -> Result<String, FeedError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .get(n)
                .or_else(|| self.script.last())
                .cloned()
                .unwrap_or(Err(FeedError::Timeout))
        }
    }

    fn one_station_page() -> String {
        r#"<html><body><ul><li class="rrItem">
             <div class="cssNumero">5</div>
             <span class="Stazione">Borgo Stretto</span>
             <span class="TableComune">Borgo</span>
             <span class="Red">3 7</span>
           </li></ul></body></html>"#
            .to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_inside_window_shares_the_snapshot() {
        let cache = FeedCache::new(
            ScriptedFetcher::new(vec![Ok(one_station_page())]),
            &CacheConfig::default(),
        );

        let first = cache.get_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;
        let second = cache.get_snapshot().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fetcher.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_window_triggers_exactly_one_new_fetch() {
        let cache = FeedCache::new(
            ScriptedFetcher::new(vec![Ok(one_station_page()), Ok(one_station_page())]),
            &CacheConfig::default(),
        );

        let first = cache.get_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(16)).await;
        let second = cache.get_snapshot().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fetcher.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_memoized_without_retry() {
        let cache = FeedCache::new(
            ScriptedFetcher::new(vec![
                Err(FeedError::Status { status: 503 }),
                Ok(one_station_page()),
            ]),
            &CacheConfig::default(),
        );

        assert!(matches!(
            cache.get_snapshot().await,
            Err(FeedError::Status { status: 503 })
        ));

        // Inside the window the error is served back, no retry.
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(cache.get_snapshot().await.is_err());
        assert_eq!(cache.fetcher.call_count(), 1);

        // After expiry the next fetch goes through and succeeds.
        tokio::time::advance(Duration::from_secs(11)).await;
        let snapshot = cache.get_snapshot().await.unwrap();
        assert_eq!(snapshot.stations.len(), 1);
        assert_eq!(cache.fetcher.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_carries_parsed_stations() {
        let cache = FeedCache::new(
            ScriptedFetcher::new(vec![Ok(one_station_page())]),
            &CacheConfig::default(),
        );

        let snapshot = cache.get_snapshot().await.unwrap();
        assert_eq!(snapshot.stations.len(), 1);
        assert_eq!(snapshot.stations[0].name(), "Borgo Stretto");
        assert_eq!(snapshot.stations[0].availability(), Some((3, 7)));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_fetch() {
        let cache = Arc::new(FeedCache::new(
            ScriptedFetcher::new(vec![Ok(one_station_page())]),
            &CacheConfig::default(),
        ));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_snapshot().await.map(|s| s.stations.len()) })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 1);
        }
        assert_eq!(cache.fetcher.call_count(), 1);
    }
}
