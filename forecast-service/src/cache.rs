use common::errors::AppError;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::location::normalize;

/// What to do with an expired entry when a refresh fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Surface the failure; expired data is never served.
    #[default]
    Never,
    /// Serve the expired payload if there is one.
    OnError,
}

struct CacheEntry {
    payload: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        // A ttl past the clock's range never expires.
        self.stored_at
            .checked_add(self.ttl)
            .is_none_or(|expires_at| now <= expires_at)
    }
}

/// Provider payloads keyed by normalized location.
///
/// Entries are replaced on refresh and never removed; concurrent misses
/// for the same key may each fetch, and the last writer wins.
pub struct ForecastCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    stale_policy: StalePolicy,
}

impl ForecastCache {
    pub fn new(stale_policy: StalePolicy) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stale_policy,
        }
    }

    /// Fresh payload for `location`, if any.
    pub async fn get(&self, location: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(&normalize(location))
            .filter(|entry| entry.is_fresh(Instant::now()))
            .map(|entry| entry.payload.clone())
    }

    pub async fn store(&self, location: &str, payload: Value, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            normalize(location),
            CacheEntry {
                payload,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    async fn get_stale(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.payload.clone())
    }

    /// Serve a fresh entry, or call `fetch_fn` and cache what it returns.
    ///
    /// Failures are never cached, so the next call fetches again.
    #[instrument(skip(self, fetch_fn), fields(key = tracing::field::Empty))]
    pub async fn get_or_fetch<F, Fut>(
        &self,
        location: &str,
        ttl: Duration,
        fetch_fn: F,
    ) -> Result<Value, AppError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Value, AppError>>,
    {
        let key = normalize(location);
        tracing::Span::current().record("key", key.as_str());

        if let Some(cached) = self.get(location).await {
            info!(key = %key, "Cache hit");
            return Ok(cached);
        }

        match fetch_fn(location.to_string()).await {
            Ok(payload) => {
                self.store(location, payload.clone(), ttl).await;
                info!(key = %key, ttl_secs = ttl.as_secs(), "Cached fresh forecast");
                Ok(payload)
            }
            Err(e) => {
                if self.stale_policy == StalePolicy::OnError
                    && let Some(stale) = self.get_stale(&key).await
                {
                    warn!(key = %key, error = %e, "Fetch failed, serving stale forecast");
                    return Ok(stale);
                }
                warn!(key = %key, error = %e, "Fetch failed, nothing cached");
                Err(e)
            }
        }
    }
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(30 * 60);

    async fn fetch_counting(
        cache: &ForecastCache,
        location: &str,
        calls: &AtomicUsize,
        result: Result<Value, AppError>,
    ) -> Result<Value, AppError> {
        cache
            .get_or_fetch(location, TTL, move |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                result
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_does_not_fetch() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);

        let first = fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        let second = fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 2 })))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(second["v"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_still_fresh_at_exact_expiry() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);

        fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        tokio::time::advance(TTL).await;
        fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 2 })))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_refetched_and_replaced() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);

        fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        tokio::time::advance(TTL + Duration::from_millis(1)).await;
        let refreshed = fetch_counting(&cache, "London", &calls, Ok(json!({ "v": 2 })))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed["v"], 2);
        assert_eq!(cache.get("London").await.unwrap()["v"], 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);

        let failed = fetch_counting(
            &cache,
            "Paris",
            &calls,
            Err(AppError::provider(503, "unavailable")),
        )
        .await;
        assert!(failed.is_err());
        assert!(cache.get("Paris").await.is_none());

        let retried = fetch_counting(&cache, "Paris", &calls, Ok(json!({ "v": 1 }))).await;
        assert!(retried.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn normalized_names_share_an_entry() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);

        fetch_counting(&cache, "New York", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        fetch_counting(&cache, "new-york", &calls, Ok(json!({ "v": 2 })))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_receives_display_location() {
        let cache = ForecastCache::default();
        let payload = cache
            .get_or_fetch("New York", TTL, |location| async move {
                Ok(json!({ "asked": location }))
            })
            .await
            .unwrap();
        assert_eq!(payload["asked"], "New York");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entry_is_not_served_by_default() {
        let cache = ForecastCache::new(StalePolicy::Never);
        let calls = AtomicUsize::new(0);

        fetch_counting(&cache, "Oslo", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let result = fetch_counting(
            &cache,
            "Oslo",
            &calls,
            Err(AppError::timeout("slow provider")),
        )
        .await;

        assert!(matches!(result, Err(AppError::TimeoutError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entry_is_served_on_error_when_enabled() {
        let cache = ForecastCache::new(StalePolicy::OnError);
        let calls = AtomicUsize::new(0);

        fetch_counting(&cache, "Oslo", &calls, Ok(json!({ "v": 1 })))
            .await
            .unwrap();
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let result = fetch_counting(
            &cache,
            "Oslo",
            &calls,
            Err(AppError::timeout("slow provider")),
        )
        .await
        .unwrap();

        assert_eq!(result["v"], 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // Still expired: the next call tries the provider again.
        assert!(cache.get("Oslo").await.is_none());
    }

    #[tokio::test]
    async fn stale_policy_without_entry_surfaces_error() {
        let cache = ForecastCache::new(StalePolicy::OnError);
        let calls = AtomicUsize::new(0);

        let result = fetch_counting(
            &cache,
            "Lima",
            &calls,
            Err(AppError::provider(500, "boom")),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unrepresentable_ttl_never_expires() {
        let cache = ForecastCache::default();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(u64::MAX);

        for _ in 0..2 {
            let counter = &calls;
            cache
                .get_or_fetch("London", ttl, move |_| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({ "v": 1 }))
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.get("London").await.is_some());
    }
}
