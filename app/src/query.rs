//! Data-fetching cache shared by everything mounted under one app.
//!
//! # Design
//! Results are cached per key together with the time they were fetched.
//! A value is served from cache while it is younger than `stale_time` and has
//! not been invalidated; otherwise the fetcher runs once and its result
//! replaces the cached one. Errors are handed back and never cached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
struct CachedQuery<V> {
    value: V,
    fetched_at: Instant,
    invalidated: bool,
}

#[derive(Debug, Clone)]
pub struct QueryClient<V> {
    stale_time: Duration,
    queries: HashMap<String, CachedQuery<V>>,
}

impl<V: Clone> QueryClient<V> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            queries: HashMap::new(),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Cached value for `key` if fresh, otherwise the result of `fetch`.
    pub fn fetch_query<E>(
        &mut self,
        key: &str,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(cached) = self.queries.get(key) {
            if !cached.invalidated && cached.fetched_at.elapsed() < self.stale_time {
                debug!(key, "query cache hit");
                return Ok(cached.value.clone());
            }
        }

        debug!(key, "fetching query");
        let value = fetch()?;
        self.set_query_data(key, value.clone());
        Ok(value)
    }

    /// Last fetched value regardless of freshness.
    pub fn get_query_data(&self, key: &str) -> Option<&V> {
        self.queries.get(key).map(|cached| &cached.value)
    }

    pub fn set_query_data(&mut self, key: &str, value: V) {
        self.queries.insert(
            key.to_string(),
            CachedQuery {
                value,
                fetched_at: Instant::now(),
                invalidated: false,
            },
        );
    }

    /// Force the next `fetch_query` for `key` to hit the fetcher.
    pub fn invalidate(&mut self, key: &str) {
        if let Some(cached) = self.queries.get_mut(key) {
            cached.invalidated = true;
        }
    }
}

impl<V: Clone> Default for QueryClient<V> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
