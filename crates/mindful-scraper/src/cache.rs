//! Time-bounded memoization of accepted prices.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use mindful_core::PriceQuery;

use crate::format::FormattedPrice;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// `"{store}-{product}-{region}"`, e.g. `"Rozetka-iphone 15-ukraine"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&PriceQuery> for CacheKey {
    fn from(query: &PriceQuery) -> Self {
        Self(format!(
            "{}-{}-{}",
            query.store.name(),
            query.product_name,
            query.region.as_str()
        ))
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub price: FormattedPrice,
    pub fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Price cache with a fixed TTL and an entry cap.
///
/// Expired entries are invisible to [`PriceCache::get`] but stay stored until
/// overwritten, swept, or displaced when the cache is full.
#[derive(Debug)]
pub struct PriceCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl PriceCache {
    /// `max_entries` is clamped to at least 1.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.get_at(key, Instant::now())
    }

    #[must_use]
    pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now, self.ttl))
    }

    pub fn put(&mut self, key: CacheKey, price: FormattedPrice) {
        self.put_at(key, price, Instant::now());
    }

    /// Inserts or overwrites `key`. A new key arriving at a full cache first
    /// drops expired entries, then the oldest remaining one.
    pub fn put_at(&mut self, key: CacheKey, price: FormattedPrice, now: Instant) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.sweep_expired_at(now);
            if self.entries.len() >= self.max_entries {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                price,
                fetched_at: now,
            },
        );
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh_at(now, ttl));
        before - self.entries.len()
    }

    /// Stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.fetched_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            tracing::debug!(key = %key, "evicting oldest price cache entry");
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
