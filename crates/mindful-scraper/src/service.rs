//! The price-retrieval pipeline: cache, fetch, extract, validate, store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use mindful_core::{AppConfig, PriceQuery, Region, Store};
use tokio::sync::{Mutex, OnceCell};

use crate::cache::{CacheKey, PriceCache};
use crate::client::{search_url, FetchClient};
use crate::error::ScraperError;
use crate::extract::extractor_for;
use crate::format::FormattedPrice;
use crate::validate::is_valid_price;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

type InFlight = Arc<OnceCell<Option<FormattedPrice>>>;

/// Answers `get_price` queries for the supported stores.
///
/// Never errors to the caller: every failure below this boundary is logged
/// as a warning and reported as `None`. Only validated prices are cached,
/// so a failed lookup is retried in full on the next call. Concurrent calls
/// for the same key share a single fetch.
#[derive(Debug)]
pub struct PriceService {
    fetcher: FetchClient,
    cache: Mutex<PriceCache>,
    /// Only locked for synchronous map edits, never across an await.
    in_flight: std::sync::Mutex<HashMap<CacheKey, InFlight>>,
    origin_override: Option<String>,
    query_timeout: Duration,
}

impl PriceService {
    #[must_use]
    pub fn new(fetcher: FetchClient, cache: PriceCache, query_timeout: Duration) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(cache),
            in_flight: std::sync::Mutex::new(HashMap::new()),
            origin_override: None,
            query_timeout,
        }
    }

    /// Sends every store request to `origin` instead of the store's own host.
    #[must_use]
    pub fn with_origin_override(mut self, origin: impl Into<String>) -> Self {
        self.origin_override = Some(origin.into());
        self
    }

    /// Builds the fetch client, cache and timeouts from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] if the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = FetchClient::new(
            config.fetch_timeout_secs,
            &config.user_agent,
            config.fetch_max_body_bytes,
        )?;
        let cache = PriceCache::new(
            Duration::from_secs(config.cache_ttl_secs),
            config.cache_max_entries,
        );
        let service = Self::new(
            fetcher,
            cache,
            Duration::from_secs(config.query_timeout_secs),
        );
        Ok(match &config.store_origin_override {
            Some(origin) => service.with_origin_override(origin.clone()),
            None => service,
        })
    }

    /// Looks up `product_name` on the store named `store_name`.
    ///
    /// Store names match case-insensitively; an unknown name yields `None`
    /// without any network activity.
    pub async fn get_price(
        &self,
        store_name: &str,
        product_name: &str,
        region: Region,
    ) -> Option<FormattedPrice> {
        let Some(store) = Store::from_name(store_name) else {
            tracing::warn!(store = store_name, "unknown store, skipping price lookup");
            return None;
        };
        self.get_price_for(&PriceQuery::new(store, product_name, region))
            .await
    }

    pub async fn get_price_for(&self, query: &PriceQuery) -> Option<FormattedPrice> {
        let key = CacheKey::from(query);
        if let Some(price) = self.cached(&key).await {
            tracing::debug!(key = %key, "price cache hit");
            return Some(price);
        }

        let cell = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(in_flight.entry(key.clone()).or_default())
        };

        let price = cell
            .get_or_init(|| self.fetch_validate_and_cache(query, &key))
            .await
            .clone();

        // No await between the cell resolving and this removal, so a dropped
        // caller cannot leave a resolved cell behind.
        self.release_in_flight(&key, &cell);
        price
    }

    fn release_in_flight(&self, key: &CacheKey, cell: &InFlight) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, cell))
        {
            in_flight.remove(key);
        }
    }

    /// Drops expired cache entries; returns how many were removed.
    pub async fn sweep_cache(&self) -> usize {
        self.cache.lock().await.sweep_expired()
    }

    /// Number of stored cache entries, including expired ones not yet swept.
    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn cached(&self, key: &CacheKey) -> Option<FormattedPrice> {
        self.cache
            .lock()
            .await
            .get(key)
            .map(|entry| entry.price.clone())
    }

    async fn fetch_validate_and_cache(
        &self,
        query: &PriceQuery,
        key: &CacheKey,
    ) -> Option<FormattedPrice> {
        // A previous leader may have filled the cache between our miss and
        // joining the in-flight table.
        if let Some(price) = self.cached(key).await {
            return Some(price);
        }

        let price = match tokio::time::timeout(self.query_timeout, self.scrape(query)).await {
            Ok(Ok(Some(price))) => price,
            Ok(Ok(None)) => {
                tracing::info!(
                    store = %query.store,
                    product = query.product_name.as_str(),
                    "no price found on search page"
                );
                return None;
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    store = %query.store,
                    product = query.product_name.as_str(),
                    error = %e,
                    "price lookup failed"
                );
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    store = %query.store,
                    product = query.product_name.as_str(),
                    timeout_secs = self.query_timeout.as_secs(),
                    "price lookup timed out"
                );
                return None;
            }
        };

        if !is_valid_price(price.as_str()) {
            tracing::warn!(
                store = %query.store,
                product = query.product_name.as_str(),
                price = price.as_str(),
                "rejecting out-of-range price"
            );
            return None;
        }

        self.cache.lock().await.put(key.clone(), price.clone());
        Some(price)
    }

    async fn scrape(&self, query: &PriceQuery) -> Result<Option<FormattedPrice>, ScraperError> {
        let url = search_url(
            query.store,
            &query.product_name,
            query.region,
            self.origin_override.as_deref(),
        )?;
        tracing::debug!(store = %query.store, url = url.as_str(), "fetching search page");

        let html = self.fetcher.fetch_html(&url).await?;
        Ok(extractor_for(query.store).extract(&html, &query.product_name, query.region))
    }
}
