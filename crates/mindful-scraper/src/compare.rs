//! Comparison list shown when a purchase is intercepted.

use futures::future::join_all;
use mindful_core::{PriceQuery, Region, Store};
use serde::Serialize;

use crate::client::search_url;
use crate::format::FormattedPrice;
use crate::service::PriceService;

/// One row of the comparison list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreQuote {
    pub store: Store,
    /// Public search page for the product, for the "check price" link.
    pub search_url: String,
    pub price: Option<FormattedPrice>,
}

impl PriceService {
    /// Queries every comparison store for `region` concurrently, skipping
    /// `exclude` (the store the shopper is already on). Rows keep the
    /// region's store order.
    pub async fn compare_prices(
        &self,
        product_name: &str,
        region: Region,
        exclude: Option<Store>,
    ) -> Vec<StoreQuote> {
        let rows = region
            .comparison_stores()
            .iter()
            .copied()
            .filter(|&store| Some(store) != exclude)
            .filter_map(|store| match search_url(store, product_name, region, None) {
                Ok(url) => Some((store, url)),
                Err(e) => {
                    tracing::warn!(store = %store, error = %e, "skipping store in comparison");
                    None
                }
            });

        let lookups = rows.map(|(store, url)| async move {
            let query = PriceQuery::new(store, product_name, region);
            StoreQuote {
                store,
                search_url: url,
                price: self.get_price_for(&query).await,
            }
        });

        join_all(lookups).await
    }
}
