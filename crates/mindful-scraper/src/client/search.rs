//! Search-page URL templates, one per store.

use mindful_core::{Region, Store};
use reqwest::Url;

use crate::error::ScraperError;

/// Base URL (including any fixed query) and the query parameter that
/// carries the product name.
fn template(store: Store, region: Region) -> (&'static str, &'static str) {
    match store {
        Store::Rozetka => ("https://rozetka.com.ua/search/", "text"),
        Store::PromUa => ("https://prom.ua/search", "search_term"),
        Store::Comfy => ("https://comfy.ua/search/", "text"),
        Store::Foxtrot => ("https://www.foxtrot.com.ua/uk/search", "query"),
        Store::Allo => ("https://allo.ua/ua/search/", "text"),
        Store::Amazon => match region {
            Region::Europe => ("https://amazon.de/s", "k"),
            Region::Ukraine | Region::America => ("https://amazon.com/s", "k"),
        },
        Store::GoogleShopping => ("https://www.google.com/search?tbm=shop", "q"),
    }
}

/// Builds the search URL for `product_name` on `store`.
///
/// When `origin_override` is set (e.g. `"http://127.0.0.1:8080"`), its
/// scheme, host and port replace the store's own; path and query are kept.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the template or the override
/// cannot be parsed as a URL.
pub fn search_url(
    store: Store,
    product_name: &str,
    region: Region,
    origin_override: Option<&str>,
) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        store: store.name().to_owned(),
        reason,
    };

    let (base, param) = template(store, region);
    let mut url = Url::parse(base).map_err(|e| invalid(format!("template \"{base}\": {e}")))?;

    if let Some(origin) = origin_override {
        let mut rebased = Url::parse(origin)
            .map_err(|e| invalid(format!("origin override \"{origin}\": {e}")))?;
        rebased.set_path(url.path());
        rebased.set_query(url.query());
        url = rebased;
    }

    url.query_pairs_mut().append_pair(param, product_name);

    if store == Store::GoogleShopping {
        let language = if region == Region::Ukraine { "uk" } else { "en" };
        url.query_pairs_mut().append_pair("hl", language);
    }

    Ok(url.to_string())
}
