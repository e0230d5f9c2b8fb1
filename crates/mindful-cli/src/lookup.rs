//! Command handlers for the CLI.
//!
//! Lookups never fail on a missing price; the only errors surfaced here are
//! empty input and JSON encoding.

use mindful_core::{detect_region, detect_store, Region, Store};
use mindful_scraper::{FormattedPrice, PriceService, StoreQuote};

const PRICE_UNAVAILABLE: &str = "price unavailable";

pub(crate) async fn run_price(
    service: &PriceService,
    store: &str,
    product: &str,
    region: Region,
    json: bool,
) -> anyhow::Result<()> {
    let product = non_empty_product(product)?;
    let price = service.get_price(store, product, region).await;
    if price.is_none() {
        tracing::warn!(store, product, %region, "no price available");
    }

    if json {
        let body = serde_json::json!({
            "store": store,
            "product": product,
            "region": region,
            "price": price,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{store}: {}", price_label(price.as_ref()));
    }
    Ok(())
}

pub(crate) async fn run_compare(
    service: &PriceService,
    product: &str,
    region: Region,
    exclude: Option<Store>,
    json: bool,
) -> anyhow::Result<()> {
    let product = non_empty_product(product)?;
    let quotes = service.compare_prices(product, region, exclude).await;
    let missing = quotes.iter().filter(|q| q.price.is_none()).count();
    if missing > 0 {
        tracing::debug!(product, %region, missing, "some stores returned no price");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
    } else {
        for line in render_quotes(&quotes) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_detect(host: &str, language: &str, json: bool) -> anyhow::Result<()> {
    let host = host.trim().to_lowercase();
    let region = detect_region(&host, language);
    let store = detect_store(&host);

    if json {
        let body = serde_json::json!({ "host": host, "region": region, "store": store });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let store = store.map_or("none", Store::name);
        println!("host: {host}\nregion: {region}\nstore: {store}");
    }
    Ok(())
}

fn non_empty_product(product: &str) -> anyhow::Result<&str> {
    let product = product.trim();
    if product.is_empty() {
        anyhow::bail!("--product must not be empty");
    }
    Ok(product)
}

pub(crate) fn price_label(price: Option<&FormattedPrice>) -> &str {
    price.map_or(PRICE_UNAVAILABLE, FormattedPrice::as_str)
}

/// One aligned line per quote: store, price, search URL.
pub(crate) fn render_quotes(quotes: &[StoreQuote]) -> Vec<String> {
    let width = quotes
        .iter()
        .map(|q| q.store.name().chars().count())
        .max()
        .unwrap_or(0);

    quotes
        .iter()
        .map(|q| {
            format!(
                "{:<width$}  {}  {}",
                q.store.name(),
                price_label(q.price.as_ref()),
                q.search_url
            )
        })
        .collect()
}
