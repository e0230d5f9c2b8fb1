//! Structured-data strategy: schema.org `offers.price` from JSON-LD blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;
use crate::validate::PriceBounds;

static LD_JSON_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Integer part of the first in-bounds `offers.price` found in any
/// `<script type="application/ld+json">` block.
///
/// Malformed blocks are logged and skipped.
#[must_use]
pub fn structured_data_price(html: &str, bounds: PriceBounds) -> Option<u64> {
    for cap in LD_JSON_SCRIPT_RE.captures_iter(html) {
        let Some(body) = cap.get(1) else {
            continue;
        };

        let value = match parse_block(body.as_str()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed ld+json block");
                continue;
            }
        };

        let found = candidates(value)
            .iter()
            .filter_map(offer_price)
            .find(|&p| bounds.contains(p));
        if found.is_some() {
            return found;
        }
    }
    None
}

fn parse_block(text: &str) -> Result<serde_json::Value, ScraperError> {
    serde_json::from_str(text.trim()).map_err(|source| ScraperError::Parse {
        context: "ld+json block".to_owned(),
        source,
    })
}

/// Top-level object, array items, and `@graph` members.
fn candidates(value: serde_json::Value) -> Vec<serde_json::Value> {
    let mut items = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let graph: Vec<serde_json::Value> = items
        .iter()
        .filter_map(|item| item.get("@graph").and_then(serde_json::Value::as_array))
        .flatten()
        .cloned()
        .collect();
    items.extend(graph);
    items
}

/// `offers.price` where `offers` is an object or a non-empty array.
fn offer_price(item: &serde_json::Value) -> Option<u64> {
    let offers = item.get("offers")?;
    let offer = match offers.as_array() {
        Some(list) => list.first()?,
        None => offers,
    };
    integer_part(offer.get("price")?)
}

/// Numbers are truncated; strings are read up to the first non-digit, so
/// `"1299.00"` yields 1299 and `"₴1299"` yields nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integer_part(price: &serde_json::Value) -> Option<u64> {
    if let Some(n) = price.as_u64() {
        return Some(n);
    }
    if let Some(f) = price.as_f64() {
        return (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64);
    }
    let digits: String = price
        .as_str()?
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().ok()
}
