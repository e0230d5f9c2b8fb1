//! Pattern-based price strategies over raw page markup.
//!
//! Each function scans the HTML independently and returns the first
//! candidate that survives its own bounds check, or `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::validate::PriceBounds;

static DATA_PRICE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-price="(\d+)""#).expect("valid regex"));
static DATA_PRICE_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-price="([^"]+)""#).expect("valid regex"));
static JSON_PRICE_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""price":\s*(\d+)"#).expect("valid regex"));
static JSON_PRICE_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""price":\s*(\d+\.?\d*)"#).expect("valid regex"));

static PRODUCT_PRICE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| class_regex("product-price"));
static PRICE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| class_regex("price"));
static COST_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| class_regex("cost"));
static VALUE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| class_regex("value"));
static SPAN_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span[^>]*class="[^"]*price[^"]*"[^>]*>([^<]+)</span>"#).expect("valid regex")
});
static DIV_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div[^>]*class="[^"]*price[^"]*"[^>]*>([^<]+)</div>"#).expect("valid regex")
});

const MIN_CLASS_DIGITS: usize = 2;
const MAX_CLASS_DIGITS: usize = 6;

fn class_regex(keyword: &str) -> Regex {
    let pattern = format!(
        r#"class="[^"]*{}[^"]*"[^>]*>([^<]+)<"#,
        regex::escape(keyword)
    );
    Regex::new(&pattern).expect("valid class regex")
}

/// Which `"price": N` matches the JSON-fragment strategy considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonScan {
    /// Only the first match on the page; out of bounds means no result.
    FirstMatch,
    /// The first in-bounds match among all of them.
    AllMatches,
}

/// Markup whose text content the class heuristic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSelector {
    /// Any element whose `class` contains `product-price`.
    ProductPrice,
    /// Any element whose `class` contains `price`.
    Price,
    /// Any element whose `class` contains `cost`.
    Cost,
    /// Any element whose `class` contains `value`.
    Value,
    /// A `<span>` whose `class` contains `price`, closed on the same text node.
    SpanPrice,
    /// A `<div>` whose `class` contains `price`, closed on the same text node.
    DivPrice,
}

impl ClassSelector {
    fn regex(self) -> &'static Regex {
        match self {
            ClassSelector::ProductPrice => &PRODUCT_PRICE_CLASS_RE,
            ClassSelector::Price => &PRICE_CLASS_RE,
            ClassSelector::Cost => &COST_CLASS_RE,
            ClassSelector::Value => &VALUE_CLASS_RE,
            ClassSelector::SpanPrice => &SPAN_PRICE_RE,
            ClassSelector::DivPrice => &DIV_PRICE_RE,
        }
    }
}

/// First `data-price="<digits>"` attribute, if within `bounds`.
#[must_use]
pub fn data_attribute_price(html: &str, bounds: PriceBounds) -> Option<u64> {
    let digits = DATA_PRICE_DIGITS_RE.captures(html)?.get(1)?.as_str();
    digits.parse::<u64>().ok().filter(|&p| bounds.contains(p))
}

/// An integer `"price": N` key/value scanned from embedded JSON.
#[must_use]
pub fn json_fragment_price(html: &str, bounds: PriceBounds, scan: JsonScan) -> Option<u64> {
    let mut amounts = JSON_PRICE_INT_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().parse::<u64>().ok());

    match scan {
        JsonScan::FirstMatch => amounts.next().flatten().filter(|&p| bounds.contains(p)),
        JsonScan::AllMatches => amounts.flatten().find(|&p| bounds.contains(p)),
    }
}

/// Text of price-like elements, stripped to digits.
///
/// Selectors are tried in order and every match of a selector is examined
/// before moving on. A candidate needs 2 to 6 digits and must lie within
/// `bounds`.
#[must_use]
pub fn class_keyword_price(
    html: &str,
    selectors: &[ClassSelector],
    bounds: PriceBounds,
) -> Option<u64> {
    selectors.iter().find_map(|selector| {
        selector
            .regex()
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .find_map(|m| digits_only_amount(m.as_str()).filter(|&p| bounds.contains(p)))
    })
}

/// Decimal `"price": N.NN` value, first match only.
#[must_use]
pub fn decimal_json_price(html: &str) -> Option<f64> {
    let raw = JSON_PRICE_DECIMAL_RE.captures(html)?.get(1)?.as_str();
    raw.parse::<f64>().ok()
}

/// First `data-price` attribute value, returned verbatim.
#[must_use]
pub fn raw_data_price(html: &str) -> Option<String> {
    DATA_PRICE_ANY_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

fn digits_only_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if !(MIN_CLASS_DIGITS..=MAX_CLASS_DIGITS).contains(&digits.len()) {
        return None;
    }
    digits.parse::<u64>().ok()
}

#[cfg(test)]
#[path = "strategies_test.rs"]
mod tests;
