//! Acceptance rules for scraped prices.
//!
//! [`is_valid_price`] is the final gate applied to every candidate before it
//! is cached or returned. It is currency-naive: the same [10, 50000] window is
//! applied whatever the region, sized for hryvnia retail prices.
//! [`PriceBounds`] carries the looser per-strategy windows extractors use to
//! pick a candidate out of a page in the first place.

/// Lowest amount [`is_valid_price`] accepts.
pub const MIN_ACCEPTED_PRICE: f64 = 10.0;

/// Highest amount [`is_valid_price`] accepts.
pub const MAX_ACCEPTED_PRICE: f64 = 50_000.0;

/// Exclusive numeric window a strategy applies before accepting a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    pub min_exclusive: u64,
    pub max_exclusive: u64,
}

impl PriceBounds {
    /// Window for the main extraction paths of the Ukrainian stores.
    pub const PRIMARY: PriceBounds = PriceBounds {
        min_exclusive: 0,
        max_exclusive: 50_000,
    };

    /// Looser window for data-attribute and JSON paths on some stores.
    pub const SECONDARY: PriceBounds = PriceBounds {
        min_exclusive: 0,
        max_exclusive: 100_000,
    };

    #[must_use]
    pub fn contains(self, amount: u64) -> bool {
        amount > self.min_exclusive && amount < self.max_exclusive
    }
}

/// Extracts the numeric amount from a price string such as `"1 234₴"`,
/// `"€19.99"` or `"12,50"`.
///
/// Everything except digits, commas and periods is dropped, the first comma
/// becomes a decimal point, and the longest leading decimal number is parsed.
/// Trailing garbage after that number is ignored, so `"1.299.00"` reads as
/// `1.299`.
#[must_use]
pub fn parse_price_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);
    leading_decimal(&normalized)
}

/// Returns `true` when `raw` holds an amount within
/// [[`MIN_ACCEPTED_PRICE`], [`MAX_ACCEPTED_PRICE`]].
#[must_use]
pub fn is_valid_price(raw: &str) -> bool {
    match parse_price_amount(raw) {
        Some(amount) if amount.is_finite() && amount > 0.0 => {
            (MIN_ACCEPTED_PRICE..=MAX_ACCEPTED_PRICE).contains(&amount)
        }
        _ => false,
    }
}

/// Parses the longest `digits[.digits]` prefix of `s`.
fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let int_end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());

    let mut end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        let frac_len = bytes[int_end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_len > 0 {
            end = int_end + 1 + frac_len;
        }
    }

    if end == 0 {
        return None;
    }

    let number = &s[..end];
    if number.starts_with('.') {
        format!("0{number}").parse::<f64>().ok()
    } else {
        number.parse::<f64>().ok()
    }
}
