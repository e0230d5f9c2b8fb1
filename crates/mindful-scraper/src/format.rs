//! Caller-facing price strings.

use mindful_core::Region;
use serde::{Deserialize, Serialize};

/// `uk-UA` digit group separator.
const UK_GROUP_SEPARATOR: char = '\u{a0}';

/// A locale-formatted amount with its currency symbol, e.g. `"1 234₴"` or
/// `"$19.99"`. This is the only price representation that leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedPrice(String);

impl FormattedPrice {
    /// Whole hryvnia amount grouped the `uk-UA` way with a `₴` suffix.
    #[must_use]
    pub fn hryvnia(amount: u64) -> Self {
        Self(format!(
            "{}{}",
            group_thousands(amount, UK_GROUP_SEPARATOR),
            Region::Ukraine.currency_symbol()
        ))
    }

    /// Two-decimal amount prefixed with `€` for Europe and `$` otherwise.
    #[must_use]
    pub fn decimal(amount: f64, region: Region) -> Self {
        let symbol = match region {
            Region::Europe => Region::Europe.currency_symbol(),
            Region::Ukraine | Region::America => Region::America.currency_symbol(),
        };
        Self(format!("{symbol}{amount:.2}"))
    }

    /// A value passed through exactly as the page rendered it.
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for FormattedPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn group_thousands(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
