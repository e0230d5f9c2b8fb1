use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A retail site the price-retrieval service knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    Rozetka,
    #[serde(rename = "Prom.ua")]
    PromUa,
    Comfy,
    Foxtrot,
    Allo,
    Amazon,
    #[serde(rename = "Google Shopping")]
    GoogleShopping,
}

impl Store {
    pub const ALL: [Store; 7] = [
        Store::Rozetka,
        Store::PromUa,
        Store::Comfy,
        Store::Foxtrot,
        Store::Allo,
        Store::Amazon,
        Store::GoogleShopping,
    ];

    /// Display name, e.g. `"Prom.ua"` or `"Google Shopping"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Store::Rozetka => "Rozetka",
            Store::PromUa => "Prom.ua",
            Store::Comfy => "Comfy",
            Store::Foxtrot => "Foxtrot",
            Store::Allo => "Allo",
            Store::Amazon => "Amazon",
            Store::GoogleShopping => "Google Shopping",
        }
    }

    /// Resolves a store from its display name or a known alias, ignoring case
    /// and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rozetka" => Some(Store::Rozetka),
            "prom.ua" | "promua" | "prom" => Some(Store::PromUa),
            "comfy" => Some(Store::Comfy),
            "foxtrot" => Some(Store::Foxtrot),
            "allo" => Some(Store::Allo),
            "amazon" => Some(Store::Amazon),
            "google shopping" | "google-shopping" | "google_shopping" => {
                Some(Store::GoogleShopping)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Store {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Store::from_name(s).ok_or_else(|| CoreError::UnknownStore(s.to_string()))
    }
}

/// Coarse market grouping that controls currency formatting and which stores
/// are offered for comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Ukraine,
    Europe,
    America,
}

impl Region {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Ukraine => "ukraine",
            Region::Europe => "europe",
            Region::America => "america",
        }
    }

    #[must_use]
    pub fn currency_symbol(self) -> &'static str {
        match self {
            Region::Ukraine => "₴",
            Region::Europe => "€",
            Region::America => "$",
        }
    }

    /// Stores offered in the comparison list for this region, in display order.
    #[must_use]
    pub fn comparison_stores(self) -> &'static [Store] {
        match self {
            Region::Ukraine => &[
                Store::Rozetka,
                Store::PromUa,
                Store::Comfy,
                Store::Foxtrot,
                Store::Allo,
                Store::GoogleShopping,
            ],
            Region::Europe | Region::America => &[Store::Amazon, Store::GoogleShopping],
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ukraine" => Ok(Region::Ukraine),
            "europe" => Ok(Region::Europe),
            "america" => Ok(Region::America),
            _ => Err(CoreError::UnknownRegion(s.to_string())),
        }
    }
}

/// A single price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceQuery {
    pub store: Store,
    pub product_name: String,
    pub region: Region,
}

impl PriceQuery {
    #[must_use]
    pub fn new(store: Store, product_name: impl Into<String>, region: Region) -> Self {
        Self {
            store,
            product_name: product_name.into(),
            region,
        }
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
