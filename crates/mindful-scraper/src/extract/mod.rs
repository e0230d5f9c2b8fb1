//! Per-store price extraction from search-result HTML.
//!
//! The five Ukrainian stores share one machinery: an ordered [`Strategy`]
//! chain where the first step that yields an in-bounds integer wins and is
//! formatted as hryvnia. Amazon and Google Shopping each read a single
//! pattern and format it their own way.

pub mod jsonld;
pub mod strategies;

use mindful_core::{Region, Store};

use crate::format::FormattedPrice;
use crate::validate::PriceBounds;

use jsonld::structured_data_price;
use strategies::{
    class_keyword_price, data_attribute_price, decimal_json_price, json_fragment_price,
    raw_data_price, ClassSelector, JsonScan,
};

/// Pulls a caller-facing price out of a store's search page.
///
/// Implementations never fail: a page that yields nothing usable returns
/// `None`.
pub trait PriceExtractor: Send + Sync {
    fn extract(&self, html: &str, product_name: &str, region: Region) -> Option<FormattedPrice>;
}

/// One step of an integer strategy chain.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    StructuredData(PriceBounds),
    DataAttribute(PriceBounds),
    JsonFragment {
        bounds: PriceBounds,
        scan: JsonScan,
    },
    ClassKeyword {
        selectors: &'static [ClassSelector],
        bounds: PriceBounds,
    },
}

impl Strategy {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::StructuredData(_) => "structured_data",
            Strategy::DataAttribute(_) => "data_attribute",
            Strategy::JsonFragment { .. } => "json_fragment",
            Strategy::ClassKeyword { .. } => "class_keyword",
        }
    }

    #[must_use]
    pub fn apply(&self, html: &str) -> Option<u64> {
        match *self {
            Strategy::StructuredData(bounds) => structured_data_price(html, bounds),
            Strategy::DataAttribute(bounds) => data_attribute_price(html, bounds),
            Strategy::JsonFragment { bounds, scan } => json_fragment_price(html, bounds, scan),
            Strategy::ClassKeyword { selectors, bounds } => {
                class_keyword_price(html, selectors, bounds)
            }
        }
    }
}

/// Ordered strategies for a hryvnia-priced store.
#[derive(Debug)]
pub struct StrategyChain {
    store: Store,
    steps: &'static [Strategy],
}

impl StrategyChain {
    #[must_use]
    pub fn store(&self) -> Store {
        self.store
    }

    #[must_use]
    pub fn steps(&self) -> &'static [Strategy] {
        self.steps
    }
}

impl PriceExtractor for StrategyChain {
    fn extract(&self, html: &str, product_name: &str, _region: Region) -> Option<FormattedPrice> {
        self.steps.iter().find_map(|step| {
            let amount = step.apply(html)?;
            tracing::debug!(
                store = %self.store,
                product = product_name,
                strategy = step.name(),
                amount,
                "price candidate found"
            );
            Some(FormattedPrice::hryvnia(amount))
        })
    }
}

/// First decimal `"price"` value, formatted in euro or dollars by region.
#[derive(Debug)]
pub struct AmazonExtractor;

impl PriceExtractor for AmazonExtractor {
    fn extract(&self, html: &str, product_name: &str, region: Region) -> Option<FormattedPrice> {
        let amount = decimal_json_price(html)?;
        tracing::debug!(store = %Store::Amazon, product = product_name, amount, "price candidate found");
        Some(FormattedPrice::decimal(amount, region))
    }
}

/// First `data-price` attribute, passed through unformatted.
#[derive(Debug)]
pub struct GoogleShoppingExtractor;

impl PriceExtractor for GoogleShoppingExtractor {
    fn extract(&self, html: &str, product_name: &str, _region: Region) -> Option<FormattedPrice> {
        let raw = raw_data_price(html)?;
        tracing::debug!(
            store = %Store::GoogleShopping,
            product = product_name,
            raw = raw.as_str(),
            "price candidate found"
        );
        Some(FormattedPrice::raw(raw))
    }
}

const PRIMARY: PriceBounds = PriceBounds::PRIMARY;
const SECONDARY: PriceBounds = PriceBounds::SECONDARY;

static ROZETKA: StrategyChain = StrategyChain {
    store: Store::Rozetka,
    steps: &[
        Strategy::StructuredData(PRIMARY),
        Strategy::DataAttribute(PRIMARY),
        Strategy::JsonFragment {
            bounds: PRIMARY,
            scan: JsonScan::FirstMatch,
        },
        Strategy::ClassKeyword {
            selectors: &[
                ClassSelector::ProductPrice,
                ClassSelector::Price,
                ClassSelector::Cost,
            ],
            bounds: PRIMARY,
        },
    ],
};

static PROM_UA: StrategyChain = StrategyChain {
    store: Store::PromUa,
    steps: &[
        Strategy::StructuredData(PRIMARY),
        Strategy::DataAttribute(SECONDARY),
        Strategy::JsonFragment {
            bounds: PRIMARY,
            scan: JsonScan::AllMatches,
        },
        Strategy::ClassKeyword {
            selectors: &[
                ClassSelector::Price,
                ClassSelector::Cost,
                ClassSelector::Value,
                ClassSelector::SpanPrice,
            ],
            bounds: PRIMARY,
        },
    ],
};

static COMFY: StrategyChain = StrategyChain {
    store: Store::Comfy,
    steps: &[
        Strategy::StructuredData(PRIMARY),
        Strategy::DataAttribute(SECONDARY),
        Strategy::JsonFragment {
            bounds: PRIMARY,
            scan: JsonScan::AllMatches,
        },
        Strategy::ClassKeyword {
            selectors: &[
                ClassSelector::Price,
                ClassSelector::Cost,
                ClassSelector::Value,
                ClassSelector::SpanPrice,
                ClassSelector::DivPrice,
            ],
            bounds: PRIMARY,
        },
    ],
};

const MARKETPLACE_STEPS: &[Strategy] = &[
    Strategy::StructuredData(PRIMARY),
    Strategy::DataAttribute(SECONDARY),
    Strategy::JsonFragment {
        bounds: SECONDARY,
        scan: JsonScan::AllMatches,
    },
];

static FOXTROT: StrategyChain = StrategyChain {
    store: Store::Foxtrot,
    steps: MARKETPLACE_STEPS,
};

static ALLO: StrategyChain = StrategyChain {
    store: Store::Allo,
    steps: MARKETPLACE_STEPS,
};

static AMAZON: AmazonExtractor = AmazonExtractor;
static GOOGLE_SHOPPING: GoogleShoppingExtractor = GoogleShoppingExtractor;

/// The extractor registered for `store`.
#[must_use]
pub fn extractor_for(store: Store) -> &'static dyn PriceExtractor {
    match store {
        Store::Rozetka => &ROZETKA,
        Store::PromUa => &PROM_UA,
        Store::Comfy => &COMFY,
        Store::Foxtrot => &FOXTROT,
        Store::Allo => &ALLO,
        Store::Amazon => &AMAZON,
        Store::GoogleShopping => &GOOGLE_SHOPPING,
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
