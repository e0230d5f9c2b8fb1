pub mod cache;
pub mod client;
pub mod compare;
pub mod error;
pub mod extract;
pub mod format;
pub mod message;
pub mod service;
pub mod validate;

pub use cache::{CacheEntry, CacheKey, PriceCache};
pub use client::{search_url, FetchClient};
pub use compare::StoreQuote;
pub use error::ScraperError;
pub use extract::{extractor_for, PriceExtractor};
pub use format::FormattedPrice;
pub use message::{handle_message, InboundMessage, MessageResponse};
pub use service::PriceService;
pub use validate::{is_valid_price, parse_price_amount, PriceBounds};
