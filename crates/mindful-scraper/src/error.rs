use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },

    #[error("response body from {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },

    #[error("invalid search URL for {store}: {reason}")]
    InvalidUrl { store: String, reason: String },

    #[error("structured data parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
