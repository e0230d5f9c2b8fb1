//! HTTP client for store search pages.

mod search;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;

use crate::error::ScraperError;

pub use search::search_url;

/// Default cap on a buffered response body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

const CONNECT_TIMEOUT_SECS: u64 = 10;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "uk-UA,uk;q=0.9,en;q=0.8";

/// Fetches store search pages with a desktop-browser header set.
///
/// `Accept-Encoding` is negotiated by reqwest itself (gzip, deflate, br) so
/// that it can transparently decode the body. Bodies larger than
/// `max_body_bytes` after decoding are rejected rather than buffered.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    max_body_bytes: usize,
}

impl FetchClient {
    /// Creates a `FetchClient` with the given request timeout, `User-Agent`
    /// and body cap.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_body_bytes: usize,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent)
            .default_headers(browser_headers())
            .build()?;
        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// Issues a GET for `url` and returns the decoded body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Network`]: DNS, connect, TLS, timeout or body read failure.
    /// - [`ScraperError::Http`]: any non-2xx status.
    /// - [`ScraperError::BodyTooLarge`]: body exceeds the configured cap.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::Http {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let too_large = || ScraperError::BodyTooLarge {
            url: url.to_owned(),
            limit: self.max_body_bytes,
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
