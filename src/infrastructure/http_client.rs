//! HTTP client for fetching the listing page
//!
//! One browser-headed GET per cycle, with a cookie store, a bounded timeout
//! and a small fixed pre-request delay to break up request-pattern
//! regularity. A 2xx response whose body carries the site's access-denial
//! phrase is classified as a fetch failure even though the transport
//! succeeded.
//!
//! No retries happen here: a failed fetch ends the cycle and the next
//! scheduled cycle is the retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

/// Phrase Njuskalo serves (with HTTP 200) when it blocks a request it
/// considers to come from an anonymous or proxy network.
pub const ACCESS_DENIED_MARKER: &str =
    "You are attempting to access Njuskalo using an anonymous private/proxy network";

/// Delay applied before every request.
const PRE_REQUEST_DELAY: Duration = Duration::from_secs(1);

// Header set mimicking a desktop Chrome navigation. Accept-Encoding is left
// to reqwest so response decompression stays automatic.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
         image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("Accept-Language", "en-US,en;q=0.9,hr;q=0.8"),
    ("DNT", "1"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Cache-Control", "max-age=0"),
    ("Referer", "https://www.njuskalo.hr/"),
];

/// Fetch failure taxonomy. Everything here terminates the cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("access denied by the site (anonymous/proxy network block)")]
    AccessDenied,

    #[error("empty response body from {0}")]
    EmptyBody(String),
}

/// Thin wrapper over a configured `reqwest` client.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .default_headers(browser_headers())
            .timeout(timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the listing page and return the raw markup.
    pub async fn fetch_listing_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("waiting {:?} before request", PRE_REQUEST_DELAY);
        sleep(PRE_REQUEST_DELAY).await;

        info!("🌐 HTTP GET: {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        check_body(url, &body)?;

        info!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Content-based failure classification, layered on top of transport status.
fn check_body(url: &str, body: &str) -> Result<(), FetchError> {
    if body.is_empty() {
        return Err(FetchError::EmptyBody(url.to_string()));
    }
    if body.contains(ACCESS_DENIED_MARKER) {
        return Err(FetchError::AccessDenied);
    }
    Ok(())
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len());
    for &(name, value) in BROWSER_HEADERS {
        let name: HeaderName = name.parse().expect("static header name");
        let value = HeaderValue::from_static(value);
        headers.insert(name, value);
    }
    headers
}
