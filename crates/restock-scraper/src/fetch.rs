use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::FetchError;
use crate::render::PageRenderer;
use crate::retry::retry_with_delay;

/// HTTP retriever for retailer product pages.
///
/// Sends a fixed browser-profile header set with every request so the two
/// retrieval modes (plain GET here, rendered fetch via [`PageRenderer`])
/// present the same client fingerprint to bot detection. All retrieval runs
/// under the same bounded fixed-delay retry policy; exhaustion returns the
/// last error as a value for the caller to convert into a degraded
/// availability record.
pub struct PageFetcher {
    client: Client,
    /// Total attempts per page, not additional retries.
    max_attempts: u32,
    /// Fixed sleep between attempts, in seconds.
    retry_delay_secs: u64,
}

/// Header set mimicking a desktop browser navigation. The user agent itself
/// is configured separately so plain and rendered fetches stay in lockstep.
fn browser_profile_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

impl PageFetcher {
    /// Creates a `PageFetcher` with configured timeout, user agent, and
    /// retry policy.
    ///
    /// `max_attempts` is the total number of tries per page; set to `1` to
    /// disable retrying. `retry_delay_secs` is the fixed sleep between
    /// attempts. Compressed bodies are decompressed transparently, so no
    /// `Accept-Encoding` header is set by hand.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(browser_profile_headers())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            retry_delay_secs,
        })
    }

    /// Fetches a page over plain HTTP, with automatic retry on any failure.
    ///
    /// Non-2xx statuses are treated as transient (bot detection answers
    /// 403/503 intermittently and then relents), so every failure except a
    /// missing renderer is retried up to the attempt bound.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] — non-2xx response after all attempts.
    /// - [`FetchError::Http`] — network, TLS, or timeout failure after all
    ///   attempts.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        retry_with_delay(self.max_attempts, self.retry_delay_secs, || {
            let url = url.to_owned();
            async move {
                tracing::info!(%url, "GET");
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        url,
                    });
                }

                tracing::info!(%url, status = status.as_u16(), "fetch OK");
                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches a fully rendered page via the given renderer, under the same
    /// retry policy as [`Self::fetch_page`].
    ///
    /// The renderer is a black box that navigates the URL in a headless
    /// browser and returns the final document markup. Rendered fetches fail
    /// transiently just like plain ones, so they get the identical bounded
    /// retry treatment; only [`FetchError::RendererUnavailable`] (the
    /// browser binary cannot be spawned at all) short-circuits.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Render`] — navigation failed after all attempts.
    /// - [`FetchError::RendererUnavailable`] — browser missing (not retried).
    pub async fn fetch_rendered(
        &self,
        renderer: &dyn PageRenderer,
        url: &str,
    ) -> Result<String, FetchError> {
        retry_with_delay(self.max_attempts, self.retry_delay_secs, || {
            tracing::info!(%url, "render");
            renderer.render(url)
        })
        .await
    }
}
