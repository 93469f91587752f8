use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

/// Black-box capability: navigate a URL in a full browser engine and return
/// the final document markup once scripts have run.
///
/// Retailer availability widgets are increasingly populated client-side, so
/// a plain GET sees an empty shell. The fetcher and retry logic only depend
/// on this trait, which keeps them testable without a real browser.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Renders `url` and returns the resulting markup.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Render`] — the browser ran but navigation failed.
    /// - [`FetchError::RendererUnavailable`] — the browser could not be
    ///   started at all.
    async fn render(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageRenderer`] backed by a local Chromium-family binary in headless
/// mode, one short-lived process per navigation.
///
/// No cookie or session state survives between navigations; each check
/// starts from a cold profile.
pub struct HeadlessBrowser {
    binary: PathBuf,
    /// Same spoofed user agent as the plain fetcher.
    user_agent: String,
    timeout_secs: u64,
}

impl HeadlessBrowser {
    #[must_use]
    pub fn new(binary: PathBuf, user_agent: &str, timeout_secs: u64) -> Self {
        Self {
            binary,
            user_agent: user_agent.to_owned(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl PageRenderer for HeadlessBrowser {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let run = tokio::process::Command::new(&self.binary)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg(format!("--user-agent={}", self.user_agent))
            .arg("--dump-dom")
            .arg(url)
            .stdin(Stdio::null())
            .output();

        let output = tokio::time::timeout(Duration::from_secs(self.timeout_secs), run)
            .await
            .map_err(|_| FetchError::Render {
                url: url.to_owned(),
                reason: format!("renderer timed out after {}s", self.timeout_secs),
            })?
            .map_err(|e| FetchError::RendererUnavailable {
                reason: format!("{}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::Render {
                url: url.to_owned(),
                reason: format!(
                    "renderer exited with {}: {}",
                    output.status,
                    stderr.lines().last().unwrap_or("").trim()
                ),
            });
        }

        let markup = String::from_utf8_lossy(&output.stdout).into_owned();
        if markup.trim().is_empty() {
            return Err(FetchError::Render {
                url: url.to_owned(),
                reason: "renderer produced an empty document".to_owned(),
            });
        }

        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_renderer_unavailable() {
        let browser = HeadlessBrowser::new(
            PathBuf::from("/nonexistent/headless-browser"),
            "test-agent/1.0",
            5,
        );
        let result = browser.render("https://shop.example.com/p/1").await;
        assert!(
            matches!(result, Err(FetchError::RendererUnavailable { .. })),
            "expected RendererUnavailable, got: {result:?}"
        );
    }

    // `echo` prints its arguments and exits 0, which stands in for a browser
    // that dumps the DOM to stdout.
    #[tokio::test]
    async fn captures_stdout_as_markup() {
        let browser = HeadlessBrowser::new(PathBuf::from("echo"), "test-agent/1.0", 5);
        let markup = browser
            .render("https://shop.example.com/p/1")
            .await
            .expect("echo-backed render should succeed");
        assert!(markup.contains("https://shop.example.com/p/1"));
        assert!(markup.contains("--user-agent=test-agent/1.0"));
    }
}
