use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("render failed for {url}: {reason}")]
    Render { url: String, reason: String },

    #[error("headless browser unavailable: {reason}")]
    RendererUnavailable { reason: String },
}
