use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("notification command failed: {reason}")]
    Command { reason: String },
}
