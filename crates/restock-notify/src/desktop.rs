//! Desktop notifications via `notify-send`.

use async_trait::async_trait;

use restock_core::Availability;

use crate::error::NotifyError;
use crate::{build_alert_message, Notifier};

/// [`Notifier`](crate::Notifier) that pops a desktop notification through
/// the freedesktop `notify-send` tool. Useful when the tracker runs on the
/// machine you are sitting at; silently unavailable on headless hosts,
/// which the caller treats like any other dispatch failure.
pub struct DesktopNotify {
    summary: String,
}

impl DesktopNotify {
    #[must_use]
    pub fn new() -> Self {
        Self {
            summary: "Available products found!".to_owned(),
        }
    }
}

impl Default for DesktopNotify {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotify {
    async fn notify(&self, records: &[Availability]) -> Result<(), NotifyError> {
        if records.is_empty() {
            return Ok(());
        }

        let message = build_alert_message(records);
        let status = tokio::process::Command::new("notify-send")
            .arg(&self.summary)
            .arg(&message)
            .status()
            .await
            .map_err(|e| NotifyError::Command {
                reason: format!("notify-send: {e}"),
            })?;

        if !status.success() {
            return Err(NotifyError::Command {
                reason: format!("notify-send exited with {status}"),
            });
        }

        Ok(())
    }
}
