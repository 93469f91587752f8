//! Notification dispatch for availability updates.
//!
//! Callers hand over only the records that came back purchasable; every
//! dispatcher failure is an `Err` value the poll loop logs and swallows.
//! A broken SMS gateway must never abort the rest of the cycle.

pub mod desktop;
pub mod error;
pub mod twilio;

use async_trait::async_trait;

use restock_core::Availability;

pub use desktop::DesktopNotify;
pub use error::NotifyError;
pub use twilio::TwilioSms;

/// A notification channel for products that became purchasable.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one update covering all newly available records.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when delivery fails; callers log and move on.
    async fn notify(&self, records: &[Availability]) -> Result<(), NotifyError>;
}

/// Renders the combined update message sent over every channel.
///
/// One message per cycle covering all available products, each with its
/// title, status line, and direct link.
#[must_use]
pub fn build_alert_message(records: &[Availability]) -> String {
    let mut message = String::from("Restock update:\n");
    for record in records {
        let title = record.product_title.as_deref().unwrap_or("unknown");
        let status = record
            .availability_description
            .as_deref()
            .unwrap_or("unknown");
        message.push_str(&format!(
            "\n{}\nProduct:\n{title}\nStatus:\n{status}\nURL:\n{}",
            record.company, record.url
        ));
    }
    message
}

/// Fallback channel that is always available: one INFO line per record.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, records: &[Availability]) -> Result<(), NotifyError> {
        for record in records {
            tracing::info!(
                company = %record.company,
                title = record.product_title.as_deref().unwrap_or("unknown"),
                status = record.availability_description.as_deref().unwrap_or("unknown"),
                url = %record.url,
                "product available"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, status: &str) -> Availability {
        Availability {
            available: true,
            company: "Amazon Canada".to_string(),
            product_title: Some(title.to_string()),
            availability_description: Some(status.to_string()),
            url: "https://www.amazon.ca/gp/product/B08GS1N7G8".to_string(),
        }
    }

    #[test]
    fn message_lists_every_record() {
        let records = vec![record("PlayStation 5", "In Stock."), record("PS5 Headset", "Only 2 left")];
        let message = build_alert_message(&records);

        assert!(message.starts_with("Restock update:\n"));
        assert!(message.contains("PlayStation 5"));
        assert!(message.contains("PS5 Headset"));
        assert!(message.contains("Only 2 left"));
        assert!(message.contains("https://www.amazon.ca/gp/product/B08GS1N7G8"));
    }

    #[test]
    fn absent_fields_render_as_unknown() {
        let mut degraded = record("x", "y");
        degraded.product_title = None;
        degraded.availability_description = None;
        let message = build_alert_message(&[degraded]);
        assert!(message.contains("Product:\nunknown"));
        assert!(message.contains("Status:\nunknown"));
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let result = LogNotifier.notify(&[record("PlayStation 5", "In Stock.")]).await;
        assert!(result.is_ok());
    }
}
