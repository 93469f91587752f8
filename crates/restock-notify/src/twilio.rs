//! SMS dispatch through the Twilio Messages API.

use async_trait::async_trait;
use reqwest::Client;

use restock_core::{Availability, TwilioConfig};

use crate::error::NotifyError;
use crate::{build_alert_message, Notifier};

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// [`Notifier`](crate::Notifier) that delivers the update as a single SMS.
pub struct TwilioSms {
    client: Client,
    config: TwilioConfig,
    api_base: String,
}

impl TwilioSms {
    /// Creates an SMS notifier against the production Twilio API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(config: TwilioConfig) -> Result<Self, NotifyError> {
        Self::with_api_base(config, TWILIO_API_BASE)
    }

    /// Same as [`Self::new`] with an overridable API origin, so delivery can
    /// be exercised against a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn with_api_base(config: TwilioConfig, api_base: &str) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            config,
            api_base: api_base.trim_end_matches('/').to_owned(),
        })
    }

    async fn send_sms(&self, body: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.config.account_sid
        );

        let form = [
            ("To", self.config.to.as_str()),
            ("From", self.config.from.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Truncated; enough to diagnose auth and number issues.
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %self.config.to, "SMS update sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TwilioSms {
    async fn notify(&self, records: &[Availability]) -> Result<(), NotifyError> {
        if records.is_empty() {
            return Ok(());
        }
        self.send_sms(&build_alert_message(records)).await
    }
}
