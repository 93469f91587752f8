use std::path::PathBuf;

/// Twilio SMS credentials and endpoints. Either all four variables are set
/// or SMS dispatch is disabled entirely.
#[derive(Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub to: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub watchlist_path: PathBuf,
    /// Browser-profile user agent, shared by the plain fetcher and the
    /// headless renderer so bot detection sees one consistent client.
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Total fetch attempts per page, not additional retries.
    pub get_retries: u32,
    pub get_retry_delay_secs: u64,
    pub poll_interval_secs: u64,
    pub inter_product_delay_ms: u64,
    /// Headless browser binary. Unset means plain HTTP fetch only.
    pub browser_path: Option<PathBuf>,
    pub twilio: Option<TwilioConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("watchlist_path", &self.watchlist_path)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("get_retries", &self.get_retries)
            .field("get_retry_delay_secs", &self.get_retry_delay_secs)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("inter_product_delay_ms", &self.inter_product_delay_ms)
            .field("browser_path", &self.browser_path)
            .field("twilio", &self.twilio.as_ref().map(|_| "[configured]"))
            .finish()
    }
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[redacted]")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
