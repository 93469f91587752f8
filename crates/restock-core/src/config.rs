use crate::app_config::{AppConfig, TwilioConfig};
use crate::ConfigError;

/// User agent sent by both fetch modes when `RESTOCK_USER_AGENT` is unset.
/// A desktop Chrome profile; retailer storefronts reject obvious bots.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or partially configured.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files — useful for testing or when the
/// caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or partially configured.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("RESTOCK_LOG_LEVEL", "info");
    let watchlist_path = PathBuf::from(or_default(
        "RESTOCK_WATCHLIST_PATH",
        "./config/watchlist.yaml",
    ));
    let user_agent = or_default("RESTOCK_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("RESTOCK_REQUEST_TIMEOUT_SECS", "30")?;
    let get_retries = parse_u32("RESTOCK_GET_RETRIES", "5")?;
    if get_retries == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RESTOCK_GET_RETRIES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let get_retry_delay_secs = parse_u64("RESTOCK_GET_RETRY_DELAY_SECS", "1")?;
    let poll_interval_secs = parse_u64("RESTOCK_POLL_INTERVAL_SECS", "30")?;
    let inter_product_delay_ms = parse_u64("RESTOCK_INTER_PRODUCT_DELAY_MS", "250")?;

    let browser_path = lookup("RESTOCK_BROWSER_PATH").ok().map(PathBuf::from);

    let twilio = build_twilio_config(&lookup)?;

    Ok(AppConfig {
        log_level,
        watchlist_path,
        user_agent,
        request_timeout_secs,
        get_retries,
        get_retry_delay_secs,
        poll_interval_secs,
        inter_product_delay_ms,
        browser_path,
        twilio,
    })
}

/// SMS is opt-in: absent credentials disable it, but a partial set is a
/// configuration mistake and rejected rather than silently ignored.
fn build_twilio_config<F>(lookup: &F) -> Result<Option<TwilioConfig>, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let vars = [
        "RESTOCK_TWILIO_ACCOUNT_SID",
        "RESTOCK_TWILIO_AUTH_TOKEN",
        "RESTOCK_TWILIO_FROM",
        "RESTOCK_TWILIO_TO",
    ];
    let values: Vec<Option<String>> = vars.iter().map(|v| lookup(v).ok()).collect();

    let set_count = values.iter().filter(|v| v.is_some()).count();
    if set_count == 0 {
        return Ok(None);
    }
    if set_count < vars.len() {
        let missing: Vec<&str> = vars
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        return Err(ConfigError::Validation(format!(
            "partial Twilio configuration; missing: {}",
            missing.join(", ")
        )));
    }

    let mut values = values.into_iter().map(|v| v.unwrap_or_default());
    Ok(Some(TwilioConfig {
        account_sid: values.next().unwrap_or_default(),
        auth_token: values.next().unwrap_or_default(),
        from: values.next().unwrap_or_default(),
        to: values.next().unwrap_or_default(),
    }))
}
