pub mod app_config;
pub mod availability;
pub mod config;
pub mod error;
pub mod retailer;
pub mod watchlist;

pub use app_config::{AppConfig, TwilioConfig};
pub use availability::Availability;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use retailer::{FieldMap, Retailer};
pub use watchlist::{load_watchlist, TrackedProduct, WatchlistFile};
