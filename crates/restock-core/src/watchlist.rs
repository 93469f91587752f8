use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::retailer::Retailer;
use crate::ConfigError;

/// One tracked product: the retailer tag picks the field map, `product` is
/// the retailer-specific identifier substituted into the URL template (an
/// ASIN for Amazon, a storefront path for Walmart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub retailer: Retailer,
    pub product: String,
    pub note: Option<String>,
}

impl TrackedProduct {
    /// Resolve the full product URL from the retailer's URL template.
    #[must_use]
    pub fn url(&self) -> String {
        self.retailer.field_map().product_url(&self.product)
    }

    /// Human-readable label for logs and summaries.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.note {
            Some(note) => format!("{} ({note})", self.product),
            None => self.product.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchlistFile {
    pub products: Vec<TrackedProduct>,
}

/// Load and validate the watchlist from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_watchlist(path: &Path) -> Result<WatchlistFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let watchlist: WatchlistFile = serde_yaml::from_str(&content)?;

    validate_watchlist(&watchlist)?;

    Ok(watchlist)
}

fn validate_watchlist(watchlist: &WatchlistFile) -> Result<(), ConfigError> {
    if watchlist.products.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist has no products".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in &watchlist.products {
        if entry.product.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "empty product identifier for retailer '{}'",
                entry.retailer
            )));
        }

        if !seen.insert((entry.retailer, entry.product.clone())) {
            return Err(ConfigError::Validation(format!(
                "duplicate watchlist entry: '{}' at {}",
                entry.product, entry.retailer
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(retailer: Retailer, product: &str) -> TrackedProduct {
        TrackedProduct {
            retailer,
            product: product.to_string(),
            note: None,
        }
    }

    #[test]
    fn parses_watchlist_yaml() {
        let yaml = r"
products:
  - retailer: amazon-ca
    product: B08GS1N7G8
    note: PS5 disc edition
  - retailer: walmart-ca
    product: en/ip/playstation-5-console/6000202198562
";
        let watchlist: WatchlistFile = serde_yaml::from_str(yaml).unwrap();
        assert!(validate_watchlist(&watchlist).is_ok());
        assert_eq!(watchlist.products.len(), 2);
        assert_eq!(watchlist.products[0].retailer, Retailer::AmazonCa);
        assert_eq!(
            watchlist.products[0].note.as_deref(),
            Some("PS5 disc edition")
        );
        assert_eq!(
            watchlist.products[1].url(),
            "https://www.walmart.ca/en/ip/playstation-5-console/6000202198562"
        );
    }

    #[test]
    fn rejects_unknown_retailer_tag() {
        let yaml = r"
products:
  - retailer: bestbuy-ca
    product: '12345'
";
        let result: Result<WatchlistFile, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err(), "unknown retailer tag should fail to parse");
    }

    #[test]
    fn rejects_empty_watchlist() {
        let watchlist = WatchlistFile { products: vec![] };
        let err = validate_watchlist(&watchlist).unwrap_err();
        assert!(err.to_string().contains("no products"));
    }

    #[test]
    fn rejects_blank_product_identifier() {
        let watchlist = WatchlistFile {
            products: vec![entry(Retailer::AmazonCa, "  ")],
        };
        let err = validate_watchlist(&watchlist).unwrap_err();
        assert!(err.to_string().contains("empty product identifier"));
    }

    #[test]
    fn rejects_duplicate_entries() {
        let watchlist = WatchlistFile {
            products: vec![
                entry(Retailer::AmazonCa, "B08GS1N7G8"),
                entry(Retailer::AmazonCa, "B08GS1N7G8"),
            ],
        };
        let err = validate_watchlist(&watchlist).unwrap_err();
        assert!(err.to_string().contains("duplicate watchlist entry"));
    }

    #[test]
    fn same_product_at_different_retailers_is_allowed() {
        let watchlist = WatchlistFile {
            products: vec![
                entry(Retailer::AmazonCa, "B08GS1N7G8"),
                entry(Retailer::WalmartCa, "B08GS1N7G8"),
            ],
        };
        assert!(validate_watchlist(&watchlist).is_ok());
    }

    #[test]
    fn load_watchlist_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("watchlist.yaml");
        assert!(
            path.exists(),
            "watchlist.yaml missing at {path:?}, required for this test"
        );
        let result = load_watchlist(&path);
        assert!(result.is_ok(), "failed to load watchlist.yaml: {result:?}");
        assert!(!result.unwrap().products.is_empty());
    }

    #[test]
    fn label_includes_note_when_present() {
        let mut tracked = entry(Retailer::AmazonCa, "B08GS1N7G8");
        assert_eq!(tracked.label(), "B08GS1N7G8");
        tracked.note = Some("PS5".to_string());
        assert_eq!(tracked.label(), "B08GS1N7G8 (PS5)");
    }
}
