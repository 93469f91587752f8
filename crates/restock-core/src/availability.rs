use serde::{Deserialize, Serialize};

/// Result of checking one (product, retailer) pair.
///
/// One record is produced per product per poll cycle and never mutated
/// afterwards. `product_title` and `availability_description` are `None`
/// when the page could not be fetched or the expected node was missing.
/// Callers must be able to tell "not found" apart from "found empty text",
/// so absent fields are never collapsed to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// `true` only when both descriptive fields were extracted and the
    /// description differs from the retailer's unavailable sentinel.
    pub available: bool,
    pub company: String,
    pub product_title: Option<String>,
    pub availability_description: Option<String>,
    /// The fetched URL, always present even on total failure.
    pub url: String,
}

impl Availability {
    /// Degraded record for a failed fetch or extraction: not available,
    /// descriptive fields absent, company and URL still populated.
    #[must_use]
    pub fn unavailable(company: &str, url: &str) -> Self {
        Self {
            available: false,
            company: company.to_owned(),
            product_title: None,
            availability_description: None,
            url: url.to_owned(),
        }
    }
}
