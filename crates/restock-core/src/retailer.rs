use serde::{Deserialize, Serialize};

/// Static extraction configuration for one retailer.
///
/// Availability checks are driven entirely by this table: the selectors
/// locate the title and stock-status nodes, and `unavailable_marker` is the
/// exact text (case- and punctuation-sensitive) the retailer renders for an
/// out-of-stock product. Adding a retailer means adding a [`Retailer`]
/// variant and a `FieldMap` row here, not a new code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    /// Retailer label carried into `Availability::company`.
    pub company: &'static str,
    /// CSS selector for the product-title node.
    pub title_selector: &'static str,
    /// CSS selector for the stock-status node.
    pub availability_selector: &'static str,
    /// Exact sentinel text meaning out-of-stock. Never fuzzy-matched.
    pub unavailable_marker: &'static str,
    /// Product URL template; `{}` is replaced by the product id or path.
    pub url_template: &'static str,
}

impl FieldMap {
    /// Resolve the full product URL for a product id or path.
    #[must_use]
    pub fn product_url(&self, product: &str) -> String {
        self.url_template.replacen("{}", product, 1)
    }
}

const AMAZON_CA: FieldMap = FieldMap {
    company: "Amazon Canada",
    title_selector: "#productTitle",
    availability_selector: "#availability span",
    unavailable_marker: "Currently unavailable.",
    url_template: "https://www.amazon.ca/gp/product/{}",
};

const WALMART_CA: FieldMap = FieldMap {
    company: "Walmart Canada",
    title_selector: r#"[data-automation="product-title"]"#,
    availability_selector: r#"[data-automation="online-only-label"]"#,
    unavailable_marker: "Out of stock online",
    url_template: "https://www.walmart.ca/{}",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Retailer {
    AmazonCa,
    WalmartCa,
}

impl Retailer {
    pub const ALL: [Retailer; 2] = [Retailer::AmazonCa, Retailer::WalmartCa];

    #[must_use]
    pub fn field_map(self) -> &'static FieldMap {
        match self {
            Retailer::AmazonCa => &AMAZON_CA,
            Retailer::WalmartCa => &WALMART_CA,
        }
    }
}

impl std::fmt::Display for Retailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Retailer::AmazonCa => write!(f, "amazon-ca"),
            Retailer::WalmartCa => write!(f, "walmart-ca"),
        }
    }
}
