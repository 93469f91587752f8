//! Field extraction from retailer product pages.
//!
//! A single parameterized extractor driven by each retailer's
//! [`FieldMap`]: retailers differ only in selectors and sentinel text,
//! never in code path.

use scraper::{Html, Selector};
use thiserror::Error;

use restock_core::{Availability, FieldMap};

use crate::normalize::normalize_text;

/// Why a well-formed page still yielded no fields. Contained entirely
/// within this module; callers only ever see a degraded [`Availability`].
#[derive(Debug, Error)]
enum ExtractError {
    #[error("selector {selector:?} did not parse: {reason}")]
    BadSelector { selector: String, reason: String },

    #[error("no node matched selector {selector:?}")]
    NodeMissing { selector: String },
}

/// Builds an [`Availability`] record from fetched markup.
///
/// Total function: every failure mode degrades to an `available = false`
/// record with descriptive fields absent rather than propagating. `None`
/// markup means retrieval already failed upstream; a markup structure
/// change that removes a selector target lands in the same place. Both
/// are logged, and both suppress notification downstream.
#[must_use]
pub fn extract_availability(markup: Option<&str>, map: &FieldMap, url: &str) -> Availability {
    let Some(markup) = markup else {
        tracing::warn!(company = map.company, %url, "no markup to extract from");
        return Availability::unavailable(map.company, url);
    };

    match try_extract(markup, map) {
        Ok((product_title, availability_description)) => {
            let available = availability_description != map.unavailable_marker;
            Availability {
                available,
                company: map.company.to_owned(),
                product_title: Some(product_title),
                availability_description: Some(availability_description),
                url: url.to_owned(),
            }
        }
        Err(err) => {
            tracing::error!(company = map.company, %url, error = %err, "extraction failed");
            Availability::unavailable(map.company, url)
        }
    }
}

fn try_extract(markup: &str, map: &FieldMap) -> Result<(String, String), ExtractError> {
    let document = Html::parse_document(markup);
    let title = select_text(&document, map.title_selector)?;
    let description = select_text(&document, map.availability_selector)?;
    Ok((title, description))
}

/// Text of the first node matching `selector`, normalized to one line.
fn select_text(document: &Html, selector: &str) -> Result<String, ExtractError> {
    let parsed = Selector::parse(selector).map_err(|e| ExtractError::BadSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })?;

    let node = document
        .select(&parsed)
        .next()
        .ok_or_else(|| ExtractError::NodeMissing {
            selector: selector.to_owned(),
        })?;

    Ok(normalize_text(&node.text().collect::<String>()))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
