//! Typed listing records and how they are built from a container.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ExtractConfig, Markers};
use crate::error::ListingField;
use crate::matcher::ListingMatcher;
use crate::parse::Element;
use crate::{FlatscoutError, Result};

/// One flat advertisement.
///
/// `url` is the listing's identity: two records with the same URL are the
/// same listing whatever their other fields say. It may be empty when the
/// title carries no link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Rent in the page's currency.
    pub price: f64,
    /// Size in square meters.
    pub area: f64,
    /// Flattened text of the title link.
    pub title: String,
    /// Absolute detail URL, or empty.
    pub url: String,
}

/// Builds [`ListingRecord`]s from validated listing containers.
///
/// The price and area patterns are compiled once from the configured markers.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    matcher: ListingMatcher,
    price_pattern: Regex,
    area_pattern: Regex,
    base_url: String,
}

impl RecordBuilder {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let Markers { currency, area_unit, .. } = &config.markers;

        Ok(Self {
            matcher: ListingMatcher::new(config.markers.clone()),
            price_pattern: digits_before(currency)?,
            area_pattern: digits_before(area_unit)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Builds a record from one listing container.
    ///
    /// Price and area are both read from the price anchor's text, where the
    /// site prints them side by side. The container is only read, so building
    /// the same container twice yields equal records.
    ///
    /// # Errors
    ///
    /// - [`FlatscoutError::MissingField`] if the price or title anchor is gone.
    /// - [`FlatscoutError::UnparsablePrice`] / [`FlatscoutError::UnparsableArea`]
    ///   if no digits precede the currency or area marker, or they overflow.
    /// - [`FlatscoutError::MissingField`] for the title when its text is empty.
    pub fn build(&self, container: Element<'_>) -> Result<ListingRecord> {
        let price_node = self
            .matcher
            .find_price(container)
            .ok_or(FlatscoutError::MissingField { field: ListingField::Price })?;
        let title_node = self
            .matcher
            .find_title(container)
            .ok_or(FlatscoutError::MissingField { field: ListingField::Title })?;

        let price_text = price_node.text();
        let price = self.parse_price(&price_text)?;
        let area = self.parse_area(&price_text)?;

        let title = title_node.text();
        if title.is_empty() {
            return Err(FlatscoutError::MissingField { field: ListingField::Title });
        }
        let url = resolve_url(&self.base_url, title_node.attr("href").unwrap_or(""));

        Ok(ListingRecord { price, area, title, url })
    }

    /// Parses the digits immediately preceding the currency marker.
    pub fn parse_price(&self, text: &str) -> Result<f64> {
        capture_number(&self.price_pattern, text).ok_or_else(|| FlatscoutError::UnparsablePrice(text.to_string()))
    }

    /// Parses the digits immediately preceding the area unit marker.
    pub fn parse_area(&self, text: &str) -> Result<f64> {
        capture_number(&self.area_pattern, text).ok_or_else(|| FlatscoutError::UnparsableArea(text.to_string()))
    }
}

fn digits_before(marker: &str) -> Result<Regex> {
    Regex::new(&format!(r"(\d+){}", regex::escape(marker)))
        .map_err(|e| FlatscoutError::ConfigError(format!("Invalid marker {:?}: {}", marker, e)))
}

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    let digits = pattern.captures(text)?.get(1)?.as_str();
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Makes a detail link absolute.
///
/// Empty links stay empty. Links that already mention `http` are returned as
/// they are. Protocol-relative links (`//host/path`) take the base URL's
/// scheme; anything else is prefixed with `base_url`.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    if href.is_empty() || href.contains("http") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = base_url.split_once("://").map_or("https", |(scheme, _)| scheme);
        return format!("{}://{}", scheme, rest);
    }

    match (base_url.ends_with('/'), href.strip_prefix('/')) {
        (true, Some(rest)) => format!("{}{}", base_url, rest),
        _ => format!("{}{}", base_url, href),
    }
}
