//! Error types for Flatscout operations.
//!
//! This module defines the main error type [`FlatscoutError`] which covers
//! per-listing extraction failures as well as the fetching and configuration
//! errors raised around the engine.
//!
//! # Example
//!
//! ```rust
//! use flatscout_core::{FlatscoutError, Result};
//!
//! fn first_price(prices: &[f64]) -> Result<f64> {
//!     prices.first().copied().ok_or(FlatscoutError::NoContainerMatch)
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The sub-node of a listing container a record is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Price,
    Title,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingField::Price => f.write_str("price"),
            ListingField::Title => f.write_str("title"),
        }
    }
}

/// Main error type for listing extraction and polling.
///
/// The extraction variants ([`MissingField`](FlatscoutError::MissingField),
/// [`UnparsablePrice`](FlatscoutError::UnparsablePrice),
/// [`UnparsableArea`](FlatscoutError::UnparsableArea)) are always recovered
/// per container and reported next to the records that did extract.
#[derive(Error, Debug)]
pub enum FlatscoutError {
    /// The page yielded no valid listing container.
    ///
    /// This is not necessarily a failure: a page may legitimately list zero
    /// flats. Callers decide whether repeated empty cycles matter.
    #[error("No listing container matched the document")]
    NoContainerMatch,

    /// A validated container lacks its price or title node on rebuild.
    #[error("Listing container has no {field} node")]
    MissingField { field: ListingField },

    /// No digit run precedes the currency marker, or it did not parse.
    #[error("Could not parse price from {0:?}")]
    UnparsablePrice(String),

    /// No digit run precedes the area unit marker, or it did not parse.
    #[error("Could not parse area from {0:?}")]
    UnparsableArea(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("Failed to serialize listings: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Marker configuration errors.
    ///
    /// Returned when a configuration file is malformed or a marker produces
    /// an unusable pattern.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for FlatscoutError.
pub type Result<T> = std::result::Result<T, FlatscoutError>;
