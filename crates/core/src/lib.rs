pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod matcher;
pub mod parse;
pub mod record;

pub use config::{DEFAULT_BASE_URL, ExtractConfig, Markers};
pub use dedup::{SeenListings, uncached};
pub use error::{FlatscoutError, ListingField, Result};
pub use extract::{Extraction, ExtractionFailure, ListingExtractor, extract_listings, sort_by_price, sort_listings};
pub use fetch::{fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_url};
pub use formatters::{JsonConfig, JsonFormatter, OutputFormat, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_text};
#[doc(hidden)]
pub use matcher::{ListingMatcher, find_all, find_first};
pub use parse::{Document, Element};
pub use record::{ListingRecord, RecordBuilder, resolve_url};
