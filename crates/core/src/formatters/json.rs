use crate::Result;
use crate::record::ListingRecord;
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Number of listings in this output
    pub count: usize,
    /// The listings, in the order given
    pub listings: &'a [ListingRecord],
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// JSON formatter for listing records
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, records: &[ListingRecord]) -> Result<String> {
        convert_to_json(records, &self.config)
    }
}

/// Serialize listings into a JSON document
pub fn convert_to_json(records: &[ListingRecord], config: &JsonConfig) -> Result<String> {
    let output = JsonOutput { count: records.len(), listings: records };

    let json = if config.pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    Ok(json)
}
