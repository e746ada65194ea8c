use crate::record::ListingRecord;

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Include a header line with the listing count
    pub include_header: bool,
}

/// Plain text formatter for listing records
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, records: &[ListingRecord]) -> String {
        convert_to_text(records, &self.config)
    }
}

/// Render listings as text, one block per listing
///
/// Each block is the title on one line, then size and rent, then the link
/// when there is one.
pub fn convert_to_text(records: &[ListingRecord], config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(records.len()));
        output.push_str("\n\n");
    }

    let blocks: Vec<String> = records.iter().map(format_listing).collect();
    output.push_str(&blocks.join("\n\n"));

    if !records.is_empty() {
        output.push('\n');
    }
    output
}

fn format_listing(record: &ListingRecord) -> String {
    let mut block = format!("{}\n  {}m² {}€", record.title, record.area, record.price);
    if !record.url.is_empty() {
        block.push_str("\n  ");
        block.push_str(&record.url);
    }
    block
}

fn generate_header(count: usize) -> String {
    match count {
        1 => "1 new listing".to_string(),
        n => format!("{} new listings", n),
    }
}
