use crate::config::ExtractConfig;
use crate::matcher::ListingMatcher;
use crate::parse::Document;
use crate::record::{ListingRecord, RecordBuilder};
use crate::{FlatscoutError, Result};

use std::cmp::Ordering;

/// Maximum characters of container text kept as failure context
const CONTEXT_CHARS: usize = 120;

/// A container that matched but could not be turned into a record
#[derive(Debug)]
pub struct ExtractionFailure {
    /// Position of the container in document order
    pub index: usize,
    /// Why the record could not be built
    pub error: FlatscoutError,
    /// Leading text of the container, for diagnostics
    pub context: String,
}

/// The result of running extraction over one document
#[derive(Debug, Default)]
pub struct Extraction {
    /// Successfully built records, ascending by price
    pub records: Vec<ListingRecord>,
    /// Per-container failures, in document order
    pub failures: Vec<ExtractionFailure>,
    /// Number of containers the matcher accepted
    pub containers: usize,
}

impl Extraction {
    /// Fails with [`FlatscoutError::NoContainerMatch`] if no container matched.
    ///
    /// An empty page is not an error for the engine itself; this lets callers
    /// opt in to treating it as one.
    pub fn ensure_matched(&self) -> Result<()> {
        if self.containers == 0 { Err(FlatscoutError::NoContainerMatch) } else { Ok(()) }
    }
}

/// Finds listing containers and builds records from them.
///
/// The extractor holds no state between calls; one instance can be reused
/// for every poll cycle.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    matcher: ListingMatcher,
    builder: RecordBuilder,
}

impl ListingExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self { matcher: ListingMatcher::new(config.markers.clone()), builder: RecordBuilder::new(config)? })
    }

    /// Extract all listings from a document
    ///
    /// This is the main entry point. It:
    /// 1. Finds every listing container
    /// 2. Builds a record from each, recording failures instead of stopping
    /// 3. Sorts the records by price
    pub fn extract(&self, doc: &Document) -> Extraction {
        let containers = self.matcher.find_containers(doc.root());
        let mut extraction = Extraction { containers: containers.len(), ..Default::default() };

        for (index, container) in containers.into_iter().enumerate() {
            match self.builder.build(container) {
                Ok(record) => extraction.records.push(record),
                Err(error) => {
                    let context = truncate_chars(&container.text(), CONTEXT_CHARS);
                    tracing::warn!(index, %error, context = %context, "skipping listing container");
                    extraction.failures.push(ExtractionFailure { index, error, context });
                }
            }
        }

        sort_by_price(&mut extraction.records);

        tracing::debug!(
            containers = extraction.containers,
            records = extraction.records.len(),
            failures = extraction.failures.len(),
            "extracted listings"
        );

        extraction
    }
}

/// Parse `html` and extract its listings in one step.
pub fn extract_listings(html: &str, config: &ExtractConfig) -> Result<Extraction> {
    let doc = Document::parse(html)?;
    let extractor = ListingExtractor::new(config)?;
    Ok(extractor.extract(&doc))
}

/// Stable sort of records by an arbitrary comparison.
pub fn sort_listings<F>(records: &mut [ListingRecord], compare: F)
where
    F: FnMut(&ListingRecord, &ListingRecord) -> Ordering,
{
    records.sort_by(compare);
}

/// Sorts records ascending by price; equal prices keep their order.
pub fn sort_by_price(records: &mut [ListingRecord]) {
    sort_listings(records, |a, b| a.price.total_cmp(&b.price));
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: f64, url: &str) -> ListingRecord {
        ListingRecord { price, area: 20.0, title: format!("Zimmer {}", url), url: url.to_string() }
    }

    fn listing(price_text: &str, href: &str) -> String {
        format!(
            r#"<div class="list-details-ad-border">
                <h3 class="headline headline-list-view noprint"><a class="detailansicht" href="{href}">Zimmer {href}</a></h3>
                <a class="detailansicht" href="{href}">{price_text}</a>
            </div>"#
        )
    }

    #[test]
    fn test_sort_by_price_is_stable() {
        let mut records = vec![record(300.0, "a"), record(300.0, "b"), record(100.0, "c")];
        sort_by_price(&mut records);

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_listings_custom_order() {
        let mut records = vec![record(100.0, "a"), record(500.0, "b")];
        sort_listings(&mut records, |a, b| b.price.total_cmp(&a.price));
        assert_eq!(records[0].url, "b");
    }

    #[test]
    fn test_malformed_container_is_skipped() {
        let html = format!(
            "<body>{}{}{}</body>",
            listing("22m² 700€", "one.html"),
            listing("k.A.€ 15m²", "two.html"),
            listing("18m² 450€", "three.html")
        );
        let extraction = extract_listings(&html, &ExtractConfig::with_base_url("https://example.org/")).unwrap();

        assert_eq!(extraction.containers, 3);
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(extraction.failures[0].index, 1);
        assert!(matches!(extraction.failures[0].error, FlatscoutError::UnparsablePrice(_)));
        assert!(extraction.failures[0].context.contains("two.html"));
        assert_eq!(extraction.records[0].url, "https://example.org/three.html");
        assert_eq!(extraction.records[1].url, "https://example.org/one.html");
    }

    #[test]
    fn test_empty_document() {
        let extraction = extract_listings("", &ExtractConfig::default()).unwrap();

        assert!(extraction.records.is_empty());
        assert!(extraction.failures.is_empty());
        assert!(matches!(extraction.ensure_matched(), Err(FlatscoutError::NoContainerMatch)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Zimmer", 10), "Zimmer");
        assert_eq!(truncate_chars("Größe", 3), "Grö…");
    }
}
