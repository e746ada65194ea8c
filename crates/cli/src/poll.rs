use std::fmt;

use anyhow::Context;
use flatscout_core::{
    Document, FetchConfig, JsonConfig, ListingExtractor, ListingRecord, OutputFormat, SeenListings, TextConfig,
    convert_to_json, convert_to_text, fetch_file, fetch_stdin, fetch_url,
};

/// Where each cycle reads its HTML from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(String),
    Stdin,
}

impl Source {
    /// Picks the source from the `--file` and `--url` arguments; a file wins.
    pub fn from_args(file: Option<&str>, url: &str) -> Self {
        match file {
            Some("-") => Self::Stdin,
            Some(path) => Self::File(path.to_string()),
            None => Self::Url(url.to_string()),
        }
    }

    /// Only a URL can change between cycles; files and stdin are read once.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    async fn read(&self, fetch: &FetchConfig) -> flatscout_core::Result<String> {
        match self {
            Self::Url(url) => fetch_url(url, fetch).await,
            Self::File(path) => fetch_file(path),
            Self::Stdin => fetch_stdin(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "file {}", path),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

/// What one poll cycle produced
#[derive(Debug)]
pub struct CycleReport {
    /// Records extracted this cycle
    pub listings: usize,
    /// Containers skipped because a record could not be built
    pub failures: usize,
    /// Records whose URL was not seen in the previous cycle, by price
    pub fresh: Vec<ListingRecord>,
}

/// Fetches, extracts and compares one page per cycle.
///
/// The poller itself keeps no cycle state; the caller owns the
/// [`SeenListings`] and hands it to every [`step`](Poller::step).
pub struct Poller {
    source: Source,
    fetch: FetchConfig,
    extractor: ListingExtractor,
    format: OutputFormat,
}

impl Poller {
    pub fn new(source: Source, fetch: FetchConfig, extractor: ListingExtractor, format: OutputFormat) -> Self {
        Self { source, fetch, extractor, format }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Runs one cycle.
    ///
    /// On error `seen` is left untouched, so a failed fetch does not make
    /// every listing look new on the next cycle.
    pub async fn step(&self, seen: &mut SeenListings) -> anyhow::Result<CycleReport> {
        let html = self
            .source
            .read(&self.fetch)
            .await
            .with_context(|| format!("Failed to read {}", self.source))?;
        let doc = Document::parse(&html).context("Failed to parse HTML")?;

        let extraction = self.extractor.extract(&doc);
        if let Err(e) = extraction.ensure_matched() {
            tracing::warn!(source = %self.source, "{}", e);
        }

        let listings = extraction.records.len();
        let failures = extraction.failures.len();
        let fresh = seen.observe(extraction.records);

        Ok(CycleReport { listings, failures, fresh })
    }

    /// Renders new listings for stdout.
    ///
    /// Text output is skipped for cycles without new listings; JSON always
    /// yields one document per cycle.
    pub fn render(&self, fresh: &[ListingRecord]) -> anyhow::Result<Option<String>> {
        match self.format {
            OutputFormat::Text if fresh.is_empty() => Ok(None),
            OutputFormat::Text => Ok(Some(convert_to_text(fresh, &TextConfig { include_header: true }))),
            OutputFormat::Json => {
                let json = convert_to_json(fresh, &JsonConfig::default()).context("Failed to render JSON")?;
                Ok(Some(format!("{}\n", json)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatscout_core::ExtractConfig;

    fn poller(format: OutputFormat) -> Poller {
        let extractor = ListingExtractor::new(&ExtractConfig::default()).unwrap();
        Poller::new(Source::Stdin, FetchConfig::default(), extractor, format)
    }

    fn record(url: &str) -> ListingRecord {
        ListingRecord { price: 410.0, area: 16.0, title: "Zimmer".to_string(), url: url.to_string() }
    }

    #[test]
    fn test_source_from_args() {
        assert_eq!(Source::from_args(Some("-"), "https://x.org"), Source::Stdin);
        assert_eq!(Source::from_args(Some("a.html"), "https://x.org"), Source::File("a.html".to_string()));
        assert_eq!(Source::from_args(None, "https://x.org"), Source::Url("https://x.org".to_string()));
        assert!(!Source::Stdin.is_repeatable());
    }

    #[test]
    fn test_render_text_skips_empty_cycles() {
        assert!(poller(OutputFormat::Text).render(&[]).unwrap().is_none());

        let text = poller(OutputFormat::Text).render(&[record("a")]).unwrap().unwrap();
        assert!(text.starts_with("1 new listing\n"));
    }

    #[test]
    fn test_render_json_always() {
        let json = poller(OutputFormat::Json).render(&[]).unwrap().unwrap();
        assert_eq!(json, "{\"count\":0,\"listings\":[]}\n");
    }

    #[tokio::test]
    async fn test_failed_read_keeps_previous() {
        let extractor = ListingExtractor::new(&ExtractConfig::default()).unwrap();
        let poller = Poller::new(
            Source::File("/nonexistent/listings.html".to_string()),
            FetchConfig::default(),
            extractor,
            OutputFormat::Text,
        );
        let mut seen = SeenListings::new();
        seen.observe(vec![record("a")]);

        assert!(poller.step(&mut seen).await.is_err());
        assert_eq!(seen.previous().len(), 1);
    }
}
