use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use flatscout_core::{ExtractConfig, FetchConfig, ListingExtractor, OutputFormat, SeenListings};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod echo;
mod poll;

use poll::{Poller, Source};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listings page polled when no other source is given
const DEFAULT_PAGE_URL: &str = "https://www.wg-gesucht.de/wg-zimmer-in-Berlin.8.0.1.0.html";

/// Poll a listings page and print flats that were not there last time
#[derive(Parser, Debug)]
#[command(name = "flatscout")]
#[command(version, about = "Poll a listings page and print new flats", long_about = None)]
struct Args {
    /// Listings page to poll
    #[arg(long, env = "FLATSCOUT_URL", default_value = DEFAULT_PAGE_URL, value_name = "URL")]
    url: String,

    /// Read a local HTML file (or "-" for stdin) once instead of polling --url
    #[arg(long, value_name = "PATH")]
    file: Option<String>,

    /// Base URL for relative detail links [default: from config, else https://www.wg-gesucht.de/]
    #[arg(long, env = "FLATSCOUT_BASE_URL", value_name = "URL", value_parser = parse_base_url)]
    base_url: Option<String>,

    /// TOML file overriding the listing markers
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds between poll cycles
    #[arg(long, default_value_t = 60, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Output format for new listings (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_base_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid base URL: {}", e))?;
    if url.cannot_be_a_base() {
        return Err(format!("{} cannot be used as a base URL", value));
    }
    Ok(value.to_string())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info,flatscout=debug,flatscout_core=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

async fn run(poller: Poller, interval: Duration, once: bool) -> anyhow::Result<()> {
    let mut seen = SeenListings::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut cycle = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                cycle += 1;
                match poller.step(&mut seen).await {
                    Ok(report) => {
                        echo::print_cycle(cycle, report.listings, report.fresh.len(), report.failures);
                        if let Some(output) = poller.render(&report.fresh)? {
                            let mut stdout = io::stdout().lock();
                            stdout.write_all(output.as_bytes()).context("Failed to write output")?;
                            stdout.flush()?;
                        }
                    }
                    Err(e) if once => return Err(e),
                    Err(e) => {
                        tracing::error!(cycle, "poll cycle failed: {:#}", e);
                        echo::print_error(&format!("{:#}", e));
                    }
                }
                if once {
                    return Ok(());
                }
            }
            _ = &mut shutdown => {
                echo::print_info("Interrupted, stopping");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "flatscout", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
    }

    let config = load_config(&args)?;
    let extractor = ListingExtractor::new(&config).context("Failed to build listing extractor")?;
    tracing::debug!(base_url = %config.base_url, "extractor ready");

    let fetch = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let source = Source::from_args(args.file.as_deref(), &args.url);
    let once = args.once || !source.is_repeatable();

    if once && !args.once {
        tracing::debug!(source = %source, "input is not a URL, running a single cycle");
    } else if !once {
        echo::print_info(&format!("Polling {} every {}s", source, args.interval));
    }

    let poller = Poller::new(source, fetch, extractor, args.format);
    tracing::debug!(source = %poller.source(), "starting");

    if let Err(e) = run(poller, Duration::from_secs(args.interval), once).await {
        echo::print_warning("Cycle failed");
        return Err(e);
    }

    Ok(())
}
