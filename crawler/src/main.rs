use clap::Parser;
use crawler::{normalize_url, CrawlConfig, Crawler, HttpFetcher, UrlPolicy, MAX_DEPTH};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use tse_common::exit::Failure;
use tse_common::{CrawlMeta, PageStore};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl one site from a seed URL into a page directory")]
struct Cli {
    /// URL to start from; must be internal
    seed_url: String,
    /// Directory to write pages into (created if missing)
    page_directory: String,
    /// Maximum link depth from the seed, 0 to 10
    #[arg(value_parser = clap::value_parser!(u32).range(0..=MAX_DEPTH as i64))]
    max_depth: u32,
    /// Origin that counts as internal; defaults to the seed's origin
    #[arg(long)]
    origin: Option<String>,
    /// Fetches in flight at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    /// Pause before each fetch, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "tse-crawler/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Cli::parse();

    let Some(seed) = normalize_url(&args.seed_url) else {
        eprintln!("Error: could not normalize seed URL {}", args.seed_url);
        return Failure::InvalidInput.into();
    };
    let policy = match &args.origin {
        Some(origin) => match UrlPolicy::new(origin) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e}");
                return Failure::InvalidInput.into();
            }
        },
        None => UrlPolicy::for_seed(&seed),
    };
    if !policy.is_internal(&seed) {
        eprintln!("Error: seed URL {seed} must be internal");
        return Failure::InvalidInput.into();
    }

    let store = PageStore::new(&args.page_directory);
    if let Err(e) = store.init(&CrawlMeta::new(seed.as_str(), args.max_depth)) {
        eprintln!("Error: could not initialize {}: {e:#}", args.page_directory);
        return Failure::Io.into();
    }

    let fetcher = match HttpFetcher::new(&args.user_agent, Duration::from_secs(args.timeout_secs)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Failure::Io.into();
        }
    };
    let config = CrawlConfig {
        max_depth: args.max_depth,
        concurrency: args.concurrency,
        delay: Duration::from_millis(args.delay_ms),
    };
    let stats = match Crawler::new(config, policy, store, fetcher) {
        Ok(crawler) => crawler.crawl(seed.as_str()).await,
        Err(e) => Err(e),
    };
    match stats {
        Ok(stats) => {
            tracing::info!(saved = stats.saved, output = %args.page_directory, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            Failure::Io.into()
        }
    }
}
