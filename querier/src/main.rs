use clap::Parser;
use querier::Querier;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use tse_common::exit::Failure;
use tse_common::{Index, IndexError, PageStore};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer boolean keyword queries read from stdin")]
struct Args {
    /// Directory produced by the crawler
    page_directory: String,
    /// Index file produced by the indexer
    index_filename: String,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let pages = PageStore::new(&args.page_directory);
    if !pages.validate() {
        eprintln!("Error: {} is not a crawler page directory", args.page_directory);
        return Failure::InvalidInput.into();
    }
    match pages.read_meta() {
        Ok(meta) => tracing::info!(seed = %meta.seed_url, max_depth = meta.max_depth, "corpus"),
        Err(e) => tracing::debug!(error = %e, "corpus marker has no metadata"),
    }

    let index = match Index::load(&args.index_filename) {
        Ok(index) => index,
        Err(e @ IndexError::Io(_)) => {
            eprintln!("Error: could not read {}: {e}", args.index_filename);
            return Failure::Io.into();
        }
        Err(e) => {
            eprintln!("Error: could not load {}: {e}", args.index_filename);
            return Failure::Build.into();
        }
    };
    if index.is_empty() {
        tracing::warn!(index = %args.index_filename, "index is empty; no query will match");
    }
    tracing::info!(words = index.len(), "index loaded");

    let querier = Querier::new(index, pages);
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let result = querier.run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr(), prompt);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            Failure::Io.into()
        }
    }
}
