use clap::Parser;
use indexer::build_index;
use std::fs::File;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use tse_common::exit::Failure;
use tse_common::PageStore;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index file from a crawler page directory", long_about = None)]
struct Cli {
    /// Directory produced by the crawler
    page_directory: String,
    /// Index file to write
    index_filename: String,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let store = PageStore::new(&cli.page_directory);
    if !store.validate() {
        eprintln!("Error: {} is not a crawler page directory", cli.page_directory);
        return Failure::InvalidInput.into();
    }
    // Fail before doing any work if the output can't be written.
    if let Err(e) = File::create(&cli.index_filename) {
        eprintln!("Error: cannot write {}: {e}", cli.index_filename);
        return Failure::Io.into();
    }

    let index = match build_index(&store) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: failed to build index: {e:#}");
            return Failure::Build.into();
        }
    };
    if let Err(e) = index.save(&cli.index_filename) {
        eprintln!("Error: failed to save {}: {e}", cli.index_filename);
        return Failure::Build.into();
    }
    tracing::info!(output = %cli.index_filename, "index build complete");
    ExitCode::SUCCESS
}
