use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use tse_common::exit::Failure;
use tse_common::Index;

/// Load an index file and write it back out, for round-trip checks.
#[derive(Parser)]
#[command(name = "indextest")]
struct Cli {
    old_index_filename: String,
    new_index_filename: String,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let index = match Index::load(&cli.old_index_filename) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", cli.old_index_filename);
            return Failure::Build.into();
        }
    };
    if let Err(e) = index.save(&cli.new_index_filename) {
        eprintln!("Error: failed to save {}: {e}", cli.new_index_filename);
        return Failure::Io.into();
    }
    ExitCode::SUCCESS
}
