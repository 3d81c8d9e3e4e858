//! Generate CustomField metadata files and a package manifest from a field sheet.
//!
//! ```sh
//! cargo run --bin sf-generate -- --path fields.csv --encoding utf-8 --project ./my-project
//! ```

use std::process::ExitCode;

use busbar_sf_generate::cli::{self, Args};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::from(args.log_level).as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(&args) {
        Ok(report) => {
            if args.json {
                println!("{:#}", cli::success_json(&report));
            } else {
                println!("{}", cli::confirmation(&args, &report));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if args.json {
                println!("{:#}", cli::failure_json(&err));
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
