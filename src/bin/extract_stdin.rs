//! Reads HTML bytes from stdin and prints the extracted article as JSON.
//!
//! Prints `null` when the page has no reader-suitable content. Set
//! `RUST_LOG=zen_reader=debug` to see strategy decisions on stderr.

use std::io::{self, Read};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use zen_reader::extract_bytes;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut html = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut html) {
        tracing::error!(error = %err, "failed to read stdin");
        return ExitCode::FAILURE;
    }

    let output = extract_bytes(&html).map(|article| article.to_output());
    match serde_json::to_string(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize output");
            ExitCode::FAILURE
        }
    }
}
