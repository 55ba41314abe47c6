//! Binary crate for the `zipcast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing the single optional ZIP-code argument
//! - The interactive prompt
//! - Orchestrating resolve → fetch and rendering the result

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::Cli::parse().run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
