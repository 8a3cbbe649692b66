//! Vulnera - per-method source-code vulnerability classifier
//!
//! Parses source files into per-method chunks, tokenizes each method, and
//! scores it against a bank of trained per-category vulnerability models.

// Allow dead code for public API methods exposed for library users and future features
#![allow(dead_code)]

mod chunker;
mod classifier;
mod cli;
mod config;
mod corpus;
mod errors;
mod models;
mod parsers;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
