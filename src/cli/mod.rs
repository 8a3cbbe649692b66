//! CLI command definitions and handlers

mod analyze;
mod ls;
mod train;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// Vulnera - per-method vulnerability risk analysis
#[derive(Parser, Debug)]
#[command(name = "vulnera")]
#[command(
    version,
    about = "Score source-code methods against trained per-CWE vulnerability models",
    after_help = "\
Examples:
  vulnera train java ./corpus 30     Train models from labeled corpus classes
  vulnera analyze Foo.java           Score every method of Foo.java
  vulnera analyze Foo.java -f json   JSON output for scripting
  vulnera ls java                    List trained vulnerability models"
)]
pub struct Cli {
    /// Data directory holding vocabularies and model checkpoints
    #[arg(long, global = true, env = "VULNERA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a given file against the trained vulnerability models
    Analyze {
        /// Source file to analyze
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Train models on corpus classes in a given directory
    Train {
        /// The language the corpus is written in
        language: String,

        /// Path to a folder containing corpus classes
        directory: PathBuf,

        /// Drop vulnerability categories with fewer example classes than this
        threshold: usize,
    },

    /// View the list of trained models for a given language
    Ls {
        /// The language to list vulnerability models for
        language: String,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::default();
    if let Some(dir) = &cli.data_dir {
        config.data_root = dir.clone();
    }

    match cli.command {
        Commands::Analyze { file, format } => analyze::run(&file, &format, &config),
        Commands::Train {
            language,
            directory,
            threshold,
        } => train::run(&language, &directory, threshold, &config),
        Commands::Ls { language } => ls::run(&language, &config),
    }
}
