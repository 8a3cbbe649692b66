//! `vulnera train` - build per-category models from a labeled corpus

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::classifier::{train_corpus, TrainOptions};
use crate::config::Config;
use crate::corpus::VulnerabilityCorpus;
use crate::parsers;

pub(crate) fn run(
    language: &str,
    directory: &Path,
    threshold: usize,
    config: &Config,
) -> Result<()> {
    if !directory.is_dir() {
        eprintln!(
            "{}",
            style(format!("Unable to locate folder: {}", directory.display())).red()
        );
        return Ok(());
    }

    let Some(front_end) = parsers::for_language(language) else {
        eprintln!(
            "{}",
            style(format!("No language support for \"{language}\".")).red()
        );
        return Ok(());
    };

    println!(
        "{}",
        style(format!(
            "Training {language} vulnerability models using files from \"{}\" with a threshold of {threshold}.",
            directory.display()
        ))
        .yellow()
    );

    let corpus = VulnerabilityCorpus::scan(directory, &config.category_separator)?;
    let options = TrainOptions {
        threshold,
        ..TrainOptions::default()
    };
    let report = train_corpus(&corpus, front_end, config, &options)?;

    for category in &report.trained {
        println!(
            "  {} {} ({} examples)",
            style("*").green(),
            category.name,
            category.examples
        );
    }
    if !report.below_threshold.is_empty() {
        println!(
            "{}",
            style(format!(
                "Skipped {} categories below threshold: {}",
                report.below_threshold.len(),
                report.below_threshold.join(", ")
            ))
            .dim()
        );
    }
    if !report.empty.is_empty() {
        println!(
            "{}",
            style(format!(
                "No labeled methods found for: {}",
                report.empty.join(", ")
            ))
            .dim()
        );
    }
    if !report.skipped_files.is_empty() {
        eprintln!(
            "{}",
            style(format!(
                "{} files could not be parsed:",
                report.skipped_files.len()
            ))
            .red()
        );
        for skipped in &report.skipped_files {
            eprintln!("  {} - {}", skipped.path.display(), skipped.reason);
        }
    }

    Ok(())
}
