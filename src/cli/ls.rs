//! `vulnera ls` - list trained models for a language

use anyhow::Result;
use console::style;

use crate::classifier::PredictorBank;
use crate::config::Config;

pub(crate) fn run(language: &str, config: &Config) -> Result<()> {
    let dir = config.checkpoints_dir(language);
    if !dir.is_dir() {
        eprintln!(
            "{}",
            style(format!(
                "Unable to locate vulnerability models for \"{language}\"."
            ))
            .red()
        );
        return Ok(());
    }

    let found = PredictorBank::discover(&dir)?;
    println!(
        "{}",
        style(format!("Found {} {language} checkpoints:", found.len())).cyan()
    );
    for (category, _) in &found {
        println!("  {} {}", style("*").cyan(), category);
    }
    Ok(())
}
