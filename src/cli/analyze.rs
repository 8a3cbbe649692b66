//! `vulnera analyze` - score one file against every trained model

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use console::style;

use crate::classifier::{analyze_file, AnalysisReport, PredictorBank};
use crate::config::Config;
use crate::parsers;

/// Probabilities below this render as the underflow sentinel.
const UNDERFLOW: f64 = 0.0001;

pub(crate) fn run(file: &Path, format: &str, config: &Config) -> Result<()> {
    if !file.is_file() {
        eprintln!(
            "{}",
            style(format!("Unable to locate file: {}", file.display())).red()
        );
        return Ok(());
    }

    let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
    let Some(front_end) = parsers::for_extension(ext) else {
        eprintln!("{}", style(format!("No language support for \".{ext}\".")).red());
        return Ok(());
    };

    let checkpoints = config.checkpoints_dir(front_end.language());
    if !checkpoints.is_dir() {
        eprintln!(
            "{}",
            style(format!(
                "No trained {} models. Run `vulnera train` first.",
                front_end.language()
            ))
            .red()
        );
        return Ok(());
    }

    let start = Instant::now();
    let bank = PredictorBank::load_with(&checkpoints, |i, n, category| {
        eprintln!("{}", style(format!("({i}/{n}) - Loading {category}...")).yellow());
    })?;

    let report = analyze_file(file, front_end, config, &bank)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => render_text(&report, start.elapsed()),
    }
    Ok(())
}

fn render_text(report: &AnalysisReport, elapsed: Duration) {
    for method in &report.methods {
        println!();
        println!(
            "{}",
            style(format!("Evaluating {}()...", method.name)).yellow()
        );
        println!("  p-risk     p-dist     vulnerability");

        let max_risk = row_max(&method.risks);
        let max_dist = row_max(&method.distribution);
        for (i, category) in report.categories.iter().enumerate() {
            println!(
                "  {}     {}     {}",
                fmt_prob(method.risks[i], method.risks[i] == max_risk),
                fmt_prob(method.distribution[i], method.distribution[i] == max_dist),
                category
            );
        }
    }

    println!();
    println!(
        "{}",
        style(format!(
            "Analyzed {} methods against {} vulnerabilities in {:.2?}.",
            report.methods.len(),
            report.categories.len(),
            elapsed
        ))
        .yellow()
    );
}

fn row_max(row: &[f64]) -> f64 {
    row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Six-character probability column. Values that underflow the display
/// precision print a sentinel; the row maximum is highlighted.
fn fmt_prob(value: f64, is_max: bool) -> String {
    if value < UNDERFLOW {
        return "x-> -∞".to_string();
    }
    let text = format!("{value:.4}");
    if is_max {
        style(text).yellow().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_prob_underflow_sentinel() {
        assert_eq!(fmt_prob(0.00009, false), "x-> -∞");
        assert_eq!(fmt_prob(0.0, false), "x-> -∞");
    }

    #[test]
    fn test_fmt_prob_truncates_to_four_places() {
        assert_eq!(fmt_prob(0.123456, false), "0.1235");
        assert_eq!(fmt_prob(1.0, false), "1.0000");
    }

    #[test]
    fn test_fmt_prob_max_keeps_digits() {
        // Styling may or may not add escape codes depending on the terminal;
        // the digits must survive either way.
        assert!(fmt_prob(0.9876, true).contains("0.9876"));
    }

    #[test]
    fn test_row_max() {
        assert_eq!(row_max(&[0.1, 0.7, 0.3]), 0.7);
    }
}
