//! Corpus-to-training-set pipeline
//!
//! For every category meeting the example threshold: parse each corpus
//! file, label its methods from naming convention, assemble the
//! `(input, label)` table, train one risk model, persist it keyed by
//! category name, and append the rows to the cumulative vocabulary.
//!
//! A file that fails to parse never kills the batch: it is recorded in the
//! report and logged with its path, then the run moves on.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use super::embedding::{append_vocab, TokenIndex};
use super::gbdt_model::{save_model, train_risk_model};
use super::labels::{label_method, Anonymizer, LabeledExample};
use crate::config::Config;
use crate::corpus::VulnerabilityCorpus;
use crate::models::ClassModel;
use crate::parsers::LanguageFrontEnd;

/// Tunables for one training run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Categories with fewer corpus files than this are skipped.
    pub threshold: usize,
    /// Number of boosting iterations.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: u32,
    /// Shrinkage / step size.
    pub learning_rate: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            threshold: 0,
            trees: 50,
            max_depth: 4,
            learning_rate: 0.1,
        }
    }
}

/// A file dropped from the batch, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// One successfully trained category.
#[derive(Debug)]
pub struct TrainedCategory {
    pub name: String,
    pub examples: usize,
    pub model_path: PathBuf,
}

/// Outcome of a training run, surfaced at the end instead of being
/// swallowed file by file.
#[derive(Debug, Default)]
pub struct TrainReport {
    pub trained: Vec<TrainedCategory>,
    pub below_threshold: Vec<String>,
    pub empty: Vec<String>,
    pub skipped_files: Vec<SkippedFile>,
}

/// Train one model per qualifying category in the corpus.
pub fn train_corpus(
    corpus: &VulnerabilityCorpus,
    front_end: &dyn LanguageFrontEnd,
    config: &Config,
    options: &TrainOptions,
) -> Result<TrainReport> {
    let language = front_end.language();
    let checkpoints = config.checkpoints_dir(language);
    std::fs::create_dir_all(&checkpoints)
        .with_context(|| format!("failed to create {}", checkpoints.display()))?;
    let vocab_path = config.vocab_path(language);

    let mut anonymizer = Anonymizer::new(config.anon_token_len, config.anon_seed);
    let mut report = TrainReport::default();

    for category in corpus.categories() {
        let files = corpus.files(category);
        if files.len() < options.threshold {
            tracing::debug!(
                category,
                files = files.len(),
                threshold = options.threshold,
                "below threshold, skipping"
            );
            report.below_threshold.push(category.to_string());
            continue;
        }

        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg:24} [{bar:40}] {pos}/{len}")
                .expect("progress template")
                .progress_chars("=> "),
        );
        bar.set_message(category.to_string());

        let mut rows: Vec<LabeledExample> = Vec::new();
        for path in files {
            bar.inc(1);
            let model = match ClassModel::from_path(path, front_end) {
                Ok(model) => model,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping file");
                    report.skipped_files.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            for method in &model {
                match method.token_string(front_end) {
                    Ok(tokens) => {
                        if let Some(row) = label_method(&tokens, &mut anonymizer) {
                            rows.push(row);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            method = %method.name,
                            error = %e,
                            "skipping method"
                        );
                        report.skipped_files.push(SkippedFile {
                            path: path.clone(),
                            reason: format!("method {}: {e}", method.name),
                        });
                    }
                }
            }
        }
        bar.finish_and_clear();

        if rows.is_empty() {
            tracing::warn!(category, "no labeled methods, nothing to train");
            report.empty.push(category.to_string());
            continue;
        }

        // The vocabulary grows first so the token index always covers the
        // rows it is about to embed.
        append_vocab(&vocab_path, &rows)?;
        let index = TokenIndex::fit_from_file(&vocab_path, config.vocab_size)?;

        let embedded: Vec<Vec<f32>> = rows
            .iter()
            .map(|row| index.embed(&row.input, config.embed_len))
            .collect();
        let targets: Vec<f64> = rows.iter().map(|row| row.label.as_target()).collect();

        let model = train_risk_model(
            &embedded,
            &targets,
            options.trees,
            options.max_depth,
            options.learning_rate,
        )
        .map_err(|e| anyhow!("{category}: {e}"))?;

        let model_path = checkpoints.join(format!("{category}.json"));
        save_model(&model, &model_path).map_err(|e| anyhow!("{category}: {e}"))?;

        tracing::info!(
            category,
            examples = rows.len(),
            model = %model_path.display(),
            "trained"
        );
        report.trained.push(TrainedCategory {
            name: category.to_string(),
            examples: rows.len(),
            model_path,
        });
    }

    Ok(report)
}
