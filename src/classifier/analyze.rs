//! Per-file risk analysis
//!
//! Loads the persisted predictor bank and the cumulative vocabulary, embeds
//! every method of the target file, and produces one raw risk probability
//! per category plus a softmax-normalized distribution across categories.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use super::embedding::TokenIndex;
use super::gbdt_model::RiskModel;
use crate::config::Config;
use crate::models::ClassModel;
use crate::parsers::LanguageFrontEnd;

/// All per-category predictors for one language, in sorted category order.
///
/// Read-only for the lifetime of one analysis run.
pub struct PredictorBank {
    entries: Vec<(String, RiskModel)>,
}

impl PredictorBank {
    /// List persisted predictors under `dir` as (category, path), sorted by
    /// category name. The category is the file name with its extension
    /// stripped.
    pub fn discover(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read checkpoints {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                found.push((stem.to_string(), path.clone()));
            }
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    /// Load every discovered predictor, reporting progress through the
    /// callback as `(loaded_so_far, total, category)`.
    pub fn load_with(
        dir: &Path,
        mut progress: impl FnMut(usize, usize, &str),
    ) -> Result<Self> {
        let discovered = Self::discover(dir)?;
        let total = discovered.len();
        let mut entries = Vec::with_capacity(total);
        for (i, (category, path)) in discovered.into_iter().enumerate() {
            progress(i + 1, total, &category);
            let model = RiskModel::load(&path).map_err(|e| anyhow!("{category}: {e}"))?;
            entries.push((category, model));
        }
        Ok(Self { entries })
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Risk probability per category for one embedded method.
    pub fn score(&self, embedded: &[f32]) -> Vec<f64> {
        self.entries
            .iter()
            .map(|(_, model)| model.predict_risk(embedded))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numerically stable softmax. Empty input gives an empty row.
pub fn softmax(xs: &[f64]) -> Vec<f64> {
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = xs.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Risk row for one method.
#[derive(Debug, Serialize)]
pub struct MethodRisk {
    pub name: String,
    /// Raw vulnerable-class probability per category (bank order).
    pub risks: Vec<f64>,
    /// Softmax of `risks`.
    pub distribution: Vec<f64>,
}

/// Full analysis of one file.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub file: PathBuf,
    pub categories: Vec<String>,
    pub methods: Vec<MethodRisk>,
    /// Embedding + scoring time, excluding model loading.
    pub elapsed_ms: u128,
}

/// Score every method of `path` against every predictor in the bank.
pub fn analyze_file(
    path: &Path,
    front_end: &dyn LanguageFrontEnd,
    config: &Config,
    bank: &PredictorBank,
) -> Result<AnalysisReport> {
    if bank.is_empty() {
        bail!(
            "no trained {} models; run `vulnera train` first",
            front_end.language()
        );
    }

    let vocab_path = config.vocab_path(front_end.language());
    let index = TokenIndex::fit_from_file(&vocab_path, config.vocab_size)?;

    let start = Instant::now();
    let class_model =
        ClassModel::from_path(path, front_end).map_err(|e| anyhow!("{}: {e}", path.display()))?;

    let mut methods = Vec::with_capacity(class_model.len());
    for method in &class_model {
        let tokens = method
            .token_string(front_end)
            .map_err(|e| anyhow!("method {}: {e}", method.name))?;
        let embedded = index.embed(&tokens, config.embed_len);
        let risks = bank.score(&embedded);
        let distribution = softmax(&risks);
        methods.push(MethodRisk {
            name: method.name.clone(),
            risks,
            distribution,
        });
    }

    Ok(AnalysisReport {
        file: path.to_path_buf(),
        categories: bank.categories(),
        methods,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        for row in [
            vec![0.1],
            vec![0.5, 0.5],
            vec![0.0, 1.0, 0.25, 0.99],
            vec![1e-9, 1e-9, 1e-9],
        ] {
            let dist = softmax(&row);
            let sum: f64 = dist.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "softmax sum was {sum}");
        }
    }

    #[test]
    fn test_softmax_preserves_argmax() {
        let dist = softmax(&[0.2, 0.9, 0.1]);
        let argmax = dist
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(argmax, 1);
    }

    #[test]
    fn test_softmax_empty_row() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_discover_sorted_and_extension_stripped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Zeta.json"), "{}").unwrap();
        std::fs::write(dir.path().join("Alpha.json"), "{}").unwrap();

        let found = PredictorBank::discover(dir.path()).unwrap();
        let names: Vec<&str> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        assert!(PredictorBank::discover(Path::new("/nonexistent/checkpoints")).is_err());
    }
}
