//! GBDT risk model wrapper
//!
//! Wraps the `gbdt` crate behind the contract the training pipeline
//! presents to any binary-classification backend: embedded token sequences
//! plus labels in, a persisted predictor keyed by category name out.
//!
//! Uses the `LogLikelyhood` loss (binary classification), interpreting
//! label 1.0 as vulnerable and -1.0 as benign, so predictions come back as
//! calibrated vulnerable-class probabilities.

use std::path::Path;

use gbdt::config::Config;
use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;

/// Thin wrapper around `gbdt::gradient_boost::GBDT` providing an
/// embedding-aware risk prediction interface.
pub struct RiskModel {
    model: GBDT,
}

impl RiskModel {
    /// Load a model from the gbdt-rs native JSON format on disk.
    pub fn load(path: &Path) -> Result<Self, String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| "invalid UTF-8 in model path".to_string())?;
        let model =
            GBDT::load_model(path_str).map_err(|e| format!("failed to load risk model: {e}"))?;
        Ok(Self { model })
    }

    /// Wrap an already-trained `GBDT` instance.
    pub fn from_trained(model: GBDT) -> Self {
        Self { model }
    }

    /// Probability that the embedded method is vulnerable (0.0..1.0).
    pub fn predict_risk(&self, embedded: &[f32]) -> f64 {
        let data = vec![Data::new_test_data(embedded.to_vec(), None)];
        let preds = self.model.predict(&data);
        preds.first().copied().unwrap_or(0.5_f32) as f64
    }
}

/// Train a new risk model from embedded token sequences.
///
/// - `rows`: one embedded vector per labeled method
/// - `targets`: 1.0 for vulnerable, -1.0 for benign (LogLikelyhood convention)
pub fn train_risk_model(
    rows: &[Vec<f32>],
    targets: &[f64],
    trees: usize,
    max_depth: u32,
    learning_rate: f64,
) -> Result<GBDT, String> {
    if rows.is_empty() {
        return Err("no training samples provided".into());
    }
    if rows.len() != targets.len() {
        return Err(format!(
            "row count ({}) does not match label count ({})",
            rows.len(),
            targets.len()
        ));
    }

    let mut cfg = Config::new();
    cfg.set_feature_size(rows[0].len());
    cfg.set_max_depth(max_depth);
    cfg.set_iterations(trees);
    cfg.set_shrinkage(learning_rate as f32);
    cfg.set_loss("LogLikelyhood");
    cfg.set_debug(false);
    cfg.set_training_optimization_level(2);
    cfg.set_min_leaf_size(1);

    let mut gbdt = GBDT::new(&cfg);

    let mut training_data: Vec<Data> = rows
        .iter()
        .zip(targets.iter())
        .map(|(row, &target)| Data::new_training_data(row.clone(), 1.0_f32, target as f32, None))
        .collect();

    gbdt.fit(&mut training_data);

    Ok(gbdt)
}

/// Save a trained model to disk (gbdt-rs native JSON format).
pub fn save_model(model: &GBDT, path: &Path) -> Result<(), String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| "invalid UTF-8 in model path".to_string())?;
    model
        .save_model(path_str)
        .map_err(|e| format!("failed to save risk model: {e}"))
}
