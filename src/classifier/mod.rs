//! Per-category vulnerability classifier
//!
//! Training: corpus files → labeled token sequences → one GBDT risk model
//! per category, plus a cumulative vocabulary used to build the
//! inference-time token index.
//!
//! Inference: token index + predictor bank → per-method risk probability per
//! category and a softmax-normalized risk distribution.

pub mod analyze;
pub mod embedding;
pub mod gbdt_model;
pub mod labels;
pub mod train;

pub use analyze::{analyze_file, AnalysisReport, PredictorBank};
pub use train::{train_corpus, TrainOptions};
