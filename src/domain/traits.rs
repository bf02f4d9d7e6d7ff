// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams the rest of the system is written against:
//
//   RecordSource — anything that yields labelled records
//   Classifier   — a fitted model that predicts boolean labels
//   Learner      — a recipe that fits a fresh Classifier from
//                  a subsample, given a per-trial seed
//
// The trial runner only sees `Learner`, so a decision tree,
// a random forest, or any future model can be swapped in
// without touching the resampling loop.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use ndarray::ArrayView2;

use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled records.
///
/// Implementations:
///   - JsonlLoader → one JSON object per line
pub trait RecordSource {
    /// Load every record, preserving source order.
    fn load_all(&self) -> Result<Vec<Record>>;
}

// ─── Classifier ───────────────────────────────────────────────────────────────
/// A fitted binary classifier.
pub trait Classifier {
    /// Predict one label per row of `x`.
    fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<bool>;

    /// Fraction of rows whose prediction matches `y`.
    /// Returns 0.0 for an empty input.
    fn score(&self, x: ArrayView2<'_, f64>, y: &[bool]) -> f64 {
        if y.is_empty() {
            return 0.0;
        }
        let correct = self
            .predict(x)
            .iter()
            .zip(y)
            .filter(|(pred, truth)| pred == truth)
            .count();
        correct as f64 / y.len() as f64
    }
}

// ─── Learner ──────────────────────────────────────────────────────────────────
/// Fits fresh classifiers from scratch.
///
/// `Send + Sync` so one learner can be shared by parallel trials.
pub trait Learner: Send + Sync {
    type Model: Classifier;

    /// Short name for logs and plot captions
    fn name(&self) -> &str;

    /// Fit a new model on `x` / `y`. `seed` drives every random
    /// choice the learner makes, so equal seeds give equal models.
    fn fit(&self, x: ArrayView2<'_, f64>, y: &[bool], seed: u64) -> Result<Self::Model>;
}
