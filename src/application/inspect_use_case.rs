// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Runs the data half of the pipeline (load → vectorise →
// split → scale) and reports what it found, without fitting a
// single classifier. Handy for checking a new dataset before
// committing to a long learning-curve run.

use anyhow::Result;

use crate::application::curve_use_case::{prepare, CurveConfig};

/// What the data pipeline produced.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub records:          usize,
    pub positives:        usize,
    pub n_features:       usize,
    /// First few column names, in column order
    pub columns:          Vec<String>,
    pub constant_columns: Vec<String>,
    pub train:            usize,
    pub validation:       usize,
    pub test:             usize,
}

pub struct InspectUseCase {
    config:       CurveConfig,
    show_columns: usize,
}

impl InspectUseCase {
    pub fn new(config: CurveConfig, show_columns: usize) -> Self {
        Self { config, show_columns }
    }

    pub fn execute(&self) -> Result<DatasetSummary> {
        let data = prepare(&self.config)?;

        Ok(DatasetSummary {
            records:          data.records,
            positives:        data.positives,
            n_features:       data.feature_names.len(),
            columns:          data.feature_names.into_iter().take(self.show_columns).collect(),
            constant_columns: data.constant_columns,
            train:            data.splits.train.len(),
            validation:       data.splits.validation.len(),
            test:             data.splits.test.len(),
        })
    }
}
