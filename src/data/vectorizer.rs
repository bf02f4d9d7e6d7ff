// ============================================================
// Layer 4 — Dictionary Vectoriser
// ============================================================
// Turns a list of feature mappings into a dense numeric matrix.
//
//   fit        → collect every column name the records produce,
//                sort them, and assign column indices 0..k
//   transform  → one row per record, one column per name;
//                absent keys are 0.0, unseen keys are ignored
//
// Column naming (see FeatureValue::columns):
//   numeric / bool   "key"
//   string           "key=value"
//   string array     "key=elem" for every element
//
// Sorting the vocabulary makes the column layout independent of
// record order, so the same dataset always yields the same matrix.
//
// Reference: ndarray documentation (Array2)

use anyhow::{bail, ensure, Result};
use ndarray::Array2;
use std::collections::BTreeMap;

use crate::domain::record::Record;

#[derive(Debug, Clone, Default)]
pub struct DictVectorizer {
    /// Column name → column index, sorted by name
    vocabulary: BTreeMap<String, usize>,

    /// Column index → column name
    feature_names: Vec<String>,
}

impl DictVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the sorted column set from `records`.
    pub fn fit(&mut self, records: &[Record]) -> Result<()> {
        ensure!(!records.is_empty(), "Cannot fit a vectoriser on zero records");

        let mut names: BTreeMap<String, usize> = BTreeMap::new();
        for rec in records {
            for (key, value) in &rec.features {
                for (col, _) in value.columns(key) {
                    names.entry(col).or_insert(0);
                }
            }
        }

        ensure!(
            !names.is_empty(),
            "No feature columns found in {} records",
            records.len()
        );

        // BTreeMap iterates in key order → indices follow sorted names
        for (idx, slot) in names.values_mut().enumerate() {
            *slot = idx;
        }
        self.feature_names = names.keys().cloned().collect();
        self.vocabulary    = names;

        tracing::debug!("Vectoriser fitted with {} columns", self.feature_names.len());
        Ok(())
    }

    /// Build the dense matrix for `records` using the fitted columns.
    pub fn transform(&self, records: &[Record]) -> Result<Array2<f64>> {
        if self.feature_names.is_empty() {
            bail!("Vectoriser has not been fitted");
        }

        let mut x = Array2::zeros((records.len(), self.feature_names.len()));
        for (row, rec) in records.iter().enumerate() {
            for (key, value) in &rec.features {
                for (col, v) in value.columns(key) {
                    if let Some(&j) = self.vocabulary.get(&col) {
                        x[[row, j]] += v;
                    }
                }
            }
        }
        Ok(x)
    }

    pub fn fit_transform(&mut self, records: &[Record]) -> Result<Array2<f64>> {
        self.fit(records)?;
        self.transform(records)
    }

    /// Column index → feature name
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
