// ============================================================
// Layer 5 — Gini Decision Tree
// ============================================================
// Thin adapter from the `Learner` / `Classifier` traits onto
// linfa-trees' CART implementation:
//
//   ArrayView2<f64> + &[bool]  ──►  linfa Dataset<f64, bool>
//   DecisionTree::params()
//       .split_quality(Gini)
//       .max_depth(..)          ──►  fitted linfa DecisionTree
//   predict(&x)                 ──►  Array1<bool>  ──►  Vec<bool>
//
// A single tree is deterministic, so the per-trial seed is
// accepted and ignored. The same fitting helper backs every
// tree inside the random forest.
//
// Reference: linfa-trees documentation (DecisionTreeParams)

use anyhow::{anyhow, ensure, Result};
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, ArrayView2};

use crate::domain::traits::{Classifier, Learner};

/// A fitted Gini decision tree.
pub struct GiniTree {
    model: DecisionTree<f64, bool>,
}

impl GiniTree {
    /// Fit one tree on every row of `x`.
    pub(crate) fn fit(x: ArrayView2<'_, f64>, y: &[bool], max_depth: Option<usize>) -> Result<Self> {
        ensure!(x.nrows() == y.len(), "x has {} rows but y has {} labels", x.nrows(), y.len());
        ensure!(!y.is_empty(), "Cannot fit a decision tree on zero rows");

        let dataset = Dataset::new(x.to_owned(), Array1::from(y.to_vec()));
        let model = DecisionTree::<f64, bool>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(max_depth)
            .fit(&dataset)
            .map_err(|e| anyhow!("Decision tree fit failed: {e}"))?;

        Ok(Self { model })
    }
}

impl Classifier for GiniTree {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<bool> {
        let labels: Array1<bool> = self.model.predict(&x);
        labels.to_vec()
    }
}

// ─── Learner ──────────────────────────────────────────────────────────────────

/// Fits a single decision tree that considers every feature.
#[derive(Debug, Clone)]
pub struct TreeLearner {
    max_depth: Option<usize>,
}

impl TreeLearner {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }
}

impl Learner for TreeLearner {
    type Model = GiniTree;

    fn name(&self) -> &str {
        "decision tree"
    }

    fn fit(&self, x: ArrayView2<'_, f64>, y: &[bool], _seed: u64) -> Result<GiniTree> {
        GiniTree::fit(x, y, self.max_depth)
    }
}
