// ============================================================
// Layer 5 — Random Forest
// ============================================================
// A bag of shallow linfa Gini trees:
//
//   for each tree t in 0..n_trees:
//     tree_seed  ← next u64 from StdRng(trial seed)
//     rows       ← n bootstrap draws (with replacement)
//     columns    ← ⌈feature_subsample · n_features⌉ distinct columns
//     fit a GiniTree on x[rows, columns]
//
//   predict(x) = fraction of trees voting `true` > 0.5
//
// Everything random flows from the single seed handed to
// `fit`, so one (seed, subsample) pair always yields the same
// forest.
//
// Reference: Breiman (2001) Random Forests
//            linfa-trees RandomForestParams (feature_subsample)

use anyhow::{ensure, Result};
use ndarray::{ArrayView2, Axis};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::domain::traits::{Classifier, Learner};
use crate::ml::tree::GiniTree;

/// Share of columns each tree sees when none is configured
pub const DEFAULT_FEATURE_SUBSAMPLE: f64 = 0.7;

/// One bagged member: the tree and the columns it was fitted on.
struct Member {
    tree:    GiniTree,
    columns: Vec<usize>,
}

pub struct RandomForest {
    members: Vec<Member>,
}

impl RandomForest {
    /// Fraction of trees voting `true` for each row of `x`
    pub fn vote_share(&self, x: ArrayView2<'_, f64>) -> Vec<f64> {
        let mut votes = vec![0usize; x.nrows()];
        for m in &self.members {
            let sub = x.select(Axis(1), &m.columns);
            for (v, p) in votes.iter_mut().zip(m.tree.predict(sub.view())) {
                if p {
                    *v += 1;
                }
            }
        }
        let n = self.members.len().max(1) as f64;
        votes.into_iter().map(|v| v as f64 / n).collect()
    }
}

impl Classifier for RandomForest {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<bool> {
        self.vote_share(x).into_iter().map(|p| p > 0.5).collect()
    }
}

/// Columns per tree: at least one, at most all.
fn columns_per_tree(n_features: usize, feature_subsample: f64) -> usize {
    ((n_features as f64 * feature_subsample).ceil() as usize).clamp(1, n_features.max(1))
}

/// Fits a fresh random forest per call.
#[derive(Debug, Clone)]
pub struct ForestLearner {
    n_trees:           usize,
    max_depth:         Option<usize>,
    feature_subsample: f64,
}

impl ForestLearner {
    pub fn new(n_trees: usize, max_depth: Option<usize>) -> Self {
        Self {
            n_trees,
            max_depth,
            feature_subsample: DEFAULT_FEATURE_SUBSAMPLE,
        }
    }

    pub fn feature_subsample(mut self, share: f64) -> Self {
        self.feature_subsample = share;
        self
    }
}

impl Learner for ForestLearner {
    type Model = RandomForest;

    fn name(&self) -> &str {
        "random forest"
    }

    fn fit(&self, x: ArrayView2<'_, f64>, y: &[bool], seed: u64) -> Result<RandomForest> {
        ensure!(x.nrows() == y.len(), "x has {} rows but y has {} labels", x.nrows(), y.len());
        ensure!(!y.is_empty(), "Cannot fit a random forest on zero rows");
        ensure!(x.ncols() > 0, "Cannot fit a random forest without feature columns");
        ensure!(self.n_trees > 0, "A random forest needs at least one tree");
        ensure!(
            self.feature_subsample > 0.0 && self.feature_subsample <= 1.0,
            "Feature subsample must be in (0, 1], got {}",
            self.feature_subsample
        );

        let n      = y.len();
        let n_cols = columns_per_tree(x.ncols(), self.feature_subsample);
        let mut seeds = StdRng::seed_from_u64(seed);

        let members = (0..self.n_trees)
            .map(|_| -> Result<Member> {
                let mut rng = StdRng::seed_from_u64(seeds.gen());
                let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let mut columns = index::sample(&mut rng, x.ncols(), n_cols).into_vec();
                columns.sort_unstable();

                let bag_x = x.select(Axis(0), &rows).select(Axis(1), &columns);
                let bag_y: Vec<bool> = rows.iter().map(|&r| y[r]).collect();
                let tree = GiniTree::fit(bag_x.view(), &bag_y, self.max_depth)?;
                Ok(Member { tree, columns })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RandomForest { members })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Two well separated clusters on column 0, noise on column 1
    fn clusters(n: usize) -> (Array2<f64>, Vec<bool>) {
        let x = Array2::from_shape_fn((n, 2), |(i, j)| match j {
            0 => if i % 2 == 0 { -1.0 } else { 1.0 },
            _ => ((i * 7919) % 13) as f64,
        });
        let y = (0..n).map(|i| i % 2 == 1).collect();
        (x, y)
    }

    #[test]
    fn test_forest_learns_separable_clusters() {
        let (x, y) = clusters(60);
        let forest = ForestLearner::new(25, Some(4))
            .feature_subsample(1.0)
            .fit(x.view(), &y, 7)
            .unwrap();
        assert_eq!(forest.score(x.view(), &y), 1.0);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = clusters(40);
        let learner = ForestLearner::new(10, Some(3));
        let a = learner.fit(x.view(), &y, 42).unwrap().vote_share(x.view());
        let b = learner.fit(x.view(), &y, 42).unwrap().vote_share(x.view());
        assert_eq!(a, b);
    }

    #[test]
    fn test_vote_shares_are_bounded() {
        let (x, y) = clusters(30);
        let forest = ForestLearner::new(5, Some(2)).fit(x.view(), &y, 1).unwrap();
        assert!(forest.vote_share(x.view()).iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_columns_per_tree() {
        assert_eq!(columns_per_tree(1, 0.7), 1);
        assert_eq!(columns_per_tree(10, 0.7), 7);
        assert_eq!(columns_per_tree(3, 0.1), 1);
        assert_eq!(columns_per_tree(4, 1.0), 4);
    }

    #[test]
    fn test_invalid_settings_are_errors() {
        let (x, y) = clusters(10);
        assert!(ForestLearner::new(0, None).fit(x.view(), &y, 0).is_err());
        assert!(ForestLearner::new(3, None).feature_subsample(0.0).fit(x.view(), &y, 0).is_err());
        let empty = Array2::<f64>::zeros((4, 0));
        assert!(ForestLearner::new(3, None).fit(empty.view(), &[true; 4], 0).is_err());
    }
}
