// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Classifiers and the resampling loop that measures them.
//
//   tree.rs    — Gini decision tree on linfa-trees (TreeLearner)
//   forest.rs  — bagged shallow trees (ForestLearner), the
//                default learner: 100 trees, max depth 4
//   trials.rs  — TrialRunner: bucket × trial subsample, fit,
//                score on validation, aggregate
//
// The runner is generic over the `Learner` trait from Layer 3,
// so it never names a concrete model.
//
// Reference: Rust Book §10 (Generic Types, Traits)

/// Single Gini decision tree backed by linfa-trees
pub mod tree;

/// Random forest built from `tree`
pub mod forest;

/// Learning-curve resampling loop
pub mod trials;
