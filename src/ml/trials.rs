// ============================================================
// Layer 5 — Learning-Curve Trial Runner
// ============================================================
// For each bucket size n (increasing), repeat `trials` times:
//
//   1. draw n rows uniformly WITHOUT replacement from train
//   2. fit a fresh classifier on just those rows
//   3. score it on the fixed validation partition
//
// then summarise the bucket as mean / population stddev.
//
// Seeds are derived per (bucket, trial) so every trial is
// independent of every other and of execution order:
//
//   subsample rng   StdRng::seed_from_u64((seed ^ (n << 32)) + trial)
//   classifier      seed + trial
//
// Running the trials of a bucket on rayon's pool therefore gives
// exactly the same numbers as running them one after another.
//
// Oversized buckets: every bucket is checked against the train
// size BEFORE any trial runs, and the run fails fast with the
// offending bucket in the error. Samples are never truncated.

use anyhow::{bail, ensure, Context, Result};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use rayon::prelude::*;

use crate::domain::curve::{BucketScores, LearningCurve};
use crate::domain::partition::Partition;
use crate::domain::traits::{Classifier, Learner};

/// Knobs for the resampling loop.
#[derive(Debug, Clone, Copy)]
pub struct TrialConfig {
    /// Fit-and-score repetitions per bucket
    pub trials:   usize,
    /// Base seed for subsample and classifier seeds
    pub seed:     u64,
    /// Run the trials of each bucket on the rayon thread pool
    pub parallel: bool,
}

/// `step, 2·step, …` strictly below `train_size`.
pub fn step_buckets(step: usize, train_size: usize) -> Vec<usize> {
    if step == 0 {
        return Vec::new();
    }
    (step..train_size).step_by(step).collect()
}

/// Seed for the subsample drawn in trial `trial` of bucket `n_samples`
pub fn sample_seed(seed: u64, n_samples: usize, trial: usize) -> u64 {
    (seed ^ ((n_samples as u64) << 32)).wrapping_add(trial as u64)
}

/// Seed handed to the learner in trial `trial`
pub fn model_seed(seed: u64, trial: usize) -> u64 {
    seed.wrapping_add(trial as u64)
}

pub struct TrialRunner {
    cfg: TrialConfig,
}

impl TrialRunner {
    pub fn new(cfg: TrialConfig) -> Self {
        Self { cfg }
    }

    /// Run every bucket and return the full learning curve.
    pub fn run<L: Learner>(
        &self,
        learner:    &L,
        buckets:    &[usize],
        train:      &Partition,
        validation: &Partition,
    ) -> Result<LearningCurve> {
        self.validate(buckets, train, validation)?;

        tracing::info!(
            "Running {} buckets × {} trials with a {} ({})",
            buckets.len(),
            self.cfg.trials,
            learner.name(),
            if self.cfg.parallel { "parallel" } else { "sequential" }
        );

        let mut results = Vec::with_capacity(buckets.len());
        for &n in buckets {
            tracing::info!("{} samples...", n);

            let scores = if self.cfg.parallel {
                (0..self.cfg.trials)
                    .into_par_iter()
                    .map(|t| self.run_trial(learner, n, t, train, validation))
                    .collect::<Result<Vec<f64>>>()?
            } else {
                (0..self.cfg.trials)
                    .map(|t| self.run_trial(learner, n, t, train, validation))
                    .collect::<Result<Vec<f64>>>()?
            };

            let bucket = BucketScores { n_samples: n, scores };
            let stat   = bucket.aggregate();
            tracing::info!(
                "  n={:<5} mean_acc={:.4} std={:.4}",
                n,
                stat.mean,
                stat.std
            );
            results.push(bucket);
        }

        Ok(LearningCurve::from_buckets(train.len(), results))
    }

    /// Check the whole schedule up front so nothing runs on a bad plan.
    fn validate(&self, buckets: &[usize], train: &Partition, validation: &Partition) -> Result<()> {
        ensure!(!train.is_empty(), "Train partition is empty; nothing to learn from");
        ensure!(!validation.is_empty(), "Validation partition is empty; nothing to score on");
        ensure!(self.cfg.trials > 0, "Trial count must be at least 1");
        ensure!(!buckets.is_empty(), "No valid bucket sizes; nothing to report");

        let mut prev = 0usize;
        for &n in buckets {
            if n == 0 {
                bail!("Bucket size 0 is not allowed");
            }
            if n <= prev {
                bail!("Bucket sizes must be strictly increasing ({prev} then {n})");
            }
            if n > train.len() {
                bail!(
                    "Bucket size {n} exceeds the {} rows in the train partition",
                    train.len()
                );
            }
            prev = n;
        }
        Ok(())
    }

    /// One independent subsample → fit → score.
    fn run_trial<L: Learner>(
        &self,
        learner:    &L,
        n_samples:  usize,
        trial:      usize,
        train:      &Partition,
        validation: &Partition,
    ) -> Result<f64> {
        let mut rng = StdRng::seed_from_u64(sample_seed(self.cfg.seed, n_samples, trial));
        let rows = index::sample(&mut rng, train.len(), n_samples).into_vec();
        let (x, y) = train.select(&rows);

        let model = learner
            .fit(x.view(), &y, model_seed(self.cfg.seed, trial))
            .with_context(|| format!("Fitting trial {trial} of bucket {n_samples}"))?;
        let acc = model.score(validation.x.view(), &validation.y);

        tracing::debug!("bucket={} trial={} acc={:.4}", n_samples, trial, acc);
        Ok(acc)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::partition::PartitionKind;
    use crate::ml::tree::TreeLearner;
    use ndarray::{Array2, ArrayView2};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn partition(kind: PartitionKind, n: usize, offset: usize) -> Partition {
        // Column 0 = global row id, label = odd id
        let x = Array2::from_shape_fn((n, 1), |(i, _)| (i + offset) as f64);
        let y = (0..n).map(|i| (i + offset) % 2 == 1).collect();
        Partition::new(kind, x, y).unwrap()
    }

    fn cfg(trials: usize, parallel: bool) -> TrialConfig {
        TrialConfig { trials, seed: 12345678, parallel }
    }

    /// Records the row ids of every subsample it is fitted on.
    struct Recorder {
        seen: Mutex<Vec<Vec<usize>>>,
    }

    struct Constant;

    impl Classifier for Constant {
        fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<bool> {
            vec![true; x.nrows()]
        }
    }

    impl Learner for Recorder {
        type Model = Constant;

        fn name(&self) -> &str {
            "recorder"
        }

        fn fit(&self, x: ArrayView2<'_, f64>, _y: &[bool], _seed: u64) -> Result<Constant> {
            let ids = x.column(0).iter().map(|v| *v as usize).collect();
            self.seen.lock().unwrap().push(ids);
            Ok(Constant)
        }
    }

    #[test]
    fn test_step_buckets_stop_below_train_size() {
        assert_eq!(step_buckets(50, 247), vec![50, 100, 150, 200]);
        assert_eq!(step_buckets(50, 200), vec![50, 100, 150]);
        assert!(step_buckets(50, 40).is_empty());
        assert!(step_buckets(0, 100).is_empty());
    }

    #[test]
    fn test_seed_derivation_distinguishes_bucket_and_trial() {
        assert_ne!(sample_seed(1, 50, 0), sample_seed(1, 100, 0));
        assert_ne!(sample_seed(1, 50, 0), sample_seed(1, 50, 1));
        assert_eq!(model_seed(10, 3), 13);
    }

    #[test]
    fn test_trial_count_and_score_range() {
        let train = partition(PartitionKind::Train, 120, 0);
        let vali  = partition(PartitionKind::Validation, 40, 1000);
        let curve = TrialRunner::new(cfg(7, false))
            .run(&TreeLearner::new(Some(2)), &[10, 50, 120], &train, &vali)
            .unwrap();

        assert_eq!(curve.train_size, 120);
        assert_eq!(curve.bucket_sizes(), vec![10, 50, 120]);
        for b in &curve.buckets {
            assert_eq!(b.scores.len(), 7);
            assert!(b.scores.iter().all(|s| (0.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn test_aggregates_match_raw_scores() {
        let train = partition(PartitionKind::Train, 80, 0);
        let vali  = partition(PartitionKind::Validation, 30, 500);
        let curve = TrialRunner::new(cfg(9, false))
            .run(&TreeLearner::new(Some(3)), &[20, 40], &train, &vali)
            .unwrap();

        for (b, s) in curve.buckets.iter().zip(&curve.stats) {
            let n    = b.scores.len() as f64;
            let mean = b.scores.iter().sum::<f64>() / n;
            let std  = (b.scores.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
            assert_eq!(s.n_samples, b.n_samples);
            assert!((s.mean - mean).abs() < 1e-12);
            assert!((s.std - std).abs() < 1e-12);
        }
    }

    #[test]
    fn test_subsamples_are_exact_size_without_replacement() {
        let train    = partition(PartitionKind::Train, 60, 0);
        let vali     = partition(PartitionKind::Validation, 10, 100);
        let recorder = Recorder { seen: Mutex::new(Vec::new()) };

        TrialRunner::new(cfg(5, false))
            .run(&recorder, &[15, 60], &train, &vali)
            .unwrap();

        let seen = recorder.seen.into_inner().unwrap();
        assert_eq!(seen.len(), 10);
        for (i, ids) in seen.iter().enumerate() {
            let expected = if i < 5 { 15 } else { 60 };
            assert_eq!(ids.len(), expected);
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), expected);
            assert!(ids.iter().all(|&id| id < 60));
        }
        // Independent draws: the five 15-row subsamples are not all identical
        assert!(seen[..5].windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_oversized_bucket_fails_before_any_trial() {
        let train    = partition(PartitionKind::Train, 30, 0);
        let vali     = partition(PartitionKind::Validation, 10, 100);
        let recorder = Recorder { seen: Mutex::new(Vec::new()) };

        let err = TrialRunner::new(cfg(3, false))
            .run(&recorder, &[10, 31], &train, &vali)
            .unwrap_err();

        assert!(err.to_string().contains("31"));
        assert!(recorder.seen.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_schedules() {
        let train  = partition(PartitionKind::Train, 30, 0);
        let vali   = partition(PartitionKind::Validation, 10, 100);
        let runner = TrialRunner::new(cfg(2, false));
        let tree   = TreeLearner::new(Some(1));

        assert!(runner.run(&tree, &[], &train, &vali).is_err());
        assert!(runner.run(&tree, &[0, 10], &train, &vali).is_err());
        assert!(runner.run(&tree, &[20, 10], &train, &vali).is_err());
        assert!(TrialRunner::new(cfg(0, false)).run(&tree, &[10], &train, &vali).is_err());
    }

    #[test]
    fn test_empty_train_partition_is_fatal() {
        let train = Partition::new(PartitionKind::Train, Array2::zeros((0, 1)), vec![]).unwrap();
        let vali  = partition(PartitionKind::Validation, 10, 100);
        assert!(TrialRunner::new(cfg(2, false))
            .run(&TreeLearner::new(None), &[1], &train, &vali)
            .is_err());
    }

    #[test]
    fn test_parallel_matches_sequential_bit_for_bit() {
        let train = partition(PartitionKind::Train, 150, 0);
        let vali  = partition(PartitionKind::Validation, 50, 7);
        let tree  = TreeLearner::new(Some(2));

        let seq = TrialRunner::new(cfg(12, false)).run(&tree, &[25, 75], &train, &vali).unwrap();
        let par = TrialRunner::new(cfg(12, true)).run(&tree, &[25, 75], &train, &vali).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let train = partition(PartitionKind::Train, 90, 0);
        let vali  = partition(PartitionKind::Validation, 30, 3);
        let tree  = TreeLearner::new(Some(3));
        let a = TrialRunner::new(cfg(6, false)).run(&tree, &[30, 60], &train, &vali).unwrap();
        let b = TrialRunner::new(cfg(6, false)).run(&tree, &[30, 60], &train, &vali).unwrap();
        assert_eq!(a, b);
    }
}
