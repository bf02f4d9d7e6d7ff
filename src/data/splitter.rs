// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Shuffles rows with a SEEDED generator and carves the dataset
// into three disjoint partitions in two sequential steps:
//
//   all rows ──(0.75)──► train+validation ──(0.66)──► train
//       │                        │
//       └──► test (25%)          └──► validation (34% of the 75%)
//
// Each step follows the same rule:
//   n_train    = floor(fraction * n)
//   n_held_out = n - n_train
//   permute 0..n with StdRng::seed_from_u64(seed); the first
//   n_held_out positions are held out, the rest are train.
//
// Both steps reuse the same seed, so the same input size, row
// order, seed and fractions always give identical partitions.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation (SeedableRng)

use anyhow::{ensure, Result};
use ndarray::{Array2, Axis};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::partition::{Partition, PartitionKind, Splits};

/// Fractions and seed for the three-way split.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    /// Share of all rows kept for train+validation (rest is test)
    pub tv_fraction:    f64,
    /// Share of train+validation kept for train (rest is validation)
    pub train_fraction: f64,
    pub seed:           u64,
}

/// Shuffle `samples` deterministically and split into (train, held_out).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, strictly between 0 and 1
/// * `seed`           - Seed for the shuffle
///
/// # Example
/// ```ignore
/// let (train, held_out) = split_train_val((0..100).collect::<Vec<_>>(), 0.75, 7)?;
/// // train has 75 samples, held_out has 25
/// ```
pub fn split_train_val<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> Result<(Vec<T>, Vec<T>)> {
    ensure!(
        train_fraction > 0.0 && train_fraction < 1.0,
        "Split fraction must be strictly between 0 and 1, got {train_fraction}"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let n_train  = ((total as f64) * train_fraction).floor() as usize;
    let held_out = total - n_train;

    // split_off(n) removes [n..] and returns it
    // After this: samples = held-out rows, train = the rest
    let train = samples.split_off(held_out);

    tracing::debug!(
        "Split {} rows: {} train, {} held out",
        total,
        train.len(),
        samples.len()
    );

    Ok((train, samples))
}

/// Split a feature matrix and its labels into train / validation / test.
pub fn split_three_way(x: &Array2<f64>, y: &[bool], cfg: SplitConfig) -> Result<Splits> {
    ensure!(
        x.nrows() == y.len(),
        "Feature matrix has {} rows but there are {} labels",
        x.nrows(),
        y.len()
    );

    let rows: Vec<usize> = (0..y.len()).collect();
    let (tv_rows, test_rows)    = split_train_val(rows, cfg.tv_fraction, cfg.seed)?;
    let (train_rows, vali_rows) = split_train_val(tv_rows, cfg.train_fraction, cfg.seed)?;

    let take = |kind: PartitionKind, idx: &[usize]| {
        Partition::new(
            kind,
            x.select(Axis(0), idx),
            idx.iter().map(|&i| y[i]).collect(),
        )
    };

    let splits = Splits {
        train:      take(PartitionKind::Train, &train_rows)?,
        validation: take(PartitionKind::Validation, &vali_rows)?,
        test:       take(PartitionKind::Test, &test_rows)?,
    };

    tracing::info!(
        "Partitions of {} rows: {} train, {} validation, {} test",
        splits.total_rows(),
        splits.train.len(),
        splits.validation.len(),
        splits.test.len()
    );
    Ok(splits)
}
