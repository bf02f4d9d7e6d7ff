// ============================================================
// Layer 3 — Partition Domain Type
// ============================================================
// A Partition is a named, disjoint subset of the feature matrix
// with its aligned label vector. Three exist per run:
//
//   train       — the only rows anything is ever fitted on
//   validation  — scores every trial's classifier
//   test        — held back, never touched by the learning curve
//
// Partitions are read-only after the split. Trial subsamples
// are transient copies made through `select`.

use anyhow::{ensure, Result};
use ndarray::{Array2, Axis};
use std::fmt;

/// Which role a partition plays in the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    Train,
    Validation,
    Test,
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartitionKind::Train      => "train",
            PartitionKind::Validation => "validation",
            PartitionKind::Test       => "test",
        };
        f.write_str(name)
    }
}

/// Feature rows plus their aligned labels.
#[derive(Debug, Clone)]
pub struct Partition {
    pub kind: PartitionKind,
    pub x:    Array2<f64>,
    pub y:    Vec<bool>,
}

impl Partition {
    /// Build a partition, checking that rows and labels line up.
    pub fn new(kind: PartitionKind, x: Array2<f64>, y: Vec<bool>) -> Result<Self> {
        ensure!(
            x.nrows() == y.len(),
            "{kind} partition has {} rows but {} labels",
            x.nrows(),
            y.len()
        );
        Ok(Self { kind, x, y })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Copy out the given rows (and their labels) in the given order.
    pub fn select(&self, indices: &[usize]) -> (Array2<f64>, Vec<bool>) {
        let x = self.x.select(Axis(0), indices);
        let y = indices.iter().map(|&i| self.y[i]).collect();
        (x, y)
    }

    /// Replace the feature matrix (used after scaling), keeping labels.
    pub fn with_features(self, x: Array2<f64>) -> Result<Self> {
        Self::new(self.kind, x, self.y)
    }
}

/// The three disjoint partitions of one dataset.
#[derive(Debug, Clone)]
pub struct Splits {
    pub train:      Partition,
    pub validation: Partition,
    pub test:       Partition,
}

impl Splits {
    /// Sum of all partition sizes; always equals the dataset size
    pub fn total_rows(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }
}
