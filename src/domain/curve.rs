// ============================================================
// Layer 3 — Learning-Curve Results
// ============================================================
// What the trial runner hands to the reporter:
//
//   BucketScores   — one bucket size + every trial's accuracy
//   AggregateStat  — one bucket size + mean / stddev of those
//   LearningCurve  — both, in increasing bucket order, plus the
//                    train-partition size used for the x-range
//
// The standard deviation is the POPULATION stddev (divide by n),
// matching how the raw scores are summarised for plotting.

/// All trial accuracies recorded for a single bucket size.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketScores {
    pub n_samples: usize,
    pub scores:    Vec<f64>,
}

/// Mean and population stddev of a bucket's accuracies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStat {
    pub n_samples: usize,
    pub mean:      f64,
    pub std:       f64,
}

impl AggregateStat {
    /// Summarise a bucket's raw scores.
    /// An empty score list yields NaN for both statistics.
    pub fn from_scores(n_samples: usize, scores: &[f64]) -> Self {
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let var  = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Self { n_samples, mean, std: var.sqrt() }
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.std
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.std
    }
}

impl BucketScores {
    pub fn aggregate(&self) -> AggregateStat {
        AggregateStat::from_scores(self.n_samples, &self.scores)
    }
}

/// Output of one full learning-curve run.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningCurve {
    /// Rows available in the train partition (plot x-range upper bound)
    pub train_size: usize,

    /// Raw per-trial accuracies, ordered by bucket size
    pub buckets: Vec<BucketScores>,

    /// One aggregate per entry in `buckets`, same order
    pub stats: Vec<AggregateStat>,
}

impl LearningCurve {
    /// Build a curve from raw bucket scores, deriving the aggregates.
    pub fn from_buckets(train_size: usize, buckets: Vec<BucketScores>) -> Self {
        let stats = buckets.iter().map(BucketScores::aggregate).collect();
        Self { train_size, buckets, stats }
    }

    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.n_samples).collect()
    }
}
