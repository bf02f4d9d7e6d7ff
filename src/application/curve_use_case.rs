// ============================================================
// Layer 2 — CurveUseCase
// ============================================================
// Orchestrates the full learning-curve pipeline in order:
//
//   Step 1: Load .jsonl records        (Layer 4 - data)
//   Step 2: Vectorise features         (Layer 4 - data)
//   Step 3: Split train/vali/test      (Layer 4 - data)
//   Step 4: Scale (fit on train only)  (Layer 4 - data)
//   Step 5: Build bucket schedule      (Layer 5 - ml)
//   Step 6: Run trials per bucket      (Layer 5 - ml)
//   Step 7: Render both plots          (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::{
    loader::JsonlLoader,
    scaler::StandardScaler,
    splitter::{split_three_way, SplitConfig},
    vectorizer::DictVectorizer,
};
use crate::domain::curve::LearningCurve;
use crate::domain::partition::Splits;
use crate::domain::traits::RecordSource;
use crate::infra::report::{ReportPaths, Reporter};
use crate::ml::{
    forest::{ForestLearner, DEFAULT_FEATURE_SUBSAMPLE},
    tree::TreeLearner,
    trials::{step_buckets, TrialConfig, TrialRunner},
};

// ─── Model choice ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Bagged shallow trees
    Forest,
    /// One decision tree
    Tree,
}

// ─── Run Configuration ───────────────────────────────────────────────────────
// Every knob of a learning-curve run. `#[serde(default)]` lets a
// JSON config file name only the fields it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub data_path:      String,
    pub features_field: String,
    pub label_field:    String,
    pub seed:           u64,
    pub tv_fraction:    f64,
    pub train_fraction: f64,
    pub bucket_step:    usize,
    pub trials:         usize,
    pub model:          ModelKind,
    pub max_depth:      Option<usize>,
    pub n_trees:        usize,
    /// Share of columns each forest tree is fitted on
    pub max_features:   f64,
    pub parallel:       bool,
    pub output_dir:     String,
    pub band_plot:      String,
    pub box_plot:       String,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/poetry_id.jsonl".to_string(),
            features_field: "features".to_string(),
            label_field:    "poetry".to_string(),
            seed:           12345678,
            tv_fraction:    0.75,
            train_fraction: 0.66,
            bucket_step:    50,
            trials:         100,
            model:          ModelKind::Forest,
            max_depth:      Some(4),
            n_trees:        100,
            max_features:   DEFAULT_FEATURE_SUBSAMPLE,
            parallel:       false,
            output_dir:     "graphs".to_string(),
            band_plot:      "p09-area-Accuracy.png".to_string(),
            box_plot:       "p09-boxplots-Accuracy.png".to_string(),
        }
    }
}

impl CurveConfig {
    /// Read a config from JSON; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }

    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            tv_fraction:    self.tv_fraction,
            train_fraction: self.train_fraction,
            seed:           self.seed,
        }
    }

    pub fn trial_config(&self) -> TrialConfig {
        TrialConfig {
            trials:   self.trials,
            seed:     self.seed,
            parallel: self.parallel,
        }
    }
}

// ─── Shared data preparation ─────────────────────────────────────────────────
/// Scaled partitions plus what we learnt about the columns on the way.
pub struct PreparedData {
    pub splits:           Splits,
    pub feature_names:    Vec<String>,
    pub records:          usize,
    pub positives:        usize,
    pub constant_columns: Vec<String>,
}

/// Steps 1–4: load, vectorise, split, scale.
pub fn prepare(cfg: &CurveConfig) -> Result<PreparedData> {
    // ── Step 1: Load all records ──────────────────────────────────────────────
    let loader  = JsonlLoader::new(&cfg.data_path, &cfg.features_field, &cfg.label_field);
    let records = loader.load_all()?;
    let labels: Vec<bool> = records.iter().map(|r| r.label).collect();
    let positives = labels.iter().filter(|&&l| l).count();

    // ── Step 2: Vectorise with sorted columns ─────────────────────────────────
    let mut vectorizer = DictVectorizer::new();
    let x = vectorizer.fit_transform(&records)?;
    tracing::info!("Vectorised {} records into {} columns", x.nrows(), x.ncols());

    // ── Step 3: Seeded three-way split ────────────────────────────────────────
    let splits = split_three_way(&x, &labels, cfg.split_config())?;

    // ── Step 4: Fit scaler on train, apply to every partition ─────────────────
    let mut scaler = StandardScaler::new();
    let train_x    = scaler.fit_transform(&splits.train.x).context("Scaling train partition")?;
    let vali_x     = scaler.transform(&splits.validation.x)?;
    let test_x     = scaler.transform(&splits.test.x)?;

    let constant_columns: Vec<String> = scaler
        .constant_columns()
        .iter()
        .map(|&j| vectorizer.feature_names()[j].clone())
        .collect();
    if !constant_columns.is_empty() {
        tracing::info!("{} constant columns left unscaled", constant_columns.len());
    }

    let splits = Splits {
        train:      splits.train.with_features(train_x)?,
        validation: splits.validation.with_features(vali_x)?,
        test:       splits.test.with_features(test_x)?,
    };

    Ok(PreparedData {
        splits,
        feature_names: vectorizer.feature_names().to_vec(),
        records: records.len(),
        positives,
        constant_columns,
    })
}

// ─── CurveUseCase ─────────────────────────────────────────────────────────────
/// What a finished run produced.
#[derive(Debug)]
pub struct CurveOutcome {
    pub curve: LearningCurve,
    pub plots: ReportPaths,
}

pub struct CurveUseCase {
    config: CurveConfig,
}

impl CurveUseCase {
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    /// Steps 1–6: everything except drawing.
    pub fn measure(&self) -> Result<LearningCurve> {
        let cfg  = &self.config;
        let data = prepare(cfg)?;
        let (train, validation) = (&data.splits.train, &data.splits.validation);

        // ── Step 5: Multiples of the step below the train size ────────────────
        let buckets = step_buckets(cfg.bucket_step, train.len());
        tracing::info!(
            "Bucket schedule: every {} rows below {} ({} buckets)",
            cfg.bucket_step,
            train.len(),
            buckets.len()
        );

        // ── Step 6: Resample, fit, score ──────────────────────────────────────
        let runner = TrialRunner::new(cfg.trial_config());
        match cfg.model {
            ModelKind::Forest => runner.run(
                &ForestLearner::new(cfg.n_trees, cfg.max_depth).feature_subsample(cfg.max_features),
                &buckets,
                train,
                validation,
            ),
            ModelKind::Tree => runner.run(
                &TreeLearner::new(cfg.max_depth),
                &buckets,
                train,
                validation,
            ),
        }
    }

    /// Execute the full pipeline end to end.
    pub fn execute(&self) -> Result<CurveOutcome> {
        let cfg = &self.config;
        tracing::info!(
            "Run config: {}",
            serde_json::to_string(cfg).unwrap_or_else(|_| format!("{cfg:?}"))
        );

        let curve = self.measure()?;
        tracing::info!("Measured buckets {:?}", curve.bucket_sizes());

        // ── Step 7: Plots ─────────────────────────────────────────────────────
        let reporter = Reporter::new(&cfg.output_dir, &cfg.band_plot, &cfg.box_plot);
        let plots    = reporter.write_all(&curve)?;

        Ok(CurveOutcome { curve, plots })
    }
}
