// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `curve` and `inspect`
// and all their configurable flags.
//
// Every flag defaults to the poetry-identification run
// (seed 12345678, 75/25 then 66/34 splits, buckets of 50,
// 100 trials, depth-4 forest), so a bare `learning-curves curve`
// reproduces it exactly.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::curve_use_case::{CurveConfig, ModelKind};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure validation accuracy across training-set sizes and plot it
    Curve(CurveArgs),

    /// Load, vectorise and split the dataset, then print a summary
    Inspect(InspectArgs),
}

/// Which classifier each trial fits
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModelArg {
    /// Random forest of shallow trees
    Forest,
    /// Single decision tree
    Tree,
}

impl From<ModelArg> for ModelKind {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::Forest => ModelKind::Forest,
            ModelArg::Tree   => ModelKind::Tree,
        }
    }
}

/// Input and split flags shared by both subcommands.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Newline-delimited JSON dataset
    #[arg(long, default_value = "data/poetry_id.jsonl")]
    pub data: String,

    /// Top-level field holding the feature mapping
    #[arg(long, default_value = "features")]
    pub features_field: String,

    /// Top-level boolean field holding the label
    #[arg(long, default_value = "poetry")]
    pub label_field: String,

    /// Seed for the splits, subsamples and classifiers
    #[arg(long, default_value_t = 12345678)]
    pub seed: u64,

    /// Share of rows kept for train+validation (the rest is test)
    #[arg(long, default_value_t = 0.75)]
    pub tv_fraction: f64,

    /// Share of train+validation kept for train (the rest is validation)
    #[arg(long, default_value_t = 0.66)]
    pub train_fraction: f64,
}

/// All arguments for the `curve` command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Load the whole run configuration from a JSON file instead
    /// (fields it omits take their defaults; other flags are ignored)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Bucket sizes are multiples of this, strictly below the train size
    #[arg(long, default_value_t = 50)]
    pub bucket_step: usize,

    /// Independent subsample/fit/score trials per bucket
    #[arg(long, default_value_t = 100)]
    pub trials: usize,

    /// Classifier fitted in every trial
    #[arg(long, value_enum, default_value_t = ModelArg::Forest)]
    pub model: ModelArg,

    /// Maximum tree depth (0 = unlimited)
    #[arg(long, default_value_t = 4)]
    pub max_depth: usize,

    /// Trees per forest
    #[arg(long, default_value_t = 100)]
    pub n_trees: usize,

    /// Share of columns each forest tree is fitted on, in (0, 1]
    #[arg(long, default_value_t = 0.7)]
    pub max_features: f64,

    /// Run the trials of each bucket in parallel (same results)
    #[arg(long)]
    pub parallel: bool,

    /// Directory the two plots are written into
    #[arg(long, default_value = "graphs")]
    pub output_dir: String,

    /// File name of the shaded mean ± stddev plot
    #[arg(long, default_value = "p09-area-Accuracy.png")]
    pub band_plot: String,

    /// File name of the boxplot series
    #[arg(long, default_value = "p09-boxplots-Accuracy.png")]
    pub box_plot: String,
}

/// Convert CLI CurveArgs into the application-layer CurveConfig.
/// The application layer never sees clap types.
impl From<CurveArgs> for CurveConfig {
    fn from(a: CurveArgs) -> Self {
        CurveConfig {
            data_path:      a.data.data,
            features_field: a.data.features_field,
            label_field:    a.data.label_field,
            seed:           a.data.seed,
            tv_fraction:    a.data.tv_fraction,
            train_fraction: a.data.train_fraction,
            bucket_step:    a.bucket_step,
            trials:         a.trials,
            model:          a.model.into(),
            max_depth:      (a.max_depth > 0).then_some(a.max_depth),
            n_trees:        a.n_trees,
            max_features:   a.max_features,
            parallel:       a.parallel,
            output_dir:     a.output_dir,
            band_plot:      a.band_plot,
            box_plot:       a.box_plot,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// How many column names to print
    #[arg(long, default_value_t = 20)]
    pub show_columns: usize,
}

impl From<DataArgs> for CurveConfig {
    fn from(d: DataArgs) -> Self {
        CurveConfig {
            data_path:      d.data,
            features_field: d.features_field,
            label_field:    d.label_field,
            seed:           d.seed,
            tv_fraction:    d.tv_fraction,
            train_fraction: d.train_fraction,
            ..CurveConfig::default()
        }
    }
}
