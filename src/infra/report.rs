// ============================================================
// Layer 6 — Learning-Curve Reporter
// ============================================================
// Renders the aggregated curve to two PNG files with plotters:
//
//   1. Shaded accuracy plot
//        line + markers  : mean accuracy per bucket
//        shaded band     : mean ± 1 stddev, clipped to [0, 1]
//        x-range         : [0, train partition size]
//        y-range         : [0, 1]
//
//   2. Boxplot series
//        one box per bucket (min / Q1 / median / Q3 / max),
//        buckets left → right in increasing size,
//        y-range padded around the observed scores
//
// Parent directories are created on demand. Any failure
// (directory, backend, font, encoder) is returned with the path
// that failed.
//
// Reference: plotters crate documentation (ChartBuilder, Boxplot)

use anyhow::{anyhow, ensure, Context, Result};
use plotters::prelude::*;
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::domain::curve::{AggregateStat, BucketScores, LearningCurve};

const PLOT_SIZE: (u32, u32) = (800, 600);
const Y_PAD: f64 = 0.05;
const ACCURACY_AXIS: (f64, f64) = (0.0, 1.0);

/// Where the two artifacts go.
pub struct Reporter {
    out_dir:   PathBuf,
    band_file: String,
    box_file:  String,
}

/// Paths actually written by `Reporter::write_all`
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub band:     PathBuf,
    pub boxplots: PathBuf,
}

impl Reporter {
    pub fn new(
        out_dir:   impl Into<PathBuf>,
        band_file: impl Into<String>,
        box_file:  impl Into<String>,
    ) -> Self {
        Self {
            out_dir:   out_dir.into(),
            band_file: band_file.into(),
            box_file:  box_file.into(),
        }
    }

    /// Write both plots for `curve`.
    pub fn write_all(&self, curve: &LearningCurve) -> Result<ReportPaths> {
        let paths = ReportPaths {
            band:     self.out_dir.join(&self.band_file),
            boxplots: self.out_dir.join(&self.box_file),
        };

        plot_accuracy_band(&paths.band, &curve.stats, curve.train_size)?;
        plot_boxplots(&paths.boxplots, &curve.buckets)?;
        Ok(paths)
    }
}

/// Line plot of mean accuracy with a ±1 stddev band.
pub fn plot_accuracy_band(path: &Path, stats: &[AggregateStat], train_size: usize) -> Result<()> {
    ensure!(!stats.is_empty(), "No bucket statistics to plot");
    ensure_parent(path)?;

    draw_band(path, stats, train_size)
        .map_err(|e| anyhow!("Cannot render accuracy plot '{}': {e}", path.display()))?;

    tracing::info!("Wrote accuracy plot to '{}'", path.display());
    Ok(())
}

/// One box per bucket, in increasing bucket order.
pub fn plot_boxplots(path: &Path, buckets: &[BucketScores]) -> Result<()> {
    ensure!(!buckets.is_empty(), "No bucket scores to plot");
    ensure!(
        buckets.iter().all(|b| !b.scores.is_empty()),
        "Every bucket needs at least one score to draw a box"
    );
    ensure_parent(path)?;

    draw_boxes(path, buckets)
        .map_err(|e| anyhow!("Cannot render boxplot '{}': {e}", path.display()))?;

    tracing::info!("Wrote boxplots to '{}'", path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display())),
        _ => Ok(()),
    }
}

/// Pad `[lo, hi]` a little and clamp it to the accuracy range.
fn y_range(lo: f64, hi: f64) -> (f64, f64) {
    let lo = (lo - Y_PAD).max(0.0);
    let hi = (hi + Y_PAD).min(1.0);
    if hi > lo { (lo, hi) } else { (0.0, 1.0) }
}

/// Polygon around mean ± std: upper edge left → right, then
/// lower edge right → left, clipped to `[y_min, y_max]`.
fn band_outline(stats: &[AggregateStat], y_min: f64, y_max: f64) -> Vec<(f64, f64)> {
    stats
        .iter()
        .map(|s| (s.n_samples as f64, s.upper().clamp(y_min, y_max)))
        .chain(stats.iter().rev().map(|s| (s.n_samples as f64, s.lower().clamp(y_min, y_max))))
        .collect()
}

fn draw_band(
    path:       &Path,
    stats:      &[AggregateStat],
    train_size: usize,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = ACCURACY_AXIS;
    let x_max = train_size.max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption("Shaded Accuracy Plot", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Training Samples")
        .y_desc("Mean Accuracy")
        .draw()?;

    let band = band_outline(stats, y_min, y_max);
    chart.draw_series(std::iter::once(Polygon::new(band, BLUE.mix(0.2).filled())))?;

    let means: Vec<(f64, f64)> = stats.iter().map(|s| (s.n_samples as f64, s.mean)).collect();
    chart.draw_series(LineSeries::new(means.clone(), &BLUE))?;
    chart.draw_series(means.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))?;

    root.present()?;
    Ok(())
}

fn draw_boxes(path: &Path, buckets: &[BucketScores]) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let sizes: Vec<usize> = buckets.iter().map(|b| b.n_samples).collect();
    let quartiles: Vec<Quartiles> = buckets.iter().map(|b| Quartiles::new(&b.scores)).collect();

    let (lo, hi) = quartiles
        .iter()
        .flat_map(|q| q.values())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v as f64), hi.max(v as f64))
        });
    let (y_min, y_max) = y_range(lo, hi);

    let mut chart = ChartBuilder::on(&root)
        .caption("Learning Curve", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(sizes[..].into_segmented(), y_min as f32..y_max as f32)?;

    chart
        .configure_mesh()
        .x_desc("Training Samples")
        .y_desc("Accuracy")
        .x_label_formatter(&|v: &SegmentValue<&usize>| match v {
            SegmentValue::Exact(n) | SegmentValue::CenterOf(n) => n.to_string(),
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(sizes.iter().zip(&quartiles).map(|(n, q)| {
        Boxplot::new_vertical(SegmentValue::CenterOf(n), q)
            .width(20)
            .whisker_width(0.5)
            .style(&BLUE)
    }))?;

    root.present()?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range_is_padded_and_clamped() {
        let (lo, hi) = y_range(1.0, 1.0);
        assert!((lo - 0.95).abs() < 1e-12);
        assert_eq!(hi, 1.0);
        let (lo, hi) = y_range(0.5, 0.7);
        assert!((lo - 0.45).abs() < 1e-12);
        assert!((hi - 0.75).abs() < 1e-12);
        assert_eq!(y_range(-0.2, 1.3), (0.0, 1.0));
    }

    #[test]
    fn test_band_outline_stays_on_the_accuracy_axis() {
        let stats = [
            AggregateStat::from_scores(50, &[0.7, 1.0, 1.0, 1.0]),
            AggregateStat::from_scores(100, &[0.0, 0.0, 0.1]),
        ];
        let (lo, hi) = ACCURACY_AXIS;
        let band     = band_outline(&stats, lo, hi);

        assert_eq!(band.len(), 4);
        assert_eq!(band.iter().map(|p| p.0).collect::<Vec<_>>(), vec![50.0, 100.0, 100.0, 50.0]);
        assert!(band.iter().all(|&(_, y)| (0.0..=1.0).contains(&y)));
        assert_eq!(band[0].1, 1.0);
        assert_eq!(band[2].1, 0.0);
    }

    #[test]
    fn test_write_all_renders_both_pngs() {
        let dir     = tempfile::tempdir().unwrap();
        let buckets = vec![
            BucketScores { n_samples: 50, scores: vec![0.8, 0.9, 0.85] },
            BucketScores { n_samples: 100, scores: vec![0.9, 0.95, 1.0] },
        ];
        let curve = LearningCurve::from_buckets(150, buckets);

        let paths = Reporter::new(dir.path().join("graphs"), "band.png", "boxes.png")
            .write_all(&curve)
            .unwrap();

        for path in [&paths.band, &paths.boxplots] {
            let bytes = fs::read(path).unwrap();
            assert!(bytes.len() > 8, "{} is empty", path.display());
            assert_eq!(&bytes[..4], b"\x89PNG");
        }
    }

    #[test]
    fn test_empty_stats_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(plot_accuracy_band(&dir.path().join("a.png"), &[], 100).is_err());
        assert!(plot_boxplots(&dir.path().join("b.png"), &[]).is_err());
    }

    #[test]
    fn test_bucket_without_scores_is_rejected() {
        let dir     = tempfile::tempdir().unwrap();
        let buckets = [BucketScores { n_samples: 50, scores: vec![] }];
        assert!(plot_boxplots(&dir.path().join("b.png"), &buckets).is_err());
    }

    #[test]
    fn test_unwritable_output_dir_names_the_path() {
        let dir     = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();

        let stats = [AggregateStat::from_scores(50, &[0.9, 1.0])];
        let err   = plot_accuracy_band(&blocker.join("graphs").join("a.png"), &stats, 100)
            .unwrap_err();
        assert!(format!("{err:#}").contains("not_a_dir"));
    }
}
