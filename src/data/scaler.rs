// ============================================================
// Layer 4 — Standard Scaler
// ============================================================
// Standardises every column to zero mean / unit variance:
//
//   z = (x - mean) / std
//
// Fitted on the TRAIN partition only, then applied unchanged to
// train, validation and test.
//
// std is the population standard deviation (divide by n).
//
// Zero-variance fallback: a column whose std is below 1e-10 gets
// a scale of 1.0. It is still centred, so on the train partition
// it becomes constant 0.0 instead of dividing by zero.

use anyhow::{anyhow, ensure, Result};
use ndarray::{Array1, Array2, Axis};

const MIN_STD: f64 = 1e-10;

#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean:     Option<Array1<f64>>,
    scale:    Option<Array1<f64>>,
    constant: Vec<usize>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column mean and scale from `x`.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<()> {
        ensure!(x.nrows() > 0, "Cannot fit a scaler with zero rows");

        let n    = x.nrows() as f64;
        let mean = x.sum_axis(Axis(0)) / n;

        let mut scale    = Array1::ones(x.ncols());
        let mut constant = Vec::new();
        for (j, col) in x.axis_iter(Axis(1)).enumerate() {
            let var = col.iter().map(|v| (v - mean[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std < MIN_STD {
                tracing::debug!("Column {} has zero variance; leaving it unscaled", j);
                constant.push(j);
            } else {
                scale[j] = std;
            }
        }

        self.mean     = Some(mean);
        self.scale    = Some(scale);
        self.constant = constant;
        Ok(())
    }

    /// Apply the fitted standardisation to `x`.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, scale) = self
            .mean
            .as_ref()
            .zip(self.scale.as_ref())
            .ok_or_else(|| anyhow!("Scaler has not been fitted"))?;

        ensure!(
            x.ncols() == mean.len(),
            "Scaler was fitted on {} columns but got {}",
            mean.len(),
            x.ncols()
        );

        Ok((x - mean) / scale)
    }

    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Indices of columns that hit the zero-variance fallback
    pub fn constant_columns(&self) -> &[usize] {
        &self.constant
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_train_columns_have_zero_mean_unit_std() {
        let x = array![[1.0, 100.0], [2.0, 300.0], [3.0, 200.0], [6.0, 400.0]];
        let z = StandardScaler::new().fit_transform(&x).unwrap();

        for col in z.axis_iter(Axis(1)) {
            let n    = col.len() as f64;
            let mean = col.sum() / n;
            let std  = (col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
            assert!(mean.abs() < 1e-9);
            assert!((std - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_variance_column_becomes_zero() {
        let x = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut s = StandardScaler::new();
        let z = s.fit_transform(&x).unwrap();

        assert!(z.column(0).iter().all(|v| *v == 0.0));
        assert!(z.iter().all(|v| v.is_finite()));
        assert_eq!(s.constant_columns(), &[0]);
    }

    #[test]
    fn test_other_partitions_use_train_statistics() {
        let train = array![[0.0], [2.0]]; // mean 1, std 1
        let mut s = StandardScaler::new();
        s.fit(&train).unwrap();

        let vali = s.transform(&array![[3.0], [-1.0]]).unwrap();
        assert_eq!(vali, array![[2.0], [-2.0]]);
    }

    #[test]
    fn test_transform_before_fit_is_error() {
        assert!(StandardScaler::new().transform(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_column_mismatch_is_error() {
        let mut s = StandardScaler::new();
        s.fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(s.transform(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_fit_on_empty_is_error() {
        assert!(StandardScaler::new().fit(&Array2::zeros((0, 3))).is_err());
    }
}
