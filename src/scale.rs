//! Min-max normalization of RFM features

use ndarray::{Array1, Array2};

use crate::error::{Result, SegmentError};
use crate::rfm::RfmRecord;

/// Number of feature columns: Recency, Frequency, Monetary.
pub const N_FEATURES: usize = 3;

/// Per-column min/max fitted on a batch, applied as
/// `(v - min) / (max - min)`. A constant column maps to 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    pub mins: [f64; N_FEATURES],
    pub maxs: [f64; N_FEATURES],
}

impl MinMaxScaler {
    /// Fit column ranges on a feature matrix.
    ///
    /// Fails when the matrix is empty or any value is non-finite.
    pub fn fit(features: &Array2<f64>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(SegmentError::Validation(
                "cannot fit a scaler on zero rows".to_string(),
            ));
        }
        if let Some(bad) = features.iter().find(|v| !v.is_finite()) {
            return Err(SegmentError::Validation(format!(
                "non-finite feature value: {}",
                bad
            )));
        }

        let mut mins = [f64::INFINITY; N_FEATURES];
        let mut maxs = [f64::NEG_INFINITY; N_FEATURES];
        for row in features.outer_iter() {
            for (j, &v) in row.iter().enumerate() {
                mins[j] = mins[j].min(v);
                maxs[j] = maxs[j].max(v);
            }
        }
        Ok(MinMaxScaler { mins, maxs })
    }

    /// Rescale a matrix with the fitted ranges, preserving row order 1:1.
    pub fn transform(&self, features: &Array2<f64>) -> Array2<f64> {
        let mut scaled = features.clone();
        for mut row in scaled.outer_iter_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.scale_one(j, *v);
            }
        }
        scaled
    }

    /// Rescale a single (recency, frequency, monetary) point, e.g. a new
    /// customer scored against an already-fitted batch.
    pub fn transform_point(&self, rfm: &[f64; N_FEATURES]) -> Array1<f64> {
        Array1::from_iter(rfm.iter().enumerate().map(|(j, &v)| self.scale_one(j, v)))
    }

    fn scale_one(&self, column: usize, v: f64) -> f64 {
        let range = self.maxs[column] - self.mins[column];
        if range > 0.0 {
            (v - self.mins[column]) / range
        } else {
            0.0
        }
    }
}

/// Build the raw feature matrix (one row per customer, R/F/M columns).
pub fn to_matrix(records: &[RfmRecord]) -> Array2<f64> {
    let mut data = Vec::with_capacity(records.len() * N_FEATURES);
    for r in records {
        data.extend_from_slice(&[r.recency as f64, r.frequency as f64, r.monetary]);
    }
    Array2::from_shape_vec((records.len(), N_FEATURES), data)
        .expect("row-major RFM buffer matches its shape")
}

/// Normalize RFM records into [0, 1] feature space, returning the fitted
/// scaler alongside so new points can be mapped into the same space.
pub fn normalize(records: &[RfmRecord]) -> Result<(Array2<f64>, MinMaxScaler)> {
    let raw = to_matrix(records);
    let scaler = MinMaxScaler::fit(&raw)?;
    let normalized = scaler.transform(&raw);
    Ok((normalized, scaler))
}
