use common::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CalendarEncoder;

/// Periodic B-spline encoding of month-of-year.
///
/// Uses `n_splines + 1` equally spaced knots on `[0, period]`, extended
/// periodically by `degree` knots on both sides. Inputs are wrapped into
/// `[0, period)` before evaluation, so month 12 maps onto the same point as 0
/// and December sits next to January. The `degree` trailing bases overlap the
/// leading ones after wrapping and are folded onto them, which leaves exactly
/// `n_splines` output columns. Every row sums to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicSplineEncoder {
    period: f64,
    n_splines: usize,
    degree: usize,
}

impl PeriodicSplineEncoder {
    pub const MONTHS_PER_YEAR: f64 = 12.0;

    /// `n_splines` defaults to the period.
    pub fn new(period: f64, n_splines: Option<usize>, degree: usize) -> Result<Self> {
        let encoder = Self {
            period,
            n_splines: n_splines.unwrap_or(period.round() as usize),
            degree,
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Cubic encoder with one spline per month.
    pub fn monthly() -> Self {
        Self {
            period: Self::MONTHS_PER_YEAR,
            n_splines: 12,
            degree: 3,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Reject parameter combinations that cannot form a periodic basis.
    pub fn validate(&self) -> Result<()> {
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(ForecastError::ModelCorrupt(format!(
                "spline period must be positive, got {}",
                self.period
            )));
        }
        if self.degree == 0 {
            return Err(ForecastError::ModelCorrupt(
                "spline degree must be at least 1".into(),
            ));
        }
        if self.n_splines < self.degree + 1 {
            return Err(ForecastError::ModelCorrupt(format!(
                "periodic splines need n_splines > degree, got n_splines={} degree={}",
                self.n_splines, self.degree
            )));
        }
        Ok(())
    }

    /// Column names in output order.
    pub fn column_names(&self, feature: &str) -> Vec<String> {
        (0..self.n_splines)
            .map(|i| format!("{feature}_sp_{i}"))
            .collect()
    }

    fn knots(&self) -> Vec<f64> {
        let n_base = self.n_splines + 1;
        let step = self.period / self.n_splines as f64;
        let base: Vec<f64> = (0..n_base).map(|i| i as f64 * step).collect();

        let mut knots = Vec::with_capacity(n_base + 2 * self.degree);
        knots.extend(base[n_base - 1 - self.degree..n_base - 1].iter().map(|k| k - self.period));
        knots.extend_from_slice(&base);
        knots.extend(base[1..=self.degree].iter().map(|k| k + self.period));
        knots
    }

    /// Encode an arbitrary position on the period (not restricted to months).
    pub fn encode_value(&self, x: f64) -> Vec<f64> {
        let knots = self.knots();
        let lower = knots[self.degree];
        let x = lower + (x - lower).rem_euclid(self.period);

        let bases = bspline_bases(&knots, self.degree, x);
        let mut row = vec![0.0; self.n_splines];
        for (i, b) in bases.into_iter().enumerate() {
            row[i % self.n_splines] += b;
        }
        row
    }
}

impl Default for PeriodicSplineEncoder {
    fn default() -> Self {
        Self::monthly()
    }
}

impl CalendarEncoder for PeriodicSplineEncoder {
    fn n_features(&self) -> usize {
        self.n_splines
    }

    fn encode(&self, month: u32) -> Result<Vec<f64>> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidMonth(month as i64));
        }
        let row = self.encode_value(month as f64);
        debug!(month = month, width = row.len(), "Encoded calendar month");
        Ok(row)
    }
}

/// Cox–de Boor evaluation of every B-spline basis of `degree` over `knots`
/// at `x`. Returns `knots.len() - degree - 1` values.
fn bspline_bases(knots: &[f64], degree: usize, x: f64) -> Vec<f64> {
    let mut bases: Vec<f64> = knots
        .windows(2)
        .map(|w| if w[0] <= x && x < w[1] { 1.0 } else { 0.0 })
        .collect();

    for d in 1..=degree {
        let next: Vec<f64> = (0..bases.len() - 1)
            .map(|i| {
                let left_span = knots[i + d] - knots[i];
                let right_span = knots[i + d + 1] - knots[i + 1];
                let left = if left_span > 0.0 {
                    (x - knots[i]) / left_span * bases[i]
                } else {
                    0.0
                };
                let right = if right_span > 0.0 {
                    (knots[i + d + 1] - x) / right_span * bases[i + 1]
                } else {
                    0.0
                };
                left + right
            })
            .collect();
        bases = next;
    }
    bases
}
