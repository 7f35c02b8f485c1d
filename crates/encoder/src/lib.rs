mod spline;

pub use spline::PeriodicSplineEncoder;

use common::Result;

/// Trait for calendar feature encoders.
pub trait CalendarEncoder: Send + Sync {
    /// Width of every encoded row.
    fn n_features(&self) -> usize;

    /// Encode a month of the year (1..=12) into a feature row.
    fn encode(&self, month: u32) -> Result<Vec<f64>>;

    /// Encode several months, one row per month.
    fn encode_many(&self, months: &[u32]) -> Result<Vec<Vec<f64>>> {
        months.iter().map(|&m| self.encode(m)).collect()
    }
}
