use std::collections::BTreeMap;

use common::{ForecastError, ForecastParams, ForecastResult, TrainingMetrics};
use loader::ModelBundle;
use tracing::{debug, error, info};

use crate::report::report_lines;
use crate::validator::{ForecastRequest, ValidatedRequest};

/// Receives pipeline progress. Passed into [`crate::run_forecast`] so the core
/// never depends on a process-wide logger.
pub trait ForecastObserver {
    fn requested(&self, _request: &ForecastRequest) {}
    fn validated(&self, _request: &ValidatedRequest) {}
    fn bundle_loaded(&self, _bundle: &ModelBundle) {}
    fn completed(&self, _result: &ForecastResult) {}
    fn failed(&self, _error: &ForecastError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ForecastObserver for NoopObserver {}

/// Emits the human-readable log stream through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver {
    metrics: BTreeMap<String, TrainingMetrics>,
}

impl TracingObserver {
    /// Also reports the hold-out metrics recorded in `params` for the loaded hotel.
    pub fn with_params(params: &ForecastParams) -> Self {
        Self {
            metrics: params.metrics.clone(),
        }
    }
}

impl ForecastObserver for TracingObserver {
    fn requested(&self, request: &ForecastRequest) {
        info!(
            "Requested rolling revenue forecast for {} starting from {:02}-{}",
            request.hotel, request.month, request.year
        );
    }

    fn validated(&self, _request: &ValidatedRequest) {
        info!("Parameters check passed successfully");
    }

    fn bundle_loaded(&self, bundle: &ModelBundle) {
        info!("Model and transformer were loaded successfully");
        let hotel = bundle.hotel();
        if let Some(metrics) = self.metrics.get(hotel.display_name()) {
            debug!(
                mae = metrics.mae,
                mape = ?metrics.mape,
                "Training hold-out metrics for {hotel}"
            );
        }
    }

    fn completed(&self, result: &ForecastResult) {
        for line in report_lines(result) {
            info!("{line}");
        }
    }

    fn failed(&self, error: &ForecastError) {
        error!(stage = error.stage(), "Forecast aborted: {error}");
    }
}
