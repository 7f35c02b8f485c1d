use std::collections::VecDeque;

use common::{
    CalendarMonth, ForecastError, ForecastParams, ForecastResult, Result, RevenueObservation,
    HORIZON, N_LAGS,
};
use encoder::CalendarEncoder;
use loader::{BundleSource, ModelBundle};
use tracing::{debug, warn};

use crate::observer::ForecastObserver;
use crate::validator::{validate, ForecastRequest, ValidatedRequest};

/// Feature row for one horizon step: the lag window newest first, followed by
/// the calendar encoding of the target month.
pub fn build_features(
    encoder: &dyn CalendarEncoder,
    target: CalendarMonth,
    lags: &VecDeque<f64>,
) -> Result<Vec<f64>> {
    let calendar = encoder.encode(target.month())?;
    let mut features = Vec::with_capacity(lags.len() + calendar.len());
    features.extend(lags.iter().rev());
    features.extend(calendar);
    Ok(features)
}

/// Rolling direct multi-step forecast.
///
/// Step k uses its own regressor for target month `start + (k - 1)`. After each
/// step the forecast is pushed into the lag window, so step 2 sees the first
/// forecast and the last actual, and steps 3..=6 see forecasts only.
pub fn rolling_forecast(bundle: &ModelBundle, request: &ValidatedRequest) -> Result<ForecastResult> {
    if bundle.hotel() != request.hotel {
        return Err(ForecastError::ModelCorrupt(format!(
            "bundle for {} used to forecast {}",
            bundle.hotel(),
            request.hotel
        )));
    }

    let start = request.start;
    let mut observations = Vec::with_capacity(N_LAGS + HORIZON);
    for (i, &value) in request.actuals.iter().enumerate() {
        let month = start.offset(i as i32 - N_LAGS as i32);
        observations.push(RevenueObservation::actual(month, value));
    }

    let mut lags: VecDeque<f64> = request.actuals.iter().copied().collect();

    for k in 1..=HORIZON {
        let target = start.offset(k as i32 - 1);
        let features = build_features(bundle.encoder(), target, &lags)?;
        let raw = bundle.models().predict_step(k, &features)?;

        if !raw.is_finite() {
            return Err(ForecastError::InvalidPrediction { step: k, value: raw });
        }
        let value = if raw < 0.0 {
            warn!(step = k, month = %target, value = raw, "Negative forecast clamped to zero");
            0.0
        } else {
            raw
        };

        debug!(
            step = k,
            month = %target,
            lag_1 = features[0],
            lag_2 = features[1],
            value = value,
            "Horizon step forecast"
        );

        observations.push(RevenueObservation::forecast(target, value));
        lags.pop_front();
        lags.push_back(value);
    }

    Ok(ForecastResult {
        hotel: request.hotel,
        observations,
    })
}

/// Main entry point.
///
/// Pipeline: validate → load bundle → rolling forecast. The first failing
/// stage aborts the run; nothing is returned for later stages.
pub fn run_forecast(
    request: &ForecastRequest,
    params: &ForecastParams,
    source: &dyn BundleSource,
    observer: &dyn ForecastObserver,
) -> Result<ForecastResult> {
    observer.requested(request);
    match run_stages(request, params, source, observer) {
        Ok(result) => {
            observer.completed(&result);
            Ok(result)
        }
        Err(e) => {
            observer.failed(&e);
            Err(e)
        }
    }
}

fn run_stages(
    request: &ForecastRequest,
    params: &ForecastParams,
    source: &dyn BundleSource,
    observer: &dyn ForecastObserver,
) -> Result<ForecastResult> {
    let validated = validate(request, params)?;
    observer.validated(&validated);

    let bundle = source.load(validated.hotel)?;
    observer.bundle_loaded(&bundle);

    let result = rolling_forecast(&bundle, &validated)?;
    debug!(
        hotel = %result.hotel,
        start = %validated.start,
        steps = HORIZON,
        "Rolling forecast complete"
    );
    Ok(result)
}
