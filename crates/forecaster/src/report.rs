use common::{ForecastResult, ObservationKind, RevenueObservation, HORIZON};

/// Human-readable forecast report: a header naming the hotel, then one line
/// per observation with its end-of-month date and the value to two decimals.
pub fn report_lines(result: &ForecastResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.observations.len() + 1);
    lines.push(format!(
        "{} rolling {HORIZON}-month revenue forecast",
        result.hotel
    ));
    lines.extend(result.observations.iter().map(format_observation));
    lines
}

pub fn format_observation(observation: &RevenueObservation) -> String {
    let label = match observation.kind {
        ObservationKind::Actual => "Actual  ",
        ObservationKind::Forecast => "Forecast",
    };
    let date = observation
        .month
        .end_of_month()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| observation.month.to_string());
    format!("{label} {date}\t{:.2}", observation.value)
}
