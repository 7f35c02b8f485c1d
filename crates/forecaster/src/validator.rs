use common::{CalendarMonth, ForecastError, ForecastParams, HotelIdentity, Result, N_LAGS};

/// Raw forecast request as it arrives from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub month: i64,
    pub year: i64,
    /// Actual revenue of the two months before `month`, oldest first.
    pub revenue: Vec<f64>,
    pub hotel: String,
}

/// A request that passed every input check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedRequest {
    pub hotel: HotelIdentity,
    /// Target month of the first horizon step.
    pub start: CalendarMonth,
    pub actuals: [f64; N_LAGS],
}

/// Check month, year, revenues and hotel, in that order. Performs no I/O.
pub fn validate(request: &ForecastRequest, params: &ForecastParams) -> Result<ValidatedRequest> {
    if !(1..=12).contains(&request.month) {
        return Err(ForecastError::InvalidParameter(format!(
            "month must be within 1..=12, got {}",
            request.month
        )));
    }

    if !params.years.contains(request.year) {
        return Err(ForecastError::InvalidParameter(format!(
            "year must be within {}..={}, got {}",
            params.years.min, params.years.max, request.year
        )));
    }

    let actuals: [f64; N_LAGS] = request.revenue.as_slice().try_into().map_err(|_| {
        ForecastError::InvalidParameter(format!(
            "exactly {N_LAGS} revenue values are required, got {}",
            request.revenue.len()
        ))
    })?;
    for (i, value) in actuals.iter().enumerate() {
        if !value.is_finite() || *value < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "revenue #{} must be a finite non-negative number, got {value}",
                i + 1
            )));
        }
    }

    let hotel = HotelIdentity::parse(&request.hotel, params.case_sensitive_hotels)?;

    // Range checks above make both conversions infallible.
    let start = CalendarMonth::new(request.year as i32, request.month as u32)?;

    Ok(ValidatedRequest {
        hotel,
        start,
        actuals,
    })
}
