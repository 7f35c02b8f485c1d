use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CalendarMonth, ForecastError, Result};

/// Number of horizon steps every bundle forecasts.
pub const HORIZON: usize = 6;

/// Number of revenue lags every regressor consumes.
pub const N_LAGS: usize = 2;

/// The two hotels a model bundle exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotelIdentity {
    #[serde(rename = "City Hotel")]
    CityHotel,
    #[serde(rename = "Resort Hotel")]
    ResortHotel,
}

impl HotelIdentity {
    pub const ALL: [HotelIdentity; 2] = [HotelIdentity::CityHotel, HotelIdentity::ResortHotel];

    pub fn display_name(&self) -> &'static str {
        match self {
            HotelIdentity::CityHotel => "City Hotel",
            HotelIdentity::ResortHotel => "Resort Hotel",
        }
    }

    /// File stem of the persisted bundle: the display name without spaces.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            HotelIdentity::CityHotel => "CityHotel",
            HotelIdentity::ResortHotel => "ResortHotel",
        }
    }

    pub fn parse(name: &str, case_sensitive: bool) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|h| {
                if case_sensitive {
                    h.display_name() == name
                } else {
                    h.display_name().eq_ignore_ascii_case(name)
                }
            })
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "hotel '{name}' is not one of {:?}",
                    Self::ALL.map(|h| h.display_name())
                ))
            })
    }
}

impl fmt::Display for HotelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Actual,
    Forecast,
}

/// One actual or forecast monthly revenue value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueObservation {
    pub month: CalendarMonth,
    pub value: f64,
    pub kind: ObservationKind,
}

impl RevenueObservation {
    pub fn actual(month: CalendarMonth, value: f64) -> Self {
        Self {
            month,
            value,
            kind: ObservationKind::Actual,
        }
    }

    pub fn forecast(month: CalendarMonth, value: f64) -> Self {
        Self {
            month,
            value,
            kind: ObservationKind::Forecast,
        }
    }
}

/// Output of one rolling forecast: the actuals followed by the forecasts,
/// in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub hotel: HotelIdentity,
    pub observations: Vec<RevenueObservation>,
}

impl ForecastResult {
    pub fn actuals(&self) -> impl Iterator<Item = &RevenueObservation> {
        self.observations
            .iter()
            .filter(|o| o.kind == ObservationKind::Actual)
    }

    pub fn forecasts(&self) -> impl Iterator<Item = &RevenueObservation> {
        self.observations
            .iter()
            .filter(|o| o.kind == ObservationKind::Forecast)
    }

    pub fn forecast_values(&self) -> Vec<f64> {
        self.forecasts().map(|o| o.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_names() {
        assert_eq!(
            HotelIdentity::parse("City Hotel", true).unwrap(),
            HotelIdentity::CityHotel
        );
        assert_eq!(
            HotelIdentity::parse("Resort Hotel", true).unwrap(),
            HotelIdentity::ResortHotel
        );
    }

    #[test]
    fn test_parse_is_case_sensitive_by_flag() {
        assert!(HotelIdentity::parse("city hotel", true).is_err());
        assert_eq!(
            HotelIdentity::parse("city hotel", false).unwrap(),
            HotelIdentity::CityHotel
        );
    }

    #[test]
    fn test_parse_rejects_stem_and_unknown() {
        assert!(matches!(
            HotelIdentity::parse("CityHotel", true),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(HotelIdentity::parse("Airport Hotel", false).is_err());
    }

    #[test]
    fn test_artifact_stem() {
        assert_eq!(HotelIdentity::CityHotel.artifact_stem(), "CityHotel");
        assert_eq!(HotelIdentity::ResortHotel.artifact_stem(), "ResortHotel");
    }

    #[test]
    fn test_hotel_serde_uses_display_name() {
        let json = serde_json::to_string(&HotelIdentity::ResortHotel).unwrap();
        assert_eq!(json, "\"Resort Hotel\"");
        let back: HotelIdentity = serde_json::from_str("\"City Hotel\"").unwrap();
        assert_eq!(back, HotelIdentity::CityHotel);
    }

    #[test]
    fn test_result_partitions_by_kind() {
        let m = CalendarMonth::new(2023, 1).unwrap();
        let result = ForecastResult {
            hotel: HotelIdentity::CityHotel,
            observations: vec![
                RevenueObservation::actual(m, 1.0),
                RevenueObservation::forecast(m.succ(), 2.0),
                RevenueObservation::forecast(m.offset(2), 3.0),
            ],
        };
        assert_eq!(result.actuals().count(), 1);
        assert_eq!(result.forecast_values(), vec![2.0, 3.0]);
    }
}
