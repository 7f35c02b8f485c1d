use common::{ForecastError, HotelIdentity, Result, N_LAGS};
use encoder::{CalendarEncoder, PeriodicSplineEncoder};
use models::{DirectModelSet, Regressor};
use serde::{Deserialize, Serialize};

/// On-disk layout of `<models_dir>/<HotelStem>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleFile {
    pub hotel: HotelIdentity,
    pub n_lags: usize,
    pub encoder: PeriodicSplineEncoder,
    pub regressors: Vec<Regressor>,
}

/// Fitted calendar encoder plus the six step regressors of one hotel.
///
/// Immutable once built; every check that ties the encoder to the regressors
/// runs here, so a bundle that exists can always build its feature rows.
#[derive(Debug)]
pub struct ModelBundle {
    hotel: HotelIdentity,
    encoder: PeriodicSplineEncoder,
    models: DirectModelSet,
}

impl ModelBundle {
    pub fn new(
        hotel: HotelIdentity,
        encoder: PeriodicSplineEncoder,
        models: DirectModelSet,
    ) -> Result<Self> {
        encoder.validate()?;
        let expected = N_LAGS + encoder.n_features();
        if models.n_features() != expected {
            return Err(ForecastError::ModelCorrupt(format!(
                "regressors expect {} features, but {N_LAGS} lags + {} calendar columns give {expected}",
                models.n_features(),
                encoder.n_features()
            )));
        }
        Ok(Self {
            hotel,
            encoder,
            models,
        })
    }

    /// Check a deserialized file against the hotel it was requested for.
    pub fn from_file(file: BundleFile, hotel: HotelIdentity) -> Result<Self> {
        if file.hotel != hotel {
            return Err(ForecastError::ModelCorrupt(format!(
                "bundle belongs to {}, requested {hotel}",
                file.hotel
            )));
        }
        if file.n_lags != N_LAGS {
            return Err(ForecastError::ModelCorrupt(format!(
                "bundle was trained with n_lags={}, expected {N_LAGS}",
                file.n_lags
            )));
        }
        let steps = file
            .regressors
            .into_iter()
            .map(Regressor::into_predictor)
            .collect();
        let models = DirectModelSet::new(steps)?;
        Self::new(file.hotel, file.encoder, models)
    }

    pub fn hotel(&self) -> HotelIdentity {
        self.hotel
    }

    pub fn encoder(&self) -> &PeriodicSplineEncoder {
        &self.encoder
    }

    pub fn models(&self) -> &DirectModelSet {
        &self.models
    }
}
