use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::{ForecastError, ForecastParams, HotelIdentity, Result};
use encoder::CalendarEncoder;
use tracing::{error, info};

use crate::{BundleFile, ModelBundle};

/// Where model bundles come from.
pub trait BundleSource {
    fn load(&self, hotel: HotelIdentity) -> Result<ModelBundle>;
}

/// Reads `<models_dir>/<HotelStem>.json`.
#[derive(Debug, Clone)]
pub struct FsBundleSource {
    models_dir: PathBuf,
    exog_columns: Vec<String>,
}

impl FsBundleSource {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
            exog_columns: Vec::new(),
        }
    }

    /// Uses `models_path` and checks the encoder width against `exog_columns`.
    pub fn from_params(params: &ForecastParams) -> Self {
        Self {
            models_dir: params.models_path.clone(),
            exog_columns: params.exog_columns.clone(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn bundle_path(&self, hotel: HotelIdentity) -> PathBuf {
        self.models_dir.join(format!("{}.json", hotel.artifact_stem()))
    }

    fn read(&self, hotel: HotelIdentity) -> Result<ModelBundle> {
        let path = self.bundle_path(hotel);
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ForecastError::ModelNotFound {
                hotel: hotel.to_string(),
                path: path.clone(),
            },
            _ => ForecastError::ModelCorrupt(format!("can't read {}: {e}", path.display())),
        })?;
        let file: BundleFile = serde_json::from_str(&content).map_err(|e| {
            ForecastError::ModelCorrupt(format!("can't parse {}: {e}", path.display()))
        })?;
        let bundle = ModelBundle::from_file(file, hotel)?;

        if !self.exog_columns.is_empty()
            && self.exog_columns.len() != bundle.encoder().n_features()
        {
            return Err(ForecastError::ModelCorrupt(format!(
                "params list {} calendar columns, encoder produces {}",
                self.exog_columns.len(),
                bundle.encoder().n_features()
            )));
        }
        Ok(bundle)
    }
}

impl BundleSource for FsBundleSource {
    fn load(&self, hotel: HotelIdentity) -> Result<ModelBundle> {
        match self.read(hotel) {
            Ok(bundle) => {
                info!(
                    hotel = %hotel,
                    path = %self.bundle_path(hotel).display(),
                    n_features = bundle.models().n_features(),
                    "Model bundle loaded"
                );
                Ok(bundle)
            }
            Err(e) => {
                error!(hotel = %hotel, error = %e, "Can't load model bundle");
                Err(e)
            }
        }
    }
}
