//! # hotel-forecast
//!
//! Rolling 6-month revenue forecast for one hotel, starting from a given month
//! and the actual revenue of the two months before it.
//!
//! ```text
//! hotel-forecast -m 2 -y 2023 -r 180000 200000 --hotel "Resort Hotel"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use common::{ForecastError, ForecastParams};
use forecaster::{run_forecast, ForecastRequest, TracingObserver};
use loader::FsBundleSource;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "hotel-forecast", version)]
#[command(about = "Rolling 6-month hotel revenue forecast", long_about = None)]
struct Cli {
    /// Start month for forecast [1..=12]
    #[arg(short, long, allow_negative_numbers = true)]
    month: i64,

    /// Start year for forecast (range comes from params.yaml)
    #[arg(short, long, allow_negative_numbers = true)]
    year: i64,

    /// Actual revenue for the two preceding months, oldest first
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["PREV_2", "PREV_1"],
        allow_negative_numbers = true,
        required = true
    )]
    revenue: Vec<f64>,

    /// Name of the hotel ("City Hotel" or "Resort Hotel")
    #[arg(short = 'H', long)]
    hotel: String,

    /// Training parameters file
    #[arg(short, long, default_value = "models/params.yaml")]
    params: PathBuf,

    /// Directory holding the model bundles (overrides models_path)
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !reported_by_observer(&e) {
                error!(stage = "config", "{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Pipeline failures are already logged, with their stage, by the observer.
fn reported_by_observer(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ForecastError>()
        .is_some_and(|e| e.stage() != "config")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut params = ForecastParams::load(&cli.params)
        .with_context(|| format!("can't load {}", cli.params.display()))?;
    if let Some(dir) = cli.models_dir {
        params.models_path = dir;
    }

    let request = ForecastRequest {
        month: cli.month,
        year: cli.year,
        revenue: cli.revenue,
        hotel: cli.hotel,
    };
    let source = FsBundleSource::from_params(&params);
    let observer = TracingObserver::with_params(&params);

    run_forecast(&request, &params, &source, &observer)?;
    Ok(())
}
