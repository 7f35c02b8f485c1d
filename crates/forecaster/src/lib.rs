mod observer;
mod pipeline;
mod report;
mod validator;

pub use observer::{ForecastObserver, NoopObserver, TracingObserver};
pub use pipeline::{build_features, rolling_forecast, run_forecast};
pub use report::{format_observation, report_lines};
pub use validator::{validate, ForecastRequest, ValidatedRequest};
