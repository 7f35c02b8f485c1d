pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::*;
pub use config::*;
pub use error::*;
pub use types::*;
