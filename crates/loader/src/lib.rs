mod bundle;
mod source;

pub use bundle::{BundleFile, ModelBundle};
pub use source::{BundleSource, FsBundleSource};
