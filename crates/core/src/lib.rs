//! filekind-core
//!
//! Content classification core for a file-upload pipeline.
//!
//! Two pure classifiers live here: one maps a file name and declared media
//! type to a coarse [`Category`], the other infers the data shape of JSON
//! text ([`JsonShape`]). The `services` layer composes them for files on disk.
//!
//! All substantive logic is kept here so it is fully testable and reusable
//! from multiple frontends.

pub mod classify;
pub mod config;
pub mod model;
pub mod services;

pub use classify::{classify_category, classify_json_shape};
pub use config::ClassifierConfig;
pub use model::{Category, Classification, FileDescriptor, JsonShape};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
