//! Silhouette Core - shared types, configuration, and error handling

pub mod config;
pub mod error;
pub mod types;

pub use config::SilhouetteConfig;
pub use error::{Error, Result};
pub use types::*;
