//! Shared value types for the geofix facade.
//!
//! Holds the normalized fix, the closed failure taxonomy, per-request
//! options and the process-wide defaults they are merged with.

pub mod app_config;
pub mod config;
pub mod failure;
pub mod fix;
pub mod kind;
pub mod options;

pub use app_config::LocateConfig;
pub use config::{load_locate_config, load_locate_config_from_env, parse_meters};
pub use failure::{ErrorCode, GeolocationFailure, Locale};
pub use fix::{Coordinates, PositionFix};
pub use kind::GeolocatorKind;
pub use options::RequestOptions;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}
