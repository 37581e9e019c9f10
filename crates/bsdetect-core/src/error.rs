//! Error types.
//!
//! Detection itself never fails; these cover the surrounding API surface
//! (parsing scheme names, loading configuration).

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A scheme name that is not one of [`Scheme::ALL`](crate::Scheme::ALL).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown bankswitching scheme: {name}")]
pub struct ParseSchemeError {
    pub name: String,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse detector configuration")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize detector configuration")]
    Serialize(#[from] toml::ser::Error),
}
