//! # Effects Error Types
//!
//! The per-frame path never fails: invalid transitions, pool saturation and
//! quality downgrades are policies. Only configuration loading can error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up the effects engine.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid TOML for [`crate::EffectsConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for effects setup.
pub type EffectsResult<T> = Result<T, EffectsError>;
