//! Errors raised while loading `tuning-db.toml`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} does not exist; create one with `tuning-db config init`")]
    NotFound(PathBuf),

    #[error("{path} is not valid tuning-db TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("setting '{field}' rejected: {message}")]
    Validation { field: String, message: String },
}
