use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BetaError {
    #[error("{field} is disabled: {reason}")]
    FieldDisabled {
        field: &'static str,
        reason: &'static str,
    },
    #[error("{field} is not available in BETA {mode}")]
    FieldNotInMode { field: &'static str, mode: &'static str },
    #[error("'{value}' rejected by the {field} input filter")]
    RejectedInput { field: &'static str, value: String },
    #[error("unknown {what} '{value}'")]
    UnknownOption { what: &'static str, value: String },
    #[error("reading config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("opening run log {path}: {source}")]
    RunLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BetaError>;
