//! Error types for loading household data and validating assumptions
//!
//! The projection engine and solvers are infallible; errors only arise at the
//! file boundary and when planning constants are out of range.

use thiserror::Error;

/// Failure while reading or writing household data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid household JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown {field} '{value}'")]
    UnknownLabel { field: &'static str, value: String },
}

impl LoadError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        LoadError::UnknownLabel {
            field,
            value: value.to_string(),
        }
    }
}

/// Planning constants outside their usable range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssumptionError {
    #[error("{name} must be in (0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("bisection needs at least one iteration")]
    NoIterations,

    #[error("could not parse {var}='{value}'")]
    BadEnvVar { var: &'static str, value: String },
}
