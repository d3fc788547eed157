//! Error taxonomy shared by the trajectory and formation-tops components.
//!
//! Each component has its own `thiserror` enum; every variant maps onto one
//! of three kinds so callers can branch on the class of mistake without
//! matching individual variants.

use serde::{Deserialize, Serialize};

/// Class of a library error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed construction input or call arguments.
    Validation,
    /// A query by formation name that does not exist.
    NotFound,
    /// An interpolation query outside the indexed array's bounds.
    Range,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Range => "range",
        };
        write!(f, "{s}")
    }
}

/// Failure while importing tops or survey tables from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error ({}): {1}", .0.display())]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No usable survey column in header (need MD plus TVD, offsets or INC/AZI)")]
    NoSurveyColumns,

    #[error("Row {row}, column {column}: cannot parse '{value}' as a number")]
    BadNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Trajectory(#[from] crate::trajectory::TrajectoryError),

    #[error(transparent)]
    Tops(#[from] crate::tops::TopsError),
}
