use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

use crate::training::history::Metric;

/// Error type for loading histories and rendering the metrics figure
#[derive(Error, Debug)]
pub enum PlotError {
    // History errors
    #[error("{model}: {metric} has {actual} epochs, expected {expected}")]
    LengthMismatch {
        model: String,
        metric: Metric,
        expected: usize,
        actual: usize,
    },

    #[error("{model}: missing field `{field}`")]
    MissingField { model: String, field: String },

    #[error("{model}: invalid {field} value {value:?} on row {row}")]
    InvalidValue {
        model: String,
        field: String,
        row: usize,
        value: String,
    },

    // Output errors
    #[error("Output directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Drawing error: {0}")]
    Drawing(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Viewer `{command}` exited with {status}")]
    Viewer { command: String, status: String },

    // Wrapped errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
