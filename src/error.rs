//! Error types for bar cutting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for validation, input loading and packing.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("The list of pieces to cut is empty")]
    InputEmpty,

    #[error("The list of lengths ({lengths}) and the list of demands ({demand}) must have the same number of values")]
    DemandMismatch { lengths: usize, demand: usize },

    #[error("Piece of length {length} can never be cut from a bar of length {raw_length}")]
    UnpackableDemand { length: u32, raw_length: u32 },

    #[error("Demand expands to {count} pieces, more than the limit of {max}")]
    TooManyPieces { count: u64, max: u64 },

    #[error("Raw bar length must be non-zero")]
    InvalidRawLength,

    #[error("Piece length at position {index} must be non-zero")]
    InvalidPieceLength { index: usize },

    #[error("Missing column '{column}' in input")]
    MissingColumn { column: String },

    #[error("Invalid value in row {row}, column '{column}': '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CutError {
    /// Short machine-readable name for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            CutError::InputEmpty => "input_empty",
            CutError::DemandMismatch { .. } => "demand_mismatch",
            CutError::UnpackableDemand { .. } => "unpackable_demand",
            CutError::TooManyPieces { .. } => "too_many_pieces",
            CutError::InvalidRawLength => "invalid_raw_length",
            CutError::InvalidPieceLength { .. } => "invalid_piece_length",
            CutError::MissingColumn { .. } => "missing_column",
            CutError::InvalidValue { .. } => "invalid_value",
            CutError::UnsupportedFormat { .. } => "unsupported_format",
            CutError::Io(_) => "io",
            CutError::Csv(_) => "csv",
            CutError::Json(_) => "json",
        }
    }

    /// Whether the error was caused by the job itself rather than by loading it.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CutError::InputEmpty
                | CutError::DemandMismatch { .. }
                | CutError::UnpackableDemand { .. }
                | CutError::TooManyPieces { .. }
                | CutError::InvalidRawLength
                | CutError::InvalidPieceLength { .. }
        )
    }
}

/// Result type alias for cutting operations.
pub type Result<T> = std::result::Result<T, CutError>;
