//! Error types for the horizontal transforms.

use std::collections::BTreeSet;
use std::fmt;

use csvt_model::CsvtError;

/// Errors from zip/unzip/select/rmfields.
#[derive(Debug)]
pub enum TransformError {
    /// A model-level failure (header validation, csv, io).
    Model(CsvtError),
    /// Zip inputs share zero or more than one field name.
    BadInput { common: BTreeSet<String> },
    /// Positionally paired zip rows disagree on the shared key's value.
    IdMismatch {
        row: u64,
        left: String,
        right: String,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(error) => error.fmt(f),
            Self::BadInput { common } => {
                if common.is_empty() {
                    write!(f, "inputs share no common field to zip on")
                } else {
                    let fields: Vec<&str> = common.iter().map(String::as_str).collect();
                    write!(
                        f,
                        "inputs share more than one common field: {}",
                        fields.join(", ")
                    )
                }
            }
            Self::IdMismatch { row, left, right } => {
                write!(f, "id mismatch at row {row}: '{left}' vs '{right}'")
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(error) => Some(error),
            _ => None,
        }
    }
}

impl From<CsvtError> for TransformError {
    fn from(error: CsvtError) -> Self {
        Self::Model(error)
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
