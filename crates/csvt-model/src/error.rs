use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvtError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("input stream has no header row")]
    MissingHeader,
    #[error("missing fields in header: {}", join(.0))]
    MissingFields(BTreeSet<String>),
    #[error("unexpected fields in header: {}", join(.0))]
    ExtraFields(BTreeSet<String>),
    #[error("reference field '{0}' is also listed as an attribute field")]
    InvalidReferenceField(String),
    #[error("reference spec must name exactly one field, got {0}")]
    InvalidReferenceSpec(usize),
    #[error("duplicate output field(s): {}", .0.join(", "))]
    DuplicateFields(Vec<String>),
    #[error("row has {len} cells, no cell at column {position}")]
    ShortRow { position: usize, len: usize },
    #[error("invalid reference value '{value}': {source}")]
    InvalidReference {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error(
        "ambiguous mapping store: attributes ({}) mapped to both {existing} and {conflicting}",
        .values.join(", ")
    )]
    AmbiguousMapping {
        existing: u64,
        conflicting: u64,
        values: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, CsvtError>;

fn join(fields: &BTreeSet<String>) -> String {
    fields
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
