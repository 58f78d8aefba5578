//! Shared data model for the csvt toolkit.
//!
//! - **row**: the tokenized row-stream boundary (`Row`, `RowSink`)
//! - **header**: name → column addressing and extractor composition
//! - **fields**: the `[out=]in` field-mapping mini-language
//! - **error**: the common error taxonomy

pub mod error;
pub mod fields;
pub mod header;
pub mod row;

pub use error::{CsvtError, Result};
pub use fields::{FieldSpec, FieldsMap};
pub use header::{FieldExtractor, Header, Projection};
pub use row::{Row, RowSink, read_rows};
