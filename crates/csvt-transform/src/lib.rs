//! Horizontal transforms over tokenized row streams.
//!
//! - **zip**: positional join of two streams on their single shared field
//! - **unzip**: vertical split into two id-linked streams
//! - **select**: reorder/rename columns through a field map
//! - **rmfields**: drop named columns

pub mod error;
pub mod rmfields;
pub mod select;
pub mod unzip;
pub mod zip;

pub use error::{Result, TransformError};
pub use rmfields::rmfields;
pub use select::select;
pub use unzip::unzip;
pub use zip::zip;
