//! Entity extraction for CSV streams.
//!
//! Replaces a repeating attribute tuple (an "entity") in a row stream with
//! a small, stable integer reference drawn from and persisted to an
//! append-only mapping store, so identical tuples collapse to the same
//! reference across runs.
//!
//! - **mapper**: the deduplicating reference store ([`Mapper`],
//!   [`DuplicatePolicy`])
//! - **extract**: drives a mapper over a full data stream
//!   ([`EntityExtractor`])

pub mod extract;
pub mod mapper;

pub use extract::{EntityExtractor, ExtractStats};
pub use mapper::{DuplicatePolicy, Mapper};
