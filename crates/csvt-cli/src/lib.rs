//! Library components for the csvt CLI.

pub mod logging;
pub mod pipeline;
