//! Browser helpers

pub mod download;
pub mod log_trace;
