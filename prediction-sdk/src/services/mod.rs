//! Service-specific client implementations

pub mod prediction;
mod common;

pub use common::UserAgent;
