//! Lifelog CLI Library
//!
//! Offline reports over CSV exports of the log tables. Exposed as a
//! library so integration tests can drive the loaders and report builders.

pub mod config;
pub mod error;
pub mod loader;
pub mod report;
