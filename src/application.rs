//! Application layer module
//!
//! Orchestrates platform detection, strategy lookup and probe evaluation
//! into a complete extraction record.

pub mod extraction_service;

pub use extraction_service::{ProductExtractor, extract};
