//! Domain module - platform, field and record types
//!
//! These types carry no behavior beyond their own invariants; extraction
//! logic lives in the infrastructure layer.

pub mod field;
pub mod platform;
pub mod record;

pub use field::FieldKey;
pub use platform::Platform;
pub use record::ExtractionRecord;
