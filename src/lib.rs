//! Product Lens - marketplace product attribute extraction
//!
//! Reads a rendered product page (URL plus HTML) from one of the supported
//! marketplaces and produces a normalized `ExtractionRecord`: title, price,
//! rating, image, seller and shipping details, brand, authors and a few
//! review excerpts. Extraction never fails; fields that cannot be resolved
//! are `None`.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the extraction surface for easier access
pub use application::{ProductExtractor, extract};
pub use domain::{ExtractionRecord, FieldKey, Platform};
pub use infrastructure::config::ExtractorConfig;
pub use infrastructure::parsing::{PageHandle, PageQuery};
