//! HTML extraction infrastructure
//!
//! Declarative probes (`locator`), the evaluator that walks them, the
//! sanitization filter and field validators, and the per-platform strategy
//! tables. Nothing here mutates the parsed document.

pub mod error;
pub mod evaluator;
pub mod locator;
pub mod page;
pub mod sanitize;
pub mod strategies;
pub mod validators;

// Re-export public types
pub use error::{ParsingError, ParsingResult};
pub use evaluator::{FieldChain, resolve_field, resolve_reviews};
pub use locator::{ExtractRule, Locator, Probe, Region, ReviewProbe, Transform};
pub use page::{Located, PageHandle, PageQuery};
pub use sanitize::clean;
pub use strategies::{StrategyTable, build_table, table_for};
pub use validators::FieldValidator;
