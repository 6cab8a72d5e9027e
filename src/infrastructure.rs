//! Infrastructure layer: configuration, logging and HTML extraction
//!
//! This module provides the configuration loader, the tracing setup used by
//! the binary, and the parsing machinery behind `extract`.

pub mod config; // Field limits, exclusion tables, logging settings
pub mod logging; // Logging infrastructure
pub mod parsing; // Probes, evaluator, strategy tables
pub mod parsing_error; // Construction-time error types

// Re-export commonly used items
pub use config::{ConfigError, ExclusionRule, ExtractorConfig, FieldLimits, LoggingConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{FieldValidator, PageHandle, PageQuery, ParsingError, ParsingResult};
