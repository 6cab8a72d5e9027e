//! Error module re-export
//!
//! Strategy-table construction errors live in `infrastructure::parsing_error`.

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
