//! Parsing error types for strategy-table construction
//!
//! Extraction itself never fails: a missing field is `None`. These errors only
//! surface while compiling selectors and patterns into probes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid pattern: {pattern} - {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Empty probe chain for field '{field}' on {platform}")]
    EmptyProbeChain { platform: String, field: String },
}

impl ParsingError {
    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty_probe_chain(platform: impl ToString, field: impl ToString) -> Self {
        Self::EmptyProbeChain {
            platform: platform.to_string(),
            field: field.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParsingError::invalid_selector("div[", "unexpected end");
        assert_eq!(err.to_string(), "Invalid CSS selector: div[ - unexpected end");

        let err = ParsingError::empty_probe_chain("Amazon", "title");
        assert_eq!(err.to_string(), "Empty probe chain for field 'title' on Amazon");
    }
}
