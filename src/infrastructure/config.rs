//! Configuration infrastructure
//!
//! Field length ceilings, the seller/author exclusion table and logging
//! settings. Defaults are compiled in; a config file and `PRODUCT_LENS__*`
//! environment variables can override them.

#![allow(clippy::uninlined_format_args)]

use crate::domain::FieldKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Built-in defaults
pub mod defaults {
    /// Environment variable prefix for overrides, e.g. `PRODUCT_LENS__LIMITS__TITLE=300`
    pub const ENV_PREFIX: &str = "PRODUCT_LENS";

    /// Hard ceiling applied by the sanitization filter
    pub const MAX_TEXT_LENGTH: usize = 500;

    pub const TITLE_MAX_LENGTH: usize = 500;
    pub const PRICE_MAX_LENGTH: usize = 50;
    pub const RATING_MAX_LENGTH: usize = 100;
    pub const IMAGE_MAX_LENGTH: usize = 500;
    pub const SELLER_MAX_LENGTH: usize = 200;
    pub const FULFILLED_BY_MAX_LENGTH: usize = 200;
    pub const SHIPS_FROM_MAX_LENGTH: usize = 200;
    pub const AVAILABILITY_MAX_LENGTH: usize = 200;
    pub const BRAND_MAX_LENGTH: usize = 100;
    // authors accept 2..=500 characters
    pub const AUTHORS_MAX_LENGTH: usize = 501;

    pub const SELLER_MIN_LENGTH: usize = 2;
    pub const AUTHORS_MIN_LENGTH: usize = 2;

    pub const MAX_REVIEWS: usize = 3;
    pub const MIN_REVIEW_LENGTH: usize = 10;
    pub const MAX_REVIEW_LENGTH: usize = 500;

    pub const CURRENCY_SYMBOL: &str = "$";

    /// Terms marking text as book/publisher metadata rather than a marketplace seller
    pub const SELLER_EXCLUSION_TOKENS: &[&str] = &[
        "(author)",
        "author:",
        "authors:",
        "written by",
        "published",
        "publisher",
        "visit the",
        "see all",
        "edition",
        "paperback",
        "hardcover",
        "kindle",
        "audiobook",
        "audio cd",
        "format:",
        "(illustrator)",
        "(translator)",
        "(narrator)",
        "(editor)",
    ];

    /// Qualifiers that disqualify an element found by a "Sold by" scan
    pub const AUTHORSHIP_QUALIFIERS: &[&str] = &[
        "(author)",
        "(editor)",
        "(illustrator)",
        "publisher",
        "published by",
        "edition",
    ];

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "product-lens.log";
}

/// Exclusive length ceilings per field (a value must be shorter than its ceiling)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub title: usize,
    pub price: usize,
    pub rating: usize,
    pub image: usize,
    pub seller: usize,
    pub sold_by: usize,
    pub fulfilled_by: usize,
    pub ships_from: usize,
    pub availability: usize,
    pub brand: usize,
    pub authors: usize,
    pub review: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            title: defaults::TITLE_MAX_LENGTH,
            price: defaults::PRICE_MAX_LENGTH,
            rating: defaults::RATING_MAX_LENGTH,
            image: defaults::IMAGE_MAX_LENGTH,
            seller: defaults::SELLER_MAX_LENGTH,
            sold_by: defaults::SELLER_MAX_LENGTH,
            fulfilled_by: defaults::FULFILLED_BY_MAX_LENGTH,
            ships_from: defaults::SHIPS_FROM_MAX_LENGTH,
            availability: defaults::AVAILABILITY_MAX_LENGTH,
            brand: defaults::BRAND_MAX_LENGTH,
            authors: defaults::AUTHORS_MAX_LENGTH,
            review: defaults::MAX_REVIEW_LENGTH,
        }
    }
}

impl FieldLimits {
    /// Ceiling for a field
    pub const fn ceiling(&self, field: FieldKey) -> usize {
        match field {
            FieldKey::Title => self.title,
            FieldKey::Price => self.price,
            FieldKey::Rating => self.rating,
            FieldKey::Image => self.image,
            FieldKey::Seller => self.seller,
            FieldKey::SoldBy => self.sold_by,
            FieldKey::FulfilledBy => self.fulfilled_by,
            FieldKey::ShipsFrom => self.ships_from,
            FieldKey::Availability => self.availability,
            FieldKey::Brand => self.brand,
            FieldKey::Authors => self.authors,
            FieldKey::Reviews => self.review,
        }
    }

    /// Whether a value of `len` characters fits under the field's ceiling
    pub const fn allows(&self, field: FieldKey, len: usize) -> bool {
        len < self.ceiling(field)
    }
}

/// One exclusion token and the fields it applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub token: String,
    pub fields: Vec<FieldKey>,
}

impl ExclusionRule {
    pub fn new(token: impl Into<String>, fields: &[FieldKey]) -> Self {
        Self {
            token: token.into(),
            fields: fields.to_vec(),
        }
    }
}

fn default_exclusions() -> Vec<ExclusionRule> {
    defaults::SELLER_EXCLUSION_TOKENS
        .iter()
        .map(|token| ExclusionRule::new(*token, &[FieldKey::Seller, FieldKey::SoldBy]))
        .collect()
}

fn default_currency_symbol() -> String {
    defaults::CURRENCY_SYMBOL.to_string()
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output (stderr, so stdout stays clean for records)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

/// Complete extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub limits: FieldLimits,

    /// Exclusion tokens (matched case-insensitively) per field
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<ExclusionRule>,

    /// Symbol prepended to prices that lack one
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            limits: FieldLimits::default(),
            exclusions: default_exclusions(),
            currency_symbol: default_currency_symbol(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load from a config file (any format the `config` crate understands),
    /// layered under `PRODUCT_LENS__*` environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(defaults::ENV_PREFIX).separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        info!("Loaded extractor configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults with environment overrides only
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(defaults::ENV_PREFIX).separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration value validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in FieldKey::ALL {
            let ceiling = self.limits.ceiling(field);
            if ceiling == 0 {
                return Err(ConfigError::Validation {
                    message: format!("length ceiling for '{}' must be greater than 0", field),
                });
            }
        }

        if self.limits.price > defaults::MAX_TEXT_LENGTH {
            return Err(ConfigError::Validation {
                message: format!(
                    "price ceiling {} exceeds the sanitizer ceiling {}",
                    self.limits.price,
                    defaults::MAX_TEXT_LENGTH
                ),
            });
        }

        if let Some(rule) = self.exclusions.iter().find(|r| r.token.trim().is_empty()) {
            return Err(ConfigError::Validation {
                message: format!("exclusion rule for {:?} has an empty token", rule.fields),
            });
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "currency_symbol must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Lowercased exclusion tokens that apply to `field`
    pub fn exclusions_for(&self, field: FieldKey) -> Vec<String> {
        self.exclusions
            .iter()
            .filter(|rule| rule.fields.contains(&field))
            .map(|rule| rule.token.to_lowercase())
            .collect()
    }
}
