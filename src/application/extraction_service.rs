//! Extraction service
//!
//! Detects the platform from the page URL, looks up its strategy table,
//! resolves every field chain and assembles the record. Extraction is total:
//! missing data shows up as `None`, never as an error.

use crate::domain::{ExtractionRecord, Platform};
use crate::infrastructure::config::ExtractorConfig;
use crate::infrastructure::parsing::{
    FieldValidator, PageHandle, PageQuery, resolve_reviews, table_for,
};
use once_cell::sync::Lazy;
use tracing::{debug, info};

/// Extracts product attributes using a fixed validator configuration
#[derive(Debug, Clone, Default)]
pub struct ProductExtractor {
    validator: FieldValidator,
}

impl ProductExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            validator: FieldValidator::new(config),
        }
    }

    /// Build the record for one page
    pub fn extract<P: PageQuery + ?Sized>(&self, page: &P) -> ExtractionRecord {
        let url = page.url();
        let platform = Platform::detect(url);
        let mut record = ExtractionRecord::empty(platform, url);

        let table = table_for(platform);
        if table.is_empty() {
            debug!("No strategy table for {}, skipping field resolution", platform);
            return record;
        }

        for chain in table.chains() {
            if let Some(value) = chain.resolve(page, &self.validator) {
                record.set(chain.field, value);
            }
        }
        record.reviews = resolve_reviews(page, table.reviews(), &self.validator);
        record.seller_info_found = record.has_seller_info();

        info!(
            "Extracted {} fields from {} page ({} reviews, seller info: {})",
            record.populated_fields().len(),
            platform,
            record.reviews.len(),
            record.seller_info_found
        );
        record
    }

    /// Parse `html` and extract it as the page at `url`
    pub fn extract_html(&self, url: &str, html: &str) -> ExtractionRecord {
        self.extract(&PageHandle::parse(url, html))
    }
}

static DEFAULT_EXTRACTOR: Lazy<ProductExtractor> = Lazy::new(ProductExtractor::default);

/// Extract a record with the built-in configuration
pub fn extract(page: &PageHandle) -> ExtractionRecord {
    DEFAULT_EXTRACTOR.extract(page)
}
