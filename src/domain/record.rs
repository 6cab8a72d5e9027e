//! Extraction record returned to callers
//!
//! Every text field is either `None` or a value that passed sanitization and
//! the validator for that field. The record owns its data; nothing in the
//! engine keeps a reference to it after `extract` returns.

use super::field::FieldKey;
use super::platform::Platform;
use serde::{Deserialize, Serialize};

/// Normalized product attributes for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub platform: Platform,
    pub url: String,
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
    pub seller: Option<String>,
    pub sold_by: Option<String>,
    pub fulfilled_by: Option<String>,
    pub ships_from: Option<String>,
    pub availability: Option<String>,
    pub brand: Option<String>,
    pub authors: Option<String>,
    pub reviews: Vec<String>,
    pub seller_info_found: bool,
}

impl ExtractionRecord {
    /// Record with every content field unset
    pub fn empty(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
            title: None,
            price: None,
            rating: None,
            image: None,
            seller: None,
            sold_by: None,
            fulfilled_by: None,
            ships_from: None,
            availability: None,
            brand: None,
            authors: None,
            reviews: Vec::new(),
            seller_info_found: false,
        }
    }

    /// Text value of a field. `Reviews` is a list; read `reviews` directly.
    pub fn get(&self, field: FieldKey) -> Option<&str> {
        let slot = match field {
            FieldKey::Title => &self.title,
            FieldKey::Price => &self.price,
            FieldKey::Rating => &self.rating,
            FieldKey::Image => &self.image,
            FieldKey::Seller => &self.seller,
            FieldKey::SoldBy => &self.sold_by,
            FieldKey::FulfilledBy => &self.fulfilled_by,
            FieldKey::ShipsFrom => &self.ships_from,
            FieldKey::Availability => &self.availability,
            FieldKey::Brand => &self.brand,
            FieldKey::Authors => &self.authors,
            FieldKey::Reviews => return self.reviews.first().map(String::as_str),
        };
        slot.as_deref()
    }

    /// Store a validated value. Reviews are appended.
    pub(crate) fn set(&mut self, field: FieldKey, value: String) {
        let slot = match field {
            FieldKey::Title => &mut self.title,
            FieldKey::Price => &mut self.price,
            FieldKey::Rating => &mut self.rating,
            FieldKey::Image => &mut self.image,
            FieldKey::Seller => &mut self.seller,
            FieldKey::SoldBy => &mut self.sold_by,
            FieldKey::FulfilledBy => &mut self.fulfilled_by,
            FieldKey::ShipsFrom => &mut self.ships_from,
            FieldKey::Availability => &mut self.availability,
            FieldKey::Brand => &mut self.brand,
            FieldKey::Authors => &mut self.authors,
            FieldKey::Reviews => {
                self.reviews.push(value);
                return;
            }
        };
        *slot = Some(value);
    }

    /// True iff any of seller, soldBy, fulfilledBy or shipsFrom is set
    pub fn has_seller_info(&self) -> bool {
        FieldKey::SELLER_FAMILY
            .iter()
            .any(|field| self.get(*field).is_some())
    }

    /// Whether the record carries enough to be shown to a user
    pub fn has_core_data(&self) -> bool {
        self.title.is_some() || self.price.is_some() || self.rating.is_some() || self.image.is_some()
    }

    /// Fields holding a value, in `FieldKey::ALL` order
    pub fn populated_fields(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_serializes_nulls() {
        let record = ExtractionRecord::empty(Platform::Unknown, "https://example.org/x");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["platform"], "Unknown");
        assert_eq!(json["url"], "https://example.org/x");
        assert!(json["soldBy"].is_null());
        assert!(json["shipsFrom"].is_null());
        assert_eq!(json["reviews"], serde_json::json!([]));
        assert_eq!(json["sellerInfoFound"], false);
        assert!(!record.has_core_data());
        assert!(record.populated_fields().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut record = ExtractionRecord::empty(Platform::Amazon, "https://www.amazon.com/dp/1");
        record.set(FieldKey::ShipsFrom, "Amazon".to_string());
        record.set(FieldKey::Reviews, "Great kettle, boils fast.".to_string());

        assert_eq!(record.get(FieldKey::ShipsFrom), Some("Amazon"));
        assert_eq!(record.reviews.len(), 1);
        assert!(record.has_seller_info());
        assert_eq!(
            record.populated_fields(),
            vec![FieldKey::ShipsFrom, FieldKey::Reviews]
        );
    }

    #[test]
    fn test_core_data_ignores_seller_fields() {
        let mut record = ExtractionRecord::empty(Platform::Target, "https://www.target.com/p/1");
        record.set(FieldKey::SoldBy, "Target".to_string());
        assert!(!record.has_core_data());

        record.set(FieldKey::Price, "$4.99".to_string());
        assert!(record.has_core_data());
    }
}
