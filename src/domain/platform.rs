//! Marketplace platform identification
//!
//! A page URL is mapped to a platform by ordered substring matching.
//! The first host marker contained in the URL wins; the order is fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Walmart,
    Etsy,
    #[serde(rename = "Best Buy")]
    BestBuy,
    Target,
    #[serde(rename = "eBay")]
    Ebay,
    Unknown,
}

/// Host markers in detection priority order
const DETECTION_ORDER: [(&str, Platform); 6] = [
    ("amazon.com", Platform::Amazon),
    ("walmart.com", Platform::Walmart),
    ("etsy.com", Platform::Etsy),
    ("bestbuy.com", Platform::BestBuy),
    ("target.com", Platform::Target),
    ("ebay.com", Platform::Ebay),
];

impl Platform {
    /// Every platform that has a strategy table
    pub const KNOWN: [Self; 6] = [
        Self::Amazon,
        Self::Walmart,
        Self::Etsy,
        Self::BestBuy,
        Self::Target,
        Self::Ebay,
    ];

    /// Resolve the platform for a page URL. Single pass, first containment match wins.
    pub fn detect(url: &str) -> Self {
        DETECTION_ORDER
            .iter()
            .find(|(marker, _)| url.contains(marker))
            .map_or(Self::Unknown, |(_, platform)| *platform)
    }

    /// Human readable name, identical to the serialized form
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Walmart => "Walmart",
            Self::Etsy => "Etsy",
            Self::BestBuy => "Best Buy",
            Self::Target => "Target",
            Self::Ebay => "eBay",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
