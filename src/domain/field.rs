//! Field keys of an extraction record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product attribute targeted by a probe chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Title,
    Price,
    Rating,
    Image,
    Seller,
    SoldBy,
    FulfilledBy,
    ShipsFrom,
    Availability,
    Brand,
    Authors,
    Reviews,
}

impl FieldKey {
    pub const ALL: [Self; 12] = [
        Self::Title,
        Self::Price,
        Self::Rating,
        Self::Image,
        Self::Seller,
        Self::SoldBy,
        Self::FulfilledBy,
        Self::ShipsFrom,
        Self::Availability,
        Self::Brand,
        Self::Authors,
        Self::Reviews,
    ];

    /// Fields whose presence sets `sellerInfoFound`
    pub const SELLER_FAMILY: [Self; 4] = [
        Self::Seller,
        Self::SoldBy,
        Self::FulfilledBy,
        Self::ShipsFrom,
    ];

    /// Wire name of the field
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Image => "image",
            Self::Seller => "seller",
            Self::SoldBy => "soldBy",
            Self::FulfilledBy => "fulfilledBy",
            Self::ShipsFrom => "shipsFrom",
            Self::Availability => "availability",
            Self::Brand => "brand",
            Self::Authors => "authors",
            Self::Reviews => "reviews",
        }
    }

    pub const fn is_seller_family(self) -> bool {
        matches!(
            self,
            Self::Seller | Self::SoldBy | Self::FulfilledBy | Self::ShipsFrom
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
