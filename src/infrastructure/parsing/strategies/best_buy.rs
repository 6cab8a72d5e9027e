//! Best Buy product pages. Best Buy is always the seller of record.

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{
    ExtractRule, Locator, Probe, Region, ReviewProbe, Transform,
};

const IMAGE_ATTRS: &[&str] = &["src", "data-src", "srcset"];

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::BestBuy)
        .with_chain(
            FieldKey::Title,
            vec![
                Probe::text("h1.heading-5")?,
                Probe::text(r#"[data-testid="product-title"]"#)?,
                Probe::text("h1.sr-only")?,
                Probe::text(r#"h1[class*="heading"]"#)?,
                Probe::text("h1")?,
            ],
        )?
        .with_chain(
            FieldKey::Price,
            vec![
                Probe::text(".priceView-customer-price span")?,
                Probe::text(r#"[data-testid="customer-price"]"#)?,
                Probe::text(".priceView-customer-price")?,
                Probe::new(
                    Locator::all(r#"[class*="price"], [data-testid*="price"]"#)?,
                    ExtractRule::capture(r"(\$\s*\d[\d,]*(?:\.\d{2})?)")?,
                ),
            ],
        )?
        .with_chain(
            FieldKey::Rating,
            vec![
                Probe::attr("[data-rating]", &["data-rating"])?
                    .then(Transform::NonZero)
                    .then(Transform::Append(" out of 5 stars")),
                Probe::text(r#"[data-testid="rating"]"#)?,
                Probe::text(".rating-value")?,
                Probe::text(".ugc-review-summary")?,
                Probe::capture_region(Region::Document, r"(\d+(?:\.\d+)?)\s*(?:out of|/)\s*5")?
                    .then(Transform::NonZero)
                    .then(Transform::Append(" out of 5 stars")),
            ],
        )?
        .with_chain(
            FieldKey::Image,
            vec![
                Probe::attr(".primary-image img", IMAGE_ATTRS)?.then(Transform::FirstToken),
                Probe::attr(r#"[data-testid="product-image"] img"#, IMAGE_ATTRS)?
                    .then(Transform::FirstToken),
                Probe::attr(r#"img[alt*="product"]"#, IMAGE_ATTRS)?.then(Transform::FirstToken),
                Probe::attr(".product-image img", IMAGE_ATTRS)?.then(Transform::FirstToken),
                Probe::attr(r#"img[src*="bbystatic"]"#, IMAGE_ATTRS)?.then(Transform::FirstToken),
            ],
        )?
        .with_chain(FieldKey::SoldBy, vec![Probe::fixed("Best Buy")])?
        .with_chain(FieldKey::Brand, vec![Probe::text(".product-data-brand")?])?
        .with_chain(
            FieldKey::Availability,
            vec![Probe::text(".fulfillment-fulfillment-summary")?.then(Transform::CollapseWhitespace)],
        )?
        .with_reviews(vec![ReviewProbe::new(
            r#".review-item, [data-testid*="review"]"#,
            r#".review-text, [data-testid*="review-text"]"#,
        )?]))
}
