//! Etsy listing pages

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{
    ExtractRule, Locator, Probe, Region, ReviewProbe, Transform,
};

const RATING_OUT_OF_FIVE: &str = r"(?i)(\d+(?:\.\d+)?)\s*(?:out of|/)\s*5";
const STARS_OUT_OF_FIVE: &str = r"(?i)(\d+(?:\.\d+)?)\s*(?:out of|/)\s*5\s*stars?";

fn positive(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|value| value > 0.0)
}

/// Amount prefixed with the page's currency symbol, `$` when it shows none
fn currency_price(amount: &str) -> ParsingResult<Probe> {
    Ok(Probe::new(
        Locator::Region(Region::Document),
        ExtractRule::currency_amount(".currency-symbol", amount)?,
    ))
}

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::Etsy)
        .with_chain(
            FieldKey::Title,
            vec![
                Probe::text("h1[data-buy-box-listing-title]")?.then(Transform::CollapseWhitespace),
                Probe::text("h1.wt-text-body-01")?.then(Transform::CollapseWhitespace),
                Probe::text("h1.listing-page-title")?.then(Transform::CollapseWhitespace),
            ],
        )?
        .with_chain(
            FieldKey::Price,
            vec![
                currency_price(".wt-text-title-03 .currency-value")?,
                currency_price("[data-buy-box-region] .currency-value")?,
                currency_price(".currency-value")?,
            ],
        )?
        .with_chain(
            FieldKey::Rating,
            vec![
                Probe::attr("[data-rating]", &["data-rating"])?
                    .then(Transform::NonZero)
                    .then(Transform::Append(" out of 5 stars")),
                Probe::capture_in(".wt-text-body-01 .wt-display-inline-block", RATING_OUT_OF_FIVE)?
                    .then(Transform::Append(" out of 5 stars")),
                Probe::new(
                    Locator::all(r#"[class*="star"]"#)?,
                    ExtractRule::capture(RATING_OUT_OF_FIVE)?,
                )
                .then(Transform::Append(" out of 5 stars")),
                Probe::new(
                    Locator::Region(Region::Document),
                    ExtractRule::capture_where(STARS_OUT_OF_FIVE, positive)?,
                )
                .then(Transform::Append(" out of 5 stars")),
            ],
        )?
        .with_chain(
            FieldKey::Image,
            vec![
                Probe::attr("#image-carousel img", &["src", "data-src"])?,
                Probe::attr(".wt-max-width-full img", &["src", "data-src"])?,
            ],
        )?
        .with_chain(
            FieldKey::SoldBy,
            vec![
                Probe::text(r#"a[href*="/shop/"]"#)?.then(Transform::CollapseWhitespace),
                Probe::text(".shop-name")?.then(Transform::CollapseWhitespace),
            ],
        )?
        .with_chain(
            FieldKey::ShipsFrom,
            vec![
                Probe::attr("[data-shipping-from]", &["data-shipping-from"])?,
                Probe::text("[data-shipping-from]")?,
                Probe::text(".shop-location")?,
            ],
        )?
        .with_reviews(vec![ReviewProbe::new(".review-item", ".review-text")?]))
}
