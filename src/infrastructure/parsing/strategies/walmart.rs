//! Walmart product pages

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{Probe, ReviewProbe, Transform};

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::Walmart)
        .with_chain(
            FieldKey::Title,
            vec![
                Probe::text(r#"h1[itemprop="name"]"#)?,
                Probe::text("h1.prod-ProductTitle")?,
                Probe::text("h1#main-title")?,
            ],
        )?
        .with_chain(
            FieldKey::Price,
            vec![
                Probe::attr(r#"[itemprop="price"]"#, &["content"])?,
                Probe::text(r#"[itemprop="price"]"#)?,
                Probe::text(".price-current")?,
                Probe::text(r#"[data-testid="product-price"]"#)?,
            ],
        )?
        .with_chain(
            FieldKey::Rating,
            vec![
                Probe::attr(r#"[itemprop="ratingValue"]"#, &["content"])?
                    .then(Transform::NonZero)
                    .then(Transform::Append(" out of 5 stars")),
                Probe::text(r#"[itemprop="ratingValue"]"#)?
                    .then(Transform::NonZero)
                    .then(Transform::Append(" out of 5 stars")),
                Probe::text(".stars-reviews")?,
            ],
        )?
        .with_chain(
            FieldKey::Image,
            vec![
                Probe::attr(r#"[itemprop="image"]"#, &["src", "data-src", "content"])?,
                Probe::attr(r#"img[data-testid="product-image"]"#, &["src", "data-src"])?,
            ],
        )?
        .with_chain(
            FieldKey::SoldBy,
            vec![Probe::text(r#"[data-testid="seller-name"]"#)?],
        )?
        .with_chain(FieldKey::Brand, vec![Probe::text(r#"[itemprop="brand"]"#)?])?
        .with_chain(
            FieldKey::Availability,
            vec![Probe::text(".prod-fulfillment-messaging-text")?.then(Transform::CollapseWhitespace)],
        )?
        .with_reviews(vec![ReviewProbe::new(
            r#"[data-testid="review"]"#,
            r#"[data-testid="review-text"]"#,
        )?]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::evaluator::resolve_field;
    use crate::infrastructure::parsing::page::PageHandle;
    use crate::infrastructure::parsing::validators::FieldValidator;

    fn resolve(field: FieldKey, html: &str) -> Option<String> {
        let table = table().unwrap();
        let page = PageHandle::parse("https://www.walmart.com/ip/123", html);
        resolve_field(&page, field, &table.chain(field).unwrap().probes, &FieldValidator::default())
    }

    #[test]
    fn test_bare_rating_gets_scale() {
        let html = r#"<span itemprop="ratingValue">4.4</span>"#;
        assert_eq!(resolve(FieldKey::Rating, html).as_deref(), Some("4.4 out of 5 stars"));
    }

    #[test]
    fn test_zero_rating_is_rejected() {
        let html = r#"<meta itemprop="ratingValue" content="0"><span itemprop="ratingValue">0</span>"#;
        assert_eq!(resolve(FieldKey::Rating, html), None);
    }

    #[test]
    fn test_price_from_microdata_content() {
        let html = r#"<span itemprop="price" content="12.98">Now $12.98</span>"#;
        assert_eq!(resolve(FieldKey::Price, html).as_deref(), Some("$12.98"));
    }
}
