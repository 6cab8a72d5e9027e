//! Target product pages. Target is always the seller of record.

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{Probe, ReviewProbe, Transform};

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::Target)
        .with_chain(
            FieldKey::Title,
            vec![
                Probe::text(r#"h1[data-test="product-title"]"#)?,
                Probe::text("h1")?,
            ],
        )?
        .with_chain(
            FieldKey::Price,
            vec![
                Probe::text(r#"[data-test="product-price"]"#)?,
                Probe::text(".h-padding-r-tiny")?,
            ],
        )?
        .with_chain(
            FieldKey::Rating,
            vec![Probe::text(r#"[data-test="rating"]"#)?.then(Transform::CollapseWhitespace)],
        )?
        .with_chain(
            FieldKey::Image,
            vec![
                Probe::attr(r#"[data-test="product-image"] img"#, &["src", "data-src"])?,
                Probe::attr(r#"img[alt*="product"]"#, &["src", "data-src"])?,
            ],
        )?
        .with_chain(FieldKey::SoldBy, vec![Probe::fixed("Target")])?
        .with_chain(
            FieldKey::Brand,
            vec![Probe::capture_in(
                r#"[data-test="item-details-specifications"]"#,
                r"(?i)brand:\s*([^\n\r]+)",
            )?],
        )?
        .with_reviews(vec![ReviewProbe::new(
            r#"[data-test="review"]"#,
            r#"[data-test="review-text"]"#,
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
        let page = PageHandle::parse("https://www.target.com/p/-/A-1", html);
        resolve_field(&page, field, &table.chain(field).unwrap().probes, &FieldValidator::default())
    }

    #[test]
    fn test_title_falls_back_to_any_heading() {
        assert_eq!(resolve(FieldKey::Title, "<h1> Ceramic Mug </h1>").as_deref(), Some("Ceramic Mug"));
        assert_eq!(resolve(FieldKey::SoldBy, "").as_deref(), Some("Target"));
    }

    #[test]
    fn test_brand_from_specifications() {
        let html = "<div data-test=\"item-details-specifications\">Material: Stoneware\nBrand: Threshold\nTCIN: 1</div>";
        assert_eq!(resolve(FieldKey::Brand, html).as_deref(), Some("Threshold"));
    }
}
