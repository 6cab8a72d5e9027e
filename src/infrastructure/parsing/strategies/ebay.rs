//! eBay listing pages
//!
//! eBay exposes no rating or review block that applies to the item itself,
//! so neither is attempted.

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{ExtractRule, Locator, Probe, Transform};

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::Ebay)
        .with_chain(
            FieldKey::Title,
            vec![
                Probe::text(r#"h1[itemprop="name"]"#)?.then(Transform::CollapseWhitespace),
                Probe::text("#x-item-title-label")?.then(Transform::CollapseWhitespace),
                Probe::text(".x-item-title__mainTitle")?.then(Transform::CollapseWhitespace),
            ],
        )?
        .with_chain(
            FieldKey::Price,
            vec![
                Probe::attr(r#"[itemprop="price"]"#, &["content"])?,
                Probe::text(r#"[itemprop="price"]"#)?,
                Probe::text("#prcIsum")?,
                Probe::text(".x-price-primary")?,
                Probe::capture_in(".x-price-primary", r"(\$\s*\d[\d,]*(?:\.\d{2})?)")?,
                Probe::text(".notranslate")?,
            ],
        )?
        .with_chain(
            FieldKey::Image,
            vec![
                Probe::attr("#icImg", &["src", "data-src"])?,
                Probe::attr(r#"[itemprop="image"]"#, &["src", "data-src", "content"])?,
            ],
        )?
        .with_chain(
            FieldKey::SoldBy,
            vec![
                Probe::text(".mbg-nw a")?.then(Transform::CollapseWhitespace),
                Probe::text(".mbg-nw")?.then(Transform::CollapseWhitespace),
            ],
        )?
        .with_chain(
            FieldKey::ShipsFrom,
            vec![
                Probe::new(
                    Locator::all(r#"[data-testid="ux-labels-values"]"#)?,
                    ExtractRule::capture(r"(?i)ships\s+from[:\s]+([^\n\r]+)")?,
                ),
                Probe::text(".u-flL.condText")?,
            ],
        )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::evaluator::resolve_field;
    use crate::infrastructure::parsing::page::PageHandle;
    use crate::infrastructure::parsing::validators::FieldValidator;

    fn resolve(field: FieldKey, html: &str) -> Option<String> {
        let table = table().unwrap();
        let page = PageHandle::parse("https://www.ebay.com/itm/1234", html);
        resolve_field(&page, field, &table.chain(field).unwrap().probes, &FieldValidator::default())
    }

    #[test]
    fn test_ships_from_label_scan() {
        let html = r#"
            <div data-testid="ux-labels-values">Condition: New</div>
            <div data-testid="ux-labels-values">Ships from: Portland, Oregon</div>
        "#;
        assert_eq!(resolve(FieldKey::ShipsFrom, html).as_deref(), Some("Portland, Oregon"));
    }

    #[test]
    fn test_price_prefers_microdata() {
        let html = r#"<span itemprop="price" content="45.00">US $45.00</span><span class="x-price-primary">US $45.00</span>"#;
        assert_eq!(resolve(FieldKey::Price, html).as_deref(), Some("$45.00"));
    }

    #[test]
    fn test_price_captured_from_primary_block() {
        let html = r#"<div class="x-price-primary"><span>US $1,045.00/ea</span></div>"#;
        assert_eq!(resolve(FieldKey::Price, html).as_deref(), Some("$1045.00"));
    }
}
