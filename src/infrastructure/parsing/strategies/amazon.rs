//! Amazon product pages
//!
//! Seller and shipping data is spread over several page layouts, so those
//! chains cascade from dedicated elements through the buy box and right
//! column text down to a whole-document scan.

use super::StrategyTable;
use crate::domain::{FieldKey, Platform};
use crate::infrastructure::config::defaults::AUTHORSHIP_QUALIFIERS;
use crate::infrastructure::parsing::error::ParsingResult;
use crate::infrastructure::parsing::locator::{
    ExtractRule, Locator, Probe, Region, ReviewProbe, Transform,
};

const BUY_BOX: &str = r#"#buybox, #desktop_buybox, [data-feature-name="buybox"]"#;
const RIGHT_COLUMN: &str = "#rightCol";

// Values run to the end of the line or to a sentence-ending period,
// so "Amazon.com" survives intact.
const LINE_SOLD_BY: &str = r"(?i)(?:^|[\n\r:])\s*sold\s+by[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const AND_SOLD_BY: &str = r"(?i)\band\s+sold\s+by[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const SOLD_BY: &str = r"(?i)\bsold\s+by[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const SHIPPER_SELLER: &str = r"(?i)shipper\s*/\s*seller[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const SHIPS_FROM: &str = r"(?i)\bships\s+from[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const FULFILLED_BY: &str = r"(?i)\bfulfilled\s+by[:\s]+([^\n\r]+?)(?:\.(?:\s|$)|[\n\r]|$)";
const LOOSE_PRICE: &str = r"(\$\d+\.\d{2})";

const IMAGE_ATTRS: &[&str] = &["src", "data-src", "data-old-src"];

fn buy_box() -> ParsingResult<Region> {
    Region::container("buy box", BUY_BOX)
}

fn right_column() -> ParsingResult<Region> {
    Region::container("right column", RIGHT_COLUMN)
}

/// Dollar amounts outside (0, 10000) are not product prices
fn plausible_price(text: &str) -> bool {
    text.trim_start_matches('$')
        .parse::<f64>()
        .is_ok_and(|value| value > 0.0 && value < 10_000.0)
}

fn region_capture(region: &Region, pattern: &str) -> ParsingResult<Probe> {
    Ok(Probe::capture_region(region.clone(), pattern)?.then(Transform::StripTrailingPunct))
}

/// "Sold by", "and sold by" and "Shipper / Seller" scans over one region
fn seller_text_probes(region: &Region) -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        region_capture(region, LINE_SOLD_BY)?,
        region_capture(region, AND_SOLD_BY)?,
        region_capture(region, SHIPPER_SELLER)?,
    ])
}

fn ships_from_probes(region: &Region) -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        region_capture(region, SHIPS_FROM)?.then(Transform::CutAt("and sold by")),
        region_capture(region, SHIPPER_SELLER)?,
    ])
}

fn title() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::text("#productTitle")?.then(Transform::CollapseWhitespace),
        Probe::text("h1.a-size-large")?.then(Transform::CollapseWhitespace),
        Probe::text("#title")?.then(Transform::CollapseWhitespace),
    ])
}

fn price() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::text(".a-price .a-offscreen")?,
        Probe::text("#priceblock_ourprice")?,
        Probe::text("#priceblock_dealprice")?,
        Probe::text("#priceblock_saleprice")?,
        Probe::new(
            Locator::first(".a-price")?,
            ExtractRule::price_parts(".a-price-symbol", ".a-price-whole", ".a-price-fraction")?,
        ),
        Probe::text(".a-price")?,
        Probe::new(
            Locator::Region(Region::Document),
            ExtractRule::capture_where(LOOSE_PRICE, plausible_price)?,
        ),
    ])
}

fn rating() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::text("#acrPopover span.a-icon-alt")?,
        Probe::attr("#acrPopover", &["title"])?,
        Probe::text("span.a-icon-alt")?,
    ])
}

fn image() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::attr("#landingImage", IMAGE_ATTRS)?,
        Probe::attr("#imgBlkFront", IMAGE_ATTRS)?,
        Probe::attr("#main-image", IMAGE_ATTRS)?,
        // src is often a data: placeholder while the real URL sits here
        Probe::attr("#landingImage", &["data-old-src"])?,
    ])
}

fn seller() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::text("#sellerProfileTriggerId")?,
        Probe::text("#merchant-info a")?,
        region_capture(&buy_box()?, SHIPPER_SELLER)?,
    ])
}

fn sold_by() -> ParsingResult<Vec<Probe>> {
    let buy_box = buy_box()?;
    let right_column = right_column()?;

    let mut probes = vec![
        Probe::text("#merchant-info a")?,
        // linkless "Ships from and sold by Amazon.com."
        Probe::capture_in("#merchant-info", AND_SOLD_BY)?.then(Transform::StripTrailingPunct),
        Probe::text("#sellerProfileTriggerId")?,
        Probe::new(
            Locator::Descendants {
                region: buy_box.clone(),
                all_of: &["sold by"],
                none_of: AUTHORSHIP_QUALIFIERS,
            },
            ExtractRule::capture(SOLD_BY)?,
        )
        .then(Transform::StripTrailingPunct),
    ];
    probes.extend(seller_text_probes(&buy_box)?);
    probes.extend(seller_text_probes(&right_column)?);
    probes.push(
        Probe::new(
            Locator::Descendants {
                region: Region::Document,
                all_of: &["shipper", "seller"],
                none_of: &[],
            },
            ExtractRule::capture(SHIPPER_SELLER)?,
        )
        .then(Transform::StripTrailingPunct),
    );
    Ok(probes)
}

fn ships_from() -> ParsingResult<Vec<Probe>> {
    let mut probes = vec![
        Probe::text("#fulfillerInfoFeature_feature_div .offer-display-feature-text-message")?,
    ];
    probes.extend(ships_from_probes(&buy_box()?)?);
    probes.extend(ships_from_probes(&right_column()?)?);
    probes.push(
        Probe::new(
            Locator::Descendants {
                region: Region::Document,
                all_of: &["ships from"],
                none_of: &[],
            },
            ExtractRule::capture(SHIPS_FROM)?,
        )
        .then(Transform::CutAt("and sold by"))
        .then(Transform::StripTrailingPunct),
    );
    Ok(probes)
}

fn fulfilled_by() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        region_capture(&buy_box()?, FULFILLED_BY)?,
        region_capture(&right_column()?, FULFILLED_BY)?,
        Probe::new(
            Locator::Descendants {
                region: Region::Document,
                all_of: &["fulfilled by"],
                none_of: &["fulfilled by amazon"],
            },
            ExtractRule::capture(FULFILLED_BY)?,
        )
        .then(Transform::StripTrailingPunct),
    ])
}

fn availability() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::text("#availability span")?.then(Transform::CollapseWhitespace),
        Probe::text("#availability")?.then(Transform::CollapseWhitespace),
    ])
}

fn brand() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::capture_in("#bylineInfo", r"(?i)visit\s+the\s+(.+?)\s+store")?,
        Probe::capture_in("#bylineInfo", r"(?i)brand:\s*(.+)")?,
        Probe::text("tr.po-brand td.a-span9")?,
        Probe::text("#brand")?,
    ])
}

fn authors() -> ParsingResult<Vec<Probe>> {
    Ok(vec![
        Probe::new(Locator::first("#bylineInfo")?, ExtractRule::Byline),
        Probe::new(Locator::all("#bylineInfo .author a")?, ExtractRule::JoinDistinct),
        Probe::new(Locator::all(".contributorNameID")?, ExtractRule::JoinDistinct),
    ])
}

pub fn table() -> ParsingResult<StrategyTable> {
    Ok(StrategyTable::empty(Platform::Amazon)
        .with_chain(FieldKey::Title, title()?)?
        .with_chain(FieldKey::Price, price()?)?
        .with_chain(FieldKey::Rating, rating()?)?
        .with_chain(FieldKey::Image, image()?)?
        .with_chain(FieldKey::Seller, seller()?)?
        .with_chain(FieldKey::SoldBy, sold_by()?)?
        .with_chain(FieldKey::ShipsFrom, ships_from()?)?
        .with_chain(FieldKey::FulfilledBy, fulfilled_by()?)?
        .with_chain(FieldKey::Availability, availability()?)?
        .with_chain(FieldKey::Brand, brand()?)?
        .with_chain(FieldKey::Authors, authors()?)?
        .with_reviews(vec![
            ReviewProbe::new(r#"[data-hook="review"]"#, r#"[data-hook="review-body"]"#)?,
            ReviewProbe::new(".review", ".review-text-content")?,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::evaluator::resolve_field;
    use crate::infrastructure::parsing::page::{PageHandle, PageQuery};
    use crate::infrastructure::parsing::validators::FieldValidator;
    use rstest::rstest;

    fn resolve(field: FieldKey, html: &str) -> Option<String> {
        let table = table().unwrap();
        let page = PageHandle::parse("https://www.amazon.com/dp/B000TEST", html);
        let chain = table.chain(field).unwrap();
        resolve_field(&page, field, &chain.probes, &FieldValidator::default())
    }

    /// Index of the first probe in the chain yielding an accepted value, with the value
    fn winning_layer(field: FieldKey, html: &str) -> Option<(usize, String)> {
        let table = table().unwrap();
        let page = PageHandle::parse("https://www.amazon.com/dp/B000TEST", html);
        let validator = FieldValidator::default();
        table
            .chain(field)
            .unwrap()
            .probes
            .iter()
            .enumerate()
            .find_map(|(index, probe)| {
                let targets = page.locate(&probe.locator);
                probe
                    .candidates(&targets)
                    .into_iter()
                    .find_map(|candidate| validator.accept(field, &candidate))
                    .map(|value| (index, value))
            })
    }

    fn last_layer(field: FieldKey) -> usize {
        table().unwrap().chain(field).unwrap().probes.len() - 1
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(9999.99, true)]
    #[case(0.0, false)]
    #[case(10000.0, false)]
    fn test_plausible_price(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(plausible_price(&format!("${:.2}", value)), expected);
    }

    #[test]
    fn test_price_assembled_from_parts() {
        let html = r#"<span class="a-price"><span class="a-price-symbol">$</span><span class="a-price-whole">19.</span><span class="a-price-fraction">99</span></span>"#;
        assert_eq!(resolve(FieldKey::Price, html).as_deref(), Some("$19.99"));
    }

    #[test]
    fn test_price_document_scan_skips_implausible_amounts() {
        let html = "<body><p>Was $0.00 then $12000.00, now $24.99 today</p></body>";
        assert_eq!(resolve(FieldKey::Price, html).as_deref(), Some("$24.99"));
    }

    #[test]
    fn test_sold_by_merchant_info_wins() {
        let html = r#"
            <div id="merchant-info">Ships from and sold by <a href="/s">Acme Tools</a>.</div>
            <div id="buybox">Sold by: Someone Else</div>
        "#;
        assert_eq!(resolve(FieldKey::SoldBy, html).as_deref(), Some("Acme Tools"));
    }

    #[test]
    fn test_sold_by_buy_box_scan_skips_author_lines() {
        let html = r#"
            <body><div id="buybox">
                <div><span>Sold by Jane Doe (Author)</span></div>
                <div><span>Sold by Bright Books LLC</span></div>
            </div></body>
        "#;
        assert_eq!(resolve(FieldKey::SoldBy, html).as_deref(), Some("Bright Books LLC"));
    }

    #[test]
    fn test_shipper_seller_in_right_column() {
        let html = "<body><div id=\"rightCol\">\nShipper / Seller\nAmazon.com\nReturns\n</div></body>";
        assert_eq!(resolve(FieldKey::SoldBy, html).as_deref(), Some("Amazon.com"));
    }

    #[test]
    fn test_ships_from_cut_before_sold_by() {
        let html = "<body><div id=\"buybox\">Ships from Acme Warehouse and sold by Acme Tools.\n</div></body>";
        assert_eq!(resolve(FieldKey::ShipsFrom, html).as_deref(), Some("Acme Warehouse"));
        assert_eq!(resolve(FieldKey::SoldBy, html).as_deref(), Some("Acme Tools"));
    }

    #[test]
    fn test_fulfilled_by_document_scan_excludes_first_party() {
        let first_party = "<body><p>Fulfilled by Amazon</p></body>";
        assert_eq!(resolve(FieldKey::FulfilledBy, first_party), None);

        let third_party = "<body><p>Fulfilled by Parcel Partners</p></body>";
        assert_eq!(
            resolve(FieldKey::FulfilledBy, third_party).as_deref(),
            Some("Parcel Partners")
        );
    }

    #[test]
    fn test_brand_from_store_link() {
        let html = r#"<a id="bylineInfo" href="/stores/acme">Visit the Acme Store</a>"#;
        assert_eq!(resolve(FieldKey::Brand, html).as_deref(), Some("Acme"));
        assert_eq!(resolve(FieldKey::Authors, html), None);
    }

    #[test]
    fn test_authors_from_byline() {
        let html = r#"
            <div id="bylineInfo">
                <span class="author">by <a>Jane Doe</a> (Author),</span>
                <span class="author"><a>John Roe</a> (Illustrator)</span>
            </div>
        "#;
        assert_eq!(resolve(FieldKey::Authors, html).as_deref(), Some("Jane Doe, John Roe"));
    }

    #[test]
    fn test_authors_from_author_links() {
        let html = r#"
            <div id="bylineInfo"><span class="author"><a>Jane Doe</a></span><span class="author"><a>Jane Doe</a></span></div>
        "#;
        assert_eq!(resolve(FieldKey::Authors, html).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_authors_fall_back_to_contributor_names() {
        let html = r#"
            <div id="bylineInfo"><span>Visit the Orchard Store</span></div>
            <a class="contributorNameID">Jane Doe</a>
            <a class="contributorNameID">John Roe</a>
        "#;
        assert_eq!(
            winning_layer(FieldKey::Authors, html),
            Some((2, "Jane Doe, John Roe".to_string()))
        );
    }

    #[test]
    fn test_sold_by_linkless_merchant_info() {
        let html = r#"
            <div id="merchant-info">Ships from and sold by Amazon.com.</div>
            <div id="buybox">Sold by: Someone Else</div>
        "#;
        assert_eq!(
            winning_layer(FieldKey::SoldBy, html),
            Some((1, "Amazon.com".to_string()))
        );
    }

    #[test]
    fn test_sold_by_document_shipper_seller_scan() {
        let html = r#"
            <body><div class="offer-details">
                <span>Shipper / Seller</span> <span>Acme Outlet</span>
            </div></body>
        "#;
        assert_eq!(
            winning_layer(FieldKey::SoldBy, html),
            Some((last_layer(FieldKey::SoldBy), "Acme Outlet".to_string()))
        );
    }

    #[test]
    fn test_ships_from_right_column_after_empty_buy_box() {
        let html = "<body><div id=\"buybox\">Add to Cart</div><div id=\"rightCol\">\nShips from: Acme Depot\nReturns accepted\n</div></body>";
        assert_eq!(
            winning_layer(FieldKey::ShipsFrom, html),
            Some((3, "Acme Depot".to_string()))
        );
    }

    #[test]
    fn test_inline_scripts_do_not_feed_document_or_buy_box_scans() {
        let price_page = r#"<body><p>Currently unavailable.</p><script>var recs={"related":"$3.99"};</script></body>"#;
        assert_eq!(resolve(FieldKey::Price, price_page), None);

        let seller_page = "<body><div id=\"buybox\"><script>\nvar t = 'Sold by: Phantom Merchant';\n</script></div></body>";
        assert_eq!(resolve(FieldKey::SoldBy, seller_page), None);
    }

    #[test]
    fn test_out_of_stock_badge_is_not_a_rating() {
        let html = r#"<span class="a-icon-alt">Currently out of stock.</span>"#;
        assert_eq!(resolve(FieldKey::Rating, html), None);
    }
}
