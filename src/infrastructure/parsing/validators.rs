//! Per-field acceptance predicates
//!
//! A candidate becomes a validated value only after it passes the
//! sanitization filter and the validator for its field.

use super::sanitize::{clean, collapse_whitespace, truncate_chars};
use crate::domain::FieldKey;
use crate::infrastructure::config::{ExtractorConfig, FieldLimits, defaults};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

static PRICE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\d+\.?\d{0,2}$").expect("valid price pattern"));
static REPEATED_PERIODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\.+").expect("valid period pattern"));
static GROUPED_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$?\d{1,3}(?:,\d{3})+(?:\.\d{0,2})?$").expect("valid grouping pattern")
});
static RATING_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)out\s+of\s+\d|\d+(?:\.\d+)?\s*/\s*\d+").expect("valid rating pattern")
});
static AUTHOR_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s*\((?:author|editor|illustrator|translator|narrator|contributor|foreword|introduction|photographer|reader)[^)]*\)",
    )
    .expect("valid qualifier pattern")
});
static TRUNCATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:&|\band\b)\s*\d+\s+(?:more|others)\b.*$").expect("valid truncation pattern")
});
static LEADING_BY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^by\b[:\s]*").expect("valid byline pattern"));
static AUTHOR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,&]\s*").expect("valid separator pattern"));

/// Collapse repeated periods, strip whitespace and grouping commas, check the
/// `$12.34` shape, and prepend `symbol` when the price has no leading `$`.
pub fn normalize_price(text: &str, symbol: &str, ceiling: usize) -> Option<String> {
    let collapsed = REPEATED_PERIODS.replace_all(text, ".");
    let mut price: String = collapsed.chars().filter(|c| !c.is_whitespace()).collect();

    if GROUPED_AMOUNT.is_match(&price) {
        price.retain(|c| c != ',');
    }

    if price.chars().count() >= ceiling || !PRICE_SHAPE.is_match(&price) {
        return None;
    }

    if !price.starts_with('$') {
        price.insert_str(0, symbol);
    }
    Some(price)
}

/// Rating text must read like "4.5 out of 5 stars" or "4.5/5"
pub fn is_valid_rating(text: &str, ceiling: usize) -> bool {
    text.chars().count() < ceiling && RATING_SHAPE.is_match(text)
}

/// Absolute http(s) reference; relative paths and `data:` placeholders fail
pub fn is_absolute_url(text: &str) -> bool {
    Url::parse(text)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Strip authorship qualifiers and "& N more" markers, normalize separators to
/// ", ". Accepts 2..=500 characters.
pub fn normalize_authors(text: &str) -> Option<String> {
    let text = collapse_whitespace(text);
    let text = AUTHOR_QUALIFIER.replace_all(&text, "");
    let text = TRUNCATION_MARKER.replace(&text, "");
    let text = LEADING_BY.replace(&text, "");

    let names: Vec<&str> = AUTHOR_SEPARATOR
        .split(&text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    let joined = names.join(", ");

    let len = joined.chars().count();
    if len < defaults::AUTHORS_MIN_LENGTH || len >= defaults::AUTHORS_MAX_LENGTH {
        return None;
    }
    Some(joined)
}

/// Field validator built from an `ExtractorConfig`
#[derive(Debug, Clone)]
pub struct FieldValidator {
    limits: FieldLimits,
    exclusions: HashMap<FieldKey, Vec<String>>,
    currency_symbol: String,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

impl FieldValidator {
    pub fn new(config: &ExtractorConfig) -> Self {
        let exclusions = FieldKey::ALL
            .into_iter()
            .map(|field| (field, config.exclusions_for(field)))
            .filter(|(_, tokens)| !tokens.is_empty())
            .collect();

        Self {
            limits: config.limits.clone(),
            exclusions,
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// Sanitize then validate a candidate for `field`
    pub fn accept(&self, field: FieldKey, raw: &str) -> Option<String> {
        let cleaned = clean(raw)?;

        let value = match field {
            FieldKey::Price => {
                return normalize_price(&cleaned, &self.currency_symbol, self.limits.price);
            }
            FieldKey::Rating => {
                return is_valid_rating(&cleaned, self.limits.rating).then_some(cleaned);
            }
            FieldKey::Image => is_absolute_url(&cleaned).then_some(cleaned)?,
            FieldKey::Authors => normalize_authors(&cleaned)?,
            FieldKey::Seller | FieldKey::SoldBy => {
                if cleaned.chars().count() < defaults::SELLER_MIN_LENGTH {
                    return None;
                }
                cleaned
            }
            FieldKey::Reviews => return self.accept_review(&cleaned),
            _ => cleaned,
        };

        if self.is_excluded(field, &value) {
            return None;
        }

        self.limits
            .allows(field, value.chars().count())
            .then_some(value)
    }

    /// Seller predicate: at least two characters and no exclusion token
    pub fn is_valid_seller(&self, text: &str) -> bool {
        self.accept(FieldKey::SoldBy, text).is_some()
    }

    /// Review bodies must be longer than the minimum; long bodies are cut, not dropped
    pub fn accept_review(&self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.chars().count() <= defaults::MIN_REVIEW_LENGTH {
            return None;
        }
        let max = self.limits.review.min(defaults::MAX_REVIEW_LENGTH);
        clean(truncate_chars(text, max))
    }

    fn is_excluded(&self, field: FieldKey, value: &str) -> bool {
        let Some(tokens) = self.exclusions.get(&field) else {
            return false;
        };
        let lowered = value.to_lowercase();
        tokens.iter().any(|token| lowered.contains(token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ExclusionRule;
    use rstest::rstest;

    #[rstest]
    #[case("$19.99", Some("$19.99"))]
    #[case("19.99", Some("$19.99"))]
    #[case("$19..99", Some("$19.99"))]
    #[case("$ 19 .99", Some("$19.99"))]
    #[case("$1,299.00", Some("$1299.00"))]
    #[case("$7", Some("$7"))]
    #[case("Now $19.99", None)]
    #[case("$19.999", None)]
    #[case("€19.99", None)]
    #[case("$12,34.00", None)]
    fn test_normalize_price(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_price(input, "$", 50), expected.map(String::from));
    }

    #[test]
    fn test_price_ceiling() {
        let long = format!("{}.99", "9".repeat(60));
        assert_eq!(normalize_price(&long, "$", 50), None);
    }

    #[rstest]
    #[case("4.5 out of 5 stars", true)]
    #[case("4.7/5", true)]
    #[case("4 / 5", true)]
    #[case("1,234 ratings", false)]
    #[case("Currently out of stock.", false)]
    #[case("out of", false)]
    #[case("4.5", false)]
    fn test_rating_shape(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_rating(input, 100), expected);
    }

    #[test]
    fn test_rating_ceiling() {
        let long = format!("4.5 out of 5 {}", "x".repeat(100));
        assert!(!is_valid_rating(&long, 100));
    }

    #[rstest]
    #[case("https://m.media-amazon.com/images/I/71.jpg", true)]
    #[case("http://img.example.com/a.png", true)]
    #[case("/images/a.png", false)]
    #[case("data:image/gif;base64,R0lGOD", false)]
    #[case("//cdn.example.com/a.png", false)]
    fn test_absolute_url(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_absolute_url(input), expected);
    }

    #[rstest]
    #[case("by Jane Doe (Author)", Some("Jane Doe"))]
    #[case("Jane Doe (Author), John Roe (Illustrator)", Some("Jane Doe, John Roe"))]
    #[case("Jane Doe & John Roe", Some("Jane Doe, John Roe"))]
    #[case("Jane Doe (Author), John Roe (Editor) & 3 more", Some("Jane Doe, John Roe"))]
    #[case("by  \n Jane   Doe (Author)", Some("Jane Doe"))]
    #[case("(Author)", None)]
    #[case("J", None)]
    fn test_normalize_authors(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_authors(input), expected.map(String::from));
    }

    #[test]
    fn test_seller_exclusions() {
        let validator = FieldValidator::default();
        assert!(!validator.is_valid_seller("Self-Published by Jane Doe"));
        assert!(!validator.is_valid_seller("Visit the Acme Store"));
        assert!(!validator.is_valid_seller("See all formats and editions"));
        assert!(!validator.is_valid_seller("Jane Doe (Author)"));
        assert!(!validator.is_valid_seller("A"));
        assert!(validator.is_valid_seller("Acme Supply Co."));
        assert!(validator.is_valid_seller("Amazon.com"));
    }

    #[test]
    fn test_exclusions_are_configurable() {
        let mut config = ExtractorConfig::default();
        config
            .exclusions
            .push(ExclusionRule::new("Renewed", &[FieldKey::Brand]));
        let validator = FieldValidator::new(&config);

        assert_eq!(validator.accept(FieldKey::Brand, "Acme RENEWED"), None);
        assert_eq!(validator.accept(FieldKey::Brand, "Acme"), Some("Acme".to_string()));
        // brand tokens do not leak into seller validation
        assert!(validator.is_valid_seller("Renewed Deals LLC"));
    }

    #[test]
    fn test_generic_field_ceilings() {
        let validator = FieldValidator::default();
        assert!(validator.accept(FieldKey::Brand, &"b".repeat(99)).is_some());
        assert!(validator.accept(FieldKey::Brand, &"b".repeat(100)).is_none());
        assert!(validator.accept(FieldKey::ShipsFrom, &"s".repeat(199)).is_some());
        assert!(validator.accept(FieldKey::ShipsFrom, &"s".repeat(200)).is_none());
    }

    #[test]
    fn test_accept_runs_sanitizer_first() {
        let validator = FieldValidator::default();
        assert_eq!(validator.accept(FieldKey::Title, "window.csa('x')"), None);
        assert_eq!(validator.accept(FieldKey::Title, "  "), None);
        assert_eq!(
            validator.accept(FieldKey::Title, " Stainless Kettle "),
            Some("Stainless Kettle".to_string())
        );
    }

    #[test]
    fn test_reviews() {
        let validator = FieldValidator::default();
        assert_eq!(validator.accept_review("Too short"), None);
        assert_eq!(validator.accept_review("exactly10!"), None);
        assert_eq!(
            validator.accept_review("  Works as described.  "),
            Some("Works as described.".to_string())
        );
        let long = "r".repeat(800);
        assert_eq!(validator.accept_review(&long).map(|r| r.len()), Some(500));
    }

    #[test]
    fn test_custom_currency_symbol() {
        let config = ExtractorConfig {
            currency_symbol: "US$".to_string(),
            ..ExtractorConfig::default()
        };
        let validator = FieldValidator::new(&config);
        assert_eq!(validator.accept(FieldKey::Price, "24.50"), Some("US$24.50".to_string()));
        assert_eq!(validator.accept(FieldKey::Price, "$24.50"), Some("$24.50".to_string()));
    }
}
