//! Declarative locators, extraction rules and probes
//!
//! Everything here is data: a `Probe` pairs a `Locator` with an `ExtractRule`
//! and a list of `Transform`s, and is built once when a strategy table is
//! compiled. Resolving a locator never mutates the document.

use super::page::{Located, NON_CONTENT_TAGS, element_text};
use super::sanitize::collapse_whitespace;
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::cmp::Reverse;
use tracing::warn;

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("valid body selector"));
static BYLINE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^by\b").expect("valid byline pattern"));

/// Compile a CSS selector, logging failures
pub fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        warn!("Failed to compile selector '{}': {}", selector, e);
        ParsingError::invalid_selector(selector, e)
    })
}

/// Compile a regex pattern, logging failures
pub fn compile_pattern(pattern: &str) -> ParsingResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        warn!("Failed to compile pattern '{}': {}", pattern, e);
        ParsingError::invalid_pattern(pattern, e)
    })
}

/// Named container region of a page
#[derive(Debug, Clone)]
pub enum Region {
    /// The document body (root element when there is no body)
    Document,
    /// First element matching `selector`, e.g. the buy box
    Container { name: &'static str, selector: Selector },
}

impl Region {
    pub fn container(name: &'static str, selector: &str) -> ParsingResult<Self> {
        Ok(Self::Container {
            name,
            selector: compile_selector(selector)?,
        })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Container { name, .. } => *name,
        }
    }

    /// Root element of the region, if present
    pub fn element<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        match self {
            Self::Document => document
                .select(&BODY)
                .next()
                .or_else(|| Some(document.root_element())),
            Self::Container { selector, .. } => document.select(selector).next(),
        }
    }
}

/// Where a probe looks in the document
#[derive(Debug, Clone)]
pub enum Locator {
    /// First element matching the selector
    First(Selector),
    /// Every element matching the selector, in document order
    All(Selector),
    /// The whole text of a named region
    Region(Region),
    /// Elements inside `region` whose text contains every `all_of` term and no
    /// `none_of` term (case-insensitive), innermost first
    Descendants {
        region: Region,
        all_of: &'static [&'static str],
        none_of: &'static [&'static str],
    },
    /// A literal value, for platforms that are their own seller
    Fixed(&'static str),
}

impl Locator {
    pub fn first(selector: &str) -> ParsingResult<Self> {
        Ok(Self::First(compile_selector(selector)?))
    }

    pub fn all(selector: &str) -> ParsingResult<Self> {
        Ok(Self::All(compile_selector(selector)?))
    }

    /// Resolve against a document. Absent targets yield an empty list.
    pub fn resolve<'a>(&self, document: &'a Html) -> Vec<Located<'a>> {
        match self {
            Self::First(selector) => document
                .select(selector)
                .next()
                .map(Located::Element)
                .into_iter()
                .collect(),
            Self::All(selector) => document.select(selector).map(Located::Element).collect(),
            Self::Region(region) => region
                .element(document)
                .map(Located::Element)
                .into_iter()
                .collect(),
            Self::Descendants {
                region,
                all_of,
                none_of,
            } => region
                .element(document)
                .map(|root| matching_descendants(root, all_of, none_of))
                .unwrap_or_default(),
            Self::Fixed(value) => vec![Located::Text(Cow::Borrowed(*value))],
        }
    }
}

fn matching_descendants<'a>(
    root: ElementRef<'a>,
    all_of: &[&str],
    none_of: &[&str],
) -> Vec<Located<'a>> {
    let mut matches: Vec<(usize, ElementRef<'a>)> = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| !NON_CONTENT_TAGS.contains(&element.value().name()))
        .filter(|element| {
            let text = element_text(*element).to_lowercase();
            all_of.iter().all(|term| text.contains(&term.to_lowercase()))
                && !none_of.iter().any(|term| text.contains(&term.to_lowercase()))
        })
        .map(|element| (element.ancestors().count(), element))
        .collect();

    // deepest first; stable sort keeps document order within a depth
    matches.sort_by_key(|(depth, _)| Reverse(*depth));
    matches
        .into_iter()
        .map(|(_, element)| Located::Element(element))
        .collect()
}

/// Accept guard for `ExtractRule::CaptureWhere`
pub type CaptureGuard = fn(&str) -> bool;

/// How raw text is pulled out of located targets
#[derive(Debug, Clone)]
pub enum ExtractRule {
    /// Text content
    Text,
    /// First non-empty attribute among the names
    Attr(&'static [&'static str]),
    /// Capture group 1 of every match in the target text
    Capture(Regex),
    /// Capture group 1, keeping only matches the guard accepts
    CaptureWhere { regex: Regex, accept: CaptureGuard },
    /// `symbol + whole (dots removed) + "." + fraction` from a composite price element
    PriceParts {
        symbol: Selector,
        whole: Selector,
        fraction: Selector,
    },
    /// `symbol + amount` where the symbol defaults to `$` when the page has none
    CurrencyAmount { symbol: Selector, amount: Selector },
    /// Contributor byline beginning with "by"
    Byline,
    /// Distinct texts of all targets, joined with ", " in document order
    JoinDistinct,
}

impl ExtractRule {
    pub fn capture(pattern: &str) -> ParsingResult<Self> {
        Ok(Self::Capture(compile_pattern(pattern)?))
    }

    pub fn capture_where(pattern: &str, accept: CaptureGuard) -> ParsingResult<Self> {
        Ok(Self::CaptureWhere {
            regex: compile_pattern(pattern)?,
            accept,
        })
    }

    pub fn price_parts(symbol: &str, whole: &str, fraction: &str) -> ParsingResult<Self> {
        Ok(Self::PriceParts {
            symbol: compile_selector(symbol)?,
            whole: compile_selector(whole)?,
            fraction: compile_selector(fraction)?,
        })
    }

    pub fn currency_amount(symbol: &str, amount: &str) -> ParsingResult<Self> {
        Ok(Self::CurrencyAmount {
            symbol: compile_selector(symbol)?,
            amount: compile_selector(amount)?,
        })
    }

    /// Raw candidates from the located targets, in order
    pub fn apply(&self, targets: &[Located<'_>]) -> Vec<String> {
        match self {
            Self::Text => targets.iter().map(|t| t.text().into_owned()).collect(),
            Self::Attr(names) => targets
                .iter()
                .filter_map(Located::element)
                .filter_map(|element| {
                    names.iter().find_map(|name| {
                        element
                            .value()
                            .attr(name)
                            .filter(|value| !value.trim().is_empty())
                            .map(str::to_string)
                    })
                })
                .collect(),
            Self::Capture(regex) => targets
                .iter()
                .flat_map(|t| captures(regex, &t.text(), |_| true))
                .collect(),
            Self::CaptureWhere { regex, accept } => targets
                .iter()
                .flat_map(|t| captures(regex, &t.text(), *accept))
                .collect(),
            Self::PriceParts {
                symbol,
                whole,
                fraction,
            } => targets
                .iter()
                .filter_map(Located::element)
                .filter_map(|element| assemble_price(element, symbol, whole, fraction))
                .collect(),
            Self::CurrencyAmount { symbol, amount } => targets
                .iter()
                .filter_map(Located::element)
                .filter_map(|element| prefix_currency(element, symbol, amount))
                .collect(),
            Self::Byline => targets
                .iter()
                .map(|t| collapse_whitespace(&t.text()))
                .filter(|text| BYLINE_START.is_match(text))
                .collect(),
            Self::JoinDistinct => {
                let mut names: Vec<String> = Vec::new();
                for target in targets {
                    let text = collapse_whitespace(&target.text());
                    if !text.is_empty() && !names.contains(&text) {
                        names.push(text);
                    }
                }
                if names.is_empty() {
                    Vec::new()
                } else {
                    vec![names.join(", ")]
                }
            }
        }
    }
}

fn captures(regex: &Regex, text: &str, accept: CaptureGuard) -> Vec<String> {
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty() && accept(value))
        .map(str::to_string)
        .collect()
}

fn assemble_price(
    container: ElementRef<'_>,
    symbol: &Selector,
    whole: &Selector,
    fraction: &Selector,
) -> Option<String> {
    let symbol_el = container.select(symbol).next()?;
    let whole_el = container.select(whole).next()?;

    let symbol_text = element_text(symbol_el);
    let symbol_text = match symbol_text.trim() {
        "" => "$",
        s => s,
    };
    let whole_text = element_text(whole_el).trim().replace('.', "");

    let mut price = format!("{}{}", symbol_text, whole_text);
    if let Some(fraction_el) = container.select(fraction).next() {
        price.push('.');
        price.push_str(element_text(fraction_el).trim());
    }
    Some(price)
}

fn prefix_currency(container: ElementRef<'_>, symbol: &Selector, amount: &Selector) -> Option<String> {
    let amount_text = element_text(container.select(amount).next()?);
    let symbol_text = container
        .select(symbol)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let symbol_text = match symbol_text.trim() {
        "" => "$",
        s => s,
    };
    Some(format!("{}{}", symbol_text, amount_text.trim()))
}

/// Post-processing applied to each candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Drop trailing `.`, `,`, `;`, `:`, `|` and `-`
    StripTrailingPunct,
    /// Keep only the text before the first case-insensitive occurrence of the marker
    CutAt(&'static str),
    /// First whitespace-separated token (e.g. a `srcset` entry)
    FirstToken,
    /// Append a suffix to non-empty values
    Append(&'static str),
    /// Keep only values that parse as a number greater than 0
    NonZero,
    CollapseWhitespace,
}

impl Transform {
    pub fn apply(&self, value: String) -> Option<String> {
        match self {
            Self::StripTrailingPunct => Some(
                value
                    .trim()
                    .trim_end_matches(['.', ',', ';', ':', '|', '-'])
                    .trim_end()
                    .to_string(),
            ),
            Self::CutAt(marker) => {
                let lowered = value.to_ascii_lowercase();
                match lowered.find(&marker.to_ascii_lowercase()) {
                    Some(idx) => Some(value[..idx].trim().to_string()),
                    None => Some(value),
                }
            }
            Self::FirstToken => value.split_whitespace().next().map(str::to_string),
            Self::Append(suffix) => {
                let value = value.trim();
                (!value.is_empty()).then(|| format!("{}{}", value, suffix))
            }
            Self::NonZero => value
                .trim()
                .parse::<f64>()
                .is_ok_and(|n| n > 0.0)
                .then_some(value),
            Self::CollapseWhitespace => Some(collapse_whitespace(&value)),
        }
    }
}

/// One attempt at a field: locator, extraction rule, transforms
#[derive(Debug, Clone)]
pub struct Probe {
    pub locator: Locator,
    pub rule: ExtractRule,
    pub transforms: Vec<Transform>,
}

impl Probe {
    pub const fn new(locator: Locator, rule: ExtractRule) -> Self {
        Self {
            locator,
            rule,
            transforms: Vec::new(),
        }
    }

    /// Text of the first element matching `selector`
    pub fn text(selector: &str) -> ParsingResult<Self> {
        Ok(Self::new(Locator::first(selector)?, ExtractRule::Text))
    }

    /// First non-empty attribute of the first element matching `selector`
    pub fn attr(selector: &str, names: &'static [&'static str]) -> ParsingResult<Self> {
        Ok(Self::new(Locator::first(selector)?, ExtractRule::Attr(names)))
    }

    /// Capture group 1 of `pattern` in the text of the first element matching `selector`
    pub fn capture_in(selector: &str, pattern: &str) -> ParsingResult<Self> {
        Ok(Self::new(
            Locator::first(selector)?,
            ExtractRule::capture(pattern)?,
        ))
    }

    /// Capture group 1 of `pattern` in the full text of `region`
    pub fn capture_region(region: Region, pattern: &str) -> ParsingResult<Self> {
        Ok(Self::new(
            Locator::Region(region),
            ExtractRule::capture(pattern)?,
        ))
    }

    pub const fn fixed(value: &'static str) -> Self {
        Self::new(Locator::Fixed(value), ExtractRule::Text)
    }

    #[must_use]
    pub fn then(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Run the extraction rule and transforms over located targets
    pub fn candidates(&self, targets: &[Located<'_>]) -> Vec<String> {
        self.rule
            .apply(targets)
            .into_iter()
            .filter_map(|raw| {
                self.transforms
                    .iter()
                    .try_fold(raw, |value, transform| transform.apply(value))
            })
            .collect()
    }
}

/// Review list locator: item containers and the body element inside each
#[derive(Debug, Clone)]
pub struct ReviewProbe {
    pub item: Locator,
    pub body: Selector,
}

impl ReviewProbe {
    pub fn new(item: &str, body: &str) -> ParsingResult<Self> {
        Ok(Self {
            item: Locator::all(item)?,
            body: compile_selector(body)?,
        })
    }

    /// Body texts of the located review items, in document order
    pub fn bodies(&self, items: &[Located<'_>]) -> Vec<String> {
        items
            .iter()
            .filter_map(Located::element)
            .filter_map(|item| item.select(&self.body).next())
            .map(element_text)
            .collect()
    }
}
