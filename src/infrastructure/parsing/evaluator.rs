//! Probe chain evaluation
//!
//! A field is resolved by trying its probes in order. The first probe that
//! yields a candidate passing sanitization and field validation wins and the
//! remaining probes are never evaluated.

use super::locator::{Probe, ReviewProbe};
use super::page::PageQuery;
use super::validators::FieldValidator;
use crate::domain::FieldKey;
use crate::infrastructure::config::defaults::MAX_REVIEWS;
use tracing::{debug, trace};

/// Ordered probes for one field
#[derive(Debug, Clone)]
pub struct FieldChain {
    pub field: FieldKey,
    pub probes: Vec<Probe>,
}

impl FieldChain {
    pub fn new(field: FieldKey, probes: Vec<Probe>) -> Self {
        Self { field, probes }
    }

    pub fn resolve<P: PageQuery + ?Sized>(
        &self,
        page: &P,
        validator: &FieldValidator,
    ) -> Option<String> {
        resolve_field(page, self.field, &self.probes, validator)
    }
}

/// First validated value produced by `probes`, or `None`
pub fn resolve_field<P: PageQuery + ?Sized>(
    page: &P,
    field: FieldKey,
    probes: &[Probe],
    validator: &FieldValidator,
) -> Option<String> {
    for (layer, probe) in probes.iter().enumerate() {
        let targets = page.locate(&probe.locator);
        if targets.is_empty() {
            trace!("{}: layer {} found no target", field, layer);
            continue;
        }

        for candidate in probe.candidates(&targets) {
            if let Some(value) = validator.accept(field, &candidate) {
                debug!("{}: resolved at layer {} -> {}", field, layer, value);
                return Some(value);
            }
            trace!("{}: layer {} rejected candidate", field, layer);
        }
    }

    debug!("{}: no layer produced a valid value", field);
    None
}

/// Up to `MAX_REVIEWS` review bodies from the first probe that yields any
pub fn resolve_reviews<P: PageQuery + ?Sized>(
    page: &P,
    probes: &[ReviewProbe],
    validator: &FieldValidator,
) -> Vec<String> {
    for probe in probes {
        let items = page.locate(&probe.item);
        let reviews: Vec<String> = probe
            .bodies(&items)
            .iter()
            .filter_map(|body| validator.accept_review(body))
            .take(MAX_REVIEWS)
            .collect();

        if !reviews.is_empty() {
            debug!("reviews: collected {}", reviews.len());
            return reviews;
        }
    }
    Vec::new()
}
