//! Per-platform strategy tables
//!
//! A table maps each field a platform supports to its probe chain, plus the
//! review probes. Tables are compiled once on first use and shared read-only.
//! A field missing from a table is never attempted for that platform.

pub mod amazon;
pub mod best_buy;
pub mod ebay;
pub mod etsy;
pub mod target;
pub mod walmart;

use super::evaluator::FieldChain;
use super::locator::{Probe, ReviewProbe};
use super::error::{ParsingError, ParsingResult};
use crate::domain::{FieldKey, Platform};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, error};

/// Probe chains and review probes for one platform
#[derive(Debug, Clone)]
pub struct StrategyTable {
    pub platform: Platform,
    chains: Vec<FieldChain>,
    reviews: Vec<ReviewProbe>,
}

impl StrategyTable {
    pub const fn empty(platform: Platform) -> Self {
        Self {
            platform,
            chains: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Add the chain for `field`. A chain must hold at least one probe.
    pub fn with_chain(mut self, field: FieldKey, probes: Vec<Probe>) -> ParsingResult<Self> {
        if probes.is_empty() {
            return Err(ParsingError::empty_probe_chain(self.platform, field));
        }
        self.chains.retain(|chain| chain.field != field);
        self.chains.push(FieldChain::new(field, probes));
        Ok(self)
    }

    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<ReviewProbe>) -> Self {
        self.reviews = reviews;
        self
    }

    /// Chains in resolution order
    pub fn chains(&self) -> &[FieldChain] {
        &self.chains
    }

    pub fn chain(&self, field: FieldKey) -> Option<&FieldChain> {
        self.chains.iter().find(|chain| chain.field == field)
    }

    pub fn reviews(&self) -> &[ReviewProbe] {
        &self.reviews
    }

    pub fn supports(&self, field: FieldKey) -> bool {
        match field {
            FieldKey::Reviews => !self.reviews.is_empty(),
            _ => self.chain(field).is_some(),
        }
    }

    pub fn probe_count(&self) -> usize {
        self.chains.iter().map(|chain| chain.probes.len()).sum::<usize>() + self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.reviews.is_empty()
    }
}

/// Compile the table for `platform`
pub fn build_table(platform: Platform) -> ParsingResult<StrategyTable> {
    match platform {
        Platform::Amazon => amazon::table(),
        Platform::Walmart => walmart::table(),
        Platform::Etsy => etsy::table(),
        Platform::BestBuy => best_buy::table(),
        Platform::Target => target::table(),
        Platform::Ebay => ebay::table(),
        Platform::Unknown => Ok(StrategyTable::empty(Platform::Unknown)),
    }
}

static TABLES: Lazy<HashMap<Platform, StrategyTable>> = Lazy::new(|| {
    Platform::KNOWN
        .into_iter()
        .map(|platform| {
            let table = build_table(platform).unwrap_or_else(|e| {
                error!("Failed to build strategy table for {}: {}", platform, e);
                StrategyTable::empty(platform)
            });
            debug!("Strategy table for {}: {} probes", platform, table.probe_count());
            (platform, table)
        })
        .collect()
});

static UNKNOWN_TABLE: StrategyTable = StrategyTable::empty(Platform::Unknown);

/// Shared table for `platform`; `Unknown` gets the empty table
pub fn table_for(platform: Platform) -> &'static StrategyTable {
    TABLES.get(&platform).unwrap_or(&UNKNOWN_TABLE)
}
