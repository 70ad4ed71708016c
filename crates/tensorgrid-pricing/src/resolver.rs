//! Waterfall price resolution
//!
//! Walks the scope hierarchy node > pool > zone > default and stops at the
//! first level holding a valid matching rule. More specific always wins,
//! regardless of price; there is no partial matching and no price comparison
//! between levels.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use tensorgrid_common::{PricingError, PricingQuery, PricingResult, Result};

use crate::store::RuleStore;

/// Deterministic rule selection over a [`RuleStore`]
#[derive(Clone)]
pub struct Resolver {
    store: Arc<RuleStore>,
}

impl Resolver {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self { store }
    }

    /// Select the single rule that prices the queried resource.
    ///
    /// Within a level, co-valid duplicates are broken by stable store order:
    /// the first match wins. Fails with `NoMatchingRule` when no level
    /// yields a match; there is no silent zero price.
    #[instrument(skip(self))]
    pub fn resolve(&self, query: &PricingQuery) -> Result<PricingResult> {
        let instant = query.date.unwrap_or_else(Utc::now);

        for level in query.scope_candidates() {
            let winner = self
                .store
                .list_by_scope(level.scope(), level.scope_id())
                .into_iter()
                .find(|rule| {
                    rule.is_valid_at(instant)
                        && rule.matches(query.resource_type, query.resource_spec.as_deref())
                });

            if let Some(rule) = winner {
                debug!(level = %level, rule_id = %rule.id, price = %rule.price_per_unit, "price resolved");
                return Ok(PricingResult::from_rule(rule, &level));
            }
        }

        Err(PricingError::NoMatchingRule {
            resource_type: query.resource_type,
            resource_spec: query.resource_spec.clone(),
        }
        .into())
    }
}
