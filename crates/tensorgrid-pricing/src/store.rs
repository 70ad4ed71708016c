//! In-memory pricing rule store
//!
//! Owns the full rule collection and answers scoped filter queries. Insertion
//! order is stable: upsert replaces an existing rule in place and appends new
//! ones, and the resolver's tie-break relies on that order.

use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use tensorgrid_common::{
    PricingError, PricingRule, Result, ResourceType, RuleDraft, Scope, DEFAULT_CURRENCY,
};

/// Rule store backed by a single lock
///
/// One lock covers reads and writes so admin flows that list and then upsert
/// observe a consistent collection. Construct one store per logical owner;
/// there is no process-global instance.
pub struct RuleStore {
    rules: RwLock<Vec<PricingRule>>,
    default_currency: String,
}

impl RuleStore {
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            default_currency: default_currency.into(),
        }
    }

    /// Every rule, in stable store order. No filtering, no side effects.
    pub fn list_all(&self) -> Vec<PricingRule> {
        self.rules.read().clone()
    }

    /// Rules at the given scope, optionally narrowed to one scope id.
    pub fn list_by_scope(&self, scope: Scope, scope_id: Option<&str>) -> Vec<PricingRule> {
        self.rules
            .read()
            .iter()
            .filter(|rule| {
                rule.scope == scope
                    && scope_id.map_or(true, |id| rule.scope_id.as_deref() == Some(id))
            })
            .cloned()
            .collect()
    }

    /// Create or replace a rule.
    ///
    /// A draft without an id gets a fresh one and is appended; a draft whose
    /// id already exists replaces that rule in place, keeping its position
    /// and `created_at`. Missing required fields or a negative price fail
    /// validation; a negative price is never clamped to zero.
    pub fn upsert(&self, draft: RuleDraft) -> Result<PricingRule> {
        let (resource_type, unit, price_per_unit) = validate(&draft)?;

        let now = Utc::now();
        let scope = draft.scope.unwrap_or(Scope::Default);
        let mut rule = PricingRule {
            id: draft
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            scope,
            // scopeId carries no meaning at default scope
            scope_id: if scope == Scope::Default {
                None
            } else {
                draft.scope_id
            },
            scope_name: draft.scope_name,
            resource_type,
            resource_spec: draft.resource_spec,
            unit,
            price_per_unit,
            billing_cycle: draft.billing_cycle.unwrap_or_default(),
            currency: draft
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            enabled: draft.enabled.unwrap_or(true),
            effective_date: draft.effective_date.unwrap_or(now),
            expiry_date: draft.expiry_date,
            created_at: now,
            updated_at: now,
            created_by: draft.created_by,
            description: draft.description,
        };

        let mut rules = self.rules.write();
        match rules.iter().position(|existing| existing.id == rule.id) {
            Some(pos) => {
                rule.created_at = rules[pos].created_at;
                if rule.created_by.is_none() {
                    rule.created_by = rules[pos].created_by.take();
                }
                debug!(rule_id = %rule.id, position = pos, "replaced pricing rule");
                rules[pos] = rule.clone();
            }
            None => {
                debug!(rule_id = %rule.id, scope = %rule.scope, "created pricing rule");
                rules.push(rule.clone());
            }
        }

        Ok(rule)
    }

    /// Delete the rule with the given id.
    ///
    /// Returns whether a deletion occurred; an unknown id is not an error.
    pub fn remove(&self, id: &str) -> bool {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|rule| rule.id != id);
        let removed = rules.len() < before;
        if removed {
            debug!(rule_id = %id, "removed pricing rule");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Bulk-insert drafts, typically the default catalog at startup.
    pub fn seed(&self, drafts: Vec<RuleDraft>) -> Result<usize> {
        let mut inserted = 0;
        for draft in drafts {
            self.upsert(draft)?;
            inserted += 1;
        }
        debug!(count = inserted, "seeded pricing rules");
        Ok(inserted)
    }
}

fn validate(draft: &RuleDraft) -> Result<(ResourceType, String, Decimal)> {
    let resource_type = draft
        .resource_type
        .ok_or_else(|| PricingError::Validation("resourceType is required".to_string()))?;
    let unit = draft
        .unit
        .clone()
        .filter(|unit| !unit.is_empty())
        .ok_or_else(|| PricingError::Validation("unit is required".to_string()))?;
    let price_per_unit = draft
        .price_per_unit
        .ok_or_else(|| PricingError::Validation("pricePerUnit is required".to_string()))?;
    if price_per_unit < Decimal::ZERO {
        return Err(PricingError::Validation(
            "pricePerUnit cannot be negative".to_string(),
        )
        .into());
    }
    Ok((resource_type, unit, price_per_unit))
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}
