//! Resolution and cost calculation results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::query::ScopeRef;
use crate::types::rule::{BillingCycle, PricingRule};

/// Outcome of price resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub price_per_unit: Decimal,
    pub unit: String,
    pub billing_cycle: BillingCycle,
    pub currency: String,

    /// The winning rule, in full
    pub applied_rule: PricingRule,

    /// Provenance: the scope level that resolved, e.g. `["node:node-001"]`
    pub scope_chain: Vec<String>,
}

impl PricingResult {
    /// Build a result from the winning rule and the level it matched at.
    pub fn from_rule(rule: PricingRule, level: &ScopeRef) -> Self {
        Self {
            price_per_unit: rule.price_per_unit,
            unit: rule.unit.clone(),
            billing_cycle: rule.billing_cycle,
            currency: rule.currency.clone(),
            scope_chain: vec![level.to_string()],
            applied_rule: rule,
        }
    }
}

/// Outcome of a cost calculation: resolution plus quantity × duration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub total_cost: Decimal,
    pub price_per_unit: Decimal,
    pub unit: String,
    pub currency: String,
    pub quantity: Decimal,
    pub duration: Decimal,
    pub applied_rule: PricingRule,
    pub scope_chain: Vec<String>,
}
