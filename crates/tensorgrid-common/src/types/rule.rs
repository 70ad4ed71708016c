//! Pricing rule model
//!
//! A rule is a priced offer for a resource, declared at one level of the
//! override hierarchy (node > pool > zone > default) and bounded by an
//! optional validity window.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hierarchy level a pricing rule is declared at.
///
/// Resolution walks levels from most to least specific; a rule at a
/// narrower level always beats a wider one, regardless of price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Default,
    Zone,
    Pool,
    Node,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Default => "default",
            Scope::Zone => "zone",
            Scope::Pool => "pool",
            Scope::Node => "node",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billable resource categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Gpu,
    Cpu,
    Memory,
    Storage,
    Network,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Gpu => "gpu",
            ResourceType::Cpu => "cpu",
            ResourceType::Memory => "memory",
            ResourceType::Storage => "storage",
            ResourceType::Network => "network",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing cycle the per-unit price is quoted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Hourly,
    Daily,
    Monthly,
}

impl Default for BillingCycle {
    fn default() -> Self {
        BillingCycle::Hourly
    }
}

/// A priced offer for a resource at one scope level
///
/// Rules are replaceable but not mutated in place by callers: all writes go
/// through the store's upsert, which stamps the audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    /// Unique identifier, assigned by the store on creation if absent
    pub id: String,

    /// Hierarchy level this rule applies at
    pub scope: Scope,

    /// Zone/pool/node the rule is scoped to; ignored for default scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<String>,

    /// Display label for the scope target; no effect on resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_name: Option<String>,

    pub resource_type: ResourceType,

    /// Sub-classification (e.g. a GPU model); absent means the rule is a
    /// catch-all for the resource type at this scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_spec: Option<String>,

    /// Display/billing unit label, carried through uninterpreted
    pub unit: String,

    pub price_per_unit: Decimal,

    pub billing_cycle: BillingCycle,

    /// Currency code (e.g. "CNY")
    pub currency: String,

    /// Disabled rules are invisible to resolution
    pub enabled: bool,

    /// Valid from this instant (inclusive)
    pub effective_date: DateTime<Utc>,

    /// Valid through this instant (inclusive); absent means no expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,

    // Audit fields, carried but never consulted by resolution
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PricingRule {
    /// Whether the rule can price anything at the given instant.
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        self.enabled
            && self.effective_date <= instant
            && self.expiry_date.map_or(true, |expiry| expiry >= instant)
    }

    /// Whether the rule prices the requested resource.
    ///
    /// A query without a spec matches rules carrying any spec (or none);
    /// the first one in store order wins. A spec-qualified query matches
    /// only rules whose spec equals it exactly, so catch-all rules do not
    /// satisfy it.
    pub fn matches(&self, resource_type: ResourceType, resource_spec: Option<&str>) -> bool {
        if self.resource_type != resource_type {
            return false;
        }
        match resource_spec {
            None => true,
            Some(spec) => self.resource_spec.as_deref() == Some(spec),
        }
    }
}

/// Partial rule accepted by upsert
///
/// Required for creation: `resource_type`, `unit`, `price_per_unit`.
/// Everything else falls back to a default when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleDraft {
    pub id: Option<String>,
    pub scope: Option<Scope>,
    pub scope_id: Option<String>,
    pub scope_name: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub resource_spec: Option<String>,
    pub unit: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub billing_cycle: Option<BillingCycle>,
    pub currency: Option<String>,
    pub enabled: Option<bool>,
    pub effective_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub description: Option<String>,
}

impl RuleDraft {
    /// Create a draft with the three required fields set
    pub fn new(
        resource_type: ResourceType,
        unit: impl Into<String>,
        price_per_unit: Decimal,
    ) -> Self {
        Self {
            resource_type: Some(resource_type),
            unit: Some(unit.into()),
            price_per_unit: Some(price_per_unit),
            ..Self::default()
        }
    }

    /// Keep the id of an existing rule so upsert replaces it in place
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Scope the rule to a zone, pool, or node
    pub fn with_scope(mut self, scope: Scope, scope_id: impl Into<String>) -> Self {
        self.scope = Some(scope);
        self.scope_id = Some(scope_id.into());
        self
    }

    pub fn with_scope_name(mut self, name: impl Into<String>) -> Self {
        self.scope_name = Some(name.into());
        self
    }

    pub fn with_resource_spec(mut self, spec: impl Into<String>) -> Self {
        self.resource_spec = Some(spec.into());
        self
    }

    pub fn with_billing_cycle(mut self, cycle: BillingCycle) -> Self {
        self.billing_cycle = Some(cycle);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_effective_date(mut self, date: DateTime<Utc>) -> Self {
        self.effective_date = Some(date);
        self
    }

    pub fn with_expiry_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(date);
        self
    }

    pub fn with_created_by(mut self, author: impl Into<String>) -> Self {
        self.created_by = Some(author.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn rule_at(effective: DateTime<Utc>, expiry: Option<DateTime<Utc>>) -> PricingRule {
        PricingRule {
            id: "rule-test".to_string(),
            scope: Scope::Default,
            scope_id: None,
            scope_name: None,
            resource_type: ResourceType::Gpu,
            resource_spec: Some("A100-40GB".to_string()),
            unit: "GPU-hour".to_string(),
            price_per_unit: dec!(25),
            billing_cycle: BillingCycle::Hourly,
            currency: "CNY".to_string(),
            enabled: true,
            effective_date: effective,
            expiry_date: expiry,
            created_at: effective,
            updated_at: effective,
            created_by: None,
            description: None,
        }
    }

    #[test]
    fn test_validity_window_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();
        let rule = rule_at(start, Some(end));

        assert!(rule.is_valid_at(start));
        assert!(rule.is_valid_at(end));
        assert!(!rule.is_valid_at(start - chrono::Duration::seconds(1)));
        assert!(!rule.is_valid_at(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_disabled_rule_is_never_valid() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rule = rule_at(start, None);
        rule.enabled = false;
        assert!(!rule.is_valid_at(start + chrono::Duration::days(1)));
    }

    #[test]
    fn test_spec_less_query_matches_spec_carrying_rule() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let rule = rule_at(start, None);
        assert!(rule.matches(ResourceType::Gpu, None));
    }

    #[test]
    fn test_spec_qualified_query_rejects_catch_all_rule() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rule = rule_at(start, None);
        rule.resource_spec = None;
        assert!(!rule.matches(ResourceType::Gpu, Some("A100-40GB")));
        assert!(rule.matches(ResourceType::Gpu, None));
    }

    #[test]
    fn test_spec_must_match_exactly() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let rule = rule_at(start, None);
        assert!(rule.matches(ResourceType::Gpu, Some("A100-40GB")));
        assert!(!rule.matches(ResourceType::Gpu, Some("V100-32GB")));
        assert!(!rule.matches(ResourceType::Cpu, Some("A100-40GB")));
    }

    #[test]
    fn test_rule_json_uses_wire_field_names() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let rule = rule_at(start, None);
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["resourceType"], "gpu");
        assert_eq!(json["billingCycle"], "hourly");
        assert_eq!(json["scope"], "default");
        assert!(json.get("pricePerUnit").is_some());
        assert!(json.get("scopeId").is_none());
    }

    #[test]
    fn test_draft_builder_sets_required_fields() {
        let draft = RuleDraft::new(ResourceType::Cpu, "core-hour", dec!(0.6))
            .with_scope(Scope::Pool, "pool-007")
            .with_description("pool override");

        assert_eq!(draft.resource_type, Some(ResourceType::Cpu));
        assert_eq!(draft.unit.as_deref(), Some("core-hour"));
        assert_eq!(draft.price_per_unit, Some(dec!(0.6)));
        assert_eq!(draft.scope, Some(Scope::Pool));
        assert_eq!(draft.scope_id.as_deref(), Some("pool-007"));
    }
}
