//! Integration tests for the pricing engine
//!
//! Exercises the full surface through the service facade:
//! - hierarchy precedence and fallback
//! - spec filtering and validity windows
//! - mutation flows the admin console drives
//! - cost calculation on top of resolution

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use tensorgrid_common::{
    CostContext, PricingError, PricingQuery, ResourceType, RuleDraft, Scope, TensorGridError,
};
use tensorgrid_pricing::{PricingConfig, PricingService};

fn seeded_service() -> PricingService {
    PricingService::new(PricingConfig::default()).unwrap()
}

fn empty_service() -> PricingService {
    PricingService::new(PricingConfig {
        seed_catalog: false,
        ..PricingConfig::default()
    })
    .unwrap()
}

#[test]
fn node_rule_beats_zone_and_default() {
    let service = seeded_service();

    let result = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("A100-40GB")
                .with_zone("zone-001")
                .with_node("node-001"),
        )
        .unwrap();

    assert_eq!(result.price_per_unit, dec!(22.0));
    assert_eq!(result.scope_chain, vec!["node:node-001".to_string()]);
    assert_eq!(result.applied_rule.scope, Scope::Node);
}

#[test]
fn zone_rule_beats_default_when_node_has_none() {
    let service = seeded_service();

    let result = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("A100-40GB")
                .with_zone("zone-001")
                .with_node("node-777"),
        )
        .unwrap();

    assert_eq!(result.price_per_unit, dec!(23.0));
    assert_eq!(result.scope_chain, vec!["zone:zone-001".to_string()]);
}

#[test]
fn unknown_zone_falls_back_to_default() {
    let service = seeded_service();

    let result = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("V100-32GB")
                .with_zone("zone-999"),
        )
        .unwrap();

    assert_eq!(result.price_per_unit, dec!(18.0));
    assert_eq!(result.scope_chain, vec!["default".to_string()]);
}

#[test]
fn hdd_query_never_returns_ssd_price() {
    let service = seeded_service();

    let result = service
        .resolve(&PricingQuery::new(ResourceType::Storage).with_spec("HDD"))
        .unwrap();

    assert_eq!(result.price_per_unit, dec!(0.02));
    assert_eq!(result.applied_rule.resource_spec.as_deref(), Some("HDD"));
}

#[test]
fn validity_window_bounds_selection() {
    let service = empty_service();
    let query_date = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    // promotional price that ended in February
    service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(15))
                .with_resource_spec("A100-40GB")
                .with_effective_date(query_date - Duration::days(60))
                .with_expiry_date(query_date - Duration::days(1)),
        )
        .unwrap();
    // price list that starts in April
    service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(28))
                .with_resource_spec("A100-40GB")
                .with_effective_date(query_date + Duration::days(31)),
        )
        .unwrap();

    let err = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("A100-40GB")
                .with_date(query_date),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TensorGridError::Pricing(PricingError::NoMatchingRule { .. })
    ));

    // the current price list fills the gap
    service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(25))
                .with_resource_spec("A100-40GB")
                .with_effective_date(query_date - Duration::days(1)),
        )
        .unwrap();

    let result = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("A100-40GB")
                .with_date(query_date),
        )
        .unwrap();
    assert_eq!(result.price_per_unit, dec!(25));
}

#[test]
fn disabling_the_only_rule_makes_resolution_fail() {
    let service = empty_service();
    let rule = service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(25)).with_resource_spec("A100-40GB"),
        )
        .unwrap();

    // the console's "disable" action is an upsert with enabled=false
    service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(25))
                .with_resource_spec("A100-40GB")
                .with_id(&rule.id)
                .with_enabled(false),
        )
        .unwrap();

    let err = service
        .resolve(&PricingQuery::new(ResourceType::Gpu).with_spec("A100-40GB"))
        .unwrap_err();
    assert!(matches!(
        err,
        TensorGridError::Pricing(PricingError::NoMatchingRule { .. })
    ));
}

#[test]
fn cost_round_trip_with_default_rule() {
    let service = seeded_service();

    let result = service
        .calculate_cost(
            ResourceType::Gpu,
            Some("A100-40GB"),
            dec!(4),
            dec!(10),
            &CostContext::default(),
        )
        .unwrap();

    assert_eq!(result.total_cost, dec!(1000.0));
    assert_eq!(result.price_per_unit, dec!(25.0));
    assert_eq!(result.unit, "GPU-hour");
    assert_eq!(result.currency, "CNY");
    assert_eq!(result.scope_chain, vec!["default".to_string()]);
}

#[test]
fn cost_uses_node_override_when_context_names_it() {
    let service = seeded_service();

    let context = CostContext {
        zone_id: Some("zone-001".to_string()),
        node_id: Some("node-001".to_string()),
        ..CostContext::default()
    };
    let result = service
        .calculate_cost(ResourceType::Gpu, Some("A100-40GB"), dec!(2), dec!(3), &context)
        .unwrap();

    assert_eq!(result.total_cost, dec!(132.0));
    assert_eq!(result.scope_chain, vec!["node:node-001".to_string()]);
}

#[test]
fn upsert_with_same_id_is_idempotent() {
    let service = seeded_service();
    let before = service.rule_count();

    let rule = service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(9.5)).with_resource_spec("RTX-4090"),
        )
        .unwrap();
    assert_eq!(service.rule_count(), before + 1);

    service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(9.5))
                .with_resource_spec("RTX-4090")
                .with_id(&rule.id),
        )
        .unwrap();
    assert_eq!(service.rule_count(), before + 1);

    let result = service
        .resolve(&PricingQuery::new(ResourceType::Gpu).with_spec("RTX-4090"))
        .unwrap();
    assert_eq!(result.price_per_unit, dec!(9.5));
}

#[test]
fn delete_then_resolve_fails() {
    let service = empty_service();
    let rule = service
        .upsert_rule(
            RuleDraft::new(ResourceType::Network, "GB", dec!(0.8)).with_resource_spec("egress"),
        )
        .unwrap();

    assert!(service.remove_rule(&rule.id));

    let err = service
        .resolve(&PricingQuery::new(ResourceType::Network).with_spec("egress"))
        .unwrap_err();
    let TensorGridError::Pricing(PricingError::NoMatchingRule {
        resource_type,
        resource_spec,
    }) = err
    else {
        panic!("expected NoMatchingRule");
    };
    assert_eq!(resource_type, ResourceType::Network);
    assert_eq!(resource_spec.as_deref(), Some("egress"));

    // removing again is a no-op, not an error
    assert!(!service.remove_rule(&rule.id));
}

#[test]
fn admin_flow_list_edit_resolve() {
    let service = seeded_service();

    // console lists zone rules before editing
    let zone_rules = service.list_by_scope(Scope::Zone, Some("zone-001"));
    assert_eq!(zone_rules.len(), 1);
    let existing = &zone_rules[0];

    // admin lowers the regional price in place
    let updated = service
        .upsert_rule(
            RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(21.5))
                .with_resource_spec("A100-40GB")
                .with_scope(Scope::Zone, "zone-001")
                .with_id(&existing.id)
                .with_created_by("admin@tensorgrid"),
        )
        .unwrap();
    assert_eq!(updated.created_at, existing.created_at);

    let result = service
        .resolve(
            &PricingQuery::new(ResourceType::Gpu)
                .with_spec("A100-40GB")
                .with_zone("zone-001"),
        )
        .unwrap();
    assert_eq!(result.price_per_unit, dec!(21.5));
    assert_eq!(result.scope_chain, vec!["zone:zone-001".to_string()]);
}
