//! Default rule catalog
//!
//! The canned rule set the management console shows before any admin edits.
//! Seeded into a fresh store when `PricingConfig::seed_catalog` is set.
//! Order matters: spec-less queries resolve to the first matching rule, so
//! flagship models come first within each resource type.

use rust_decimal_macros::dec;

use tensorgrid_common::{BillingCycle, ResourceType, RuleDraft, Scope};

/// Build the default catalog as upsert drafts.
///
/// All prices are CNY; GPU/CPU/memory are hourly, storage is daily.
pub fn default_rules() -> Vec<RuleDraft> {
    vec![
        // GPU, platform-wide
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(25.0))
            .with_resource_spec("A100-40GB")
            .with_created_by("system")
            .with_description("A100 40GB base price"),
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(32.0))
            .with_resource_spec("A100-80GB")
            .with_created_by("system")
            .with_description("A100 80GB base price"),
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(18.0))
            .with_resource_spec("V100-32GB")
            .with_created_by("system")
            .with_description("V100 32GB base price"),
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(6.0))
            .with_resource_spec("T4-16GB")
            .with_created_by("system")
            .with_description("T4 16GB base price"),
        // GPU, regional and per-node overrides
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(23.0))
            .with_resource_spec("A100-40GB")
            .with_scope(Scope::Zone, "zone-001")
            .with_scope_name("East zone 1")
            .with_created_by("system")
            .with_description("A100 40GB regional price, east zone 1"),
        RuleDraft::new(ResourceType::Gpu, "GPU-hour", dec!(22.0))
            .with_resource_spec("A100-40GB")
            .with_scope(Scope::Node, "node-001")
            .with_scope_name("gpu-node-001")
            .with_created_by("system")
            .with_description("A100 40GB negotiated price, node-001"),
        // CPU and memory
        RuleDraft::new(ResourceType::Cpu, "core-hour", dec!(0.6)).with_created_by("system"),
        RuleDraft::new(ResourceType::Memory, "GB-hour", dec!(0.12)).with_created_by("system"),
        // Storage: SSD listed ahead of HDD
        RuleDraft::new(ResourceType::Storage, "GB-day", dec!(0.04))
            .with_resource_spec("SSD")
            .with_billing_cycle(BillingCycle::Daily)
            .with_created_by("system"),
        RuleDraft::new(ResourceType::Storage, "GB-day", dec!(0.02))
            .with_resource_spec("HDD")
            .with_billing_cycle(BillingCycle::Daily)
            .with_created_by("system"),
        // Network egress
        RuleDraft::new(ResourceType::Network, "GB", dec!(0.8)).with_created_by("system"),
    ]
}
