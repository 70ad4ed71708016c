//! Cost calculation
//!
//! Thin composition of resolution with quantity × duration.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use tensorgrid_common::{CostContext, CostResult, PricingQuery, ResourceType, Result};

use crate::resolver::Resolver;

/// Computes total cost from a resolved per-unit price
#[derive(Clone)]
pub struct CostCalculator {
    resolver: Resolver,
}

impl CostCalculator {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Resolve the price in the given context and scale it.
    ///
    /// `total_cost = price_per_unit × quantity × duration`. Callers supply
    /// non-negative quantity and duration (e.g. GPU count and hours); signs
    /// are not validated here. Resolution failures propagate unchanged.
    #[instrument(skip(self))]
    pub fn calculate(
        &self,
        resource_type: ResourceType,
        resource_spec: Option<&str>,
        quantity: Decimal,
        duration: Decimal,
        context: &CostContext,
    ) -> Result<CostResult> {
        let mut query = PricingQuery::new(resource_type);
        query.resource_spec = resource_spec.map(str::to_string);
        query.zone_id = context.zone_id.clone();
        query.pool_id = context.pool_id.clone();
        query.node_id = context.node_id.clone();
        query.date = context.date;

        let resolved = self.resolver.resolve(&query)?;
        let total_cost = resolved.price_per_unit * quantity * duration;
        debug!(%total_cost, price = %resolved.price_per_unit, "cost calculated");

        Ok(CostResult {
            total_cost,
            price_per_unit: resolved.price_per_unit,
            unit: resolved.unit,
            currency: resolved.currency,
            quantity,
            duration,
            applied_rule: resolved.applied_rule,
            scope_chain: resolved.scope_chain,
        })
    }
}
