//! # TensorGrid Pricing
//!
//! Layered pricing resolution for the TensorGrid GPU cloud platform.
//!
//! ## Resolution Waterfall
//!
//! ```text
//! node > pool > zone > default
//! ```
//!
//! A rule at a narrower scope always beats a wider one, regardless of price.
//! Within a level the first valid matching rule in store order wins. Rules
//! carry validity windows and an enabled flag; disabled or out-of-window
//! rules are invisible.

pub mod calculator;
pub mod catalog;
pub mod resolver;
pub mod store;

pub use calculator::CostCalculator;
pub use resolver::Resolver;
pub use store::RuleStore;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use tensorgrid_common::{
    CostContext, CostResult, PricingQuery, PricingResult, PricingRule, ResourceType, Result,
    RuleDraft, Scope, DEFAULT_CURRENCY,
};

/// Pricing engine configuration
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Currency assigned to rules that do not specify one
    pub default_currency: String,
    /// Seed the default catalog into the fresh store
    pub seed_catalog: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            seed_catalog: true,
        }
    }
}

/// Single handle over the rule store, resolver, and cost calculator
///
/// Owns one [`RuleStore`] instance; clone-cheap via `Arc` and safe to share
/// with an async server.
#[derive(Clone)]
pub struct PricingService {
    store: Arc<RuleStore>,
    resolver: Resolver,
    calculator: CostCalculator,
}

impl PricingService {
    pub fn new(config: PricingConfig) -> Result<Self> {
        let store = Arc::new(RuleStore::new(&config.default_currency));
        if config.seed_catalog {
            let seeded = store.seed(catalog::default_rules())?;
            info!(rules = seeded, "seeded default pricing catalog");
        }
        let resolver = Resolver::new(Arc::clone(&store));
        let calculator = CostCalculator::new(resolver.clone());
        Ok(Self {
            store,
            resolver,
            calculator,
        })
    }

    /// Every rule, in stable store order.
    pub fn list_all(&self) -> Vec<PricingRule> {
        self.store.list_all()
    }

    /// Rules at one scope level, optionally narrowed to a scope id.
    pub fn list_by_scope(&self, scope: Scope, scope_id: Option<&str>) -> Vec<PricingRule> {
        self.store.list_by_scope(scope, scope_id)
    }

    /// Create or replace a rule. The admin console's write path.
    pub fn upsert_rule(&self, draft: RuleDraft) -> Result<PricingRule> {
        self.store.upsert(draft)
    }

    /// Delete a rule by id; returns whether a deletion occurred.
    pub fn remove_rule(&self, id: &str) -> bool {
        self.store.remove(id)
    }

    /// Resolve the price for a query via the scope waterfall.
    pub fn resolve(&self, query: &PricingQuery) -> Result<PricingResult> {
        self.resolver.resolve(query)
    }

    /// Resolve and scale: `price × quantity × duration`.
    pub fn calculate_cost(
        &self,
        resource_type: ResourceType,
        resource_spec: Option<&str>,
        quantity: Decimal,
        duration: Decimal,
        context: &CostContext,
    ) -> Result<CostResult> {
        self.calculator
            .calculate(resource_type, resource_spec, quantity, duration, context)
    }

    pub fn rule_count(&self) -> usize {
        self.store.len()
    }
}
