//! Shared domain types for the TensorGrid platform

pub mod query;
pub mod result;
pub mod rule;

pub use query::{CostContext, PricingQuery, ScopeRef};
pub use result::{CostResult, PricingResult};
pub use rule::{BillingCycle, PricingRule, ResourceType, RuleDraft, Scope};
