//! # TensorGrid Common
//!
//! Shared types and errors for the TensorGrid GPU cloud platform.
//!
//! ## Core Types
//!
//! - [`PricingRule`]: a priced offer for a resource at one scope level
//! - [`RuleDraft`]: partial rule accepted by the store's upsert
//! - [`PricingQuery`]/[`PricingResult`]: resolution request and outcome
//! - [`CostContext`]/[`CostResult`]: cost calculation context and outcome
//! - [`ScopeRef`]: tagged scope level used internally by the resolver
//!
//! ## Errors
//!
//! - [`TensorGridError`]: unified error for all platform operations
//! - [`PricingError`]: validation and no-matching-rule conditions

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{PricingError, Result, TensorGridError};
pub use types::{
    query::{CostContext, PricingQuery, ScopeRef},
    result::{CostResult, PricingResult},
    rule::{BillingCycle, PricingRule, ResourceType, RuleDraft, Scope},
};

/// TensorGrid version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Currency assigned to rules that do not specify one
pub const DEFAULT_CURRENCY: &str = "CNY";

/// Target price resolution latency in milliseconds
pub const TARGET_RESOLVE_LATENCY_MS: u64 = 10;
