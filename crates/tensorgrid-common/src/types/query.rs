//! Pricing query and scope references
//!
//! A query is a transient value object; the resolver walks its scope
//! candidates from most to least specific.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::rule::{ResourceType, Scope};

/// Query context for price resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuery {
    pub resource_type: ResourceType,

    /// Exact-match filter; absent matches any rule of the resource type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_spec: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    /// Evaluation instant; absent means "now"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl PricingQuery {
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            resource_spec: None,
            zone_id: None,
            pool_id: None,
            node_id: None,
            date: None,
        }
    }

    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.resource_spec = Some(spec.into());
        self
    }

    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.pool_id = Some(pool_id.into());
        self
    }

    pub fn with_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Scope levels to probe, ordered node > pool > zone > default.
    ///
    /// Levels without an id in the query are skipped; default is always last.
    pub fn scope_candidates(&self) -> Vec<ScopeRef> {
        let mut candidates = Vec::with_capacity(4);
        if let Some(node_id) = &self.node_id {
            candidates.push(ScopeRef::Node(node_id.clone()));
        }
        if let Some(pool_id) = &self.pool_id {
            candidates.push(ScopeRef::Pool(pool_id.clone()));
        }
        if let Some(zone_id) = &self.zone_id {
            candidates.push(ScopeRef::Zone(zone_id.clone()));
        }
        candidates.push(ScopeRef::Default);
        candidates
    }
}

/// A concrete scope level with its target id
///
/// Internal resolution works on this tagged form; the `"zone:zone-001"`
/// diagnostic string is produced only at the API boundary via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeRef {
    Node(String),
    Pool(String),
    Zone(String),
    Default,
}

impl ScopeRef {
    pub fn scope(&self) -> Scope {
        match self {
            ScopeRef::Node(_) => Scope::Node,
            ScopeRef::Pool(_) => Scope::Pool,
            ScopeRef::Zone(_) => Scope::Zone,
            ScopeRef::Default => Scope::Default,
        }
    }

    pub fn scope_id(&self) -> Option<&str> {
        match self {
            ScopeRef::Node(id) | ScopeRef::Pool(id) | ScopeRef::Zone(id) => Some(id),
            ScopeRef::Default => None,
        }
    }
}

impl fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope_id() {
            Some(id) => write!(f, "{}:{}", self.scope(), id),
            None => f.write_str(self.scope().as_str()),
        }
    }
}

/// Optional placement context for cost calculation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostContext {
    pub zone_id: Option<String>,
    pub pool_id: Option<String>,
    pub node_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
}
