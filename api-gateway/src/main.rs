//! TensorGrid Pricing API Gateway
//!
//! JSON/REST surface the management console consumes:
//! - rule catalog reads (all rules, or filtered by scope)
//! - rule upserts and deletes from the pricing admin pages
//! - price resolution through the node > pool > zone > default waterfall
//! - cost estimates (price × quantity × duration)

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use tensorgrid_common::{
    CostContext, CostResult, PricingError, PricingQuery, PricingResult, PricingRule, ResourceType,
    RuleDraft, Scope, TensorGridError,
};
use tensorgrid_pricing::{PricingConfig, PricingService};

// ============ STATE ============

#[derive(Clone)]
struct AppState {
    pricing: Arc<PricingService>,
}

// ============ ERRORS ============

/// Maps the pricing error taxonomy onto HTTP statuses
struct ApiError(TensorGridError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TensorGridError::Pricing(PricingError::Validation(_)) => StatusCode::BAD_REQUEST,
            TensorGridError::Pricing(PricingError::NoMatchingRule { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<TensorGridError> for ApiError {
    fn from(err: TensorGridError) -> Self {
        Self(err)
    }
}

// ============ REQUEST TYPES ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRulesParams {
    scope: Option<Scope>,
    scope_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CostRequest {
    resource_type: ResourceType,
    resource_spec: Option<String>,
    quantity: Decimal,
    duration: Decimal,
    #[serde(flatten)]
    context: CostContext,
}

// ============ HANDLERS ============

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": tensorgrid_common::VERSION,
        "rules": state.pricing.rule_count(),
    }))
}

async fn list_rules(
    State(state): State<AppState>,
    Query(params): Query<ListRulesParams>,
) -> Json<Vec<PricingRule>> {
    let rules = match params.scope {
        Some(scope) => state
            .pricing
            .list_by_scope(scope, params.scope_id.as_deref()),
        None => state.pricing.list_all(),
    };
    Json(rules)
}

async fn upsert_rule(
    State(state): State<AppState>,
    Json(draft): Json<RuleDraft>,
) -> Result<Json<PricingRule>, ApiError> {
    let rule = state.pricing.upsert_rule(draft)?;
    info!(rule_id = %rule.id, scope = %rule.scope, "rule upserted");
    Ok(Json(rule))
}

async fn remove_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Json<serde_json::Value> {
    let deleted = state.pricing.remove_rule(&rule_id);
    if deleted {
        info!(rule_id = %rule_id, "rule removed");
    }
    Json(serde_json::json!({ "deleted": deleted }))
}

async fn resolve_price(
    State(state): State<AppState>,
    Json(query): Json<PricingQuery>,
) -> Result<Json<PricingResult>, ApiError> {
    let result = state.pricing.resolve(&query)?;
    Ok(Json(result))
}

async fn calculate_cost(
    State(state): State<AppState>,
    Json(req): Json<CostRequest>,
) -> Result<Json<CostResult>, ApiError> {
    let result = state.pricing.calculate_cost(
        req.resource_type,
        req.resource_spec.as_deref(),
        req.quantity,
        req.duration,
        &req.context,
    )?;
    Ok(Json(result))
}

// ============ MAIN ============

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_gateway=info".parse()?),
        )
        .json()
        .init();

    dotenvy::dotenv().ok();

    let pricing = PricingService::new(PricingConfig::default())?;
    let state = AppState {
        pricing: Arc::new(pricing),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/pricing/rules", get(list_rules).post(upsert_rule))
        .route("/api/v1/pricing/rules/:rule_id", delete(remove_rule))
        .route("/api/v1/pricing/resolve", post(resolve_price))
        .route("/api/v1/pricing/cost", post(calculate_cost))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);
    info!("TensorGrid pricing gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
