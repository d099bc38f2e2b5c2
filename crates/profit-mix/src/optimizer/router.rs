use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{BlendSize, ExposureTarget, MetricWeights, OptimizeRequest, ServiceScores};
use super::report::{alternative_views, BlendAlternativeView};
use super::service::{BlendService, BlendServiceError};
use crate::catalog::CatalogRepository;

/// Router builder exposing HTTP endpoints for optimization and the catalog
/// transparency view.
pub fn optimizer_router<C>(service: Arc<BlendService<C>>) -> Router
where
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/blends/optimize", post(optimize_handler::<C>))
        .route("/api/v1/catalog", get(catalog_handler::<C>))
        .with_state(service)
}

/// Wire payload for an optimization run. Optional knobs default to the
/// interactive tool's slider defaults.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequestBody {
    pub target: ExposureTarget,
    #[serde(default)]
    pub metric_weights: MetricWeights,
    #[serde(default = "default_sharpe_weight")]
    pub sharpe_weight: f64,
    #[serde(default = "default_service_weight")]
    pub service_weight: f64,
    #[serde(default)]
    pub service_scores: BTreeMap<String, f64>,
    #[serde(default = "default_service_score")]
    pub default_service_score: f64,
    #[serde(default)]
    pub same_provider_only: bool,
    #[serde(default = "default_fund_count")]
    pub funds: u8,
}

fn default_sharpe_weight() -> f64 {
    1.5
}

fn default_service_weight() -> f64 {
    4.0
}

fn default_service_score() -> f64 {
    70.0
}

fn default_fund_count() -> u8 {
    2
}

impl OptimizeRequestBody {
    fn into_request(self) -> Result<OptimizeRequest, String> {
        let size = BlendSize::try_from(self.funds)?;
        Ok(OptimizeRequest {
            target: self.target,
            metric_weights: self.metric_weights,
            sharpe_weight: self.sharpe_weight,
            service_weight: self.service_weight,
            service_scores: ServiceScores::from_map(self.service_scores, self.default_service_score),
            same_provider_only: self.same_provider_only,
            size,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponseBody {
    pub funds_considered: usize,
    pub alternatives: Vec<BlendAlternativeView>,
}

pub(crate) async fn optimize_handler<C>(
    State(service): State<Arc<BlendService<C>>>,
    axum::Json(body): axum::Json<OptimizeRequestBody>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    let request = match body.into_request() {
        Ok(request) => request,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.optimize(request) {
        Ok(outcome) => {
            let response = OptimizeResponseBody {
                funds_considered: outcome.funds_considered,
                alternatives: alternative_views(&outcome.alternatives),
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(BlendServiceError::Optimize(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn catalog_handler<C>(State(service): State<Arc<BlendService<C>>>) -> Response
where
    C: CatalogRepository + 'static,
{
    match service.catalog_summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
