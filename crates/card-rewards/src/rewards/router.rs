use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::error;

use super::service::{RecommendationError, RecommendationService};
use crate::catalog::CatalogRepository;
use crate::wallet::{OwnerId, WalletRepository};

/// Router exposing the deterministic benefit ranking.
pub fn benefits_router<C, W>(service: Arc<RecommendationService<C, W>>) -> Router
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    Router::new()
        .route("/api/v1/benefits", get(benefits_handler::<C, W>))
        .with_state(service)
}

/// Collects every `types` entry of a query such as `?types=restaurant&types=bar`.
fn requested_types(params: Vec<(String, String)>) -> Vec<String> {
    params
        .into_iter()
        .filter(|(key, _)| key == "types")
        .map(|(_, value)| value)
        .collect()
}

pub(crate) async fn benefits_handler<C, W>(
    State(service): State<Arc<RecommendationService<C, W>>>,
    owner: OwnerId,
    Query(params): Query<Vec<(String, String)>>,
) -> Response
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    match service.benefits_by_types(&owner, requested_types(params)) {
        Ok(benefits) => (StatusCode::OK, axum::Json(benefits)).into_response(),
        Err(RecommendationError::MissingTypes) => {
            let payload = json!({ "error": RecommendationError::MissingTypes.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, "benefit ranking failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
