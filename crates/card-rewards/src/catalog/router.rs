use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use super::domain::CardId;
use super::repository::CatalogRepository;
use super::views::{list_cards, reward_profile};

/// Read-only catalog endpoints.
pub fn catalog_router<C>(catalog: Arc<C>) -> Router
where
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/cards", get(list_handler::<C>))
        .route(
            "/api/v1/cards/:card_id/rewards",
            get(profile_handler::<C>),
        )
        .with_state(catalog)
}

pub(crate) async fn list_handler<C>(State(catalog): State<Arc<C>>) -> Response
where
    C: CatalogRepository + 'static,
{
    match list_cards(catalog.as_ref()) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(err) => {
            error!(error = %err, "catalog listing failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn profile_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(card_id): Path<Uuid>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    match reward_profile(catalog.as_ref(), &CardId(card_id)) {
        Ok(Some(profile)) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "card not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, %card_id, "reward profile lookup failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
