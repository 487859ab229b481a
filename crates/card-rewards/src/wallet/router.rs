use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};
use uuid::Uuid;

use super::domain::{OwnerId, UserCardId};
use super::repository::WalletRepository;
use super::service::{WalletError, WalletService};
use crate::catalog::{CatalogRepository, RepositoryError};

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterCardsRequest {
    pub(crate) card_ids: Vec<Uuid>,
}

/// Endpoints for listing, registering, and removing the caller's cards.
pub fn wallet_router<C, W>(service: Arc<WalletService<C, W>>) -> Router
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/wallet",
            get(list_handler::<C, W>).post(register_handler::<C, W>),
        )
        .route(
            "/api/v1/wallet/:user_card_id",
            delete(remove_handler::<C, W>),
        )
        .with_state(service)
}

fn internal_error(err: WalletError) -> Response {
    error!(error = %err, "wallet operation failed");
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<C, W>(
    State(service): State<Arc<WalletService<C, W>>>,
    owner: OwnerId,
) -> Response
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    match service.list(&owner) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn register_handler<C, W>(
    State(service): State<Arc<WalletService<C, W>>>,
    owner: OwnerId,
    payload: Result<axum::Json<RegisterCardsRequest>, JsonRejection>,
) -> Response
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "rejected wallet registration body");
            let payload = json!({ "error": "card_ids must be a list of valid UUIDs." });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.add_catalog_cards(&owner, &request.card_ids) {
        Ok(cards) => (StatusCode::CREATED, axum::Json(json!({ "data": cards }))).into_response(),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn remove_handler<C, W>(
    State(service): State<Arc<WalletService<C, W>>>,
    owner: OwnerId,
    Path(user_card_id): Path<Uuid>,
) -> Response
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    match service.remove(&owner, &UserCardId(user_card_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(WalletError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "card not found or does not belong to user" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}
