use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::domain::OwnerId;

/// Header carrying the authenticated user's id, set by the upstream auth layer.
pub const OWNER_HEADER: &str = "x-user-id";

fn unauthorized(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("authentication credentials were not provided"))?;

        Uuid::parse_str(raw.trim())
            .map(OwnerId)
            .map_err(|_| unauthorized("user id header must be a UUID"))
    }
}
