//! Merchants offered to users without a location lookup.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineStore {
    pub name: &'static str,
    pub address: &'static str,
    pub categories: &'static [&'static str],
}

const fn online(name: &'static str, categories: &'static [&'static str]) -> OnlineStore {
    OnlineStore {
        name,
        address: "Online",
        categories,
    }
}

const ONLINE_STORES: &[OnlineStore] = &[
    online("Amazon", &["shopping", "ecommerce", "retail"]),
    online("Netflix", &["streaming", "entertainment", "subscription", "media"]),
    online("Apple Store", &["shopping", "electronics", "technology", "retail"]),
    online("Etsy", &["shopping", "ecommerce", "handmade", "marketplace"]),
    online("Spotify", &["streaming", "music", "subscription", "media"]),
    online("Nike", &["shopping", "sports", "apparel", "retail"]),
    online("Disney+", &["streaming", "entertainment", "subscription", "media"]),
    online("Prime Video", &["streaming", "entertainment", "subscription", "media"]),
    online("Sephora", &["shopping", "beauty", "cosmetics", "retail"]),
    online("TikTok Shop", &["shopping", "ecommerce", "social_commerce", "trendy"]),
];

/// Popular online merchants in display order.
pub fn online_stores() -> &'static [OnlineStore] {
    ONLINE_STORES
}

pub fn stores_router() -> Router {
    Router::new().route("/api/v1/stores/online", get(online_stores_handler))
}

pub(crate) async fn online_stores_handler() -> Json<Value> {
    Json(json!({ "stores": online_stores() }))
}
