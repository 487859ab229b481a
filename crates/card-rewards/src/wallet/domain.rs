use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Card, CardId, CardView};

/// Identity of the user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserCardId(pub Uuid);

impl UserCardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Ownership record linking a user to a card.
///
/// `card_id` is empty for manually entered cards that are not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCard {
    pub id: UserCardId,
    pub owner: OwnerId,
    pub card_id: Option<CardId>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A wallet entry paired with its resolved catalog card, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCard {
    pub user_card: UserCard,
    pub card: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCardView {
    pub id: UserCardId,
    pub name: String,
    pub card_model: Option<CardView>,
}
