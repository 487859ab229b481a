use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::domain::{OwnedCard, OwnerId, UserCard, UserCardId, UserCardView};
use super::repository::WalletRepository;
use crate::catalog::views::card_view;
use crate::catalog::{CardId, CatalogRepository, RepositoryError};

/// Service resolving wallet entries against the catalog.
pub struct WalletService<C, W> {
    catalog: Arc<C>,
    repository: Arc<W>,
}

impl<C, W> WalletService<C, W>
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<W>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// Wallet entries paired with their catalog card.
    ///
    /// Entries pointing at a card missing from the catalog resolve to `None`.
    pub fn owned_cards(&self, owner: &OwnerId) -> Result<Vec<OwnedCard>, WalletError> {
        let mut owned = Vec::new();
        for user_card in self.repository.cards_for(owner)? {
            let card = match user_card.card_id {
                Some(card_id) => {
                    let card = self.catalog.card(&card_id)?;
                    if card.is_none() {
                        warn!(user_card = %user_card.id.0, %card_id, "wallet entry references unknown card");
                    }
                    card
                }
                None => None,
            };
            owned.push(OwnedCard { user_card, card });
        }
        Ok(owned)
    }

    /// All of the owner's cards, newest first.
    pub fn list(&self, owner: &OwnerId) -> Result<Vec<UserCardView>, WalletError> {
        let mut owned = self.owned_cards(owner)?;
        owned.reverse();
        owned.sort_by(|left, right| right.user_card.created_at.cmp(&left.user_card.created_at));

        owned
            .into_iter()
            .map(|entry| {
                let card_model = entry
                    .card
                    .as_ref()
                    .map(|card| card_view(self.catalog.as_ref(), card))
                    .transpose()?;
                Ok::<_, WalletError>(UserCardView {
                    id: entry.user_card.id,
                    name: entry.user_card.name,
                    card_model,
                })
            })
            .collect()
    }

    /// Registers catalog cards for the owner.
    ///
    /// Ids the owner already holds and ids unknown to the catalog are skipped.
    pub fn add_catalog_cards(
        &self,
        owner: &OwnerId,
        card_ids: &[Uuid],
    ) -> Result<Vec<UserCardView>, WalletError> {
        let mut held: HashSet<CardId> = self
            .repository
            .cards_for(owner)?
            .into_iter()
            .filter_map(|entry| entry.card_id)
            .collect();

        let mut added = 0usize;
        for card_id in card_ids.iter().copied().map(CardId) {
            if held.contains(&card_id) {
                debug!(%card_id, "card already in wallet");
                continue;
            }
            if self.catalog.card(&card_id)?.is_none() {
                debug!(%card_id, "skipping unknown catalog card");
                continue;
            }

            self.repository.insert(UserCard {
                id: UserCardId::generate(),
                owner: *owner,
                card_id: Some(card_id),
                name: String::new(),
                created_at: Utc::now(),
            })?;
            held.insert(card_id);
            added += 1;
        }

        info!(owner = %owner.0, requested = card_ids.len(), added, "wallet cards registered");
        self.list(owner)
    }

    pub fn remove(&self, owner: &OwnerId, id: &UserCardId) -> Result<(), WalletError> {
        self.repository.remove(owner, id)?;
        Ok(())
    }
}

/// Error raised by the wallet service.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
