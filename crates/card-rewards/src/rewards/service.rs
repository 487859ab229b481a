use std::sync::Arc;

use tracing::info;

use super::engine::{CardBenefit, ScoringEngine};
use super::resolver::{resolve_categories, RequestedTypes};
use crate::catalog::{CardId, CatalogRepository, RepositoryError};
use crate::wallet::{OwnerId, WalletError, WalletRepository, WalletService};

/// Ranks an owner's cards for the merchant types of a purchase.
pub struct RecommendationService<C, W> {
    wallet: Arc<WalletService<C, W>>,
}

impl<C, W> RecommendationService<C, W>
where
    C: CatalogRepository + 'static,
    W: WalletRepository + 'static,
{
    pub fn new(wallet: Arc<WalletService<C, W>>) -> Self {
        Self { wallet }
    }

    /// Validates the raw tags before touching any store, then ranks the owner's cards.
    pub fn benefits_by_types(
        &self,
        owner: &OwnerId,
        types: Vec<String>,
    ) -> Result<Vec<CardBenefit>, RecommendationError> {
        let types = RequestedTypes::new(types)?;
        self.benefits_for(owner, &types)
    }

    pub fn benefits_for(
        &self,
        owner: &OwnerId,
        types: &RequestedTypes,
    ) -> Result<Vec<CardBenefit>, RecommendationError> {
        let catalog = self.wallet.catalog().as_ref();
        let resolved = resolve_categories(catalog, types)?;

        let owned = self.wallet.owned_cards(owner)?;
        let cards: Vec<_> = owned.iter().filter_map(|entry| entry.card.as_ref()).collect();

        let engine = ScoringEngine::new(catalog, &resolved.categories)?;
        let benefits = engine.score_all(cards.iter().copied())?;

        info!(
            owner = %owner.0,
            types = ?types.as_slice(),
            canonical = ?resolved.canonical,
            owned = owned.len(),
            ranked = benefits.len(),
            "ranked card benefits"
        );
        Ok(benefits)
    }
}

/// Error raised while ranking card benefits.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Query parameter \"types\" is required.")]
    MissingTypes,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("reward value for card {card} is out of range")]
    ValueOverflow { card: CardId },
}
