use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::catalog::{
    Card, CardId, CategoryId, InMemoryCatalog, Issuer, IssuerId, MerchantCategory,
    RepositoryError, RewardCategory, RewardCategoryId, RewardRate, CatalogRepository,
};
use crate::rewards::RecommendationService;
use crate::wallet::{InMemoryWallet, OwnerId, UserCard, UserCardId, WalletRepository, WalletService};

pub(super) fn types(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn decimal(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

/// Catalog plus wallet for a single owner, built up card by card.
pub(super) struct Fixture {
    pub(super) catalog: Arc<InMemoryCatalog>,
    pub(super) wallet: Arc<InMemoryWallet>,
    pub(super) owner: OwnerId,
}

impl Fixture {
    pub(super) fn new() -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalog::default()),
            wallet: Arc::new(InMemoryWallet::default()),
            owner: OwnerId(Uuid::new_v4()),
        }
    }

    pub(super) fn issuer(&self, name: &str) -> Issuer {
        self.catalog
            .insert_issuer(Issuer {
                id: IssuerId::generate(),
                name: name.to_string(),
            })
            .expect("issuer inserts")
    }

    pub(super) fn card(&self, issuer: &Issuer, name: &str, base_point_value: Option<&str>) -> Card {
        self.catalog
            .insert_card(Card {
                id: CardId::generate(),
                issuer_id: issuer.id,
                name: name.to_string(),
                base_point_value: base_point_value.map(decimal),
            })
            .expect("card inserts")
    }

    pub(super) fn category(&self, name: &str) -> MerchantCategory {
        self.catalog
            .insert_category(MerchantCategory {
                id: CategoryId::generate(),
                name: name.to_string(),
            })
            .expect("category inserts")
    }

    pub(super) fn reward_without_rate(
        &self,
        card: &Card,
        category: &MerchantCategory,
    ) -> RewardCategory {
        self.catalog
            .insert_reward_category(RewardCategory {
                id: RewardCategoryId::generate(),
                card_id: card.id,
                category_id: category.id,
                merchant_category_codes: BTreeSet::new(),
            })
            .expect("reward category inserts")
    }

    pub(super) fn reward(
        &self,
        card: &Card,
        category: &MerchantCategory,
        cashback: Option<&str>,
        points: Option<i32>,
    ) -> RewardCategory {
        let reward_category = self.reward_without_rate(card, category);
        self.catalog
            .insert_reward_rate(RewardRate {
                reward_category_id: reward_category.id,
                cashback_percentage: cashback.map(decimal),
                points,
                reset_period: String::new(),
                limit: None,
            })
            .expect("reward rate inserts");
        reward_category
    }

    pub(super) fn own(&self, card: &Card) {
        self.wallet
            .insert(UserCard {
                id: UserCardId::generate(),
                owner: self.owner,
                card_id: Some(card.id),
                name: String::new(),
                created_at: Utc::now(),
            })
            .expect("wallet entry inserts");
    }

    pub(super) fn own_manual(&self, name: &str) {
        self.wallet
            .insert(UserCard {
                id: UserCardId::generate(),
                owner: self.owner,
                card_id: None,
                name: name.to_string(),
                created_at: Utc::now(),
            })
            .expect("wallet entry inserts");
    }

    pub(super) fn service(&self) -> RecommendationService<InMemoryCatalog, InMemoryWallet> {
        let wallet = WalletService::new(self.catalog.clone(), self.wallet.clone());
        RecommendationService::new(Arc::new(wallet))
    }
}

/// Catalog that fails every read and counts how often it was asked.
#[derive(Default)]
pub(super) struct UnavailableCatalog {
    pub(super) calls: AtomicUsize,
}

impl UnavailableCatalog {
    fn fail<T>(&self) -> Result<T, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogRepository for UnavailableCatalog {
    fn issuer(&self, _id: &IssuerId) -> Result<Option<Issuer>, RepositoryError> {
        self.fail()
    }

    fn card(&self, _id: &CardId) -> Result<Option<Card>, RepositoryError> {
        self.fail()
    }

    fn cards(&self) -> Result<Vec<Card>, RepositoryError> {
        self.fail()
    }

    fn category(&self, _id: &CategoryId) -> Result<Option<MerchantCategory>, RepositoryError> {
        self.fail()
    }

    fn category_named_ignore_case(
        &self,
        _name: &str,
    ) -> Result<Option<MerchantCategory>, RepositoryError> {
        self.fail()
    }

    fn categories_named(
        &self,
        _names: &[String],
    ) -> Result<Vec<MerchantCategory>, RepositoryError> {
        self.fail()
    }

    fn reward_category(
        &self,
        _card: &CardId,
        _category: &CategoryId,
    ) -> Result<Option<RewardCategory>, RepositoryError> {
        self.fail()
    }

    fn reward_categories_for_card(
        &self,
        _card: &CardId,
    ) -> Result<Vec<RewardCategory>, RepositoryError> {
        self.fail()
    }

    fn reward_rate(
        &self,
        _reward_category: &RewardCategoryId,
    ) -> Result<Option<RewardRate>, RepositoryError> {
        self.fail()
    }
}

pub(super) fn unavailable_service() -> (
    RecommendationService<UnavailableCatalog, InMemoryWallet>,
    Arc<UnavailableCatalog>,
) {
    let catalog = Arc::new(UnavailableCatalog::default());
    let wallet = WalletService::new(catalog.clone(), Arc::new(InMemoryWallet::default()));
    (RecommendationService::new(Arc::new(wallet)), catalog)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
