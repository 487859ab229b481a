use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::domain::{
    Card, CardId, CategoryId, Issuer, IssuerId, MerchantCategory, MerchantCategoryCode,
    RewardCategory, RewardCategoryId, RewardRate,
};
use super::repository::{CatalogRepository, RepositoryError};

#[derive(Default)]
struct CatalogState {
    issuers: HashMap<IssuerId, Issuer>,
    cards: HashMap<CardId, Card>,
    categories: Vec<MerchantCategory>,
    reward_categories: Vec<RewardCategory>,
    rates: HashMap<RewardCategoryId, RewardRate>,
    codes: BTreeMap<String, MerchantCategoryCode>,
}

/// Case-insensitive name comparison using full Unicode lowercasing.
fn names_match_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Process-local catalog store seeded at startup and shared across requests.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>, RepositoryError> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>, RepositoryError> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))
    }

    pub fn insert_issuer(&self, issuer: Issuer) -> Result<Issuer, RepositoryError> {
        let mut guard = self.write()?;
        if guard.issuers.contains_key(&issuer.id) {
            return Err(RepositoryError::Conflict(format!("issuer {}", issuer.name)));
        }
        guard.issuers.insert(issuer.id, issuer.clone());
        Ok(issuer)
    }

    pub fn insert_card(&self, card: Card) -> Result<Card, RepositoryError> {
        let mut guard = self.write()?;
        if !guard.issuers.contains_key(&card.issuer_id) {
            return Err(RepositoryError::NotFound);
        }
        if guard.cards.contains_key(&card.id) {
            return Err(RepositoryError::Conflict(format!("card {}", card.name)));
        }
        guard.cards.insert(card.id, card.clone());
        Ok(card)
    }

    pub fn insert_category(
        &self,
        category: MerchantCategory,
    ) -> Result<MerchantCategory, RepositoryError> {
        let mut guard = self.write()?;
        if guard.categories.iter().any(|stored| stored.id == category.id) {
            return Err(RepositoryError::Conflict(format!(
                "category {}",
                category.name
            )));
        }
        guard.categories.push(category.clone());
        Ok(category)
    }

    /// Registers a (card, category) pairing; a second pairing for the same pair is a conflict.
    pub fn insert_reward_category(
        &self,
        reward_category: RewardCategory,
    ) -> Result<RewardCategory, RepositoryError> {
        let mut guard = self.write()?;
        if !guard.cards.contains_key(&reward_category.card_id)
            || !guard
                .categories
                .iter()
                .any(|category| category.id == reward_category.category_id)
        {
            return Err(RepositoryError::NotFound);
        }
        if guard.reward_categories.iter().any(|stored| {
            stored.card_id == reward_category.card_id
                && stored.category_id == reward_category.category_id
        }) {
            return Err(RepositoryError::Conflict(
                "reward category for card and merchant category".to_string(),
            ));
        }
        guard.reward_categories.push(reward_category.clone());
        Ok(reward_category)
    }

    pub fn insert_reward_rate(&self, rate: RewardRate) -> Result<RewardRate, RepositoryError> {
        let mut guard = self.write()?;
        if !guard
            .reward_categories
            .iter()
            .any(|stored| stored.id == rate.reward_category_id)
        {
            return Err(RepositoryError::NotFound);
        }
        if guard.rates.contains_key(&rate.reward_category_id) {
            return Err(RepositoryError::Conflict(
                "reward rate for reward category".to_string(),
            ));
        }
        guard.rates.insert(rate.reward_category_id, rate.clone());
        Ok(rate)
    }

    /// Inserts or replaces a merchant category code, returning `true` when it was new.
    pub fn upsert_merchant_code(&self, code: MerchantCategoryCode) -> Result<bool, RepositoryError> {
        let mut guard = self.write()?;
        let created = guard.codes.insert(code.code.clone(), code).is_none();
        Ok(created)
    }

    pub fn merchant_code(&self, code: &str) -> Result<Option<MerchantCategoryCode>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.codes.get(code).cloned())
    }

    pub fn issuer_named(&self, name: &str) -> Result<Option<Issuer>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .issuers
            .values()
            .find(|issuer| issuer.name == name)
            .cloned())
    }

    pub fn card_named(&self, name: &str) -> Result<Option<Card>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.cards.values().find(|card| card.name == name).cloned())
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn issuer(&self, id: &IssuerId) -> Result<Option<Issuer>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.issuers.get(id).cloned())
    }

    fn card(&self, id: &CardId) -> Result<Option<Card>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.cards.get(id).cloned())
    }

    fn cards(&self) -> Result<Vec<Card>, RepositoryError> {
        let guard = self.read()?;
        let mut cards: Vec<Card> = guard.cards.values().cloned().collect();
        cards.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(cards)
    }

    fn category(&self, id: &CategoryId) -> Result<Option<MerchantCategory>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .categories
            .iter()
            .find(|category| category.id == *id)
            .cloned())
    }

    fn category_named_ignore_case(
        &self,
        name: &str,
    ) -> Result<Option<MerchantCategory>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .categories
            .iter()
            .find(|category| names_match_ignore_case(&category.name, name))
            .cloned())
    }

    fn categories_named(&self, names: &[String]) -> Result<Vec<MerchantCategory>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .categories
            .iter()
            .filter(|category| names.iter().any(|name| *name == category.name))
            .cloned()
            .collect())
    }

    fn reward_category(
        &self,
        card: &CardId,
        category: &CategoryId,
    ) -> Result<Option<RewardCategory>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .reward_categories
            .iter()
            .find(|stored| stored.card_id == *card && stored.category_id == *category)
            .cloned())
    }

    fn reward_categories_for_card(
        &self,
        card: &CardId,
    ) -> Result<Vec<RewardCategory>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .reward_categories
            .iter()
            .filter(|stored| stored.card_id == *card)
            .cloned()
            .collect())
    }

    fn reward_rate(
        &self,
        reward_category: &RewardCategoryId,
    ) -> Result<Option<RewardRate>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.rates.get(reward_category).cloned())
    }
}
