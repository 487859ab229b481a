use super::domain::{
    Card, CardId, CategoryId, Issuer, IssuerId, MerchantCategory, RewardCategory,
    RewardCategoryId, RewardRate,
};

/// Read access to the card catalog so scoring can be exercised against any store.
pub trait CatalogRepository: Send + Sync {
    fn issuer(&self, id: &IssuerId) -> Result<Option<Issuer>, RepositoryError>;
    fn card(&self, id: &CardId) -> Result<Option<Card>, RepositoryError>;
    /// Every catalog card ordered by name.
    fn cards(&self) -> Result<Vec<Card>, RepositoryError>;
    fn category(&self, id: &CategoryId) -> Result<Option<MerchantCategory>, RepositoryError>;
    /// First stored category whose name equals `name` ignoring ASCII case.
    fn category_named_ignore_case(
        &self,
        name: &str,
    ) -> Result<Option<MerchantCategory>, RepositoryError>;
    /// Stored categories whose name equals one of `names` exactly, in store order.
    fn categories_named(&self, names: &[String]) -> Result<Vec<MerchantCategory>, RepositoryError>;
    fn reward_category(
        &self,
        card: &CardId,
        category: &CategoryId,
    ) -> Result<Option<RewardCategory>, RepositoryError>;
    fn reward_categories_for_card(
        &self,
        card: &CardId,
    ) -> Result<Vec<RewardCategory>, RepositoryError>;
    fn reward_rate(
        &self,
        reward_category: &RewardCategoryId,
    ) -> Result<Option<RewardRate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
