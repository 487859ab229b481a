use super::domain::{OwnerId, UserCard, UserCardId};
use crate::catalog::RepositoryError;

/// Storage abstraction for wallet entries.
pub trait WalletRepository: Send + Sync {
    /// Entries owned by `owner` in insertion order.
    fn cards_for(&self, owner: &OwnerId) -> Result<Vec<UserCard>, RepositoryError>;
    fn insert(&self, card: UserCard) -> Result<UserCard, RepositoryError>;
    /// Removes an entry; `NotFound` when it is missing or belongs to another owner.
    fn remove(&self, owner: &OwnerId, id: &UserCardId) -> Result<(), RepositoryError>;
}
