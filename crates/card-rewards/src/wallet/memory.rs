use std::sync::{Arc, RwLock};

use super::domain::{OwnerId, UserCard, UserCardId};
use super::repository::WalletRepository;
use crate::catalog::RepositoryError;

#[derive(Default, Clone)]
pub struct InMemoryWallet {
    entries: Arc<RwLock<Vec<UserCard>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("wallet lock poisoned".to_string())
}

impl WalletRepository for InMemoryWallet {
    fn cards_for(&self, owner: &OwnerId) -> Result<Vec<UserCard>, RepositoryError> {
        let guard = self.entries.read().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|entry| entry.owner == *owner)
            .cloned()
            .collect())
    }

    fn insert(&self, card: UserCard) -> Result<UserCard, RepositoryError> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        if guard.iter().any(|entry| entry.id == card.id) {
            return Err(RepositoryError::Conflict(format!("user card {}", card.id.0)));
        }
        guard.push(card.clone());
        Ok(card)
    }

    fn remove(&self, owner: &OwnerId, id: &UserCardId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        let position = guard
            .iter()
            .position(|entry| entry.id == *id && entry.owner == *owner)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}
