//! User wallets: the catalog cards each user has registered.

pub mod domain;
pub mod memory;
pub mod owner;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{OwnedCard, OwnerId, UserCard, UserCardId, UserCardView};
pub use memory::InMemoryWallet;
pub use owner::OWNER_HEADER;
pub use repository::WalletRepository;
pub use router::wallet_router;
pub use service::{WalletError, WalletService};
