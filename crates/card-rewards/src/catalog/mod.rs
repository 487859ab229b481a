//! Card catalog: issuers, cards, merchant categories, and their reward rates.

pub mod domain;
pub mod mcc;
pub mod memory;
pub mod repository;
pub mod router;
pub mod seed;
pub mod views;

pub use domain::{
    Card, CardId, CategoryId, Issuer, IssuerId, MerchantCategory, MerchantCategoryCode,
    RewardCategory, RewardCategoryId, RewardRate, FALLBACK_CATEGORY,
};
pub use mcc::{MccImportSummary, MccImporter};
pub use memory::InMemoryCatalog;
pub use repository::{CatalogRepository, RepositoryError};
pub use router::catalog_router;
pub use seed::{CatalogSeeder, SeedSummary};
pub use views::{CardRewardProfile, CardView, IssuerView, RewardView};

/// Failure while importing catalog data from CSV.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: `{field}` value '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    Repository {
        line: usize,
        #[source]
        source: RepositoryError,
    },
}
