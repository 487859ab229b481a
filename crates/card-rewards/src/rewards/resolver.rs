use tracing::debug;

use super::mapping::canonical_category_for;
use super::service::RecommendationError;
use crate::catalog::{CatalogRepository, MerchantCategory, RepositoryError};

/// Non-empty list of raw merchant type tags supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedTypes(Vec<String>);

impl RequestedTypes {
    pub fn new(types: Vec<String>) -> Result<Self, RecommendationError> {
        if types.is_empty() {
            return Err(RecommendationError::MissingTypes);
        }
        Ok(Self(types))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Merchant categories a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategories {
    /// Canonical category that matched the tags, if any.
    pub canonical: Option<&'static str>,
    /// Stored categories to score against; may be empty.
    pub categories: Vec<MerchantCategory>,
}

/// Maps raw tags onto stored merchant categories.
///
/// A canonical match resolves to at most one stored category by case-insensitive name.
/// Without a canonical match, stored categories named exactly like a tag are used.
pub fn resolve_categories<C>(
    catalog: &C,
    types: &RequestedTypes,
) -> Result<ResolvedCategories, RepositoryError>
where
    C: CatalogRepository + ?Sized,
{
    let canonical = canonical_category_for(types.as_slice());

    let categories = match canonical {
        Some(name) => catalog
            .category_named_ignore_case(name)?
            .into_iter()
            .collect(),
        None => catalog.categories_named(types.as_slice())?,
    };

    debug!(
        ?canonical,
        categories = ?categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "resolved merchant categories"
    );

    Ok(ResolvedCategories {
        canonical,
        categories,
    })
}
