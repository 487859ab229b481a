use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Card, CardId, IssuerId};
use super::repository::{CatalogRepository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerView {
    pub id: IssuerId,
    pub name: String,
}

/// Catalog card with its issuer inlined for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub issuer: IssuerView,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub base_point_value: Option<Decimal>,
}

/// One reward category of a card, flattened with its rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardView {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub cashback_percentage: Option<Decimal>,
    pub points: Option<i32>,
    pub reset_period: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub limit: Option<Decimal>,
}

/// Every configured reward for a single card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRewardProfile {
    pub card: CardView,
    pub rewards: Vec<RewardView>,
}

pub fn card_view<C>(catalog: &C, card: &Card) -> Result<CardView, RepositoryError>
where
    C: CatalogRepository + ?Sized,
{
    let issuer = catalog
        .issuer(&card.issuer_id)?
        .ok_or(RepositoryError::NotFound)?;

    Ok(CardView {
        id: card.id,
        name: card.name.clone(),
        issuer: IssuerView {
            id: issuer.id,
            name: issuer.name,
        },
        base_point_value: card.base_point_value,
    })
}

pub fn list_cards<C>(catalog: &C) -> Result<Vec<CardView>, RepositoryError>
where
    C: CatalogRepository + ?Sized,
{
    catalog
        .cards()?
        .iter()
        .map(|card| card_view(catalog, card))
        .collect()
}

/// Builds the reward profile for `card_id`, or `None` when the card is unknown.
///
/// Reward categories without a stored rate are left out.
pub fn reward_profile<C>(
    catalog: &C,
    card_id: &CardId,
) -> Result<Option<CardRewardProfile>, RepositoryError>
where
    C: CatalogRepository + ?Sized,
{
    let Some(card) = catalog.card(card_id)? else {
        return Ok(None);
    };

    let mut rewards = Vec::new();
    for reward_category in catalog.reward_categories_for_card(card_id)? {
        let Some(rate) = catalog.reward_rate(&reward_category.id)? else {
            continue;
        };
        let category = catalog
            .category(&reward_category.category_id)?
            .ok_or(RepositoryError::NotFound)?;

        rewards.push(RewardView {
            category: category.name,
            cashback_percentage: rate.effective_cashback(),
            points: rate.points.filter(|points| *points != 0),
            reset_period: Some(rate.reset_period).filter(|period| !period.is_empty()),
            limit: rate.limit.filter(|limit| !limit.is_zero()),
        });
    }

    Ok(Some(CardRewardProfile {
        card: card_view(catalog, &card)?,
        rewards,
    }))
}
