use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::service::RecommendationError;
use crate::catalog::{
    Card, CardId, CatalogRepository, MerchantCategory, RepositoryError, RewardCategory,
    RewardRate, FALLBACK_CATEGORY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Cashback,
    Points,
}

/// Ranked reward outcome for one owned card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardBenefit {
    pub card_id: CardId,
    pub card_name: String,
    pub issuer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub reward_type: RewardType,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub reward_amount: Option<Decimal>,
    pub category: String,
}

/// `cashback + points * base_point_value`, with every missing term counted as zero.
///
/// `None` when the result does not fit in a `Decimal`.
pub fn reward_value(rate: &RewardRate, card: &Card) -> Option<Decimal> {
    let cashback = rate.cashback_percentage.unwrap_or(Decimal::ZERO);
    let points = Decimal::from(rate.points.unwrap_or(0));
    let point_value = card.base_point_value.unwrap_or(Decimal::ZERO);
    points.checked_mul(point_value)?.checked_add(cashback)
}

pub fn reward_type(rate: &RewardRate) -> RewardType {
    if rate.effective_cashback().is_some() {
        RewardType::Cashback
    } else {
        RewardType::Points
    }
}

pub fn reward_amount(rate: &RewardRate) -> Option<Decimal> {
    rate.effective_cashback()
        .or_else(|| rate.points.map(Decimal::from))
}

/// Orders by value, best first; equal values stay in card-name order.
pub fn rank(benefits: &mut [CardBenefit]) {
    benefits.sort_by(|left, right| left.card_name.cmp(&right.card_name));
    benefits.sort_by(|left, right| right.value.cmp(&left.value));
}

/// Scores cards against one request's resolved categories and the fallback category.
pub struct ScoringEngine<'a, C: ?Sized> {
    catalog: &'a C,
    categories: &'a [MerchantCategory],
    fallback: Option<MerchantCategory>,
}

impl<'a, C> ScoringEngine<'a, C>
where
    C: CatalogRepository + ?Sized,
{
    pub fn new(catalog: &'a C, categories: &'a [MerchantCategory]) -> Result<Self, RepositoryError> {
        let fallback = catalog.category_named_ignore_case(FALLBACK_CATEGORY)?;
        Ok(Self {
            catalog,
            categories,
            fallback,
        })
    }

    /// Reward category for the first matching requested category, else the fallback's.
    pub fn reward_category_for(
        &self,
        card: &Card,
    ) -> Result<Option<(RewardCategory, &MerchantCategory)>, RepositoryError> {
        for category in self.categories {
            if let Some(reward_category) = self.catalog.reward_category(&card.id, &category.id)? {
                return Ok(Some((reward_category, category)));
            }
        }

        let Some(fallback) = self.fallback.as_ref() else {
            return Ok(None);
        };
        debug!(card = %card.id, "no category match, trying fallback");
        Ok(self
            .catalog
            .reward_category(&card.id, &fallback.id)?
            .map(|reward_category| (reward_category, fallback)))
    }

    /// Scores one card; `None` when it has no applicable reward category or rate.
    pub fn score_card(&self, card: &Card) -> Result<Option<CardBenefit>, RecommendationError> {
        let Some((reward_category, category)) = self.reward_category_for(card)? else {
            debug!(card = %card.id, "no reward category, skipping");
            return Ok(None);
        };
        let Some(rate) = self.catalog.reward_rate(&reward_category.id)? else {
            debug!(card = %card.id, "no reward rate, skipping");
            return Ok(None);
        };
        let issuer = self
            .catalog
            .issuer(&card.issuer_id)?
            .ok_or(RepositoryError::NotFound)?;

        let value = reward_value(&rate, card)
            .ok_or(RecommendationError::ValueOverflow { card: card.id })?;
        debug!(
            card = %card.id,
            name = %card.name,
            %rate,
            fallback = category.is_fallback(),
            %value,
            "scored card"
        );

        Ok(Some(CardBenefit {
            card_id: card.id,
            card_name: card.name.clone(),
            issuer: issuer.name,
            value,
            reward_type: reward_type(&rate),
            reward_amount: reward_amount(&rate),
            category: category.name.clone(),
        }))
    }

    /// Scores every card and returns the ranked results.
    pub fn score_all<'c, I>(&self, cards: I) -> Result<Vec<CardBenefit>, RecommendationError>
    where
        I: IntoIterator<Item = &'c Card>,
    {
        let mut benefits = Vec::new();
        for card in cards {
            if let Some(benefit) = self.score_card(card)? {
                benefits.push(benefit);
            }
        }
        rank(&mut benefits);
        Ok(benefits)
    }
}
