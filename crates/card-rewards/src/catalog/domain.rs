use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the catch-all category used when a card has no category-specific reward.
pub const FALLBACK_CATEGORY: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssuerId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RewardCategoryId(pub Uuid);

impl IssuerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl CardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl CategoryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl RewardCategoryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Financial institution issuing cards (e.g. Bank of America).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: IssuerId,
    pub name: String,
}

/// Catalog card such as "Chase Sapphire Preferred".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub issuer_id: IssuerId,
    pub name: String,
    /// Monetary value of one point; absent means points are worth nothing.
    pub base_point_value: Option<Decimal>,
}

/// Internal spending classification (Gas, Dining, Other, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCategory {
    pub id: CategoryId,
    pub name: String,
}

impl MerchantCategory {
    pub fn is_fallback(&self) -> bool {
        self.name.eq_ignore_ascii_case(FALLBACK_CATEGORY)
    }
}

/// Four-character merchant category code published by the card networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCategoryCode {
    pub code: String,
    pub description: String,
}

/// A card's reward configuration for one merchant category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCategory {
    pub id: RewardCategoryId,
    pub card_id: CardId,
    pub category_id: CategoryId,
    pub merchant_category_codes: BTreeSet<String>,
}

/// Cashback percentage or points multiplier attached to a reward category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRate {
    pub reward_category_id: RewardCategoryId,
    pub cashback_percentage: Option<Decimal>,
    pub points: Option<i32>,
    pub reset_period: String,
    pub limit: Option<Decimal>,
}

impl RewardRate {
    /// Cashback only counts when it is present and non-zero.
    pub fn effective_cashback(&self) -> Option<Decimal> {
        self.cashback_percentage.filter(|value| !value.is_zero())
    }
}

impl fmt::Display for RewardRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rewards = Vec::new();
        if let Some(cashback) = self.effective_cashback() {
            rewards.push(format!("{cashback}%"));
        }
        if let Some(points) = self.points.filter(|points| *points != 0) {
            rewards.push(format!("{points} points"));
        }

        if rewards.is_empty() {
            write!(f, "No rewards specified")
        } else {
            write!(f, "Rate: {}", rewards.join(" / "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(cashback: Option<Decimal>, points: Option<i32>) -> RewardRate {
        RewardRate {
            reward_category_id: RewardCategoryId::generate(),
            cashback_percentage: cashback,
            points,
            reset_period: String::new(),
            limit: None,
        }
    }

    #[test]
    fn fallback_category_matches_any_case() {
        let category = MerchantCategory {
            id: CategoryId::generate(),
            name: "OTHER".to_string(),
        };
        assert!(category.is_fallback());

        let dining = MerchantCategory {
            id: CategoryId::generate(),
            name: "Dining".to_string(),
        };
        assert!(!dining.is_fallback());
    }

    #[test]
    fn zero_cashback_is_not_effective() {
        assert_eq!(rate(Some(Decimal::ZERO), Some(2)).effective_cashback(), None);
        assert_eq!(
            rate(Some(Decimal::new(150, 2)), None).effective_cashback(),
            Some(Decimal::new(150, 2))
        );
    }

    #[test]
    fn rate_display_lists_rewards() {
        assert_eq!(
            rate(Some(Decimal::new(300, 2)), Some(2)).to_string(),
            "Rate: 3.00% / 2 points"
        );
        assert_eq!(rate(None, None).to_string(), "No rewards specified");
    }
}
