use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::domain::{
    Card, CardId, CategoryId, Issuer, IssuerId, MerchantCategory, RewardCategory,
    RewardCategoryId, RewardRate,
};
use super::mcc::normalize_code;
use super::memory::InMemoryCatalog;
use super::repository::CatalogRepository;
use super::CatalogImportError;

/// Records created while seeding the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub issuers: usize,
    pub cards: usize,
    pub categories: usize,
    pub reward_categories: usize,
    pub reward_rates: usize,
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    issuer: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    card: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    base_point_value: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cashback_percentage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    points: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reset_period: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    limit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mccs: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn required(
    value: Option<String>,
    line: usize,
    field: &'static str,
) -> Result<String, CatalogImportError> {
    value.ok_or(CatalogImportError::MissingField { line, field })
}

fn parse_number<T: FromStr>(
    value: Option<&str>,
    line: usize,
    field: &'static str,
) -> Result<Option<T>, CatalogImportError> {
    value
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| CatalogImportError::InvalidNumber {
                    line,
                    field,
                    value: raw.to_string(),
                })
        })
        .transpose()
}

fn parse_codes(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|codes| {
        codes
            .split(';')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(normalize_code)
            .collect()
    })
    .unwrap_or_default()
}

/// Loads issuers, cards, categories, and reward rates from a flat CSV export.
///
/// Each row names an issuer and card; rows that also carry a category register that card's
/// reward for the category. A rate is only stored when cashback or points are present.
pub struct CatalogSeeder;

impl CatalogSeeder {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &InMemoryCatalog,
    ) -> Result<SeedSummary, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &InMemoryCatalog,
    ) -> Result<SeedSummary, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut summary = SeedSummary::default();

        for (index, row) in csv_reader.deserialize::<SeedRow>().enumerate() {
            let line = index + 2;
            apply_row(row?, line, catalog, &mut summary)?;
        }

        info!(
            issuers = summary.issuers,
            cards = summary.cards,
            categories = summary.categories,
            reward_categories = summary.reward_categories,
            reward_rates = summary.reward_rates,
            "catalog seed complete"
        );
        Ok(summary)
    }
}

fn apply_row(
    row: SeedRow,
    line: usize,
    catalog: &InMemoryCatalog,
    summary: &mut SeedSummary,
) -> Result<(), CatalogImportError> {
    let repository = |source| CatalogImportError::Repository { line, source };

    let issuer_name = required(row.issuer, line, "issuer")?;
    let card_name = required(row.card, line, "card")?;
    let base_point_value =
        parse_number::<Decimal>(row.base_point_value.as_deref(), line, "base_point_value")?;

    let issuer = match catalog.issuer_named(&issuer_name).map_err(repository)? {
        Some(issuer) => issuer,
        None => {
            summary.issuers += 1;
            catalog
                .insert_issuer(Issuer {
                    id: IssuerId::generate(),
                    name: issuer_name,
                })
                .map_err(repository)?
        }
    };

    let card = match catalog.card_named(&card_name).map_err(repository)? {
        Some(card) => card,
        None => {
            summary.cards += 1;
            catalog
                .insert_card(Card {
                    id: CardId::generate(),
                    issuer_id: issuer.id,
                    name: card_name,
                    base_point_value,
                })
                .map_err(repository)?
        }
    };

    let Some(category_name) = row.category else {
        return Ok(());
    };

    let category = match catalog
        .category_named_ignore_case(&category_name)
        .map_err(repository)?
    {
        Some(category) => category,
        None => {
            summary.categories += 1;
            catalog
                .insert_category(MerchantCategory {
                    id: CategoryId::generate(),
                    name: category_name,
                })
                .map_err(repository)?
        }
    };

    let reward_category = catalog
        .insert_reward_category(RewardCategory {
            id: RewardCategoryId::generate(),
            card_id: card.id,
            category_id: category.id,
            merchant_category_codes: parse_codes(row.mccs.as_deref()),
        })
        .map_err(repository)?;
    summary.reward_categories += 1;

    let cashback_percentage = parse_number::<Decimal>(
        row.cashback_percentage.as_deref(),
        line,
        "cashback_percentage",
    )?;
    let points = parse_number::<i32>(row.points.as_deref(), line, "points")?;
    let limit = parse_number::<Decimal>(row.limit.as_deref(), line, "limit")?;

    if cashback_percentage.is_none() && points.is_none() {
        debug!(line, card = %card.name, category = %category.name, "reward category stored without a rate");
        return Ok(());
    }

    catalog
        .insert_reward_rate(RewardRate {
            reward_category_id: reward_category.id,
            cashback_percentage,
            points,
            reset_period: row.reset_period.unwrap_or_default(),
            limit,
        })
        .map_err(repository)?;
    summary.reward_rates += 1;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "issuer,card,base_point_value,category,cashback_percentage,points,reset_period,limit,mccs\n";

    #[test]
    fn seeds_cards_categories_and_rates() {
        let csv = format!(
            "{HEADER}\
Chase,Sapphire Preferred,0.015,Dining,,3,,,5812;5814\n\
Chase,Sapphire Preferred,,Other,,1,,,\n\
Citi,Double Cash,,other,2.00,,,,\n"
        );
        let catalog = InMemoryCatalog::default();

        let summary =
            CatalogSeeder::from_reader(csv.as_bytes(), &catalog).expect("seed succeeds");

        assert_eq!(
            summary,
            SeedSummary {
                issuers: 2,
                cards: 2,
                categories: 2,
                reward_categories: 3,
                reward_rates: 3,
            }
        );
        let card = catalog
            .card_named("Sapphire Preferred")
            .expect("lookup succeeds")
            .expect("card stored");
        assert_eq!(card.base_point_value, Some(Decimal::new(15, 3)));

        let rewards = catalog
            .reward_categories_for_card(&card.id)
            .expect("lookup succeeds");
        assert_eq!(rewards.len(), 2);
        assert!(rewards[0].merchant_category_codes.contains("5812"));
    }

    #[test]
    fn rows_without_rewards_store_no_rate() {
        let csv = format!("{HEADER}Amex,Blue Cash,,Gas,,,monthly,,\nAmex,Gold,,,,,,,\n");
        let catalog = InMemoryCatalog::default();

        let summary =
            CatalogSeeder::from_reader(csv.as_bytes(), &catalog).expect("seed succeeds");

        assert_eq!(summary.cards, 2);
        assert_eq!(summary.reward_categories, 1);
        assert_eq!(summary.reward_rates, 0);
    }

    #[test]
    fn duplicate_pairs_report_the_line() {
        let csv = format!("{HEADER}Chase,Freedom,,Dining,3,,,,\nChase,Freedom,,dining,5,,,,\n");
        let catalog = InMemoryCatalog::default();

        match CatalogSeeder::from_reader(csv.as_bytes(), &catalog) {
            Err(CatalogImportError::Repository { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected repository conflict, got {other:?}"),
        }
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let csv = format!("{HEADER}Chase,Freedom,,Dining,three,,,,\n");
        let catalog = InMemoryCatalog::default();

        match CatalogSeeder::from_reader(csv.as_bytes(), &catalog) {
            Err(CatalogImportError::InvalidNumber { field, value, .. }) => {
                assert_eq!(field, "cashback_percentage");
                assert_eq!(value, "three");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
    }
}
