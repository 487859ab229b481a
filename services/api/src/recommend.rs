use crate::infra::Services;
use card_rewards::catalog::{CatalogSeeder, InMemoryCatalog, MccImporter};
use card_rewards::error::AppError;
use card_rewards::rewards::{CardBenefit, RecommendationError, RewardType};
use card_rewards::wallet::OwnerId;
use clap::Args;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Catalog seed CSV (issuer, card, category, and reward columns)
    #[arg(long)]
    pub(crate) seed: PathBuf,
    /// Card name held in the wallet; repeat for several cards
    #[arg(long = "card", required = true)]
    pub(crate) cards: Vec<String>,
    /// Merchant type tag for the purchase; repeat for several tags
    #[arg(long = "types")]
    pub(crate) types: Vec<String>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportMccsArgs {
    /// CSV export with `mcc`, `edited_description`, and `combined_description` columns
    pub(crate) path: PathBuf,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        seed,
        cards,
        types,
        json,
    } = args;

    let catalog = InMemoryCatalog::default();
    CatalogSeeder::from_path(&seed, &catalog)?;
    let benefits = rank_named_cards(catalog, &cards, types)?;

    if json {
        match serde_json::to_string_pretty(&benefits) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Ranking payload unavailable: {}", err),
        }
    } else {
        render_benefits(&benefits);
    }
    Ok(())
}

/// Registers the named catalog cards in a fresh wallet and ranks them.
pub(crate) fn rank_named_cards(
    catalog: InMemoryCatalog,
    card_names: &[String],
    types: Vec<String>,
) -> Result<Vec<CardBenefit>, RecommendationError> {
    let mut card_ids = Vec::with_capacity(card_names.len());
    for name in card_names {
        match catalog.card_named(name)? {
            Some(card) => card_ids.push(card.id.0),
            None => warn!(card = %name, "card not found in catalog"),
        }
    }

    let services = Services::in_memory(catalog);
    let owner = OwnerId(Uuid::new_v4());
    services.wallet.add_catalog_cards(&owner, &card_ids)?;
    services.recommendations.benefits_by_types(&owner, types)
}

fn render_benefits(benefits: &[CardBenefit]) {
    if benefits.is_empty() {
        println!("No card earns rewards for these merchant types");
        return;
    }

    println!("Card ranking");
    for (position, benefit) in benefits.iter().enumerate() {
        let earning = match (benefit.reward_type, benefit.reward_amount) {
            (RewardType::Cashback, Some(amount)) => format!("{amount}% cashback"),
            (RewardType::Points, Some(amount)) => format!("{amount} points"),
            (_, None) => "no rate".to_string(),
        };
        println!(
            "{}. {} ({}) | value {} | {} | category {}",
            position + 1,
            benefit.card_name,
            benefit.issuer,
            benefit.value,
            earning,
            benefit.category
        );
    }
}

pub(crate) fn run_import_mccs(args: ImportMccsArgs) -> Result<(), AppError> {
    let catalog = InMemoryCatalog::default();
    let summary = MccImporter::from_path(&args.path, &catalog)?;
    println!(
        "Merchant category codes: {} created | {} updated | {} skipped",
        summary.created, summary.updated, summary.skipped
    );
    Ok(())
}
