use card_rewards::catalog::{
    CatalogRepository, CatalogSeeder, InMemoryCatalog, MccImportSummary, MccImporter,
    SeedSummary,
};

fn seeded_catalog() -> InMemoryCatalog {
    let data = include_bytes!("../data/catalog_seed.csv");
    let catalog = InMemoryCatalog::default();
    CatalogSeeder::from_reader(&data[..], &catalog).expect("seed dataset imports");
    catalog
}

#[test]
fn seed_dataset_registers_issuers_cards_and_rates() {
    let data = include_bytes!("../data/catalog_seed.csv");
    let catalog = InMemoryCatalog::default();

    let summary = CatalogSeeder::from_reader(&data[..], &catalog).expect("seed dataset imports");

    assert_eq!(
        summary,
        SeedSummary {
            issuers: 6,
            cards: 7,
            categories: 5,
            reward_categories: 15,
            reward_rates: 15,
        }
    );

    let names: Vec<_> = catalog
        .cards()
        .expect("cards listed")
        .into_iter()
        .map(|card| card.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Autograph",
            "Double Cash",
            "Freedom Flex",
            "Gold",
            "It Cash Back",
            "Sapphire Preferred",
            "SavorOne",
        ]
    );
}

#[test]
fn seeded_reward_categories_carry_normalized_codes_and_limits() {
    let catalog = seeded_catalog();
    let gold = catalog
        .card_named("Gold")
        .expect("lookup succeeds")
        .expect("gold card seeded");
    let dining = catalog
        .category_named_ignore_case("dining")
        .expect("lookup succeeds")
        .expect("dining seeded");

    let reward_category = catalog
        .reward_category(&gold.id, &dining.id)
        .expect("lookup succeeds")
        .expect("gold dining reward");
    assert!(reward_category.merchant_category_codes.contains("5812"));
    assert!(reward_category.merchant_category_codes.contains("5813"));

    let rate = catalog
        .reward_rate(&reward_category.id)
        .expect("lookup succeeds")
        .expect("gold dining rate");
    assert_eq!(rate.points, Some(4));
    assert_eq!(rate.reset_period, "annually");
    assert_eq!(rate.limit.map(|limit| limit.to_string()), Some("50000".to_string()));
}

#[test]
fn card_without_category_has_no_rewards() {
    let catalog = seeded_catalog();
    let autograph = catalog
        .card_named("Autograph")
        .expect("lookup succeeds")
        .expect("autograph seeded");

    let rewards = catalog
        .reward_categories_for_card(&autograph.id)
        .expect("lookup succeeds");
    assert!(rewards.is_empty());
}

#[test]
fn mcc_dataset_imports_and_reimports_as_updates() {
    let data = include_bytes!("../data/mcc_codes.csv");
    let catalog = InMemoryCatalog::default();

    let first = MccImporter::from_reader(&data[..], &catalog).expect("mcc dataset imports");
    assert_eq!(
        first,
        MccImportSummary {
            created: 8,
            updated: 0,
            skipped: 1,
        }
    );

    let vet = catalog
        .merchant_code("0742")
        .expect("lookup succeeds")
        .expect("padded code stored");
    assert_eq!(vet.description, "Veterinary Services");
    let fast_food = catalog
        .merchant_code("5814")
        .expect("lookup succeeds")
        .expect("fast food stored");
    assert_eq!(fast_food.description, "Fast Food");

    let second = MccImporter::from_reader(&data[..], &catalog).expect("mcc dataset reimports");
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 8);
}
