use card_rewards::catalog::{CatalogSeeder, InMemoryCatalog, MccImporter};
use card_rewards::config::CatalogConfig;
use card_rewards::error::AppError;
use card_rewards::rewards::RecommendationService;
use card_rewards::wallet::{InMemoryWallet, WalletService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared stores and services behind the HTTP surface.
pub(crate) struct Services {
    pub(crate) catalog: Arc<InMemoryCatalog>,
    pub(crate) wallet: Arc<WalletService<InMemoryCatalog, InMemoryWallet>>,
    pub(crate) recommendations: Arc<RecommendationService<InMemoryCatalog, InMemoryWallet>>,
}

impl Services {
    pub(crate) fn in_memory(catalog: InMemoryCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let wallet = Arc::new(WalletService::new(
            catalog.clone(),
            Arc::new(InMemoryWallet::default()),
        ));
        let recommendations = Arc::new(RecommendationService::new(wallet.clone()));
        Self {
            catalog,
            wallet,
            recommendations,
        }
    }
}

/// Builds the catalog from the configured CSV exports, if any.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryCatalog, AppError> {
    let catalog = InMemoryCatalog::default();

    if let Some(path) = &config.seed_path {
        let summary = CatalogSeeder::from_path(path, &catalog)?;
        info!(path = %path.display(), ?summary, "catalog seeded");
    }
    if let Some(path) = &config.mcc_path {
        let summary = MccImporter::from_path(path, &catalog)?;
        info!(path = %path.display(), ?summary, "merchant category codes imported");
    }

    Ok(catalog)
}
