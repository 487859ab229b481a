use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::MerchantCategoryCode;
use super::memory::InMemoryCatalog;
use super::CatalogImportError;

/// Counts reported after a merchant category code import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MccImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct MccRow {
    #[serde(default)]
    mcc: Option<String>,
    #[serde(default)]
    combined_description: Option<String>,
    #[serde(default)]
    edited_description: Option<String>,
}

impl MccRow {
    /// Blank codes yield `None` so the row is skipped rather than stored as `0000`.
    fn code(&self) -> Option<String> {
        self.mcc
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(normalize_code)
    }

    fn description(&self) -> Option<String> {
        self.combined_description
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.edited_description.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Left-pads a code with zeros to four characters (`742` becomes `0742`).
pub fn normalize_code(code: &str) -> String {
    format!("{:0>4}", code.trim())
}

pub struct MccImporter;

impl MccImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &InMemoryCatalog,
    ) -> Result<MccImportSummary, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &InMemoryCatalog,
    ) -> Result<MccImportSummary, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
        let mut summary = MccImportSummary::default();

        for (index, row) in csv_reader.deserialize::<MccRow>().enumerate() {
            let row = row?;
            let line = index + 2;

            let (Some(code), Some(description)) = (row.code(), row.description()) else {
                warn!(line, "skipped merchant code row with missing code or description");
                summary.skipped += 1;
                continue;
            };

            let created = catalog
                .upsert_merchant_code(MerchantCategoryCode { code, description })
                .map_err(|source| CatalogImportError::Repository { line, source })?;
            if created {
                summary.created += 1;
            } else {
                summary.updated += 1;
            }
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            "merchant category code import complete"
        );
        Ok(summary)
    }
}
