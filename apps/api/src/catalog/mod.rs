//! Reference-campaign catalog: loaded once at startup, read-only afterwards.
//!
//! The loader owns identifier assignment and required-field validation so that
//! the matching engine only ever sees fully-populated `CatalogEntry` values.

use std::path::Path;

use chrono::{Datelike, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::catalog::CatalogEntry;

const BUNDLED_CATALOG: &str = include_str!("../../data/reference_campaigns.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Catalog entry #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shape of an entry as it appears in the dataset. Everything optional;
/// `into_entry` decides what is fatal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogEntry {
    id: Option<String>,
    name: Option<String>,
    brand: Option<String>,
    year: Option<i32>,
    industry: Option<String>,
    #[serde(default)]
    target_audience: Vec<String>,
    #[serde(default)]
    objectives: Vec<String>,
    key_message: Option<String>,
    strategy: Option<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    emotional_appeal: Vec<String>,
    #[serde(default)]
    outcomes: Vec<String>,
}

impl RawCatalogEntry {
    fn into_entry(self, index: usize, current_year: i32) -> Result<CatalogEntry, CatalogError> {
        let required = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(CatalogError::MissingField { index, field })
        };

        Ok(CatalogEntry {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: required(self.name, "name")?,
            brand: required(self.brand, "brand")?,
            year: self.year.unwrap_or(current_year),
            industry: required(self.industry, "industry")?,
            target_audience: self.target_audience,
            objectives: self.objectives,
            key_message: self.key_message.unwrap_or_default(),
            strategy: self.strategy.unwrap_or_default(),
            features: self.features,
            emotional_appeal: self.emotional_appeal,
            outcomes: self.outcomes,
        })
    }
}

/// The process-wide, read-only list of reference campaigns.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parses an ordered JSON array of entries. Fails fast on the first invalid entry.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawCatalogEntry> = serde_json::from_str(json)?;
        let current_year = Utc::now().year();

        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_entry(index, current_year))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_json_str(BUNDLED_CATALOG)?;
        info!("Loaded {} bundled reference campaigns", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} reference campaigns from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
