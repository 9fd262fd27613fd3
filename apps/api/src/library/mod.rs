// Campaign library: saved campaigns keyed by a generated id.
// Backed by Postgres when DATABASE_URL is set, in memory otherwise.

pub mod handlers;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::campaign::{CampaignEvaluation, GeneratedCampaign};

pub use postgres::PgCampaignStore;

/// A campaign as stored in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCampaign {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub campaign: GeneratedCampaign,
    pub brand: String,
    pub industry: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<CampaignEvaluation>,
}

impl SavedCampaign {
    pub fn new(campaign: GeneratedCampaign, brand: &str, industry: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            pr_headline: campaign.pr_headline.clone(),
            evaluation: campaign.evaluation.clone(),
            campaign,
            brand: brand.to_string(),
            industry: industry.to_string(),
            favorite: false,
        }
    }

    /// Same campaign name for the same brand.
    pub fn is_duplicate_of(&self, campaign_name: &str, brand: &str) -> bool {
        self.campaign.campaign_name == campaign_name && self.brand == brand
    }
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Saves a campaign. A campaign with the same name for the same brand is not
    /// stored twice; the existing record is returned instead.
    async fn save(
        &self,
        campaign: GeneratedCampaign,
        brand: &str,
        industry: &str,
    ) -> Result<SavedCampaign, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<SavedCampaign>, AppError>;

    async fn list(&self) -> Result<HashMap<Uuid, SavedCampaign>, AppError>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, AppError>;

    /// Flips the favorite flag. `None` when the id is unknown.
    async fn toggle_favorite(&self, id: Uuid) -> Result<Option<bool>, AppError>;

    async fn is_saved(&self, campaign_name: &str, brand: &str) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCampaignStore {
    records: RwLock<HashMap<Uuid, SavedCampaign>>,
}

impl MemoryCampaignStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    async fn save(
        &self,
        campaign: GeneratedCampaign,
        brand: &str,
        industry: &str,
    ) -> Result<SavedCampaign, AppError> {
        let mut records = self.records.write().await;

        if let Some(existing) = records
            .values()
            .find(|r| r.is_duplicate_of(&campaign.campaign_name, brand))
        {
            info!("Campaign '{}' already saved as {}", existing.campaign.campaign_name, existing.id);
            return Ok(existing.clone());
        }

        let record = SavedCampaign::new(campaign, brand, industry);
        info!("Saved campaign '{}' as {}", record.campaign.campaign_name, record.id);
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SavedCampaign>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<HashMap<Uuid, SavedCampaign>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn toggle_favorite(&self, id: Uuid) -> Result<Option<bool>, AppError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            record.favorite = !record.favorite;
            record.favorite
        }))
    }

    async fn is_saved(&self, campaign_name: &str, brand: &str) -> Result<bool, AppError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .any(|r| r.is_duplicate_of(campaign_name, brand)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryCampaignStore::new();
        let mut c = campaign("Night Shift", "Rest is resistance", &["a"]);
        c.pr_headline = Some("Brand tells workers to go home".to_string());

        let saved = store.save(c, "Acme", "Retail").await.unwrap();
        assert!(!saved.favorite);
        assert_eq!(saved.pr_headline.as_deref(), Some("Brand tells workers to go home"));

        let fetched = store.get(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_duplicate_returns_existing() {
        let store = MemoryCampaignStore::new();
        let first = store
            .save(campaign("Night Shift", "k", &[]), "Acme", "Retail")
            .await
            .unwrap();
        let second = store
            .save(campaign("Night Shift", "other", &[]), "Acme", "Retail")
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.list().await.unwrap().len(), 1);

        // Same name under another brand is a different campaign.
        store
            .save(campaign("Night Shift", "k", &[]), "Globex", "Retail")
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_saves_keep_one_record() {
        let store = std::sync::Arc::new(MemoryCampaignStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .save(campaign("Night Shift", "k", &[]), "Acme", "Retail")
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_favorite_and_remove() {
        let store = MemoryCampaignStore::new();
        let saved = store
            .save(campaign("Night Shift", "k", &[]), "Acme", "Retail")
            .await
            .unwrap();

        assert_eq!(store.toggle_favorite(saved.id).await.unwrap(), Some(true));
        assert_eq!(store.toggle_favorite(saved.id).await.unwrap(), Some(false));
        assert_eq!(store.toggle_favorite(Uuid::new_v4()).await.unwrap(), None);

        assert!(store.is_saved("Night Shift", "Acme").await.unwrap());
        assert!(store.remove(saved.id).await.unwrap());
        assert!(!store.remove(saved.id).await.unwrap());
        assert!(!store.is_saved("Night Shift", "Acme").await.unwrap());
    }

    #[test]
    fn test_saved_campaign_serializes_camel_case() {
        let record = SavedCampaign::new(campaign("X", "Y", &[]), "Acme", "Retail");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["campaign"]["campaignName"], "X");
        assert_eq!(json["favorite"], false);
        assert!(json.get("prHeadline").is_none());
        assert!(json["timestamp"].is_string());
    }
}
