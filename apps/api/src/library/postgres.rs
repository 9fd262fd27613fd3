use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::library::{CampaignStore, SavedCampaign};
use crate::models::campaign::GeneratedCampaign;

#[derive(Debug, FromRow)]
struct SavedCampaignRow {
    id: Uuid,
    brand: String,
    industry: String,
    favorite: bool,
    created_at: DateTime<Utc>,
    campaign: Json<GeneratedCampaign>,
}

impl From<SavedCampaignRow> for SavedCampaign {
    fn from(row: SavedCampaignRow) -> Self {
        let campaign = row.campaign.0;
        SavedCampaign {
            id: row.id,
            timestamp: row.created_at,
            pr_headline: campaign.pr_headline.clone(),
            evaluation: campaign.evaluation.clone(),
            campaign,
            brand: row.brand,
            industry: row.industry,
            favorite: row.favorite,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, brand, industry, favorite, created_at, campaign FROM saved_campaigns";

/// Relies on the unique `(campaign_name, brand)` index: a concurrent duplicate
/// inserts nothing and returns no row.
const INSERT_CAMPAIGN: &str = r#"
    INSERT INTO saved_campaigns (id, campaign_name, brand, industry, favorite, created_at, campaign)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (campaign_name, brand) DO NOTHING
    RETURNING id, brand, industry, favorite, created_at, campaign
"#;

/// Library backed by the `saved_campaigns` table. The campaign payload is JSONB.
#[derive(Clone)]
pub struct PgCampaignStore {
    pool: PgPool,
}

impl PgCampaignStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_duplicate(
        &self,
        campaign_name: &str,
        brand: &str,
    ) -> Result<Option<SavedCampaign>, AppError> {
        let row = sqlx::query_as::<_, SavedCampaignRow>(&format!(
            "{SELECT_COLUMNS} WHERE campaign_name = $1 AND brand = $2 LIMIT 1"
        ))
        .bind(campaign_name)
        .bind(brand)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SavedCampaign::from))
    }
}

#[async_trait]
impl CampaignStore for PgCampaignStore {
    async fn save(
        &self,
        campaign: GeneratedCampaign,
        brand: &str,
        industry: &str,
    ) -> Result<SavedCampaign, AppError> {
        if let Some(existing) = self.find_duplicate(&campaign.campaign_name, brand).await? {
            info!("Campaign '{}' already saved as {}", existing.campaign.campaign_name, existing.id);
            return Ok(existing);
        }

        let record = SavedCampaign::new(campaign, brand, industry);

        let inserted = sqlx::query_as::<_, SavedCampaignRow>(INSERT_CAMPAIGN)
            .bind(record.id)
            .bind(&record.campaign.campaign_name)
            .bind(&record.brand)
            .bind(&record.industry)
            .bind(record.favorite)
            .bind(record.timestamp)
            .bind(Json(&record.campaign))
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(row) => {
                info!("Saved campaign '{}' as {}", record.campaign.campaign_name, row.id);
                Ok(SavedCampaign::from(row))
            }
            None => {
                // Lost the race to a concurrent save of the same campaign.
                let existing = self
                    .find_duplicate(&record.campaign.campaign_name, &record.brand)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "Campaign '{}' conflicted on insert but could not be re-read",
                            record.campaign.campaign_name
                        ))
                    })?;
                info!("Campaign '{}' already saved as {}", existing.campaign.campaign_name, existing.id);
                Ok(existing)
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<SavedCampaign>, AppError> {
        let row = sqlx::query_as::<_, SavedCampaignRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(SavedCampaign::from))
    }

    async fn list(&self) -> Result<HashMap<Uuid, SavedCampaign>, AppError> {
        let rows = sqlx::query_as::<_, SavedCampaignRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, SavedCampaign::from(row)))
            .collect())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM saved_campaigns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_favorite(&self, id: Uuid) -> Result<Option<bool>, AppError> {
        let favorite: Option<bool> = sqlx::query_scalar(
            "UPDATE saved_campaigns SET favorite = NOT favorite WHERE id = $1 RETURNING favorite",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(favorite)
    }

    async fn is_saved(&self, campaign_name: &str, brand: &str) -> Result<bool, AppError> {
        Ok(self.find_duplicate(campaign_name, brand).await?.is_some())
    }
}
