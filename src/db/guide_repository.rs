// src/db/guide_repository.rs
// DOCUMENTATION: Generated guide history storage
// PURPOSE: Append-only audit log of generated travel guides

use crate::errors::GuideError;
use crate::models::ItineraryResult;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Marker stored for guides requested without an account
pub const ANONYMOUS_USER: &str = "anonymous";

/// Append-only store for generated guides
#[async_trait]
pub trait GuideStore: Send + Sync {
    /// Persist one guide, returning the new record id
    async fn save(&self, user_id: &str, guide: &ItineraryResult) -> Result<Uuid, GuideError>;
}

/// PostgreSQL-backed guide store
/// DOCUMENTATION: Each guide is one row with the full result as JSONB
pub struct PgGuideStore {
    pool: PgPool,
}

impl PgGuideStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the travel_guides table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), GuideError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS travel_guides (
                id UUID PRIMARY KEY,
                user_id TEXT NOT NULL,
                email TEXT,
                destination TEXT NOT NULL,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create travel_guides table: {}", e);
            GuideError::DatabaseError(format!("Schema setup failed: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl GuideStore for PgGuideStore {
    async fn save(&self, user_id: &str, guide: &ItineraryResult) -> Result<Uuid, GuideError> {
        let document = serde_json::to_value(guide)
            .map_err(|e| GuideError::InternalError(format!("Serialize guide failed: {}", e)))?;

        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO travel_guides (id, user_id, email, destination, document)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&guide.email)
        .bind(&guide.destination)
        .bind(document)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert travel guide: {}", e);
            GuideError::DatabaseError(format!("Insert guide failed: {}", e))
        })?;

        Ok(inserted.0)
    }
}

/// Used when no database is configured: logs and discards
pub struct NoopGuideStore;

#[async_trait]
impl GuideStore for NoopGuideStore {
    async fn save(&self, user_id: &str, guide: &ItineraryResult) -> Result<Uuid, GuideError> {
        log::debug!(
            "Guide persistence disabled; dropping guide for {} ({})",
            guide.destination,
            user_id
        );
        Ok(Uuid::nil())
    }
}
