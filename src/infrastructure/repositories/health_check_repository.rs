use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum HealthStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthCheckRecord {
    pub id: Uuid,
    pub component: String,
    pub status: HealthStatus,
    pub details: JsonValue,
    pub checked_at: DateTime<Utc>,
}

pub struct HealthCheckRepository {
    pool: Arc<DbPool>,
}

impl HealthCheckRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Record the outcome of a component check
    pub async fn record(
        &self,
        component: &str,
        status: HealthStatus,
        details: JsonValue,
    ) -> AppResult<HealthCheckRecord> {
        let pool = self.pool.as_ref();

        let record = sqlx::query_as::<_, HealthCheckRecord>(
            r#"
            INSERT INTO health_checks (id, component, status, details, checked_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, component, status, details, checked_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(component)
        .bind(status)
        .bind(details)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Most recent check for a component
    pub async fn latest_for_component(
        &self,
        component: &str,
    ) -> AppResult<Option<HealthCheckRecord>> {
        let pool = self.pool.as_ref();

        let record = sqlx::query_as::<_, HealthCheckRecord>(
            r#"
            SELECT id, component, status, details, checked_at
            FROM health_checks
            WHERE component = $1
            ORDER BY checked_at DESC
            LIMIT 1
            "#,
        )
        .bind(component)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete checks older than `cutoff`, returning how many were removed
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let pool = self.pool.as_ref();

        let result = sqlx::query("DELETE FROM health_checks WHERE checked_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
