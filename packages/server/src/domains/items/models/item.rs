use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ItemId, MemberId};

/// Item - a physical object listed for swapping
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: ItemId,
    pub owner_id: MemberId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_urls: Vec<String>,
    pub status: String, // 'available', 'hidden', 'swapped'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Hidden,
    Swapped,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "available"),
            ItemStatus::Hidden => write!(f, "hidden"),
            ItemStatus::Swapped => write!(f, "swapped"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(ItemStatus::Available),
            "hidden" => Ok(ItemStatus::Hidden),
            "swapped" => Ok(ItemStatus::Swapped),
            _ => Err(anyhow::anyhow!("Invalid item status: {}", s)),
        }
    }
}

impl Item {
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available.to_string()
    }

    pub fn is_swapped(&self) -> bool {
        self.status == ItemStatus::Swapped.to_string()
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Item {
    /// Find item by ID
    pub async fn find_by_id(id: ItemId, pool: &PgPool) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(item)
    }

    /// Find item by ID inside a transaction
    pub async fn find_by_id_tx(id: ItemId, conn: &mut PgConnection) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(item)
    }

    /// Find items by owner with optional status filter
    pub async fn find_by_owner(
        owner_id: MemberId,
        status: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE owner_id = $1
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    /// Create a new item (returns inserted record with defaults applied)
    pub async fn create(
        owner_id: MemberId,
        title: String,
        description: String,
        category: String,
        image_urls: Vec<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (id, owner_id, title, description, category, image_urls)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ItemId::new())
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(image_urls)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Update item content (partial edit)
    pub async fn update_content(
        id: ItemId,
        title: Option<String>,
        description: Option<String>,
        category: Option<String>,
        image_urls: Option<Vec<String>>,
        pool: &PgPool,
    ) -> Result<Self> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                image_urls = COALESCE($5, image_urls),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(image_urls)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Update item status
    pub async fn update_status(id: ItemId, status: ItemStatus, pool: &PgPool) -> Result<Self> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Update status for a set of items inside a transaction (used when a
    /// match is accepted or an accepted match is unwound)
    pub async fn set_status_tx(
        ids: &[ItemId],
        status: ItemStatus,
        conn: &mut PgConnection,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = $2, updated_at = NOW()
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .bind(status.to_string())
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete an item by ID
    pub async fn delete(id: ItemId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
