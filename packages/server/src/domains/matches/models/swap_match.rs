use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ItemId, MatchId, MemberId};

/// SwapMatch - a mutual-interest pairing of two items and their owners
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SwapMatch {
    pub id: MatchId,
    pub item1_id: ItemId,
    pub item2_id: ItemId,
    pub user1_id: MemberId,
    pub user2_id: MemberId,
    pub status: String, // 'pending', 'accepted', 'rejected'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Match status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Accepted => write!(f, "accepted"),
            MatchStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid match status: {}", s)),
        }
    }
}

impl SwapMatch {
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.user1_id == member_id || self.user2_id == member_id
    }

    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Pending.to_string()
    }

    pub fn is_accepted(&self) -> bool {
        self.status == MatchStatus::Accepted.to_string()
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl SwapMatch {
    /// Insert a match inside a transaction. Returns None when the unordered
    /// item pair already has a match (a concurrent detection won the race).
    pub async fn create_tx(
        item1_id: ItemId,
        item2_id: ItemId,
        user1_id: MemberId,
        user2_id: MemberId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let swap_match = sqlx::query_as::<_, SwapMatch>(
            r#"
            INSERT INTO matches (id, item1_id, item2_id, user1_id, user2_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ((LEAST(item1_id, item2_id)), (GREATEST(item1_id, item2_id)))
                DO NOTHING
            RETURNING *
            "#,
        )
        .bind(MatchId::new())
        .bind(item1_id)
        .bind(item2_id)
        .bind(user1_id)
        .bind(user2_id)
        .fetch_optional(conn)
        .await?;
        Ok(swap_match)
    }

    /// Find match by ID
    pub async fn find_by_id(id: MatchId, pool: &PgPool) -> Result<Option<Self>> {
        let swap_match = sqlx::query_as::<_, SwapMatch>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(swap_match)
    }

    /// Find match by ID inside a transaction
    pub async fn find_by_id_tx(id: MatchId, conn: &mut PgConnection) -> Result<Option<Self>> {
        let swap_match = sqlx::query_as::<_, SwapMatch>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(swap_match)
    }

    /// All matches a member participates in, optionally filtered by status,
    /// newest first
    pub async fn find_for_member(
        member_id: MemberId,
        status: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let matches = sqlx::query_as::<_, SwapMatch>(
            r#"
            SELECT * FROM matches
            WHERE (user1_id = $1 OR user2_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(member_id)
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(matches)
    }

    /// Every match referencing an item on either side, inside a transaction
    pub async fn find_by_item_tx(item_id: ItemId, conn: &mut PgConnection) -> Result<Vec<Self>> {
        let matches = sqlx::query_as::<_, SwapMatch>(
            "SELECT * FROM matches WHERE item1_id = $1 OR item2_id = $1",
        )
        .bind(item_id)
        .fetch_all(conn)
        .await?;
        Ok(matches)
    }

    /// Move a pending match to a terminal status inside a transaction.
    /// Returns None when the match was already resolved, so racing accepts
    /// and rejects cannot both win.
    pub async fn resolve_tx(
        id: MatchId,
        status: MatchStatus,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let swap_match = sqlx::query_as::<_, SwapMatch>(
            r#"
            UPDATE matches
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(conn)
        .await?;
        Ok(swap_match)
    }

    /// Delete a match inside a transaction (swipe retraction unwinds it)
    pub async fn delete_tx(id: MatchId, conn: &mut PgConnection) -> Result<()> {
        sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
