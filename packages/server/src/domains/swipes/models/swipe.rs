use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ItemId, MemberId, SwipeId};
use crate::domains::items::models::Item;

/// Swipe - a single yes/no vote by a member on another member's item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Swipe {
    pub id: SwipeId,
    pub voter_id: MemberId,
    pub item_id: ItemId,
    pub direction: String, // 'left', 'right'
    pub created_at: DateTime<Utc>,
}

/// Swipe direction enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDirection::Left => write!(f, "left"),
            SwipeDirection::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for SwipeDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            _ => Err(anyhow::anyhow!("Invalid swipe direction: {}", s)),
        }
    }
}

/// Aggregate swipe counters for a member
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SwipeStats {
    pub given_left: i64,
    pub given_right: i64,
    pub received_right: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Swipe {
    /// Insert a swipe inside a transaction. A duplicate (voter, item) pair
    /// violates swipes_voter_item_key and surfaces as a database error.
    pub async fn create_tx(
        voter_id: MemberId,
        item_id: ItemId,
        direction: SwipeDirection,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let swipe = sqlx::query_as::<_, Swipe>(
            r#"
            INSERT INTO swipes (id, voter_id, item_id, direction)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(SwipeId::new())
        .bind(voter_id)
        .bind(item_id)
        .bind(direction.to_string())
        .fetch_one(conn)
        .await?;
        Ok(swipe)
    }

    /// Take a transaction-scoped advisory lock on the unordered member
    /// pair. Reciprocal detection only sees committed swipes, so two
    /// simultaneous right swipes between the same members could each miss
    /// the other and the pair would never match; the lock makes the second
    /// transaction wait until the first has committed its swipe.
    pub async fn lock_member_pair_tx(
        a: MemberId,
        b: MemberId,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(
                hashtext(LEAST($1::text, $2::text)),
                hashtext(GREATEST($1::text, $2::text))
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// The voter's item that the other owner has already right-swiped, if
    /// any. Earliest such swipe wins so reciprocal detection is
    /// deterministic when the other owner liked several of the voter's
    /// items.
    pub async fn find_reciprocal_liked_item_tx(
        other_owner_id: MemberId,
        voter_id: MemberId,
        conn: &mut PgConnection,
    ) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.* FROM swipes s
            JOIN items i ON i.id = s.item_id
            WHERE s.voter_id = $1
              AND s.direction = 'right'
              AND i.owner_id = $2
              AND i.status = 'available'
            ORDER BY s.created_at ASC
            LIMIT 1
            "#,
        )
        .bind(other_owner_id)
        .bind(voter_id)
        .fetch_optional(conn)
        .await?;
        Ok(item)
    }

    /// Delete a voter's swipe on an item inside a transaction, returning the
    /// removed row when one existed
    pub async fn delete_tx(
        voter_id: MemberId,
        item_id: ItemId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let swipe = sqlx::query_as::<_, Swipe>(
            "DELETE FROM swipes WHERE voter_id = $1 AND item_id = $2 RETURNING *",
        )
        .bind(voter_id)
        .bind(item_id)
        .fetch_optional(conn)
        .await?;
        Ok(swipe)
    }

    /// Aggregate counters: swipes the member has given by direction, plus
    /// right-swipes their items have received
    pub async fn stats_for_member(member_id: MemberId, pool: &PgPool) -> Result<SwipeStats> {
        let stats = sqlx::query_as::<_, SwipeStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM swipes
                 WHERE voter_id = $1 AND direction = 'left') AS given_left,
                (SELECT COUNT(*) FROM swipes
                 WHERE voter_id = $1 AND direction = 'right') AS given_right,
                (SELECT COUNT(*) FROM swipes s
                 JOIN items i ON i.id = s.item_id
                 WHERE i.owner_id = $1 AND s.direction = 'right') AS received_right
            "#,
        )
        .bind(member_id)
        .fetch_one(pool)
        .await?;
        Ok(stats)
    }

    /// Items the member has right-swiped, newest swipe first. Items tied up
    /// in a resolved match involving the member are excluded.
    pub async fn liked_items(member_id: MemberId, pool: &PgPool) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.* FROM swipes s
            JOIN items i ON i.id = s.item_id
            WHERE s.voter_id = $1
              AND s.direction = 'right'
              AND NOT EXISTS (
                  SELECT 1 FROM matches m
                  WHERE (m.item1_id = i.id OR m.item2_id = i.id)
                    AND m.status <> 'pending'
                    AND (m.user1_id = $1 OR m.user2_id = $1)
              )
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }
}
