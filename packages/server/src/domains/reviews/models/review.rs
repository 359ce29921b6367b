use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, ReviewId};

/// Review - post-swap feedback one member leaves about another
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub reviewer_id: MemberId,
    pub subject_id: MemberId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Review {
    /// Create a review
    pub async fn create(
        reviewer_id: MemberId,
        subject_id: MemberId,
        rating: i32,
        comment: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, reviewer_id, subject_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ReviewId::new())
        .bind(reviewer_id)
        .bind(subject_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(pool)
        .await?;
        Ok(review)
    }

    /// Reviews about a member, newest first
    pub async fn find_for_subject(subject_id: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE subject_id = $1 ORDER BY created_at DESC",
        )
        .bind(subject_id)
        .fetch_all(pool)
        .await?;
        Ok(reviews)
    }

    /// Average rating for a member, None when they have no reviews
    pub async fn average_for_subject(subject_id: MemberId, pool: &PgPool) -> Result<Option<f64>> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE subject_id = $1")
                .bind(subject_id)
                .fetch_one(pool)
                .await?;
        Ok(avg)
    }

    /// Whether two members share an accepted match
    pub async fn has_accepted_match_between(
        member_a: MemberId,
        member_b: MemberId,
        pool: &PgPool,
    ) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM matches
                WHERE status = 'accepted'
                  AND ((user1_id = $1 AND user2_id = $2)
                    OR (user1_id = $2 AND user2_id = $1))
            )
            "#,
        )
        .bind(member_a)
        .bind(member_b)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
