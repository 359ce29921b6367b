use anyhow::Result;
use sqlx::PgPool;

use crate::common::MemberId;
use crate::domains::items::models::Item;

/// A discovery candidate: an item plus the owner fields ranking needs
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateRow {
    #[sqlx(flatten)]
    pub item: Item,
    pub owner_display_name: String,
    pub owner_latitude: f64,
    pub owner_longitude: f64,
    pub owner_rating: f64,
}

impl CandidateRow {
    /// All items eligible for a viewer's discovery feed: available, owned by
    /// someone else with a resolved location, and never swiped by the
    /// viewer. Distance ordering happens in the caller.
    pub async fn find_for_viewer(viewer_id: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT
                i.*,
                m.display_name AS owner_display_name,
                m.latitude AS owner_latitude,
                m.longitude AS owner_longitude,
                COALESCE(
                    (SELECT AVG(r.rating)::float8
                     FROM reviews r
                     WHERE r.subject_id = i.owner_id),
                    0.0
                ) AS owner_rating
            FROM items i
            JOIN members m ON m.id = i.owner_id
            WHERE i.owner_id <> $1
              AND i.status = 'available'
              AND m.latitude IS NOT NULL
              AND m.longitude IS NOT NULL
              AND NOT EXISTS (
                  SELECT 1 FROM swipes s
                  WHERE s.voter_id = $1 AND s.item_id = i.id
              )
            "#,
        )
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
