use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::MemberId;

/// Member - a registered user of the marketplace
///
/// Created on first sign-in through the external identity provider; the
/// location pair is resolved from a postcode and is either fully present or
/// fully absent (enforced by a table constraint).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Resolved coordinates, if any.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(member)
    }

    /// Create a member on first sign-in. Returns the existing row when the
    /// email is already registered (repeat sign-ins are a no-op).
    pub async fn find_or_create(
        display_name: String,
        email: String,
        image_url: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, display_name, email, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(MemberId::new())
        .bind(display_name)
        .bind(email)
        .bind(image_url)
        .fetch_one(pool)
        .await?;
        Ok(member)
    }

    /// Update profile fields (name, avatar, resolved location) in a single
    /// statement, so a caller either persists the whole update or none of it.
    pub async fn update_profile(
        id: MemberId,
        display_name: Option<String>,
        image_url: Option<String>,
        location: Option<(String, f64, f64)>,
        pool: &PgPool,
    ) -> Result<Self> {
        let (postcode, latitude, longitude) = match &location {
            Some((postcode, latitude, longitude)) => {
                (Some(postcode.as_str()), Some(*latitude), Some(*longitude))
            }
            None => (None, None, None),
        };
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET
                display_name = COALESCE($2, display_name),
                image_url = COALESCE($3, image_url),
                postcode = COALESCE($4, postcode),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(display_name)
        .bind(image_url)
        .bind(postcode)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(pool)
        .await?;
        Ok(member)
    }

    /// Store a resolved location. Coordinates come from the geocoder; a
    /// failed resolution never reaches this method.
    pub async fn update_location(
        id: MemberId,
        postcode: &str,
        latitude: f64,
        longitude: f64,
        pool: &PgPool,
    ) -> Result<Self> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET postcode = $2, latitude = $3, longitude = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(postcode)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(pool)
        .await?;
        Ok(member)
    }
}
