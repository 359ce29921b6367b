// Business logic for member profiles, separated from the GraphQL edge.

use sqlx::PgPool;

use crate::common::utils::GeocodingClient;
use crate::common::{DomainError, DomainResult, MemberId};
use crate::domains::members::models::Member;

/// Fetch a member's profile.
pub async fn get_profile(member_id: MemberId, pool: &PgPool) -> DomainResult<Member> {
    Member::find_by_id(member_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Member"))
}

/// Update profile fields. A postcode is resolved through the external
/// geocoder before anything is written; a failed resolution aborts the whole
/// update rather than storing sentinel coordinates.
pub async fn update_profile(
    member_id: MemberId,
    display_name: Option<String>,
    image_url: Option<String>,
    postcode: Option<String>,
    geocoder: &GeocodingClient,
    pool: &PgPool,
) -> DomainResult<Member> {
    if Member::find_by_id(member_id, pool).await?.is_none() {
        return Err(DomainError::NotFound("Member"));
    }

    if let Some(ref name) = display_name {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "display name must not be empty".to_string(),
            ));
        }
    }

    // Resolve before writing anything; a geocoder failure must leave the
    // row untouched, name and avatar included.
    let location = match postcode {
        Some(postcode) => {
            let resolved = geocoder.postcode_to_coords(&postcode).await?;
            tracing::info!(
                member_id = %member_id,
                latitude = resolved.latitude,
                longitude = resolved.longitude,
                "Resolved member postcode"
            );
            Some((
                postcode.trim().to_string(),
                resolved.latitude,
                resolved.longitude,
            ))
        }
        None => None,
    };

    let member =
        Member::update_profile(member_id, display_name, image_url, location, pool).await?;
    Ok(member)
}
