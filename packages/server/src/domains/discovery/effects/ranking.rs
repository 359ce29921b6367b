// Business logic for the discovery feed: eligibility is decided in SQL,
// distance ordering in Rust.

use std::cmp::Ordering;

use sqlx::PgPool;

use crate::common::utils::{distance_meters, haversine_meters};
use crate::common::{DomainResult, ItemId, MemberId};
use crate::domains::discovery::models::CandidateRow;
use crate::domains::items::models::Item;
use crate::domains::members::models::Member;

const DEFAULT_FEED_LIMIT: usize = 50;

/// A feed entry: the item, how far away its owner is, and the owner's
/// average review rating.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub item: Item,
    pub owner_display_name: String,
    pub distance_meters: f64,
    pub owner_rating: f64,
}

/// Build a viewer's discovery feed, nearest owner first. Ties on distance
/// fall back to newest item first. A viewer without a resolved location
/// gets an empty feed; items whose owner has no location never appear.
pub async fn rank_candidates(
    viewer_id: MemberId,
    limit: Option<i32>,
    pool: &PgPool,
) -> DomainResult<Vec<RankedCandidate>> {
    let viewer = Member::find_by_id(viewer_id, pool).await?;
    let Some((viewer_lat, viewer_lon)) = viewer.and_then(|m| m.coords()) else {
        return Ok(Vec::new());
    };

    let rows = CandidateRow::find_for_viewer(viewer_id, pool).await?;
    let mut ranked: Vec<RankedCandidate> = rows
        .into_iter()
        .map(|row| {
            let distance = haversine_meters(
                viewer_lat,
                viewer_lon,
                row.owner_latitude,
                row.owner_longitude,
            );
            RankedCandidate {
                item: row.item,
                owner_display_name: row.owner_display_name,
                distance_meters: distance,
                owner_rating: row.owner_rating,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_meters
            .partial_cmp(&b.distance_meters)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.item.created_at.cmp(&a.item.created_at))
    });

    let limit = limit
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_FEED_LIMIT);
    ranked.truncate(limit);
    Ok(ranked)
}

/// Distance in meters between the viewer and an item's owner, None when
/// either side lacks coordinates.
pub async fn item_distance(
    viewer_id: MemberId,
    item_id: ItemId,
    pool: &PgPool,
) -> DomainResult<Option<f64>> {
    let viewer_coords = Member::find_by_id(viewer_id, pool)
        .await?
        .and_then(|m| m.coords());

    let Some(item) = Item::find_by_id(item_id, pool).await? else {
        return Ok(None);
    };
    let owner_coords = Member::find_by_id(item.owner_id, pool)
        .await?
        .and_then(|m| m.coords());

    Ok(distance_meters(viewer_coords, owner_coords))
}
