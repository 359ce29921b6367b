// Business logic for swiping and reciprocal-match detection.
//
// Everything that must hold under concurrent voters runs in a single
// transaction: the swipe insert, the reciprocal lookup, and the match
// insert. Uniqueness races land on database constraints and are translated
// into domain errors.

use sqlx::PgPool;

use crate::common::errors::is_unique_violation;
use crate::common::{DomainError, DomainResult, ItemId, MemberId};
use crate::domains::items::models::{Item, ItemStatus};
use crate::domains::matches::models::SwapMatch;
use crate::domains::swipes::models::{Swipe, SwipeDirection, SwipeStats};

/// Result of recording a swipe: the swipe itself plus the match created
/// when the vote completed a reciprocal pair.
#[derive(Debug)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    pub matched: Option<SwapMatch>,
}

/// Record a vote on another member's item. A right swipe that completes a
/// reciprocal pair creates a pending match atomically with the swipe.
pub async fn record_swipe(
    voter_id: MemberId,
    item_id: ItemId,
    direction: SwipeDirection,
    pool: &PgPool,
) -> DomainResult<SwipeOutcome> {
    let mut tx = pool.begin().await?;

    let item = Item::find_by_id_tx(item_id, &mut *tx)
        .await?
        .ok_or(DomainError::NotFound("Item"))?;
    if item.owner_id == voter_id {
        return Err(DomainError::Forbidden(
            "cannot swipe on your own item".to_string(),
        ));
    }
    if !item.is_available() {
        return Err(DomainError::ItemUnavailable);
    }

    if direction == SwipeDirection::Right {
        // Detection must run against the other side's committed swipe;
        // without this lock two simultaneous right swipes can each find
        // nothing and the pair is never matched.
        Swipe::lock_member_pair_tx(voter_id, item.owner_id, &mut *tx).await?;
    }

    let swipe = match Swipe::create_tx(voter_id, item_id, direction, &mut *tx).await {
        Ok(swipe) => swipe,
        Err(err) if is_unique_violation(&err, "swipes_voter_item_key") => {
            return Err(DomainError::DuplicateSwipe);
        }
        Err(err) => return Err(err.into()),
    };

    let mut matched = None;
    if direction == SwipeDirection::Right {
        let reciprocal =
            Swipe::find_reciprocal_liked_item_tx(item.owner_id, voter_id, &mut *tx).await?;
        if let Some(own_item) = reciprocal {
            // The unordered pair index is the backstop: if the pair somehow
            // already has a match, insert nothing instead of a second row.
            matched =
                SwapMatch::create_tx(own_item.id, item.id, voter_id, item.owner_id, &mut *tx)
                    .await?;
            if let Some(ref swap_match) = matched {
                tracing::info!(
                    match_id = %swap_match.id,
                    item1_id = %swap_match.item1_id,
                    item2_id = %swap_match.item2_id,
                    "Reciprocal swipes produced a match"
                );
            }
        }
    }

    tx.commit().await?;
    Ok(SwipeOutcome { swipe, matched })
}

/// Retract a swipe. Every match referencing the item goes with it, in any
/// status; unwinding an accepted match returns both of its items to
/// available.
pub async fn remove_swipe(
    voter_id: MemberId,
    item_id: ItemId,
    pool: &PgPool,
) -> DomainResult<()> {
    let mut tx = pool.begin().await?;

    let swipe = Swipe::delete_tx(voter_id, item_id, &mut *tx)
        .await?
        .ok_or(DomainError::NotFound("Swipe"))?;

    if swipe.direction == SwipeDirection::Right.to_string() {
        let matches = SwapMatch::find_by_item_tx(item_id, &mut *tx).await?;
        for swap_match in matches {
            if swap_match.is_accepted() {
                Item::set_status_tx(
                    &[swap_match.item1_id, swap_match.item2_id],
                    ItemStatus::Available,
                    &mut *tx,
                )
                .await?;
            }
            SwapMatch::delete_tx(swap_match.id, &mut *tx).await?;
            tracing::info!(
                match_id = %swap_match.id,
                voter_id = %voter_id,
                "Removed match after swipe retraction"
            );
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Aggregate swipe counters for a member.
pub async fn swipe_stats(member_id: MemberId, pool: &PgPool) -> DomainResult<SwipeStats> {
    let stats = Swipe::stats_for_member(member_id, pool).await?;
    Ok(stats)
}

/// Items the member has right-swiped that are still available.
pub async fn liked_items(member_id: MemberId, pool: &PgPool) -> DomainResult<Vec<Item>> {
    let items = Swipe::liked_items(member_id, pool).await?;
    Ok(items)
}
