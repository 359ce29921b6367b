// Business logic for the match lifecycle: pending -> accepted | rejected.
//
// Resolution is a conditional update guarded on the pending status, so two
// racing resolutions cannot both succeed. Accepting flips both items to
// swapped in the same transaction.

use sqlx::PgPool;

use crate::common::{DomainError, DomainResult, MatchId, MemberId};
use crate::domains::items::models::{Item, ItemStatus};
use crate::domains::matches::models::{MatchStatus, SwapMatch};
use crate::domains::members::models::Member;

/// Accept a pending match. Both items become swapped atomically with the
/// status change, removing them from everyone's discovery feed.
pub async fn accept_match(
    member_id: MemberId,
    match_id: MatchId,
    pool: &PgPool,
) -> DomainResult<SwapMatch> {
    let mut tx = pool.begin().await?;

    let swap_match = require_participant_tx(member_id, match_id, &mut tx).await?;
    let resolved = match SwapMatch::resolve_tx(swap_match.id, MatchStatus::Accepted, &mut *tx)
        .await?
    {
        Some(resolved) => resolved,
        None => return Err(already_resolved_tx(match_id, &mut tx).await?),
    };

    Item::set_status_tx(
        &[resolved.item1_id, resolved.item2_id],
        ItemStatus::Swapped,
        &mut *tx,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(match_id = %match_id, member_id = %member_id, "Accepted match");
    Ok(resolved)
}

/// Reject a pending match. Items stay available; rejection is terminal.
pub async fn reject_match(
    member_id: MemberId,
    match_id: MatchId,
    pool: &PgPool,
) -> DomainResult<SwapMatch> {
    let mut tx = pool.begin().await?;

    let swap_match = require_participant_tx(member_id, match_id, &mut tx).await?;
    let resolved = match SwapMatch::resolve_tx(swap_match.id, MatchStatus::Rejected, &mut *tx)
        .await?
    {
        Some(resolved) => resolved,
        None => return Err(already_resolved_tx(match_id, &mut tx).await?),
    };

    tx.commit().await?;
    tracing::info!(match_id = %match_id, member_id = %member_id, "Rejected match");
    Ok(resolved)
}

/// All matches the member participates in, optionally filtered by status.
pub async fn matches_for_member(
    member_id: MemberId,
    status: Option<String>,
    pool: &PgPool,
) -> DomainResult<Vec<SwapMatch>> {
    if let Some(ref status) = status {
        status
            .parse::<MatchStatus>()
            .map_err(|_| DomainError::InvalidInput(format!("unknown match status: {status}")))?;
    }
    let matches = SwapMatch::find_for_member(member_id, status.as_deref(), pool).await?;
    Ok(matches)
}

/// Load both items and participant display names for API responses.
pub struct MatchDetails {
    pub item1: Item,
    pub item2: Item,
    pub user1_name: String,
    pub user2_name: String,
}

pub async fn match_details(swap_match: &SwapMatch, pool: &PgPool) -> DomainResult<MatchDetails> {
    let item1 = Item::find_by_id(swap_match.item1_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Item"))?;
    let item2 = Item::find_by_id(swap_match.item2_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Item"))?;
    let user1 = Member::find_by_id(swap_match.user1_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Member"))?;
    let user2 = Member::find_by_id(swap_match.user2_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Member"))?;
    Ok(MatchDetails {
        item1,
        item2,
        user1_name: user1.display_name,
        user2_name: user2.display_name,
    })
}

/// The guarded update found no pending row. Re-read so the error carries
/// the status the match actually has, not the one read before the update.
async fn already_resolved_tx(
    match_id: MatchId,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> DomainResult<DomainError> {
    let current = SwapMatch::find_by_id_tx(match_id, &mut **tx)
        .await?
        .ok_or(DomainError::NotFound("Match"))?;
    Ok(DomainError::MatchResolved(current.status))
}

async fn require_participant_tx(
    member_id: MemberId,
    match_id: MatchId,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> DomainResult<SwapMatch> {
    let swap_match = SwapMatch::find_by_id_tx(match_id, &mut **tx)
        .await?
        .ok_or(DomainError::NotFound("Match"))?;
    if !swap_match.involves(member_id) {
        return Err(DomainError::Forbidden(
            "not a participant in this match".to_string(),
        ));
    }
    Ok(swap_match)
}
