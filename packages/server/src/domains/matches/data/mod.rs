use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use uuid::Uuid;

use crate::domains::items::data::ItemData;
use crate::domains::matches::effects::match_operations::MatchDetails;
use crate::domains::matches::models::SwapMatch;

/// GraphQL type for a match, with both paired items and participant names
/// embedded
#[derive(Debug, Clone, GraphQLObject)]
pub struct MatchData {
    pub id: Uuid,
    pub item1: ItemData,
    pub item2: ItemData,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub user1_name: String,
    pub user2_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl MatchData {
    pub fn from_parts(swap_match: SwapMatch, details: MatchDetails) -> Self {
        Self {
            id: swap_match.id.into_uuid(),
            item1: details.item1.into(),
            item2: details.item2.into(),
            user1_id: swap_match.user1_id.into_uuid(),
            user2_id: swap_match.user2_id.into_uuid(),
            user1_name: details.user1_name,
            user2_name: details.user2_name,
            status: swap_match.status,
            created_at: swap_match.created_at,
        }
    }
}
