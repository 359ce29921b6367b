use juniper::GraphQLObject;

use crate::domains::discovery::effects::ranking::RankedCandidate;
use crate::domains::items::data::ItemData;

/// GraphQL type for a discovery feed entry
#[derive(Debug, Clone, GraphQLObject)]
pub struct RankedItemData {
    pub item: ItemData,
    pub owner_display_name: String,
    pub distance_meters: f64,
    pub owner_rating: f64,
}

impl From<RankedCandidate> for RankedItemData {
    fn from(candidate: RankedCandidate) -> Self {
        Self {
            item: candidate.item.into(),
            owner_display_name: candidate.owner_display_name,
            distance_meters: candidate.distance_meters,
            owner_rating: candidate.owner_rating,
        }
    }
}
