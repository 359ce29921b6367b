use juniper::GraphQLObject;

use crate::domains::swipes::models::SwipeStats;

/// GraphQL result of a swipe mutation
#[derive(Debug, Clone, GraphQLObject)]
pub struct SwipeResultData {
    pub success: bool,
}

/// GraphQL type for a member's swipe counters
#[derive(Debug, Clone, GraphQLObject)]
pub struct SwipeStatsData {
    pub given_left: i32,
    pub given_right: i32,
    pub received_right: i32,
}

impl From<SwipeStats> for SwipeStatsData {
    fn from(stats: SwipeStats) -> Self {
        Self {
            given_left: stats.given_left as i32,
            given_right: stats.given_right as i32,
            received_right: stats.received_right as i32,
        }
    }
}
