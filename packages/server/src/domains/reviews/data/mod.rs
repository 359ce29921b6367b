use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::reviews::models::Review;

/// GraphQL type for a review
#[derive(Debug, Clone, GraphQLObject)]
pub struct ReviewData {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub subject_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewData {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into_uuid(),
            reviewer_id: review.reviewer_id.into_uuid(),
            subject_id: review.subject_id.into_uuid(),
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Input for leaving a review about a swap partner
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct LeaveReviewInput {
    pub subject_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}
