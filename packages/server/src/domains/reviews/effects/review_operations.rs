// Business logic for post-swap reviews.

use sqlx::PgPool;

use crate::common::{DomainError, DomainResult, MemberId};
use crate::domains::members::models::Member;
use crate::domains::reviews::models::Review;

/// Leave a review about a swap partner. The pair must share an accepted
/// match; ratings outside 1..=5 are rejected before hitting the database.
pub async fn leave_review(
    reviewer_id: MemberId,
    subject_id: MemberId,
    rating: i32,
    comment: Option<String>,
    pool: &PgPool,
) -> DomainResult<Review> {
    if reviewer_id == subject_id {
        return Err(DomainError::InvalidInput(
            "cannot review yourself".to_string(),
        ));
    }
    if !(1..=5).contains(&rating) {
        return Err(DomainError::InvalidInput(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    if Member::find_by_id(subject_id, pool).await?.is_none() {
        return Err(DomainError::NotFound("Member"));
    }
    if !Review::has_accepted_match_between(reviewer_id, subject_id, pool).await? {
        return Err(DomainError::Forbidden(
            "reviews require a completed swap with this member".to_string(),
        ));
    }

    let review = Review::create(reviewer_id, subject_id, rating, comment, pool).await?;
    tracing::info!(
        review_id = %review.id,
        reviewer_id = %reviewer_id,
        subject_id = %subject_id,
        rating,
        "Created review"
    );
    Ok(review)
}

/// Reviews left about a member, newest first.
pub async fn reviews_for_member(subject_id: MemberId, pool: &PgPool) -> DomainResult<Vec<Review>> {
    let reviews = Review::find_for_subject(subject_id, pool).await?;
    Ok(reviews)
}

/// Average rating across a member's reviews, None without any.
pub async fn average_rating(subject_id: MemberId, pool: &PgPool) -> DomainResult<Option<f64>> {
    let avg = Review::average_for_subject(subject_id, pool).await?;
    Ok(avg)
}
