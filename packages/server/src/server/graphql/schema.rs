//! GraphQL schema definition.

use juniper::{graphql_object, graphql_value, EmptySubscription, FieldError, FieldResult, RootNode};
use uuid::Uuid;

use super::context::GraphQLContext;
use crate::common::{DomainError, ItemId, MatchId, MemberId};
use crate::domains::discovery::data::RankedItemData;
use crate::domains::discovery::effects::ranking;
use crate::domains::items::data::{CreateItemInput, ItemData, UpdateItemInput};
use crate::domains::items::effects::item_operations;
use crate::domains::matches::data::MatchData;
use crate::domains::matches::effects::match_operations;
use crate::domains::members::data::{MemberData, UpdateProfileInput};
use crate::domains::members::effects::profile_operations;
use crate::domains::reviews::data::{LeaveReviewInput, ReviewData};
use crate::domains::reviews::effects::review_operations;
use crate::domains::swipes::data::{SwipeResultData, SwipeStatsData};
use crate::domains::swipes::effects::swipe_operations;
use crate::domains::swipes::models::SwipeDirection;

/// Convert a domain error into a FieldError carrying the stable code
/// extension clients switch on.
fn to_field_error(e: DomainError) -> FieldError {
    let code = e.code();
    FieldError::new(e.to_string(), graphql_value!({ "code": code }))
}

/// The authenticated member, or an auth error for anonymous requests
fn require_auth(context: &GraphQLContext) -> FieldResult<MemberId> {
    context.member_id().ok_or_else(|| {
        FieldError::new(
            "Authentication required",
            graphql_value!({ "code": "FORBIDDEN" }),
        )
    })
}

pub struct Query;

#[graphql_object(context = GraphQLContext)]
impl Query {
    /// A member profile; defaults to the authenticated member
    async fn profile(context: &GraphQLContext, id: Option<Uuid>) -> FieldResult<MemberData> {
        let member_id = match id {
            Some(id) => MemberId::from_uuid(id),
            None => require_auth(context)?,
        };
        let member = profile_operations::get_profile(member_id, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(member.into())
    }

    /// Items owned by a member, defaults to the authenticated member
    async fn user_items(
        context: &GraphQLContext,
        user_id: Option<Uuid>,
        status: Option<String>,
    ) -> FieldResult<Vec<ItemData>> {
        let owner_id = match user_id {
            Some(id) => MemberId::from_uuid(id),
            None => require_auth(context)?,
        };
        let items = item_operations::items_for_member(owner_id, status, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// The discovery feed, nearest owners first
    async fn items_on_location(
        context: &GraphQLContext,
        limit: Option<i32>,
    ) -> FieldResult<Vec<RankedItemData>> {
        let viewer_id = require_auth(context)?;
        let ranked = ranking::rank_candidates(viewer_id, limit, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(ranked.into_iter().map(Into::into).collect())
    }

    /// Distance in meters to an item's owner, null when unknown
    async fn item_distance(context: &GraphQLContext, item_id: Uuid) -> FieldResult<Option<f64>> {
        let viewer_id = require_auth(context)?;
        let distance =
            ranking::item_distance(viewer_id, ItemId::from_uuid(item_id), &context.pool)
                .await
                .map_err(to_field_error)?;
        Ok(distance)
    }

    /// Swipe counters for a member, defaults to the authenticated member
    async fn swipe_stats(
        context: &GraphQLContext,
        user_id: Option<Uuid>,
    ) -> FieldResult<SwipeStatsData> {
        let member_id = match user_id {
            Some(id) => MemberId::from_uuid(id),
            None => require_auth(context)?,
        };
        let stats = swipe_operations::swipe_stats(member_id, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(stats.into())
    }

    /// Items the authenticated member has right-swiped
    async fn liked_items(context: &GraphQLContext) -> FieldResult<Vec<ItemData>> {
        let member_id = require_auth(context)?;
        let items = swipe_operations::liked_items(member_id, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Matches the authenticated member participates in
    async fn matches(
        context: &GraphQLContext,
        status: Option<String>,
    ) -> FieldResult<Vec<MatchData>> {
        let member_id = require_auth(context)?;
        let matches = match_operations::matches_for_member(member_id, status, &context.pool)
            .await
            .map_err(to_field_error)?;

        let mut out = Vec::with_capacity(matches.len());
        for swap_match in matches {
            let details = match_operations::match_details(&swap_match, &context.pool)
                .await
                .map_err(to_field_error)?;
            out.push(MatchData::from_parts(swap_match, details));
        }
        Ok(out)
    }

    /// Reviews left about a member
    async fn reviews_for(context: &GraphQLContext, user_id: Uuid) -> FieldResult<Vec<ReviewData>> {
        let reviews =
            review_operations::reviews_for_member(MemberId::from_uuid(user_id), &context.pool)
                .await
                .map_err(to_field_error)?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }

    /// Resolve a postcode to its city name via the geocoder
    async fn city_from_postcode(context: &GraphQLContext, postcode: String) -> FieldResult<String> {
        let city = context
            .geocoder
            .city_from_postcode(&postcode)
            .await
            .map_err(to_field_error)?;
        Ok(city)
    }
}

pub struct Mutation;

#[graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Update the authenticated member's profile
    async fn update_profile(
        context: &GraphQLContext,
        input: UpdateProfileInput,
    ) -> FieldResult<MemberData> {
        let member_id = require_auth(context)?;
        let member = profile_operations::update_profile(
            member_id,
            input.display_name,
            input.image_url,
            input.postcode,
            &context.geocoder,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(member.into())
    }

    /// List a new item for swapping
    async fn create_item(
        context: &GraphQLContext,
        input: CreateItemInput,
    ) -> FieldResult<ItemData> {
        let member_id = require_auth(context)?;
        let item = item_operations::create_item(
            member_id,
            input.title,
            input.description,
            input.category,
            input.image_urls,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(item.into())
    }

    /// Edit an item's content
    async fn update_item(
        context: &GraphQLContext,
        item_id: Uuid,
        input: UpdateItemInput,
    ) -> FieldResult<ItemData> {
        let member_id = require_auth(context)?;
        let item = item_operations::update_item(
            member_id,
            ItemId::from_uuid(item_id),
            input.title,
            input.description,
            input.category,
            input.image_urls,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(item.into())
    }

    /// Delete an item
    async fn delete_item(context: &GraphQLContext, item_id: Uuid) -> FieldResult<bool> {
        let member_id = require_auth(context)?;
        item_operations::delete_item(member_id, ItemId::from_uuid(item_id), &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(true)
    }

    /// Hide or unhide an item
    async fn toggle_item_visibility(
        context: &GraphQLContext,
        item_id: Uuid,
        hidden: bool,
    ) -> FieldResult<ItemData> {
        let member_id = require_auth(context)?;
        let item = item_operations::set_item_visibility(
            member_id,
            ItemId::from_uuid(item_id),
            hidden,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(item.into())
    }

    /// Vote on another member's item
    async fn swipe_item(
        context: &GraphQLContext,
        item_id: Uuid,
        direction: String,
    ) -> FieldResult<SwipeResultData> {
        let member_id = require_auth(context)?;
        let direction: SwipeDirection = direction.parse().map_err(|_| {
            to_field_error(DomainError::InvalidInput(
                "direction must be 'left' or 'right'".to_string(),
            ))
        })?;
        swipe_operations::record_swipe(
            member_id,
            ItemId::from_uuid(item_id),
            direction,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(SwipeResultData { success: true })
    }

    /// Retract a swipe, unwinding any match it produced
    async fn unlike_item(context: &GraphQLContext, item_id: Uuid) -> FieldResult<bool> {
        let member_id = require_auth(context)?;
        swipe_operations::remove_swipe(member_id, ItemId::from_uuid(item_id), &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(true)
    }

    /// Accept a pending match, marking both items swapped
    async fn accept_match(context: &GraphQLContext, match_id: Uuid) -> FieldResult<MatchData> {
        let member_id = require_auth(context)?;
        let swap_match =
            match_operations::accept_match(member_id, MatchId::from_uuid(match_id), &context.pool)
                .await
                .map_err(to_field_error)?;
        let details = match_operations::match_details(&swap_match, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(MatchData::from_parts(swap_match, details))
    }

    /// Reject a pending match
    async fn reject_match(context: &GraphQLContext, match_id: Uuid) -> FieldResult<MatchData> {
        let member_id = require_auth(context)?;
        let swap_match =
            match_operations::reject_match(member_id, MatchId::from_uuid(match_id), &context.pool)
                .await
                .map_err(to_field_error)?;
        let details = match_operations::match_details(&swap_match, &context.pool)
            .await
            .map_err(to_field_error)?;
        Ok(MatchData::from_parts(swap_match, details))
    }

    /// Leave a review about a swap partner
    async fn leave_review(
        context: &GraphQLContext,
        input: LeaveReviewInput,
    ) -> FieldResult<ReviewData> {
        let member_id = require_auth(context)?;
        let review = review_operations::leave_review(
            member_id,
            MemberId::from_uuid(input.subject_id),
            input.rating,
            input.comment,
            &context.pool,
        )
        .await
        .map_err(to_field_error)?;
        Ok(review.into())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_carry_stable_codes() {
        let err = to_field_error(DomainError::DuplicateSwipe);
        assert_eq!(
            err.extensions(),
            &graphql_value!({ "code": "DUPLICATE_SWIPE" })
        );

        let err = to_field_error(DomainError::LocationRequired);
        assert_eq!(
            err.extensions(),
            &graphql_value!({ "code": "LOCATION_REQUIRED" })
        );
    }
}
