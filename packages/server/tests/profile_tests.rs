//! Member profile and liked-items tests.

mod common;

use std::sync::Arc;

use test_context::test_context;

use crate::common::fixtures::{item_for, member_at, member_without_location};
use crate::common::TestHarness;
use server_core::common::utils::GeocodingClient;
use server_core::common::DomainError;
use server_core::domains::matches::effects::match_operations;
use server_core::domains::members::effects::profile_operations;
use server_core::domains::members::models::Member;
use server_core::domains::swipes::effects::swipe_operations;
use server_core::domains::swipes::models::SwipeDirection;

fn dead_geocoder() -> Arc<GeocodingClient> {
    // Unroutable address so resolution fails without the network
    Arc::new(GeocodingClient::new("http://127.0.0.1:9".to_string()))
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_postcode_resolution_writes_nothing(ctx: &TestHarness) {
    let ada = member_without_location(&ctx.db_pool, "Ada").await;

    let err = profile_operations::update_profile(
        ada.id,
        Some("Ada L".to_string()),
        None,
        Some("00100".to_string()),
        &dead_geocoder(),
        &ctx.db_pool,
    )
    .await
    .expect_err("geocoder is down");
    assert!(matches!(err, DomainError::UpstreamUnavailable(_)));

    // The failed resolution must leave the whole row untouched: no
    // coordinates, no postcode, and no half-applied name change
    let reloaded = Member::find_by_id(ada.id, &ctx.db_pool)
        .await
        .expect("fetch")
        .expect("member exists");
    assert!(reloaded.latitude.is_none());
    assert!(reloaded.longitude.is_none());
    assert!(reloaded.postcode.is_none());
    assert_eq!(reloaded.display_name, "Ada");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn profile_update_validates_display_name(ctx: &TestHarness) {
    let ada = member_without_location(&ctx.db_pool, "Ada").await;

    let err = profile_operations::update_profile(
        ada.id,
        Some("  ".to_string()),
        None,
        None,
        &dead_geocoder(),
        &ctx.db_pool,
    )
    .await
    .expect_err("blank name");
    assert!(matches!(err, DomainError::InvalidInput(_)));

    let updated = profile_operations::update_profile(
        ada.id,
        Some("Ada Lovelace".to_string()),
        Some("https://img.test.example/ada.jpg".to_string()),
        None,
        &dead_geocoder(),
        &ctx.db_pool,
    )
    .await
    .expect("valid update");
    assert_eq!(updated.display_name, "Ada Lovelace");
    assert_eq!(
        updated.image_url.as_deref(),
        Some("https://img.test.example/ada.jpg")
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn liked_items_exclude_resolved_matches(ctx: &TestHarness) {
    let ada = member_at(&ctx.db_pool, "Ada", 60.17, 24.94).await;
    let bo = member_at(&ctx.db_pool, "Bo", 60.18, 24.95).await;
    let bike = item_for(&ctx.db_pool, &bo, "Bike").await;
    let lamp = item_for(&ctx.db_pool, &ada, "Lamp").await;

    swipe_operations::record_swipe(ada.id, bike.id, SwipeDirection::Right, &ctx.db_pool)
        .await
        .expect("swipe");
    let liked = swipe_operations::liked_items(ada.id, &ctx.db_pool)
        .await
        .expect("liked");
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].title, "Bike");

    // A pending match keeps the item in the liked list
    let outcome =
        swipe_operations::record_swipe(bo.id, lamp.id, SwipeDirection::Right, &ctx.db_pool)
            .await
            .expect("reciprocal swipe");
    let swap_match = outcome.matched.expect("match");
    let liked = swipe_operations::liked_items(ada.id, &ctx.db_pool)
        .await
        .expect("liked");
    assert_eq!(liked.len(), 1);

    // Acceptance resolves the match and removes the item from the list
    match_operations::accept_match(ada.id, swap_match.id, &ctx.db_pool)
        .await
        .expect("accept");
    let liked = swipe_operations::liked_items(ada.id, &ctx.db_pool)
        .await
        .expect("liked");
    assert!(liked.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn graphql_profile_defaults_to_viewer(ctx: &TestHarness) {
    let ada = member_at(&ctx.db_pool, "Ada", 60.17, 24.94).await;

    let client = ctx.graphql_as(ada.id);
    let result = client
        .execute("query { profile { displayName latitude longitude } }")
        .await;
    assert!(result.is_ok(), "query failed: {:?}", result.errors);
    assert_eq!(result.get("profile.displayName"), "Ada");
    assert!(result.get("profile.latitude").as_f64().is_some());

    let anonymous = ctx.graphql();
    let result = anonymous.execute("query { profile { displayName } }").await;
    assert!(!result.is_ok());
    assert!(result.errors[0].contains("Authentication required"));
}
