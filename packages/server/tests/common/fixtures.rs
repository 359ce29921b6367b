//! Shared test fixtures.

use sqlx::PgPool;
use uuid::Uuid;

use server_core::domains::items::models::Item;
use server_core::domains::members::models::Member;

/// Create a member with a resolved location.
pub async fn member_at(pool: &PgPool, name: &str, lat: f64, lon: f64) -> Member {
    let email = format!("{}-{}@test.example", name.to_lowercase(), Uuid::new_v4());
    let member = Member::find_or_create(name.to_string(), email, None, pool)
        .await
        .expect("create member");
    Member::update_location(member.id, "00100", lat, lon, pool)
        .await
        .expect("set member location")
}

/// Create a member without coordinates.
pub async fn member_without_location(pool: &PgPool, name: &str) -> Member {
    let email = format!("{}-{}@test.example", name.to_lowercase(), Uuid::new_v4());
    Member::find_or_create(name.to_string(), email, None, pool)
        .await
        .expect("create member")
}

/// Create an available item owned by the given member.
pub async fn item_for(pool: &PgPool, owner: &Member, title: &str) -> Item {
    Item::create(
        owner.id,
        title.to_string(),
        format!("{} in decent shape", title),
        "general".to_string(),
        vec!["https://img.test.example/a.jpg".to_string()],
        pool,
    )
    .await
    .expect("create item")
}
