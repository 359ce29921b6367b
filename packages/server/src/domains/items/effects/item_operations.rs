// Business logic for item listings.

use sqlx::PgPool;
use url::Url;

use crate::common::{DomainError, DomainResult, ItemId, MemberId};
use crate::domains::items::models::{Item, ItemStatus};
use crate::domains::members::models::Member;

const MAX_TITLE_LEN: usize = 120;
const MAX_IMAGES: usize = 10;

/// List a new item. The owner must already have a resolved location so the
/// item can participate in distance ranking.
pub async fn create_item(
    owner_id: MemberId,
    title: String,
    description: String,
    category: String,
    image_urls: Vec<String>,
    pool: &PgPool,
) -> DomainResult<Item> {
    let owner = Member::find_by_id(owner_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Member"))?;
    if owner.coords().is_none() {
        return Err(DomainError::LocationRequired);
    }

    validate_title(&title)?;
    validate_images(&image_urls)?;

    let item = Item::create(owner_id, title, description, category, image_urls, pool).await?;
    tracing::info!(item_id = %item.id, owner_id = %owner_id, "Created item");
    Ok(item)
}

/// Edit an item's content. Only the owner may edit, and swapped items are
/// frozen.
pub async fn update_item(
    member_id: MemberId,
    item_id: ItemId,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image_urls: Option<Vec<String>>,
    pool: &PgPool,
) -> DomainResult<Item> {
    let item = require_owned_mutable(member_id, item_id, pool).await?;

    if let Some(ref title) = title {
        validate_title(title)?;
    }
    if let Some(ref urls) = image_urls {
        validate_images(urls)?;
    }

    let updated =
        Item::update_content(item.id, title, description, category, image_urls, pool).await?;
    Ok(updated)
}

/// Toggle an item between available and hidden. Swapped is terminal and only
/// ever set by match acceptance.
pub async fn set_item_visibility(
    member_id: MemberId,
    item_id: ItemId,
    hidden: bool,
    pool: &PgPool,
) -> DomainResult<Item> {
    let item = require_owned_mutable(member_id, item_id, pool).await?;

    let status = if hidden {
        ItemStatus::Hidden
    } else {
        ItemStatus::Available
    };
    let updated = Item::update_status(item.id, status, pool).await?;
    Ok(updated)
}

/// Delete an item. Cascades remove its swipes and matches.
pub async fn delete_item(member_id: MemberId, item_id: ItemId, pool: &PgPool) -> DomainResult<()> {
    let item = require_owned_mutable(member_id, item_id, pool).await?;
    Item::delete(item.id, pool).await?;
    tracing::info!(item_id = %item_id, owner_id = %member_id, "Deleted item");
    Ok(())
}

/// List a member's items, optionally filtered by status.
pub async fn items_for_member(
    owner_id: MemberId,
    status: Option<String>,
    pool: &PgPool,
) -> DomainResult<Vec<Item>> {
    if let Some(ref status) = status {
        status
            .parse::<ItemStatus>()
            .map_err(|_| DomainError::InvalidInput(format!("unknown item status: {status}")))?;
    }
    let items = Item::find_by_owner(owner_id, status.as_deref(), pool).await?;
    Ok(items)
}

async fn require_owned_mutable(
    member_id: MemberId,
    item_id: ItemId,
    pool: &PgPool,
) -> DomainResult<Item> {
    let item = Item::find_by_id(item_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Item"))?;
    if item.owner_id != member_id {
        return Err(DomainError::Forbidden(
            "only the owner may modify an item".to_string(),
        ));
    }
    if item.is_swapped() {
        return Err(DomainError::Forbidden(
            "swapped items cannot be modified".to_string(),
        ));
    }
    Ok(item)
}

fn validate_title(title: &str) -> DomainResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(
            "title must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidInput(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_images(image_urls: &[String]) -> DomainResult<()> {
    if image_urls.is_empty() {
        return Err(DomainError::InvalidInput(
            "at least one image is required".to_string(),
        ));
    }
    if image_urls.len() > MAX_IMAGES {
        return Err(DomainError::InvalidInput(format!(
            "at most {MAX_IMAGES} images are allowed"
        )));
    }
    for raw in image_urls {
        let url = Url::parse(raw)
            .map_err(|_| DomainError::InvalidInput(format!("invalid image URL: {raw}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DomainError::InvalidInput(format!(
                "image URL must be http(s): {raw}"
            )));
        }
    }
    Ok(())
}
