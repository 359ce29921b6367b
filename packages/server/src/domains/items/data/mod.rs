use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::items::models::Item;

/// GraphQL type for a swappable item
#[derive(Debug, Clone, GraphQLObject)]
pub struct ItemData {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_urls: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemData {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.into_uuid(),
            owner_id: item.owner_id.into_uuid(),
            title: item.title,
            description: item.description,
            category: item.category,
            image_urls: item.image_urls,
            status: item.status,
            created_at: item.created_at,
        }
    }
}

/// Input for listing a new item
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateItemInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_urls: Vec<String>,
}

/// Input for editing an item. Omitted fields are left unchanged.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_urls: Option<Vec<String>>,
}
