use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::members::models::Member;

/// GraphQL type for a member profile
#[derive(Debug, Clone, GraphQLObject)]
pub struct MemberData {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberData {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.into_uuid(),
            display_name: member.display_name,
            email: member.email,
            image_url: member.image_url,
            postcode: member.postcode,
            latitude: member.latitude,
            longitude: member.longitude,
            is_admin: member.is_admin,
            created_at: member.created_at,
        }
    }
}

/// Input for profile edits. A postcode triggers geocoder resolution.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateProfileInput {
    pub display_name: Option<String>,
    pub image_url: Option<String>,
    pub postcode: Option<String>,
}
