use std::sync::Arc;

use sqlx::PgPool;

use crate::common::utils::GeocodingClient;
use crate::common::MemberId;
use crate::domains::auth::JwtService;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared resources plus the per-request authenticated user.
#[derive(Clone)]
pub struct GraphQLContext {
    pub pool: PgPool,
    pub geocoder: Arc<GeocodingClient>,
    pub jwt_service: Arc<JwtService>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(
        pool: PgPool,
        geocoder: Arc<GeocodingClient>,
        jwt_service: Arc<JwtService>,
        auth_user: Option<AuthUser>,
    ) -> Self {
        Self {
            pool,
            geocoder,
            jwt_service,
            auth_user,
        }
    }

    /// The authenticated member, or None for anonymous requests
    pub fn member_id(&self) -> Option<MemberId> {
        self.auth_user.as_ref().map(|user| user.member_id)
    }
}
