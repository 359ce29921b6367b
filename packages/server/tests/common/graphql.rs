//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use std::sync::Arc;

use juniper::Variables;
use serde_json::Value;
use sqlx::PgPool;

use server_core::common::utils::GeocodingClient;
use server_core::common::MemberId;
use server_core::domains::auth::JwtService;
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};
use server_core::server::middleware::AuthUser;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let title = result.get("createItem.title");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }
}

fn test_context(pool: PgPool, auth_user: Option<AuthUser>) -> GraphQLContext {
    // Unroutable base URL: geocoder calls in tests must fail fast, not
    // depend on the network.
    let geocoder = Arc::new(GeocodingClient::new("http://127.0.0.1:9".to_string()));
    let jwt_service = Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()));
    GraphQLContext::new(pool, geocoder, jwt_service, auth_user)
}

impl GraphQLClient {
    /// Creates a new anonymous GraphQL client.
    pub fn new(pool: PgPool) -> Self {
        Self {
            schema: create_schema(),
            context: test_context(pool, None),
        }
    }

    /// Creates a new GraphQL client with an authenticated member.
    pub fn with_auth_user(pool: PgPool, member_id: MemberId, is_admin: bool) -> Self {
        let auth_user = AuthUser {
            member_id,
            email: format!("{}@test.example", member_id),
            is_admin,
        };
        Self {
            schema: create_schema(),
            context: test_context(pool, Some(auth_user)),
        }
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            juniper::execute(query, None, &self.schema, &variables, &self.context)
                .await
                .expect("GraphQL execution failed");

        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let error_messages: Vec<String> = errors
            .iter()
            .map(|e| e.error().message().to_string())
            .collect();

        GraphQLResult {
            data,
            errors: error_messages,
        }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }
}
