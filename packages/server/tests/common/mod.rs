//! Shared test infrastructure.

pub mod fixtures;
pub mod graphql;
pub mod harness;

pub use graphql::GraphQLClient;
pub use harness::TestHarness;
