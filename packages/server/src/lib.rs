// SwapCycle - API Core
//
// Backend API for the peer-to-peer item swap marketplace: members list
// items, swipe on each other's listings, and mutual right-swipes become
// matches that can be accepted into a swap.
//
// Architecture follows domain-driven design: SQL in domains/*/models,
// business logic in domains/*/effects, GraphQL edge in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
