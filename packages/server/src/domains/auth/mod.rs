//! Auth domain - JWT issuance and verification
//!
//! The identity provider itself is external; this module only creates and
//! verifies the tokens the middleware consumes.

pub mod jwt;

pub use jwt::{Claims, JwtService};
