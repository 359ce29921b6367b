pub mod auth;
pub mod discovery;
pub mod items;
pub mod matches;
pub mod members;
pub mod reviews;
pub mod swipes;
