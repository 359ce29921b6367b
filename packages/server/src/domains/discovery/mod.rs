pub mod data;
pub mod effects;
pub mod models;
