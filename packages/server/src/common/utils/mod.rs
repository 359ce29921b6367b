// Shared utilities

pub mod geocoding;

pub use geocoding::{distance_meters, haversine_meters, GeocodingClient, ResolvedLocation};
