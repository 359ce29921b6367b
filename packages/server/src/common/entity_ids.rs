//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (users).
pub struct Member;

/// Marker type for Item entities (listings offered for swapping).
pub struct Item;

/// Marker type for Swipe entities (directional votes on items).
pub struct Swipe;

/// Marker type for Match entities (reciprocal-swipe pairings).
pub struct SwapMatch;

/// Marker type for Review entities (member-to-member ratings).
pub struct Review;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Item entities.
pub type ItemId = Id<Item>;

/// Typed ID for Swipe entities.
pub type SwipeId = Id<Swipe>;

/// Typed ID for Match entities.
pub type MatchId = Id<SwapMatch>;

/// Typed ID for Review entities.
pub type ReviewId = Id<Review>;
