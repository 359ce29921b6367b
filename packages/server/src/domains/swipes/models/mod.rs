pub mod swipe;

pub use swipe::{Swipe, SwipeDirection, SwipeStats};
