pub mod swap_match;

pub use swap_match::{MatchStatus, SwapMatch};
