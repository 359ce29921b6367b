// Domain functions for discovery feed ranking

pub mod ranking;
