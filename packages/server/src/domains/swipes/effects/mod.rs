// Domain functions for swipe recording and match detection

pub mod swipe_operations;
