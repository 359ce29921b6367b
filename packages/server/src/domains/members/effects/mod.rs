// Domain functions for member profile operations

pub mod profile_operations;
