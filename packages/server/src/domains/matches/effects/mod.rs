// Domain functions for match lifecycle operations

pub mod match_operations;
