// Domain functions for review operations

pub mod review_operations;
