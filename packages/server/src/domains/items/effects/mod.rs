// Domain functions for item listing operations

pub mod item_operations;
