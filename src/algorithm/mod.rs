/// Shape orientation generation and the shared orientation cache
pub mod catalog;
/// Region evaluation and aggregation across regions
pub mod evaluator;
/// Depth-first packing search with capacity pruning
pub mod search;
