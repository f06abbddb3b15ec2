//! Exact packing feasibility for polyomino-like shapes in rectangular regions
//!
//! Given a set of shapes that may be rotated and mirrored, and regions that each
//! require a multiset of those shapes, decides for every region whether all
//! required instances fit without overlap. Decisions come from an exhaustive
//! depth-first search with rollback and a capacity bound.

#![forbid(unsafe_code)]

/// Orientation catalog, packing search and region evaluation
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Shapes, regions and the occupancy grid
pub mod spatial;

pub use algorithm::catalog::ShapeCatalog;
pub use algorithm::evaluator::{EvaluatorConfig, RegionEvaluator, RegionReport};
pub use algorithm::search::{SearchConfig, SearchOutcome, SearchStats};
pub use io::error::{PackingError, Result};
pub use io::parse::{Puzzle, parse_puzzle};
