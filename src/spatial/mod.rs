//! Spatial data structures for packing
//!
//! This module contains spatial-related functionality including:
//! - Shape masks and their orientations
//! - Rectangular regions with required shape counts
//! - The occupancy grid mutated during search

/// Occupancy grid with reversible placement
pub mod grid;
/// Rectangular regions and required shape counts
pub mod region;
/// Shape masks, orientations and canonical signatures
pub mod shape;

pub use grid::OccupancyGrid;
pub use region::Region;
pub use shape::{Shape, Variant};
