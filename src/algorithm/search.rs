//! Depth-first packing search with capacity pruning
//!
//! Each state of the search is an index into the ordered instance list. At
//! state `i` the instance is tried in every orientation at every origin in
//! row-major order; a successful placement recurses into `i + 1` and is rolled
//! back if that subtree fails. Before any placement is tried the remaining
//! block count is compared with the grid's free cells, which rejects branches
//! that cannot possibly fit without risking a false rejection.

use crate::spatial::{OccupancyGrid, shape::Variant};
use std::fmt;

/// One required shape unit to be placed
#[derive(Clone, Copy, Debug)]
pub struct Instance<'a> {
    /// Id of the shape this instance was expanded from
    pub shape_id: usize,
    /// Number of cells the instance covers in every orientation
    pub block_count: usize,
    /// Orientations to try, in catalog order
    pub variants: &'a [Variant],
}

/// Tunables for a single search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of non-terminal search states to visit; `None` searches exhaustively
    ///
    /// Reaching the terminal state of a full packing is always allowed, so a
    /// feasible search may report one node more than the budget.
    pub node_budget: Option<u64>,
}

impl SearchConfig {
    /// Exhaustive search without a budget
    pub const fn unbounded() -> Self {
        Self { node_budget: None }
    }

    /// Search that gives up after visiting `nodes` states
    pub const fn with_budget(nodes: u64) -> Self {
        Self {
            node_budget: Some(nodes),
        }
    }
}

/// Verdict of a packing search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every instance was placed
    Feasible,
    /// The search space was exhausted without a full placement
    Infeasible,
    /// The node budget ran out before a verdict was reached
    Unknown,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feasible => write!(f, "feasible"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Counters collected while searching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search states entered, including the terminal one
    pub nodes_visited: u64,
    /// Placements committed to the grid
    pub placements: u64,
    /// States rejected by the capacity bound
    pub prunes: u64,
}

/// Backtracking search over an ordered instance list
///
/// Owns the grid for the duration of the search. Placements nest in strict
/// stack order: a variant placed at depth `i` is removed before control
/// returns above depth `i`, except on success where the final configuration
/// is left in place.
pub struct PackingSearch<'a> {
    grid: OccupancyGrid,
    instances: Vec<Instance<'a>>,
    remaining_blocks: Vec<usize>,
    config: SearchConfig,
    stats: SearchStats,
}

impl<'a> PackingSearch<'a> {
    /// Prepare a search of `instances`, in the given order, on `grid`
    pub fn new(grid: OccupancyGrid, instances: Vec<Instance<'a>>, config: SearchConfig) -> Self {
        // remaining_blocks[i] is the block sum of instances i..N, with a trailing zero
        let mut remaining_blocks = vec![0; instances.len() + 1];
        for (index, instance) in instances.iter().enumerate().rev() {
            let after = remaining_blocks.get(index + 1).copied().unwrap_or(0);
            if let Some(slot) = remaining_blocks.get_mut(index) {
                *slot = after + instance.block_count;
            }
        }

        Self {
            grid,
            instances,
            remaining_blocks,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Run the search from state 0
    pub fn run(&mut self) -> SearchOutcome {
        self.search(0)
    }

    /// Counters from the most recent run
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Grid in its current configuration
    ///
    /// After a feasible run this holds one full placement; otherwise every
    /// placement has been rolled back.
    pub const fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Instances in search order
    pub fn instances(&self) -> &[Instance<'a>] {
        &self.instances
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .node_budget
            .is_some_and(|budget| self.stats.nodes_visited >= budget)
    }

    fn search(&mut self, index: usize) -> SearchOutcome {
        // The terminal state is exempt from the node budget
        let Some(instance) = self.instances.get(index).copied() else {
            self.stats.nodes_visited += 1;
            return SearchOutcome::Feasible;
        };

        if self.budget_exhausted() {
            return SearchOutcome::Unknown;
        }
        self.stats.nodes_visited += 1;

        let remaining = self.remaining_blocks.get(index).copied().unwrap_or(0);
        if remaining > self.grid.free_cells() {
            self.stats.prunes += 1;
            return SearchOutcome::Infeasible;
        }

        for variant in instance.variants {
            let max_y = self.grid.height().checked_sub(variant.height());
            let max_x = self.grid.width().checked_sub(variant.width());
            let (Some(max_y), Some(max_x)) = (max_y, max_x) else {
                continue;
            };

            for y in 0..=max_y {
                for x in 0..=max_x {
                    if !self.grid.can_place_at(variant, x, y) {
                        continue;
                    }

                    self.grid.place(variant, x, y);
                    self.stats.placements += 1;

                    match self.search(index + 1) {
                        SearchOutcome::Feasible => return SearchOutcome::Feasible,
                        SearchOutcome::Infeasible => self.grid.remove(variant, x, y),
                        SearchOutcome::Unknown => {
                            self.grid.remove(variant, x, y);
                            return SearchOutcome::Unknown;
                        }
                    }
                }
            }
        }

        SearchOutcome::Infeasible
    }
}
