//! Region evaluation: expands required counts into instances and drives the search

use crate::algorithm::catalog::ShapeCatalog;
use crate::algorithm::search::{
    Instance, PackingSearch, SearchConfig, SearchOutcome, SearchStats,
};
use crate::io::error::{PackingError, Result};
use crate::spatial::{OccupancyGrid, Region};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Evaluation parameters shared by every region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Per-region search settings
    pub search: SearchConfig,
    /// Evaluate independent regions on the rayon thread pool
    pub parallel: bool,
}

/// Verdict and search counters for one region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionReport {
    /// Index of the region in its input order
    pub region: usize,
    /// Search verdict
    pub outcome: SearchOutcome,
    /// Search counters
    pub stats: SearchStats,
}

impl RegionReport {
    /// Convert the verdict to a plain answer
    ///
    /// # Errors
    ///
    /// Returns `SearchBudgetExhausted` when the verdict is unknown
    pub fn into_feasibility(self) -> Result<bool> {
        match self.outcome {
            SearchOutcome::Feasible => Ok(true),
            SearchOutcome::Infeasible => Ok(false),
            SearchOutcome::Unknown => Err(PackingError::SearchBudgetExhausted {
                region: self.region,
                nodes: self.stats.nodes_visited,
            }),
        }
    }
}

/// Decides, region by region, whether the required shapes can all be packed
pub struct RegionEvaluator<'c> {
    catalog: &'c ShapeCatalog,
    config: EvaluatorConfig,
}

impl<'c> RegionEvaluator<'c> {
    /// Create an evaluator over a shape catalog
    pub const fn new(catalog: &'c ShapeCatalog, config: EvaluatorConfig) -> Self {
        Self { catalog, config }
    }

    /// Catalog used to resolve shape ids
    pub const fn catalog(&self) -> &'c ShapeCatalog {
        self.catalog
    }

    /// Expand a region's required counts into instances, largest first
    ///
    /// One instance per required unit; the sort is stable so instances of
    /// equal size keep their shape id order. Returns `None` without expanding
    /// anything when the required blocks, or the number of instances, exceed
    /// the region's area or overflow `usize`. Such a region can never be
    /// packed, which is the verdict the capacity prune reaches at the root.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` when a positive count refers to a shape the
    /// catalog does not contain
    pub fn build_instances(
        &self,
        region: &Region,
        region_index: usize,
    ) -> Result<Option<Vec<Instance<'c>>>> {
        let mut requested = Vec::new();
        let mut required_blocks = Some(0_usize);
        let mut required_instances = Some(0_usize);

        for (shape_id, &count) in region.required_counts().iter().enumerate() {
            if count == 0 {
                continue;
            }

            let (Some(shape), Some(variants)) = (
                self.catalog.shape(shape_id),
                self.catalog.variants_of(shape_id),
            ) else {
                return Err(PackingError::UnknownShape {
                    shape_id,
                    region: region_index,
                });
            };

            required_blocks = required_blocks.and_then(|total| {
                shape
                    .block_count()
                    .checked_mul(count)
                    .and_then(|blocks| total.checked_add(blocks))
            });
            required_instances = required_instances.and_then(|total| total.checked_add(count));

            let instance = Instance {
                shape_id,
                block_count: shape.block_count(),
                variants,
            };
            requested.push((instance, count));
        }

        let area = region.area();
        if required_blocks.is_none_or(|blocks| blocks > area)
            || required_instances.is_none_or(|instances| instances > area)
        {
            return Ok(None);
        }

        let mut instances = Vec::with_capacity(required_instances.unwrap_or(0));
        for (instance, count) in requested {
            instances.extend(std::iter::repeat_n(instance, count));
        }

        // Most-constrained first: larger pieces fail fast
        instances.sort_by(|a, b| b.block_count.cmp(&a.block_count));
        Ok(Some(instances))
    }

    /// Search for a full packing of one region
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` when the region requires a shape missing from the catalog
    pub fn evaluate(&self, region: &Region, region_index: usize) -> Result<RegionReport> {
        let Some(instances) = self.build_instances(region, region_index)? else {
            log::debug!(
                "Region {region_index} ({}x{}): required shapes exceed the area",
                region.width(),
                region.height()
            );
            return Ok(RegionReport {
                region: region_index,
                outcome: SearchOutcome::Infeasible,
                stats: SearchStats {
                    nodes_visited: 1,
                    placements: 0,
                    prunes: 1,
                },
            });
        };
        let grid = OccupancyGrid::new(region.width(), region.height());

        let mut search = PackingSearch::new(grid, instances, self.config.search);
        let outcome = search.run();
        let stats = search.stats();

        match outcome {
            SearchOutcome::Unknown => log::warn!(
                "Region {region_index} ({}x{}): search budget exhausted after {} nodes",
                region.width(),
                region.height(),
                stats.nodes_visited
            ),
            _ => log::debug!(
                "Region {region_index} ({}x{}): {outcome} after {} nodes, {} placements, {} prunes",
                region.width(),
                region.height(),
                stats.nodes_visited,
                stats.placements,
                stats.prunes
            ),
        }

        Ok(RegionReport {
            region: region_index,
            outcome,
            stats,
        })
    }

    /// Whether every required shape of the region can be packed
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` for unresolvable shape ids and
    /// `SearchBudgetExhausted` when the budget stopped the search
    pub fn is_feasible(&self, region: &Region, region_index: usize) -> Result<bool> {
        self.evaluate(region, region_index)?.into_feasibility()
    }

    /// Evaluate every region, one report per region in input order
    ///
    /// Regions share nothing but the catalog, so with `parallel` enabled
    /// they are dispatched to the rayon pool after the catalog is fully
    /// computed.
    pub fn evaluate_all(&self, regions: &[Region]) -> Vec<Result<RegionReport>> {
        self.evaluate_all_with(regions, |_| {})
    }

    /// Like `evaluate_all`, calling `on_region_done` with the number of
    /// regions finished so far after each region completes
    ///
    /// In parallel mode the callback runs on worker threads and the counts
    /// may arrive out of order.
    pub fn evaluate_all_with<F>(
        &self,
        regions: &[Region],
        on_region_done: F,
    ) -> Vec<Result<RegionReport>>
    where
        F: Fn(usize) + Sync,
    {
        let finished = AtomicUsize::new(0);
        let evaluate = |(index, region): (usize, &Region)| {
            let report = self.evaluate(region, index);
            on_region_done(finished.fetch_add(1, Ordering::Relaxed) + 1);
            report
        };

        if self.config.parallel {
            self.catalog.precompute();
            regions.par_iter().enumerate().map(evaluate).collect()
        } else {
            regions.iter().enumerate().map(evaluate).collect()
        }
    }

    /// Number of regions that can be fully packed
    ///
    /// # Errors
    ///
    /// Returns the first error encountered in region order
    pub fn count_feasible(&self, regions: &[Region]) -> Result<usize> {
        self.evaluate_all(regions)
            .into_iter()
            .try_fold(0, |count, report| {
                Ok(count + usize::from(report?.into_feasibility()?))
            })
    }
}
