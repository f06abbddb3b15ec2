//! Tests for occupancy grid placement, rollback and free-cell accounting

#[cfg(test)]
mod tests {
    use polypack::spatial::grid::OccupancyGrid;
    use polypack::spatial::shape::{Shape, Variant};

    fn square() -> Variant {
        Shape::from_rows(0, &["##", "##"]).as_variant()
    }

    fn corner() -> Variant {
        Shape::from_rows(1, &["###", "#..", "#.."]).as_variant()
    }

    fn snapshot(grid: &OccupancyGrid) -> Vec<bool> {
        let mut cells = Vec::with_capacity(grid.area());
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                cells.push(grid.is_occupied(x, y));
            }
        }
        cells
    }

    // Tests a new grid is entirely free
    // Verified by initializing the free counter to zero
    #[test]
    fn test_new_grid_is_empty() {
        let grid = OccupancyGrid::new(5, 4);

        assert_eq!(grid.area(), 20);
        assert_eq!(grid.free_cells(), 20);
        assert_eq!(grid.occupied_cells(), 0);
    }

    // Tests placing and removing a square updates occupancy and the counter
    // Verified by skipping the counter decrement in place
    #[test]
    fn test_place_and_remove_square() {
        let mut grid = OccupancyGrid::new(5, 5);
        let shape = square();

        assert!(grid.can_place_at(&shape, 0, 0));
        grid.place(&shape, 0, 0);

        assert!(!grid.can_place_at(&shape, 0, 0));
        assert_eq!(grid.free_cells(), 21);
        assert!(grid.is_occupied(1, 1));
        assert!(!grid.is_occupied(2, 0));

        grid.remove(&shape, 0, 0);

        assert!(grid.can_place_at(&shape, 0, 0));
        assert_eq!(grid.free_cells(), 25);
    }

    // Tests exact and partial overlaps are rejected while disjoint placements pass
    // Verified by checking only the variant's origin cell for collisions
    #[test]
    fn test_detects_collisions() {
        let mut grid = OccupancyGrid::new(5, 5);
        let shape = corner();

        grid.place(&shape, 0, 0);

        assert!(!grid.can_place_at(&shape, 0, 0));
        assert!(!grid.can_place_at(&shape, 1, 0));
        assert!(grid.can_place_at(&shape, 2, 2));
    }

    // Tests empty cells of a variant may sit over covered grid cells
    // Verified by testing the whole bounding box for collisions
    #[test]
    fn test_empty_variant_cells_do_not_collide() {
        let mut grid = OccupancyGrid::new(4, 4);
        let shape = corner();

        grid.place(&shape, 0, 0);

        // The corner's empty cells at (1..3, 1..3) overlap nothing it covers
        let block = Shape::from_rows(2, &["#"]).as_variant();
        assert!(grid.can_place_at(&block, 1, 1));
        assert!(grid.can_place_at(&shape, 1, 1));
    }

    // Tests bounding boxes that leave the grid are rejected
    // Verified by comparing with < instead of <= in the bounds check
    #[test]
    fn test_checks_bounds() {
        let grid = OccupancyGrid::new(5, 5);
        let shape = corner();

        assert!(!grid.can_place_at(&shape, 3, 0));
        assert!(!grid.can_place_at(&shape, 0, 3));
        assert!(!grid.can_place_at(&shape, 5, 5));
        assert!(!grid.can_place_at(&shape, usize::MAX, 0));
        assert!(grid.can_place_at(&shape, 2, 2));
    }

    // Tests place followed by remove restores every cell and the counter
    // Verified by clearing only the first cell in remove
    #[test]
    fn test_place_remove_round_trip_restores_state() {
        let mut grid = OccupancyGrid::new(6, 4);
        let first = square();
        grid.place(&first, 4, 2);

        let before_cells = snapshot(&grid);
        let before_free = grid.free_cells();

        let shape = corner();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.can_place_at(&shape, x, y) {
                    grid.place(&shape, x, y);
                    grid.remove(&shape, x, y);
                    assert_eq!(snapshot(&grid), before_cells, "cells differ at ({x}, {y})");
                    assert_eq!(grid.free_cells(), before_free);
                }
            }
        }
    }

    // Tests the incremental counter agrees with a full recount after nested placements
    // Verified by decrementing the counter by one per placement
    #[test]
    fn test_free_counter_matches_recount() {
        let mut grid = OccupancyGrid::new(4, 4);
        let shape = square();

        grid.place(&shape, 0, 0);
        grid.place(&shape, 2, 0);
        grid.place(&shape, 0, 2);
        assert_eq!(grid.free_cells(), grid.area() - grid.occupied_cells());
        assert_eq!(grid.free_cells(), 4);

        grid.remove(&shape, 0, 2);
        assert_eq!(grid.free_cells(), grid.area() - grid.occupied_cells());
        assert_eq!(grid.free_cells(), 8);
    }

    // Tests the text rendering marks covered cells
    // Verified by swapping the markers
    #[test]
    fn test_display_renders_rows() {
        let mut grid = OccupancyGrid::new(3, 2);
        grid.place(&square(), 1, 0);

        assert_eq!(grid.to_string(), ".##\n.##\n");
    }
}
