//! Tests for support counting and worklist propagation

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::cell::Cell;
    use tilecollapse::algorithm::propagation::{Contradiction, Propagator, SupportTable};
    use tilecollapse::catalog::{AdjacencyTable, TileCatalog};
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::GridSpec;
    use tilecollapse::spatial::tiles::PixelBlock;

    fn catalog(tile_count: usize, adjacency: AdjacencyTable) -> TileCatalog {
        let blocks = (0..tile_count)
            .map(|index| PixelBlock::filled(1, [index as u8 * 40, 0, 0, 255]))
            .collect();
        TileCatalog::new(blocks, &vec![1.0; tile_count], adjacency)
            .expect("test catalog should build")
    }

    // Every tile may only sit next to itself
    fn self_only(tile_count: usize) -> TileCatalog {
        let mut adjacency = AdjacencyTable::new(tile_count);
        for tile in 0..tile_count {
            for direction in Direction::ALL {
                adjacency.link(tile, direction, tile);
            }
        }
        catalog(tile_count, adjacency)
    }

    fn cells(grid: &GridSpec, catalog: &TileCatalog) -> Vec<Cell> {
        (0..grid.cell_count())
            .map(|index| Cell::new(grid.coords(index), catalog))
            .collect()
    }

    // Tests initial supports equal the size of each neighbor set
    // Verified by initializing every count to the catalog size
    #[test]
    fn test_support_table_initial_counts() {
        let mut adjacency = AdjacencyTable::new(3);
        adjacency.link(0, Direction::East, 1);
        adjacency.link(0, Direction::East, 2);
        adjacency.link(2, Direction::North, 2);
        let catalog = catalog(3, adjacency);
        let table = SupportTable::new(4, &catalog);

        for cell in 0..4 {
            assert_eq!(table.get(cell, 0, Direction::East), 2);
            assert_eq!(table.get(cell, 1, Direction::West), 1);
            assert_eq!(table.get(cell, 2, Direction::West), 1);
            assert_eq!(table.get(cell, 2, Direction::North), 1);
            assert_eq!(table.get(cell, 2, Direction::South), 1);
            assert_eq!(table.get(cell, 1, Direction::North), 0);
        }
    }

    // Tests decrement stops at zero and out-of-range lookups read as zero
    // Verified by using plain subtraction in decrement
    #[test]
    fn test_support_decrement_saturates() {
        let catalog = self_only(2);
        let mut table = SupportTable::new(1, &catalog);
        assert_eq!(table.decrement(0, 1, Direction::South), 0);
        assert_eq!(table.decrement(0, 1, Direction::South), 0);
        assert_eq!(table.get(5, 0, Direction::West), 0);
        assert_eq!(table.decrement(5, 0, Direction::West), 0);
    }

    // Tests a ban zeroes the tile's supports and queues it once
    // Verified by pushing to the worklist before the membership check
    #[test]
    fn test_ban_clears_supports_and_queues() {
        let catalog = self_only(3);
        let grid = GridSpec::new(2, 2, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        assert_eq!(propagator.ban(&mut cells, 3, 1, &catalog), Ok(true));
        assert_eq!(propagator.ban(&mut cells, 3, 1, &catalog), Ok(false));
        assert_eq!(propagator.pending(), 1);
        for direction in Direction::ALL {
            assert_eq!(propagator.supports().get(3, 1, direction), 0);
            assert_eq!(propagator.supports().get(3, 0, direction), 1);
        }
        assert!(!cells[3].is_possible(1));
    }

    // Tests banning the last tile of a cell reports a contradiction
    // Verified by checking the contradiction before removing the tile
    #[test]
    fn test_ban_last_tile_is_contradiction() {
        let catalog = self_only(2);
        let grid = GridSpec::new(1, 1, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(1, &catalog);

        assert_eq!(propagator.ban(&mut cells, 0, 0, &catalog), Ok(true));
        assert_eq!(
            propagator.ban(&mut cells, 0, 1, &catalog),
            Err(Contradiction { cell: 0 })
        );
        assert!(cells[0].is_contradiction());
    }

    // Tests a single ban ripples along a row until every cell agrees
    // Verified by skipping the ban when a support count reaches zero
    #[test]
    fn test_propagation_spreads_along_row() {
        let catalog = self_only(2);
        let grid = GridSpec::new(4, 1, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        propagator.ban(&mut cells, 0, 0, &catalog).unwrap();
        propagator.propagate(&grid, &catalog, &mut cells).unwrap();

        assert_eq!(propagator.pending(), 0);
        for cell in &cells {
            assert_eq!(cell.possible().to_vec(), vec![1]);
            assert_eq!(cell.remaining(), 1);
        }
    }

    // Tests bans wrap across the edge of a periodic grid
    // Verified by treating periodic neighbors as out of bounds
    #[test]
    fn test_propagation_wraps_on_periodic_grid() {
        // Tiles must alternate along a row, which an odd ring cannot do
        let mut adjacency = AdjacencyTable::new(2);
        adjacency.link(0, Direction::East, 1);
        adjacency.link(1, Direction::East, 0);
        for tile in 0..2 {
            adjacency.link(tile, Direction::North, tile);
        }
        let catalog = catalog(2, adjacency);

        let bounded = GridSpec::new(3, 1, false).unwrap();
        let mut cells_bounded = cells(&bounded, &catalog);
        let mut propagator = Propagator::new(bounded.cell_count(), &catalog);
        propagator.ban(&mut cells_bounded, 0, 0, &catalog).unwrap();
        propagator
            .propagate(&bounded, &catalog, &mut cells_bounded)
            .unwrap();
        let chosen: Vec<Vec<usize>> = cells_bounded
            .iter()
            .map(|cell| cell.possible().to_vec())
            .collect();
        assert_eq!(chosen, vec![vec![1], vec![0], vec![1]]);

        let ring = GridSpec::new(3, 1, true).unwrap();
        let mut cells_ring = cells(&ring, &catalog);
        let mut propagator = Propagator::new(ring.cell_count(), &catalog);
        propagator.ban(&mut cells_ring, 0, 0, &catalog).unwrap();
        assert!(propagator.propagate(&ring, &catalog, &mut cells_ring).is_err());
    }

    // Tests a contradiction stops propagation and drops pending work
    // Verified by leaving the worklist untouched on contradiction
    #[test]
    fn test_contradiction_clears_worklist() {
        let catalog = self_only(2);
        let grid = GridSpec::new(2, 1, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        propagator.ban(&mut cells, 0, 0, &catalog).unwrap();
        propagator.ban(&mut cells, 1, 1, &catalog).unwrap();
        assert_eq!(propagator.pending(), 2);

        let result = propagator.propagate(&grid, &catalog, &mut cells);
        assert!(result.is_err());
        assert_eq!(propagator.pending(), 0);
        assert!(cells.iter().any(Cell::is_contradiction));
    }

    // Tests tiles with no neighbor on some side are removed up front
    // Verified by skipping cells that have a neighbor in that direction
    #[test]
    fn test_prune_unsupported_removes_isolated_tiles() {
        let mut adjacency = AdjacencyTable::new(2);
        for direction in Direction::ALL {
            adjacency.link(0, direction, 0);
        }
        let catalog = catalog(2, adjacency);
        let grid = GridSpec::new(3, 3, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        propagator
            .prune_unsupported(&grid, &catalog, &mut cells)
            .unwrap();
        for cell in &cells {
            assert_eq!(cell.possible().to_vec(), vec![0]);
        }
    }

    // Tests pruning a catalog without any links empties a cell
    // Verified by ignoring tiles whose support starts at zero
    #[test]
    fn test_prune_unsupported_detects_unsatisfiable() {
        let catalog = catalog(2, AdjacencyTable::new(2));
        let grid = GridSpec::new(2, 1, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        let result = propagator.prune_unsupported(&grid, &catalog, &mut cells);
        assert_eq!(result, Err(Contradiction { cell: 0 }));
    }

    // Tests reset restores every count and empties the worklist
    // Verified by clearing only the worklist in reset
    #[test]
    fn test_reset_restores_supports() {
        let catalog = self_only(2);
        let grid = GridSpec::new(2, 1, false).unwrap();
        let mut cells = cells(&grid, &catalog);
        let mut propagator = Propagator::new(grid.cell_count(), &catalog);

        propagator.ban(&mut cells, 0, 1, &catalog).unwrap();
        propagator.reset(&catalog);
        assert_eq!(propagator.pending(), 0);
        assert_eq!(propagator.supports().get(0, 1, Direction::East), 1);
    }
}
