//! Tests for grid dimensions, wrapping and legal placement origins

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::configuration::MAX_GRID_DIMENSION;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::GridSpec;

    // Tests row-major indexing round-trips through coordinates
    // Verified by swapping x and y in coords
    #[test]
    fn test_index_coords_round_trip() {
        let grid = GridSpec::new(5, 3, false).unwrap();
        assert_eq!(grid.cell_count(), 15);
        assert_eq!(grid.index(4, 2), 14);
        for index in 0..grid.cell_count() {
            let (x, y) = grid.coords(index);
            assert_eq!(grid.index(x, y), index);
        }
    }

    // Tests zero, oversized and unfit dimensions are rejected
    // Verified by only checking the width
    #[test]
    fn test_invalid_dimensions() {
        for (width, height) in [(0, 4), (4, 0), (MAX_GRID_DIMENSION + 1, 4)] {
            assert!(matches!(
                GridSpec::new(width, height, false),
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }
        assert!(GridSpec::with_footprint(4, 4, false, 0).is_err());
        assert!(GridSpec::with_footprint(4, 2, false, 3).is_err());
        // A periodic grid may be smaller than the footprint
        assert!(GridSpec::with_footprint(2, 2, true, 3).is_ok());
    }

    // Tests bounded neighbors stop at the edges
    // Verified by wrapping on bounded grids
    #[test]
    fn test_bounded_neighbors() {
        let grid = GridSpec::new(3, 2, false).unwrap();
        assert_eq!(grid.neighbor(0, Direction::West), None);
        assert_eq!(grid.neighbor(0, Direction::North), None);
        assert_eq!(grid.neighbor(0, Direction::East), Some(1));
        assert_eq!(grid.neighbor(0, Direction::South), Some(3));
        assert_eq!(grid.neighbor(5, Direction::East), None);
        assert_eq!(grid.neighbor(5, Direction::South), None);
    }

    // Tests periodic neighbors wrap around every edge
    // Verified by clamping instead of wrapping
    #[test]
    fn test_periodic_neighbors() {
        let grid = GridSpec::new(3, 2, true).unwrap();
        assert!(grid.is_periodic());
        assert_eq!(grid.neighbor(0, Direction::West), Some(2));
        assert_eq!(grid.neighbor(0, Direction::North), Some(3));
        assert_eq!(grid.neighbor(5, Direction::East), Some(3));
        assert_eq!(grid.neighbor(5, Direction::South), Some(2));
        for index in 0..grid.cell_count() {
            for direction in Direction::ALL {
                let neighbor = grid.neighbor(index, direction).unwrap();
                assert_eq!(grid.neighbor(neighbor, direction.opposite()), Some(index));
            }
        }
    }

    // Tests a footprint restricts legal origins on bounded grids only
    // Verified by ignoring the footprint in is_legal_origin
    #[test]
    fn test_legal_origins() {
        let bounded = GridSpec::with_footprint(4, 3, false, 2).unwrap();
        let legal: Vec<usize> = (0..bounded.cell_count())
            .filter(|&index| bounded.is_legal_origin(index))
            .collect();
        assert_eq!(legal, vec![0, 1, 2, 4, 5, 6]);
        assert_eq!(bounded.footprint(), 2);
        // Neighbors outside the legal origins are skipped
        assert_eq!(bounded.neighbor(2, Direction::East), None);
        assert_eq!(bounded.neighbor(4, Direction::South), None);

        let periodic = GridSpec::with_footprint(4, 3, true, 2).unwrap();
        assert!((0..periodic.cell_count()).all(|index| periodic.is_legal_origin(index)));
    }

    // Tests trailing cells are covered by the nearest legal origin
    // Verified by returning each cell as its own origin
    #[test]
    fn test_covering_origin() {
        let grid = GridSpec::with_footprint(4, 4, false, 3).unwrap();
        assert_eq!(grid.covering_origin(1, 1), (grid.index(1, 1), 0, 0));
        assert_eq!(grid.covering_origin(3, 0), (grid.index(1, 0), 2, 0));
        assert_eq!(grid.covering_origin(3, 3), (grid.index(1, 1), 2, 2));
        assert_eq!(grid.covering_origin(0, 2), (grid.index(0, 1), 0, 1));

        let periodic = GridSpec::with_footprint(4, 4, true, 3).unwrap();
        assert_eq!(periodic.covering_origin(3, 3), (periodic.index(3, 3), 0, 0));
    }
}
