//! Tests for the directional compatibility table

#[cfg(test)]
mod tests {
    use tilecollapse::catalog::AdjacencyTable;
    use tilecollapse::spatial::direction::Direction;

    // Tests a link is recorded from both sides
    // Verified by only inserting the forward entry in link
    #[test]
    fn test_link_records_mirror() {
        let mut table = AdjacencyTable::new(3);
        table.link(0, Direction::East, 2);

        assert!(table.allows(0, Direction::East, 2));
        assert!(table.allows(2, Direction::West, 0));
        assert!(!table.allows(2, Direction::East, 0));
        assert!(!table.allows(0, Direction::West, 2));
        assert!(table.is_symmetric());
    }

    // Tests a fresh table has no links and the right size
    // Verified by creating every set full
    #[test]
    fn test_new_table_is_empty() {
        let table = AdjacencyTable::new(4);
        assert_eq!(table.tile_count(), 4);
        for direction in Direction::ALL {
            for tile in 0..4 {
                assert_eq!(table.support_count(tile, direction), 0);
            }
        }
        assert!(table.allowed(4, Direction::North).is_none());
        assert_eq!(AdjacencyTable::new(0).tile_count(), 0);
    }

    // Tests inference only consults West and North and mirrors the rest
    // Verified by asking the predicate about all four directions
    #[test]
    fn test_infer_asks_two_directions() {
        let mut asked = Vec::new();
        let table = AdjacencyTable::infer(3, |a, direction, b| {
            asked.push(direction);
            direction == Direction::North && a == b
        });

        assert_eq!(asked.len(), 2 * 3 * 3);
        assert!(
            asked
                .iter()
                .all(|direction| matches!(direction, Direction::West | Direction::North))
        );
        for tile in 0..3 {
            assert!(table.allows(tile, Direction::North, tile));
            assert!(table.allows(tile, Direction::South, tile));
            assert_eq!(table.support_count(tile, Direction::East), 0);
        }
        assert!(table.is_symmetric());
    }

    // Tests support counts track the size of each neighbor set
    // Verified by counting links in the opposite direction
    #[test]
    fn test_support_count() {
        let mut table = AdjacencyTable::new(3);
        table.link(1, Direction::South, 0);
        table.link(1, Direction::South, 2);
        table.link(1, Direction::South, 2);

        assert_eq!(table.support_count(1, Direction::South), 2);
        assert_eq!(table.support_count(0, Direction::North), 1);
        assert_eq!(table.support_count(2, Direction::North), 1);
        assert_eq!(
            table.allowed(1, Direction::South).map(|set| set.to_vec()),
            Some(vec![0, 2])
        );
    }

    // Tests linking an id outside the table is a programmer error
    // Verified by silently ignoring out-of-range ids
    #[test]
    #[should_panic(expected = "must be below")]
    fn test_link_out_of_range_panics() {
        let mut table = AdjacencyTable::new(2);
        table.link(0, Direction::East, 2);
    }
}
