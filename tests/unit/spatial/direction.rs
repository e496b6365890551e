//! Tests for cardinal directions and their table order

#[cfg(test)]
mod tests {
    use tilecollapse::spatial::direction::Direction;

    // Tests table indices follow West, North, East, South
    // Verified by swapping the North and South discriminants
    #[test]
    fn test_index_order() {
        for (position, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), position);
            assert_eq!(Direction::from_index(position), *direction);
            assert_eq!(Direction::from_index(position + 4), *direction);
        }
        assert_eq!(Direction::COUNT, Direction::ALL.len());
    }

    // Tests opposite directions cancel offsets and pair up
    // Verified by mapping opposite to a quarter turn
    #[test]
    fn test_opposite() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::West.opposite(), Direction::East);
        assert_eq!(Direction::North.opposite(), Direction::South);
    }

    // Tests counter-clockwise turns with y growing downwards
    // Verified by rotating clockwise
    #[test]
    fn test_rotate_ccw() {
        assert_eq!(Direction::East.rotate_ccw(), Direction::North);
        assert_eq!(Direction::North.rotate_ccw(), Direction::West);
        assert_eq!(Direction::West.rotate_ccw(), Direction::South);
        assert_eq!(Direction::South.rotate_ccw(), Direction::East);
        for direction in Direction::ALL {
            let twice = direction.rotate_ccw().rotate_ccw();
            assert_eq!(twice, direction.opposite());
        }
    }

    // Tests offsets point one row up for North
    // Verified by using mathematical y-up offsets
    #[test]
    fn test_offsets_and_names() {
        assert_eq!(Direction::North.offset(), (0, -1));
        assert_eq!(Direction::South.offset(), (0, 1));
        assert_eq!(Direction::West.offset(), (-1, 0));
        assert_eq!(Direction::East.to_string(), "east");
    }
}
