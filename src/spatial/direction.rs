//! Cardinal directions on the output grid
//!
//! Grid coordinates grow rightwards in `x` and downwards in `y`, so `North`
//! is one row up. The discriminant order matches the adjacency table layout.

use std::fmt;

/// One of the four cardinal neighbors of a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative `x`
    West = 0,
    /// Negative `y`
    North = 1,
    /// Positive `x`
    East = 2,
    /// Positive `y`
    South = 3,
}

impl Direction {
    /// All directions in table order
    pub const ALL: [Self; 4] = [Self::West, Self::North, Self::East, Self::South];

    /// Number of directions tracked per tile
    pub const COUNT: usize = 4;

    /// Position of this direction in per-direction tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a table index, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::West,
            1 => Self::North,
            2 => Self::East,
            _ => Self::South,
        }
    }

    /// The direction pointing back from the neighbor
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Quarter turn counter-clockwise as seen on screen
    ///
    /// East becomes North, North becomes West and so on.
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Unit step `(dx, dy)` towards the neighbor
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::West => "west",
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
        };
        f.write_str(name)
    }
}
