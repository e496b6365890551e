//! Symmetry classes of declared tiles
//!
//! A class fixes how many distinct orientations a tile has (its orbit) and
//! how rotating or mirroring one orientation maps onto another. Orbit member
//! `i` is always the base image turned `i` quarter turns counter-clockwise.

use crate::io::error::AlgorithmError;
use std::fmt;
use std::str::FromStr;

/// Symmetry class named by a rule set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Invariant under every rotation and reflection
    X,
    /// Corner shape; four orientations, mirror swaps neighbors pairwise
    L,
    /// Junction shape; four orientations, mirror-symmetric about one axis
    T,
    /// Straight shape; two orientations
    I,
    /// Diagonal shape; two orientations, mirror swaps them
    Backslash,
}

impl Symmetry {
    /// Number of distinct orientations in the orbit
    pub const fn cardinality(self) -> usize {
        match self {
            Self::X => 1,
            Self::L | Self::T => 4,
            Self::I | Self::Backslash => 2,
        }
    }

    /// Orbit member reached after `quarter_turns` counter-clockwise turns of member 0
    pub const fn rotation(self, quarter_turns: usize) -> usize {
        quarter_turns % self.cardinality()
    }

    /// Orbit member showing the horizontal mirror image of `member`
    pub const fn reflection(self, member: usize) -> usize {
        let member = self.rotation(member);
        match self {
            Self::X | Self::I => member,
            Self::L => {
                if member % 2 == 0 {
                    member + 1
                } else {
                    member - 1
                }
            }
            Self::T => (4 - member) % 4,
            Self::Backslash => 1 - member,
        }
    }
}

impl FromStr for Symmetry {
    type Err = AlgorithmError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Self::X),
            "L" => Ok(Self::L),
            "T" => Ok(Self::T),
            "I" => Ok(Self::I),
            "\\" => Ok(Self::Backslash),
            _ => Err(AlgorithmError::UnknownSymmetry {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::L => "L",
            Self::T => "T",
            Self::I => "I",
            Self::Backslash => "\\",
        };
        f.write_str(name)
    }
}
