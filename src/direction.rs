//! Compass directions and the numeric-keypad mapping.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the eight directions a move can take.
///
/// Variants are declared clockwise starting at north, so iterating
/// them with [`Direction::clockwise`] walks the compass rose.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Up (keypad 8).
    North,
    /// Up and right (keypad 9).
    NorthEast,
    /// Right (keypad 6).
    East,
    /// Down and right (keypad 3).
    SouthEast,
    /// Down (keypad 2).
    South,
    /// Down and left (keypad 1).
    SouthWest,
    /// Left (keypad 4).
    West,
    /// Up and left (keypad 7).
    NorthWest,
}

impl Direction {
    /// Maps a numeric-keypad digit to the direction it points at.
    ///
    /// Only 1-4 and 6-9 name a direction. The center key and zero are
    /// rejected here so they never reach the engine.
    #[instrument]
    pub fn from_numpad(digit: u8) -> Result<Self, NumpadError> {
        match digit {
            1 => Ok(Self::SouthWest),
            2 => Ok(Self::South),
            3 => Ok(Self::SouthEast),
            4 => Ok(Self::West),
            6 => Ok(Self::East),
            7 => Ok(Self::NorthWest),
            8 => Ok(Self::North),
            9 => Ok(Self::NorthEast),
            5 => Err(NumpadError::Center),
            0 => Err(NumpadError::NoDirection),
            other => Err(NumpadError::NotADigit(other)),
        }
    }

    /// The keypad digit that produces this direction.
    pub fn numpad_digit(self) -> u8 {
        match self {
            Self::North => 8,
            Self::NorthEast => 9,
            Self::East => 6,
            Self::SouthEast => 3,
            Self::South => 2,
            Self::SouthWest => 1,
            Self::West => 4,
            Self::NorthWest => 7,
        }
    }

    /// All eight directions, clockwise from north.
    pub fn clockwise() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// A keypad digit that does not name a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NumpadError {
    /// Keypad 5 sits in the middle and points nowhere.
    #[display("Keypad 5 is the center key")]
    Center,

    /// Keypad 0 has no compass position.
    #[display("Keypad 0 has no direction")]
    NoDirection,

    /// Not a single decimal digit at all.
    #[display("{} is not a keypad digit", _0)]
    NotADigit(u8),
}

impl std::error::Error for NumpadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_direction_round_trips_through_its_digit() {
        for dir in Direction::clockwise() {
            assert_eq!(Direction::from_numpad(dir.numpad_digit()), Ok(dir));
        }
    }

    #[test]
    fn keypad_layout_matches_compass() {
        assert_eq!(Direction::from_numpad(8), Ok(Direction::North));
        assert_eq!(Direction::from_numpad(1), Ok(Direction::SouthWest));
        assert_eq!(Direction::from_numpad(9), Ok(Direction::NorthEast));
        assert_eq!(Direction::from_numpad(4), Ok(Direction::West));
    }

    #[test]
    fn center_and_zero_are_rejected() {
        assert_eq!(Direction::from_numpad(5), Err(NumpadError::Center));
        assert_eq!(Direction::from_numpad(0), Err(NumpadError::NoDirection));
        assert_eq!(Direction::from_numpad(12), Err(NumpadError::NotADigit(12)));
    }

    #[test]
    fn clockwise_covers_eight_distinct_directions() {
        let dirs: Vec<_> = Direction::clockwise().collect();
        assert_eq!(dirs.len(), 8);
        assert_eq!(dirs[0], Direction::North);
        assert_eq!(dirs[2], Direction::East);
        assert_eq!(dirs[7], Direction::NorthWest);
    }
}
