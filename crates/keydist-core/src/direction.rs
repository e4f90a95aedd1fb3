// Keydist Direction
// Geometric relation between two adjacent keys

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Where a neighboring key sits relative to the key being described
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    Left,
    Right,
    Above,
    AboveLeft,
    AboveRight,
    Below,
    BelowLeft,
    BelowRight,
}

impl Direction {
    /// The direction seen from the neighbor's side
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Above => Direction::Below,
            Direction::AboveLeft => Direction::BelowRight,
            Direction::AboveRight => Direction::BelowLeft,
            Direction::Below => Direction::Above,
            Direction::BelowLeft => Direction::AboveRight,
            Direction::BelowRight => Direction::AboveLeft,
        }
    }

    /// True for neighbors on the same row
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}
