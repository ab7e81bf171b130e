//! Shape variants and the start/sweep angle table.
//!
//! Angles follow the painter's convention used across the crate: degrees,
//! 0° at the 3 o'clock position, positive values turning clockwise on a
//! y-down surface.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const FULL_PIE_MAX_ANGLE: f64 = 360.0;
pub const HALF_PIE_MAX_ANGLE: f64 = 180.0;
pub const QUARTER_PIE_MAX_ANGLE: f64 = 90.0;

pub const DEFAULT_FULL_START_ANGLE: f64 = 0.0;
pub const DEFAULT_HALF_START_ANGLE: f64 = 180.0;

/// Which member of the indicator family is being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Full,
    Half,
    Quarter,
}

impl ShapeKind {
    pub const fn max_angle(self) -> f64 {
        match self {
            ShapeKind::Full => FULL_PIE_MAX_ANGLE,
            ShapeKind::Half => HALF_PIE_MAX_ANGLE,
            ShapeKind::Quarter => QUARTER_PIE_MAX_ANGLE,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "pie" => Ok(ShapeKind::Full),
            "half" => Ok(ShapeKind::Half),
            "quarter" => Ok(ShapeKind::Quarter),
            _ => Err(ConfigError::UnknownShape(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Full => "full",
            ShapeKind::Half => "half",
            ShapeKind::Quarter => "quarter",
        };
        f.write_str(name)
    }
}

/// Screen corner occupied by a quarter wedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::NorthEast,
        Orientation::NorthWest,
        Orientation::SouthEast,
        Orientation::SouthWest,
    ];

    /// Angle at which the wedge begins. Independent of sweep direction.
    pub const fn start_angle(self) -> f64 {
        match self {
            Orientation::SouthEast => 0.0,
            Orientation::SouthWest => 90.0,
            Orientation::NorthWest => 180.0,
            Orientation::NorthEast => 270.0,
        }
    }

    /// Per-axis sign applied when moving a point away from the named corner.
    ///
    /// Shared by the quarter center placement and the hole correction.
    pub const fn offset_signs(self) -> (f64, f64) {
        match self {
            Orientation::NorthEast => (-1.0, 1.0),
            Orientation::NorthWest => (1.0, 1.0),
            Orientation::SouthEast => (-1.0, -1.0),
            Orientation::SouthWest => (1.0, -1.0),
        }
    }
}

impl TryFrom<u8> for Orientation {
    type Error = ConfigError;

    /// Maps a host attribute index (declaration order) to an orientation.
    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Orientation::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ConfigError::UnknownOrientation(index.to_string()))
    }
}

impl FromStr for Orientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "north-east" | "northeast" | "ne" => Ok(Orientation::NorthEast),
            "north-west" | "northwest" | "nw" => Ok(Orientation::NorthWest),
            "south-east" | "southeast" | "se" => Ok(Orientation::SouthEast),
            "south-west" | "southwest" | "sw" => Ok(Orientation::SouthWest),
            _ => Err(ConfigError::UnknownOrientation(s.to_string())),
        }
    }
}

/// Sense in which the value arc grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Applies the direction's sign to an unsigned sweep magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Direction::Clockwise => magnitude,
            Direction::CounterClockwise => -magnitude,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Direction::Clockwise),
            1 => Ok(Direction::CounterClockwise),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' ', '-'], "");
        match normalized.as_str() {
            "clockwise" | "cw" => Ok(Direction::Clockwise),
            "counterclockwise" | "anticlockwise" | "ccw" => Ok(Direction::CounterClockwise),
            _ => Err(ConfigError::UnknownDirection(s.to_string())),
        }
    }
}

/// Start angle, unsigned maximum sweep and signed extent for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAngles {
    pub start: f64,
    pub max_sweep: f64,
    /// `max_sweep` with the direction's sign applied.
    pub extent: f64,
}

/// A concrete indicator shape.
///
/// Full and half shapes own a starting angle; the quarter shape derives its
/// start from the orientation table and has no starting angle to set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Full { start_angle: f64 },
    Half { start_angle: f64 },
    Quarter { orientation: Orientation },
}

impl Shape {
    pub fn new(kind: ShapeKind, orientation: Orientation, start_angle: Option<f64>) -> Self {
        match kind {
            ShapeKind::Full => Shape::Full {
                start_angle: start_angle.unwrap_or(DEFAULT_FULL_START_ANGLE),
            },
            ShapeKind::Half => Shape::Half {
                start_angle: start_angle.unwrap_or(DEFAULT_HALF_START_ANGLE),
            },
            ShapeKind::Quarter => Shape::Quarter { orientation },
        }
    }

    pub const fn kind(&self) -> ShapeKind {
        match self {
            Shape::Full { .. } => ShapeKind::Full,
            Shape::Half { .. } => ShapeKind::Half,
            Shape::Quarter { .. } => ShapeKind::Quarter,
        }
    }

    pub const fn max_angle(&self) -> f64 {
        self.kind().max_angle()
    }

    pub const fn orientation(&self) -> Option<Orientation> {
        match self {
            Shape::Quarter { orientation } => Some(*orientation),
            _ => None,
        }
    }

    pub fn resolve_angles(&self, direction: Direction) -> ResolvedAngles {
        let start = match self {
            Shape::Full { start_angle } | Shape::Half { start_angle } => *start_angle,
            Shape::Quarter { orientation } => orientation.start_angle(),
        };
        let max_sweep = self.max_angle();

        ResolvedAngles {
            start,
            max_sweep,
            extent: direction.signed(max_sweep),
        }
    }

    /// Replaces the starting angle of a full or half shape.
    ///
    /// Quarter shapes are left untouched; returns whether the angle applied.
    pub fn set_starting_angle(&mut self, angle: f64) -> bool {
        match self {
            Shape::Full { start_angle } | Shape::Half { start_angle } => {
                *start_angle = angle.rem_euclid(FULL_PIE_MAX_ANGLE);
                true
            }
            Shape::Quarter { .. } => false,
        }
    }

    /// Replaces the orientation of a quarter shape; other shapes ignore it.
    pub fn set_orientation(&mut self, new_orientation: Orientation) -> bool {
        match self {
            Shape::Quarter { orientation } => {
                *orientation = new_orientation;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_start_table_ignores_direction() {
        let expected = [
            (Orientation::NorthEast, 270.0),
            (Orientation::NorthWest, 180.0),
            (Orientation::SouthEast, 0.0),
            (Orientation::SouthWest, 90.0),
        ];
        for (orientation, start) in expected {
            let shape = Shape::Quarter { orientation };
            for direction in [Direction::Clockwise, Direction::CounterClockwise] {
                let angles = shape.resolve_angles(direction);
                assert_eq!(angles.start, start, "{orientation:?} {direction:?}");
                assert_eq!(angles.max_sweep, QUARTER_PIE_MAX_ANGLE);
            }
        }
    }

    #[test]
    fn test_direction_flips_extent_only() {
        let shape = Shape::Quarter {
            orientation: Orientation::SouthWest,
        };
        assert_eq!(shape.resolve_angles(Direction::Clockwise).extent, 90.0);
        assert_eq!(shape.resolve_angles(Direction::CounterClockwise).extent, -90.0);
    }

    #[test]
    fn test_full_and_half_defaults() {
        let full = Shape::new(ShapeKind::Full, Orientation::NorthEast, None);
        let angles = full.resolve_angles(Direction::Clockwise);
        assert_eq!(angles.start, 0.0);
        assert_eq!(angles.max_sweep, 360.0);

        let half = Shape::new(ShapeKind::Half, Orientation::NorthEast, None);
        let angles = half.resolve_angles(Direction::CounterClockwise);
        assert_eq!(angles.start, 180.0);
        assert_eq!(angles.max_sweep, 180.0);
        assert_eq!(angles.extent, -180.0);
    }

    #[test]
    fn test_starting_angle_is_inert_on_quarter() {
        let mut quarter = Shape::Quarter {
            orientation: Orientation::NorthWest,
        };
        assert!(!quarter.set_starting_angle(45.0));
        assert_eq!(quarter.resolve_angles(Direction::Clockwise).start, 180.0);

        let mut half = Shape::new(ShapeKind::Half, Orientation::NorthWest, None);
        assert!(half.set_starting_angle(-90.0));
        assert_eq!(half.resolve_angles(Direction::Clockwise).start, 270.0);
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("north-west".parse::<Orientation>(), Ok(Orientation::NorthWest));
        assert_eq!("SOUTH_EAST".parse::<Orientation>(), Ok(Orientation::SouthEast));
        assert_eq!("ne".parse::<Orientation>(), Ok(Orientation::NorthEast));
        assert!("up".parse::<Orientation>().is_err());

        assert_eq!(Orientation::try_from(3), Ok(Orientation::SouthWest));
        assert_eq!(
            Orientation::try_from(4),
            Err(ConfigError::UnknownOrientation("4".to_string()))
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("counter-clockwise".parse::<Direction>(), Ok(Direction::CounterClockwise));
        assert_eq!("CW".parse::<Direction>(), Ok(Direction::Clockwise));
        assert!(Direction::try_from(2).is_err());
        assert!("sideways".parse::<Direction>().is_err());
    }
}
