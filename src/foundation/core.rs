use std::fmt;

pub use kurbo::{Point, Vec2};

/// A field position in step units.
///
/// The engine is unit-agnostic; drill data conventionally uses 8 steps per 5 yards.
/// Field axes are screen-like: `x` grows east, `y` grows south.
pub type Coordinate = Point;

/// A relative displacement in step units.
pub type Delta = Vec2;

/// Position and facing of one performer at one beat.
///
/// `angle` is in degrees, measured clockwise from the `+x` axis. A fresh value is produced
/// for every query; nothing shares or mutates it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Horizontal position in steps.
    pub x: f64,
    /// Vertical position in steps.
    pub y: f64,
    /// Facing in degrees, clockwise from `+x`.
    pub angle: f64,
}

impl AnimationState {
    /// Build a state from a position and a facing.
    pub fn new(pos: Coordinate, angle: f64) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            angle,
        }
    }

    /// Position component as a [`Coordinate`].
    pub fn position(self) -> Coordinate {
        Point::new(self.x, self.y)
    }
}

/// Compass direction used in continuity text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Facing `+x` (0 degrees).
    East,
    /// Facing `+y` (90 degrees).
    South,
    /// Facing `-x` (180 degrees).
    West,
    /// Facing `-y` (270 degrees).
    North,
}

impl Direction {
    /// Snap a facing angle to the nearest compass direction.
    pub fn from_angle(angle_deg: f64) -> Self {
        let quadrant = (normalize_degrees(angle_deg) / 90.0).round() as u32 % 4;
        match quadrant {
            0 => Self::East,
            1 => Self::South,
            2 => Self::West,
            _ => Self::North,
        }
    }

    /// Facing angle of this direction in degrees.
    pub fn angle(self) -> f64 {
        match self {
            Self::East => 0.0,
            Self::South => 90.0,
            Self::West => 180.0,
            Self::North => 270.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
            Self::North => "N",
        };
        f.write_str(s)
    }
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// Direction of `v` in degrees, clockwise from `+x`.
///
/// A zero vector has no direction; it maps to 0.
pub fn angle_of(v: Delta) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    v.atan2().to_degrees()
}

/// Offset of length `radius` pointing along `angle_deg`.
pub fn offset_at(angle_deg: f64, radius: f64) -> Delta {
    Vec2::from_angle(angle_deg.to_radians()) * radius
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
