//! Quarter-turn rotation.
//!
//! Angles are clockwise on screen (the canvas y axis points down), matching
//! CSS `rotate()` and `CanvasRenderingContext2D.rotate`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// One of the four quarter-turn rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations in forward cyclic order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// The next rotation in forward order: 0 → 90 → 180 → 270 → 0.
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn radians(self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Exact `(cos, sin)` of the angle; avoids `cos(π/2) != 0` drift.
    pub fn cos_sin(self) -> (f64, f64) {
        match self {
            Rotation::Deg0 => (1.0, 0.0),
            Rotation::Deg90 => (0.0, 1.0),
            Rotation::Deg180 => (-1.0, 0.0),
            Rotation::Deg270 => (0.0, -1.0),
        }
    }

    /// Returns true if the visual bounding box is transposed (90° and 270°).
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u32> for Rotation {
    type Error = EditorError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(EditorError::InvalidRotation(other.to_string())),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = EditorError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| EditorError::InvalidRotation(value.to_string()))
            .and_then(Rotation::try_from)
    }
}

impl TryFrom<f64> for Rotation {
    type Error = EditorError;

    /// JS numbers arrive as `f64`; only the exact integral values are accepted.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0 || !(0.0..=270.0).contains(&value) {
            return Err(EditorError::InvalidRotation(value.to_string()));
        }
        Rotation::try_from(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_forward() {
        assert_eq!(Rotation::Deg0.next(), Rotation::Deg90);
        assert_eq!(Rotation::Deg90.next(), Rotation::Deg180);
        assert_eq!(Rotation::Deg180.next(), Rotation::Deg270);
        assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
    }

    #[test]
    fn test_four_steps_return_to_start() {
        for start in Rotation::ALL {
            let end = start.next().next().next().next();
            assert_eq!(start, end);
        }
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(!Rotation::Deg0.swaps_dimensions());
        assert!(Rotation::Deg90.swaps_dimensions());
        assert!(!Rotation::Deg180.swaps_dimensions());
        assert!(Rotation::Deg270.swaps_dimensions());
    }

    #[test]
    fn test_cos_sin_matches_radians() {
        for rotation in Rotation::ALL {
            let (cos, sin) = rotation.cos_sin();
            assert!((cos - rotation.radians().cos()).abs() < 1e-12);
            assert!((sin - rotation.radians().sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_try_from_accepts_quarter_turns() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::try_from(rotation.degrees()).unwrap(), rotation);
            assert_eq!(
                Rotation::try_from(f64::from(rotation.degrees())).unwrap(),
                rotation
            );
        }
    }

    #[test]
    fn test_try_from_rejects_other_values() {
        assert!(Rotation::try_from(45u32).is_err());
        assert!(Rotation::try_from(360u32).is_err());
        assert!(Rotation::try_from(-90i32).is_err());
        assert!(Rotation::try_from(90.5f64).is_err());
        assert!(Rotation::try_from(f64::NAN).is_err());
        assert!(matches!(
            Rotation::try_from(45u32),
            Err(EditorError::InvalidRotation(v)) if v == "45"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rotation::Deg270.to_string(), "270°");
    }
}
