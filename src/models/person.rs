//! Campus coordinates and people.
//!
//! Teachers and students share the same [`Person`] record: an identifier
//! plus a location on the campus plane.

use serde::{Deserialize, Serialize};

/// A point on the campus plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A teacher or a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique person identifier.
    pub id: String,
    /// Where the person is located when travelling to class.
    pub location: Point,
}

impl Person {
    /// Creates a person at the given location.
    pub fn new(id: impl Into<String>, location: impl Into<Point>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}
