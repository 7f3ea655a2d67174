use crate::angle::normalize_degrees;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D value type used both for points in the arena and for offsets
/// between them. Every operation returns a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };
    pub const ONE: Vector2D = Vector2D { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Vector2D {
        Vector2D { x, y }
    }

    /// Axial projection of a heading (degrees) and a magnitude.
    pub fn from_polar(angle: f32, magnitude: f32) -> Vector2D {
        let (sin, cos) = angle.to_radians().sin_cos();
        Vector2D::new(cos * magnitude, sin * magnitude)
    }

    /// Length without squaring the components, so it neither underflows to
    /// zero for tiny vectors nor overflows to infinity for huge ones.
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, s: f32) -> Vector2D {
        Vector2D::new(self.x * s, self.y * s)
    }

    pub fn divide(self, s: f32) -> Result<Vector2D> {
        if s == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(Vector2D::new(self.x / s, self.y / s))
    }

    /// Unit vector in the same direction. A zero-length vector has no
    /// direction and yields [`SimError::DivisionByZero`].
    pub fn normalize(self) -> Result<Vector2D> {
        self.divide(self.magnitude())
    }

    /// Squared distance to `other`, for proximity checks that don't need the root.
    pub fn distance_squared(self, other: Vector2D) -> f32 {
        let d = other - self;
        d.x * d.x + d.y * d.y
    }

    /// Heading from `self` towards `other`, in degrees within [0, 360).
    pub fn angle_to(self, other: Vector2D) -> f32 {
        let d = other - self;
        normalize_degrees(d.y.atan2(d.x).to_degrees())
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f32) -> Vector2D {
        self.scale(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

impl From<[f32; 2]> for Vector2D {
    fn from([x, y]: [f32; 2]) -> Vector2D {
        Vector2D::new(x, y)
    }
}

/// Free-function form of [`Vector2D::distance_squared`].
pub fn distance_squared(p: Vector2D, q: Vector2D) -> f32 {
    p.distance_squared(q)
}

/// Free-function form of [`Vector2D::angle_to`].
pub fn angle_to(p: Vector2D, q: Vector2D) -> f32 {
    p.angle_to(q)
}
