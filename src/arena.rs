use crate::error::{Result, SimError};
use crate::vector::Vector2D;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One side of the arena. The arena is y-up: North is the `y = height` edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    /// Heading (degrees) of the normal pointing from this wall into the arena.
    pub fn inward_normal(self) -> f32 {
        match self {
            Wall::West => 0.0,
            Wall::South => 90.0,
            Wall::East => 180.0,
            Wall::North => 270.0,
        }
    }
}

/// Result of testing a position against the arena rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    Inside,
    Exited(Wall),
}

impl Crossing {
    pub fn wall(self) -> Option<Wall> {
        match self {
            Crossing::Inside => None,
            Crossing::Exited(wall) => Some(wall),
        }
    }

    pub fn exited(self) -> bool {
        matches!(self, Crossing::Exited(_))
    }
}

/// The `[0, width] x [0, height]` rectangle bodies live in. Fixed once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Arena> {
        if !(width.is_finite() && width > 0.0) || !(height.is_finite() && height > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "arena must have positive finite dimensions, got {width}x{height}"
            )));
        }
        Ok(Arena { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn contains(&self, p: Vector2D) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Which wall (if any) `p` lies beyond. The x axis is checked first.
    pub fn test(&self, p: Vector2D) -> Crossing {
        if p.x < 0.0 {
            Crossing::Exited(Wall::West)
        } else if p.x > self.width {
            Crossing::Exited(Wall::East)
        } else if p.y < 0.0 {
            Crossing::Exited(Wall::South)
        } else if p.y > self.height {
            Crossing::Exited(Wall::North)
        } else {
            Crossing::Inside
        }
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D {
        Vector2D::new(rng.random_range(0.0..self.width), rng.random_range(0.0..self.height))
    }
}
