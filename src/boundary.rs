//! What a body does when a step carries it outside the arena.
//!
//! Each policy runs once per tick, after [`Body::advance`]. Leaving the
//! arena is never an error.

use crate::angle::{normalize_degrees, random_turn, shortest_angular_delta};
use crate::arena::{Crossing, Wall};
use crate::body::Body;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FRICTION: f32 = 0.2;

/// Goals already this close to a wall's normal are left alone by [`Body::bound`].
const GOAL_HYSTERESIS: f32 = 45.0;
/// Width of the random arc a new goal is picked from, centred on the normal.
const GOAL_SPREAD: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Stop dead at the edge.
    Clip,
    /// Reflect off the edge, losing `friction` of the speed.
    Bounce {
        #[serde(default = "default_friction")]
        friction: f32,
    },
    /// Reappear on the opposite edge.
    Wrap,
    /// Stop at the edge and pick a new goal heading pointing back in.
    Bound,
    /// Stop at the edge and cancel the velocity component driving into it.
    Halt,
    /// Leave the body where it is; its owner removes it.
    Cull,
}

fn default_friction() -> f32 {
    DEFAULT_FRICTION
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Bounce { friction: DEFAULT_FRICTION }
    }
}

impl BoundaryPolicy {
    pub fn apply<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R) -> Crossing {
        match *self {
            BoundaryPolicy::Clip => body.clip(),
            BoundaryPolicy::Bounce { friction } => body.bounce(friction),
            BoundaryPolicy::Wrap => body.wrap(),
            BoundaryPolicy::Bound => body.bound(rng),
            BoundaryPolicy::Halt => body.halt(),
            BoundaryPolicy::Cull => body.arena().test(body.position()),
        }
    }
}

impl Body {
    /// Clamp both axes into the arena. Reports the x wall if both were hit.
    pub fn clip(&mut self) -> Crossing {
        let (x_wall, y_wall) = self.clamp();
        match x_wall.or(y_wall) {
            Some(wall) => Crossing::Exited(wall),
            None => Crossing::Inside,
        }
    }

    /// Clip, then mirror the heading about the wall's normal and lose
    /// `friction` of the speed. On a corner only the y wall reflects.
    /// Friction is clamped to `[0, 1]`, so a bounce never flips or grows speed.
    pub fn bounce(&mut self, friction: f32) -> Crossing {
        let friction = friction.clamp(0.0, 1.0);
        let (x_wall, y_wall) = self.clamp();
        let Some(wall) = y_wall.or(x_wall) else {
            return Crossing::Inside;
        };
        let normal = wall.inward_normal();
        self.angle = normalize_degrees(2.0 * normal - 180.0 - self.angle);
        self.speed *= 1.0 - friction;
        Crossing::Exited(wall)
    }

    /// Teleport to the opposite edge. Heading and speed are untouched.
    pub fn wrap(&mut self) -> Crossing {
        let (w, h) = (self.arena().width(), self.arena().height());
        let crossing = self.arena().test(self.position());

        if self.x < 0.0 {
            self.x = w;
        } else if self.x > w {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = h;
        } else if self.y > h {
            self.y = 0.0;
        }
        crossing
    }

    /// Clip, then steer away from the wall: the goal heading becomes the
    /// wall's normal give or take 45 degrees, unless it already points
    /// roughly that way.
    pub fn bound<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Crossing {
        let crossing = self.clip();
        if let Crossing::Exited(wall) = crossing {
            let normal = wall.inward_normal();
            if shortest_angular_delta(normal, self.goal_angle).abs() >= GOAL_HYSTERESIS {
                self.goal_angle = normalize_degrees(normal + random_turn(rng, GOAL_SPREAD));
            }
        }
        crossing
    }

    /// Clip, then drop whatever part of the velocity pushes into the walls hit.
    pub fn halt(&mut self) -> Crossing {
        let (x_wall, y_wall) = self.clamp();
        let mut v = self.velocity();
        if x_wall.is_some() {
            v.x = 0.0;
        }
        if y_wall.is_some() {
            v.y = 0.0;
        }
        if x_wall.is_some() || y_wall.is_some() {
            self.set_velocity(v);
        }
        match x_wall.or(y_wall) {
            Some(wall) => Crossing::Exited(wall),
            None => Crossing::Inside,
        }
    }

    fn clamp(&mut self) -> (Option<Wall>, Option<Wall>) {
        let (w, h) = (self.arena().width(), self.arena().height());

        let x_wall = if self.x < 0.0 {
            self.x = 0.0;
            Some(Wall::West)
        } else if self.x > w {
            self.x = w;
            Some(Wall::East)
        } else {
            None
        };

        let y_wall = if self.y < 0.0 {
            self.y = 0.0;
            Some(Wall::South)
        } else if self.y > h {
            self.y = h;
            Some(Wall::North)
        } else {
            None
        };

        (x_wall, y_wall)
    }
}
