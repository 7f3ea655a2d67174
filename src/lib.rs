//! Kinematic core for small 2D simulations: bodies with a heading and a
//! speed, moving one tick at a time inside a rectangular arena and reacting
//! to its walls.

pub mod angle;
pub mod arena;
pub mod body;
pub mod boundary;
pub mod config;
pub mod error;
pub mod grid;
pub mod trail;
pub mod vector;
pub mod world;

/// Everything a simulation usually needs, for glob importing.
pub mod library {
    pub use crate::angle::{
        close_to, normalize_degrees, one_in, random_angle, random_turn, shortest_angular_delta,
    };
    pub use crate::arena::{Arena, Crossing, Wall};
    pub use crate::body::{Body, Pose};
    pub use crate::boundary::{BoundaryPolicy, DEFAULT_FRICTION};
    pub use crate::config::Config;
    pub use crate::error::SimError;
    pub use crate::grid::{Snapshot, SpatialGrid};
    pub use crate::trail::Trail;
    pub use crate::vector::{Vector2D, angle_to, distance_squared};
    pub use crate::world::{Command, Context, Flow, KeyMap, World};
}
