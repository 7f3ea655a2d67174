use crate::arena::Arena;
use crate::boundary::BoundaryPolicy;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Per-simulation settings. Every example variant is a different `Config`,
/// not a different body type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Update passes per rendered frame.
    pub iterations_per_tick: u32,
    pub boundary: BoundaryPolicy,
    /// How far a body can see its neighbours.
    pub neighbor_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            arena_width: 640.0,
            arena_height: 640.0,
            iterations_per_tick: 1,
            boundary: BoundaryPolicy::default(),
            neighbor_radius: 16.0,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.arena()?;
        if self.iterations_per_tick == 0 {
            return Err(SimError::InvalidConfiguration(
                "iterations_per_tick must be at least 1".into(),
            ));
        }
        if !(self.neighbor_radius.is_finite() && self.neighbor_radius > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "neighbor_radius must be positive, got {}",
                self.neighbor_radius
            )));
        }
        if let BoundaryPolicy::Bounce { friction } = self.boundary {
            if !(0.0..=1.0).contains(&friction) {
                return Err(SimError::InvalidConfiguration(format!(
                    "bounce friction must be within [0, 1], got {friction}"
                )));
            }
        }
        Ok(())
    }

    pub fn arena(&self) -> Result<Arena> {
        Arena::new(self.arena_width, self.arena_height)
    }
}
