use crate::arena::Arena;
use crate::body::{Body, Pose};
use crate::boundary::BoundaryPolicy;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Snapshot, SpatialGrid};
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// What an update callback gets to look at besides the body it is updating.
pub struct Context<'a> {
    pub tick: u64,
    pub index: usize,
    pub snapshot: &'a Snapshot<'a>,
}

impl Context<'_> {
    pub fn neighbors(&self) -> Vec<usize> {
        self.snapshot.neighbors(self.index)
    }
}

/// A discrete instruction coming from the input side, usually a key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Turn(f32),
    Accelerate(f32),
    SetSpeed(f32),
    Fire { extra_speed: f32, muzzle_offset: f32 },
    TogglePause,
    FasterTicks,
    SlowerTicks,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Maps whatever key type the windowing layer uses onto commands.
/// Keys without a binding resolve to nothing.
pub struct KeyMap<K> {
    bindings: HashMap<K, Command>,
}

impl<K: Eq + Hash> Default for KeyMap<K> {
    fn default() -> Self {
        KeyMap { bindings: HashMap::new() }
    }
}

impl<K: Eq + Hash> KeyMap<K> {
    pub fn new() -> KeyMap<K> {
        KeyMap::default()
    }

    pub fn bind(mut self, key: K, command: Command) -> KeyMap<K> {
        self.bindings.insert(key, command);
        self
    }

    pub fn resolve(&self, key: &K) -> Option<Command> {
        self.bindings.get(key).copied()
    }
}

/// A population of bodies sharing one arena, stepped frame by frame.
pub struct World {
    config: Config,
    arena: Arena,
    bodies: Vec<Body>,
    grid: SpatialGrid,
    tick: u64,
    iterations_per_tick: u32,
    paused: bool,
}

impl World {
    pub fn new(config: Config) -> Result<World> {
        config.validate()?;
        let arena = config.arena()?;
        let grid = SpatialGrid::new(config.neighbor_radius, &arena);
        log::debug!(
            "world created: {}x{}, {:?}, grid cells {}",
            arena.width(),
            arena.height(),
            config.boundary,
            grid.cell_size()
        );
        Ok(World {
            iterations_per_tick: config.iterations_per_tick,
            config,
            arena,
            bodies: Vec::new(),
            grid,
            tick: 0,
            paused: false,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.bodies.iter().map(Body::pose)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn iterations_per_tick(&self) -> u32 {
        self.iterations_per_tick
    }

    pub fn set_iterations_per_tick(&mut self, n: u32) {
        self.iterations_per_tick = n.max(1);
        log::info!("iterations per tick: {}", self.iterations_per_tick);
    }

    /// Add `n` stationary bodies at random spots and hand them back for setup.
    pub fn populate<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> &mut [Body] {
        let start = self.bodies.len();
        let arena = self.arena;
        self.bodies.extend((0..n).map(|_| Body::spawn(arena, rng)));
        log::info!("populated {} bodies ({} total)", n, self.bodies.len());
        &mut self.bodies[start..]
    }

    pub fn spawn(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Body> {
        (index < self.bodies.len()).then(|| self.bodies.remove(index))
    }

    /// Run one rendered frame: `iterations_per_tick` steps, then bump the
    /// tick counter. Does nothing while paused.
    pub fn frame<R, F>(&mut self, rng: &mut R, mut update: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&mut Body, &Context<'_>, &mut R),
    {
        if self.paused {
            return;
        }
        for _ in 0..self.iterations_per_tick {
            self.step(rng, &mut update);
        }
        self.tick += 1;
    }

    /// One update pass. Every neighbour query inside `update` sees the poses
    /// from before the pass; each body is then advanced and run through the
    /// boundary policy.
    pub fn step<R, F>(&mut self, rng: &mut R, update: &mut F)
    where
        R: Rng + ?Sized,
        F: FnMut(&mut Body, &Context<'_>, &mut R),
    {
        let snapshot = Snapshot::capture(&self.bodies, &mut self.grid, self.config.neighbor_radius);
        let policy = self.config.boundary;
        let tick = self.tick;

        for (index, body) in self.bodies.iter_mut().enumerate() {
            let ctx = Context { tick, index, snapshot: &snapshot };
            update(body, &ctx, rng);
            body.advance();
            policy.apply(body, rng);
        }

        if policy == BoundaryPolicy::Cull {
            let before = self.bodies.len();
            self.bodies.retain(|b| !b.arena().test(b.position()).exited());
            let culled = before - self.bodies.len();
            if culled > 0 {
                log::trace!("culled {} bodies at tick {}", culled, tick);
            }
        }
    }

    pub fn execute(&mut self, target: usize, command: Command) -> Flow {
        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                log::info!("paused: {}", self.paused);
            }
            Command::FasterTicks => self.set_iterations_per_tick(self.iterations_per_tick + 1),
            Command::SlowerTicks => {
                self.set_iterations_per_tick(self.iterations_per_tick.saturating_sub(1))
            }
            Command::Quit => return Flow::Quit,
            Command::Fire { extra_speed, muzzle_offset } => {
                if let Some(shooter) = self.bodies.get(target) {
                    let projectile = shooter.launch(extra_speed, muzzle_offset);
                    log::debug!("body {} fired from ({:.1}, {:.1})", target, projectile.x, projectile.y);
                    self.bodies.push(projectile);
                }
            }
            Command::Turn(delta) => {
                if let Some(body) = self.bodies.get_mut(target) {
                    body.turn(delta);
                }
            }
            Command::Accelerate(delta) => {
                if let Some(body) = self.bodies.get_mut(target) {
                    body.accelerate(delta);
                }
            }
            Command::SetSpeed(speed) => {
                if let Some(body) = self.bodies.get_mut(target) {
                    body.speed = speed;
                }
            }
        }
        Flow::Continue
    }

    /// Look `key` up in `keys` and run the bound command, if any.
    pub fn handle_key<K: Eq + Hash>(&mut self, keys: &KeyMap<K>, key: &K, target: usize) -> Flow {
        match keys.resolve(key) {
            Some(command) => self.execute(target, command),
            None => Flow::Continue,
        }
    }
}
