//! Bouncing balls on top of the rsim kinematic core.
//!
//! Balls fall under a constant per-tick gravity, bounce off the walls losing
//! some speed each time, and leave a fading trail. SDL2 does the drawing.
//!
//! Keys: Space re-throws every ball, R flips gravity, P pauses, Up/Down
//! change the number of updates per frame, Escape or Q quits.
//!
//! An optional first argument names a JSON config file.

use rand::Rng;
use rsim::library::*;
use sdl2::event::Event;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::{Canvas, RenderTarget};
use std::time::Duration;

/// Window title displayed in the title bar
const TITLE: &str = "Bounce";
/// Background color for the canvas
const BACKGROUND: Color = Color::BLACK;
const BALL_COUNT: usize = 50;
const BALL_RADIUS: i16 = 5;
const MAX_THROW_SPEED: f32 = 25.0;
/// Per-tick gravity; the arena is y-up so this pulls towards the bottom
const GRAVITY: Vector2D = Vector2D::new(0.0, -18.0 / 60.0);
const TRAIL_LENGTH: usize = 20;

fn to_abgr(color: Color) -> Color {
    Color::RGBA(color.a, color.b, color.g, color.r)
}

/// Anything the demo knows how to put on screen.
trait Drawable {
    /// `height` flips the y-up arena onto SDL's y-down screen.
    fn draw<T: RenderTarget>(&self, canvas: &mut Canvas<T>, height: f32);
}

impl Drawable for Body {
    fn draw<T: RenderTarget>(&self, canvas: &mut Canvas<T>, height: f32) {
        let x = self.x as i16;
        let y = (height - self.y) as i16;
        let tip = self.position() + Vector2D::from_polar(self.angle, 10.0 + 3.0 * self.speed);
        let _ = canvas.line(x, y, tip.x as i16, (height - tip.y) as i16, to_abgr(Color::RED));
        let _ = canvas.filled_circle(x, y, BALL_RADIUS, to_abgr(Color::WHITE));
    }
}

impl Drawable for Trail {
    fn draw<T: RenderTarget>(&self, canvas: &mut Canvas<T>, height: f32) {
        for (a, b, age) in self.segments() {
            let shade = (255.0 * (1.0 - age)) as u8;
            let _ = canvas.line(
                a.x as i16,
                (height - a.y) as i16,
                b.x as i16,
                (height - b.y) as i16,
                to_abgr(Color::RGB(0, shade, 0)),
            );
        }
    }
}

/// Give every ball a fresh random upward throw.
fn throw<R: Rng>(bodies: &mut [Body], rng: &mut R) {
    for body in bodies {
        body.speed = rng.random_range(0.0..MAX_THROW_SPEED);
        body.angle = random_angle(rng) / 2.0;
    }
}

fn load_config() -> Result<Config, SimError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| {
                SimError::InvalidConfiguration(format!("cannot read {path}: {e}"))
            })?;
            Config::from_json(&json)
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = load_config()?;
    let mut world = World::new(config)?;
    let mut rng = rand::rng();
    throw(world.populate(BALL_COUNT, &mut rng), &mut rng);
    let mut trails = vec![Trail::new(TRAIL_LENGTH); BALL_COUNT];
    let mut gravity = GRAVITY;

    let keys = KeyMap::new()
        .bind(Keycode::P, Command::TogglePause)
        .bind(Keycode::Up, Command::FasterTicks)
        .bind(Keycode::Down, Command::SlowerTicks)
        .bind(Keycode::Escape, Command::Quit)
        .bind(Keycode::Q, Command::Quit);

    // Initialize SDL2 subsystems
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let width = world.arena().width();
    let height = world.arena().height();
    let window = video_subsystem
        .window(TITLE, width as u32, height as u32)
        .position_centered()
        .build()?;

    let mut canvas = window.into_canvas().build()?;
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();
    canvas.present();

    let mut event_pump = sdl_context.event_pump()?;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown { keycode: Some(Keycode::Space), .. } => {
                    throw(world.bodies_mut(), &mut rng);
                }
                Event::KeyDown { keycode: Some(Keycode::R), .. } => {
                    gravity = -gravity;
                    log::info!("gravity reversed");
                }
                Event::KeyDown { keycode: Some(key), .. } => {
                    if world.handle_key(&keys, &key, 0) == Flow::Quit {
                        break 'running;
                    }
                }
                _ => {}
            }
        }

        world.frame(&mut rng, |body, _, _| body.apply_force(gravity));

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        for (trail, body) in trails.iter_mut().zip(world.bodies()) {
            if !world.paused() {
                trail.push(body);
            }
            trail.draw(&mut canvas, height);
            body.draw(&mut canvas, height);
        }
        canvas.present();

        // Target 60 FPS
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
