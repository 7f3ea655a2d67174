use crate::angle::{normalize_degrees, shortest_angular_delta};
use crate::arena::Arena;
use crate::vector::Vector2D;
use rand::Rng;

/// Turns smaller than this are treated as already facing the goal.
const GOAL_DEADBAND: f32 = 0.1;

/// What a renderer needs to draw a body for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector2D,
    pub angle: f32,
    pub speed: f32,
}

/// A kinematic entity: a position plus a heading and a scalar speed.
///
/// Heading and speed are the canonical state. The velocity vector is always
/// derived from them so the two representations can never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, counterclockwise from the positive x axis.
    pub angle: f32,
    /// Desired heading for steering behaviours.
    pub goal_angle: f32,
    /// Units per tick. Negative values move the body backwards.
    pub speed: f32,
    arena: Arena,
}

impl Body {
    pub fn new(arena: Arena, x: f32, y: f32) -> Body {
        Body {
            x,
            y,
            angle: 0.0,
            goal_angle: 0.0,
            speed: 0.0,
            arena,
        }
    }

    /// A stationary body at a random spot inside `arena`.
    pub fn spawn<R: Rng + ?Sized>(arena: Arena, rng: &mut R) -> Body {
        let p = arena.random_point(rng);
        Body::new(arena, p.x, p.y)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn position(&self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Vector2D) {
        self.x = p.x;
        self.y = p.y;
    }

    pub fn velocity(&self) -> Vector2D {
        Vector2D::from_polar(self.angle, self.speed)
    }

    /// Re-derive heading and speed from `v`. A zero vector stops the body
    /// but keeps its heading.
    pub fn set_velocity(&mut self, v: Vector2D) {
        self.speed = v.magnitude();
        if self.speed > 0.0 {
            self.angle = normalize_degrees(v.y.atan2(v.x).to_degrees());
        }
    }

    /// Where the body will be after the next [`advance`](Body::advance).
    pub fn endpoint(&self) -> Vector2D {
        self.position() + self.velocity()
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position(),
            angle: self.angle,
            speed: self.speed,
        }
    }

    /// Turn by `delta` degrees. Passing `None` leaves the heading alone.
    pub fn turn(&mut self, delta: impl Into<Option<f32>>) {
        if let Some(delta) = delta.into() {
            self.angle = normalize_degrees(self.angle + delta);
        }
    }

    /// One Euler step along the current heading at the current speed.
    pub fn advance(&mut self) {
        self.advance_by(self.angle, self.speed);
    }

    /// Step along an arbitrary heading/speed without touching the stored ones.
    pub fn advance_by(&mut self, angle: f32, speed: f32) {
        let step = Vector2D::from_polar(angle, speed);
        self.x += step.x;
        self.y += step.y;
    }

    pub fn accelerate(&mut self, delta: f32) {
        self.speed += delta;
    }

    pub fn limit_speed(&mut self, min: f32, max: f32) {
        self.speed = self.speed.clamp(min, max);
    }

    /// Add `force` to the velocity, e.g. a per-tick gravity vector.
    pub fn apply_force(&mut self, force: Vector2D) {
        self.set_velocity(self.velocity() + force);
    }

    /// Proportional steering: turn towards `goal_angle` by at most
    /// `max_turn_rate` degrees the short way round.
    pub fn turn_towards_goal(&mut self, max_turn_rate: f32) {
        let delta = shortest_angular_delta(self.angle, self.goal_angle);
        if delta.abs() < GOAL_DEADBAND {
            return;
        }
        self.turn(delta.clamp(-max_turn_rate, max_turn_rate));
    }

    /// A new body leaving this one along its heading, `extra_speed` faster,
    /// pushed `muzzle_offset` units ahead. The shooter is left untouched.
    pub fn launch(&self, extra_speed: f32, muzzle_offset: f32) -> Body {
        let mut projectile = Body::new(self.arena, self.x, self.y);
        projectile.angle = self.angle;
        projectile.goal_angle = self.angle;
        projectile.speed = self.speed + extra_speed;
        projectile.advance_by(self.angle, muzzle_offset);
        projectile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn arena() -> Arena {
        Arena::new(100.0, 100.0).unwrap()
    }

    fn body(x: f32, y: f32, angle: f32, speed: f32) -> Body {
        let mut b = Body::new(arena(), x, y);
        b.angle = angle;
        b.speed = speed;
        b
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn spawn_is_inside_and_stationary() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let b = Body::spawn(arena(), &mut rng);
            assert!(b.arena().contains(b.position()));
            assert_eq!((b.angle, b.goal_angle, b.speed), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn velocity_round_trip() {
        for angle in [0.0, 30.0, 90.0, 179.0, 180.0, 225.0, 359.5] {
            for speed in [0.5, 1.0, 10.0, 250.0] {
                let mut b = body(0.0, 0.0, angle, speed);
                let v = b.velocity();
                b.set_velocity(v);
                assert_close(b.speed, speed);
                assert_close(shortest_angular_delta(angle, b.angle), 0.0);
            }
        }
    }

    #[test]
    fn set_velocity_from_vector() {
        let mut b = body(0.0, 0.0, 10.0, 1.0);
        b.set_velocity(Vector2D::new(0.0, -3.0));
        assert_close(b.speed, 3.0);
        assert_close(b.angle, 270.0);

        b.set_velocity(Vector2D::ZERO);
        assert_eq!(b.speed, 0.0);
        assert_close(b.angle, 270.0);
    }

    #[test]
    fn advance_is_deterministic() {
        let mut a = body(10.0, 20.0, 33.0, 4.0);
        let mut b = a.clone();
        a.advance();
        b.advance();
        assert_eq!(a.position(), b.position());
        assert_close(a.x, 10.0 + 33f32.to_radians().cos() * 4.0);
        assert_close(a.y, 20.0 + 33f32.to_radians().sin() * 4.0);
    }

    #[test]
    fn negative_speed_moves_backwards() {
        let mut b = body(50.0, 50.0, 0.0, -2.0);
        b.advance();
        assert_close(b.x, 48.0);
    }

    #[test]
    fn advance_by_keeps_heading() {
        let mut b = body(50.0, 50.0, 0.0, 1.0);
        b.advance_by(90.0, 15.0);
        assert_close(b.x, 50.0);
        assert_close(b.y, 65.0);
        assert_eq!((b.angle, b.speed), (0.0, 1.0));
    }

    #[test]
    fn turn_normalizes_and_ignores_none() {
        let mut b = body(0.0, 0.0, 350.0, 0.0);
        b.turn(20.0);
        assert_close(b.angle, 10.0);
        b.turn(-30.0);
        assert_close(b.angle, 340.0);
        b.turn(None::<f32>);
        assert_close(b.angle, 340.0);
    }

    #[test]
    fn turn_towards_goal_is_rate_limited() {
        let mut b = body(0.0, 0.0, 350.0, 0.0);
        b.goal_angle = 20.0;
        b.turn_towards_goal(5.0);
        assert_close(b.angle, 355.0);
        for _ in 0..10 {
            b.turn_towards_goal(5.0);
        }
        assert_close(b.angle, 20.0);
    }

    #[test]
    fn apply_force_adds_to_velocity() {
        let mut b = body(0.0, 0.0, 0.0, 3.0);
        b.apply_force(Vector2D::new(0.0, 4.0));
        assert_close(b.speed, 5.0);
        assert_close(b.velocity().y, 4.0);
    }

    #[test]
    fn launch_leaves_shooter_alone() {
        let tank = body(50.0, 50.0, 90.0, 2.0);
        let bullet = tank.launch(5.0, 15.0);
        assert_close(bullet.x, 50.0);
        assert_close(bullet.y, 65.0);
        assert_close(bullet.speed, 7.0);
        assert_eq!(bullet.angle, 90.0);
        assert_eq!(tank.position(), Vector2D::new(50.0, 50.0));
    }
}
