//! Degree helpers shared by bodies, boundary policies and steering.

use rand::Rng;

pub const FULL_TURN: f32 = 360.0;

/// Reduce any finite angle into [0, 360).
pub fn normalize_degrees(a: f32) -> f32 {
    let a = a.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negatives up to exactly 360
    if a >= FULL_TURN { 0.0 } else { a }
}

/// Signed turn from `from` to `to` taking the short way round, in (-180, 180].
pub fn shortest_angular_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 { delta - FULL_TURN } else { delta }
}

pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0.0..FULL_TURN)
}

/// A random turn inside an arc of `max` degrees centred on the current heading.
pub fn random_turn<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.random_range(0.0..max) - max / 2.0
}

pub fn close_to(a: f32, b: f32, delta: f32) -> bool {
    (a - b).abs() < delta
}

/// A "1 in n" chance. Always true for `n <= 1`.
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n <= 1 || rng.random_range(0..n) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn normalize_wraps_negatives_and_overflows() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-450.0), 270.0);
        assert_eq!(normalize_degrees(-1e-7), 0.0);
    }

    #[test]
    fn shortest_delta_picks_the_short_way() {
        assert_eq!(shortest_angular_delta(10.0, 30.0), 20.0);
        assert_eq!(shortest_angular_delta(30.0, 10.0), -20.0);
        assert_eq!(shortest_angular_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_angular_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_angular_delta(0.0, 180.0), 180.0);
    }

    #[test]
    fn random_helpers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let a = random_angle(&mut rng);
            assert!((0.0..360.0).contains(&a));
            let t = random_turn(&mut rng, 90.0);
            assert!((-45.0..45.0).contains(&t));
        }
        assert_eq!(random_turn(&mut rng, 0.0), 0.0);
        assert!(one_in(&mut rng, 1));
    }

    #[test]
    fn close_to_is_strict_and_symmetric() {
        assert!(close_to(10.0, 10.4, 0.5));
        assert!(close_to(10.4, 10.0, 0.5));
        assert!(!close_to(10.0, 10.5, 0.5));
        assert!(!close_to(-3.0, 3.0, 5.0));
        assert!(!close_to(1.0, 1.0, 0.0));
    }
}
