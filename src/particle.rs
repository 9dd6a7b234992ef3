//! A single node of the particle network.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;

/// One particle: mutable kinematic state plus a fixed size and opacity.
///
/// Position and velocity change every tick. Radius and base opacity are
/// set at creation and have no setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    radius: f32,
    base_opacity: f32,
}

impl Particle {
    /// Particle with explicit state. Nothing is validated.
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, base_opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            base_opacity,
        }
    }

    /// Spawn a particle uniformly inside `bounds` with attributes drawn from
    /// the ranges in `config`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        let velocity = Vec2::new(
            rng.gen_range(-config.speed..=config.speed),
            rng.gen_range(-config.speed..=config.speed),
        );
        let (r_min, r_max) = config.radius_range;
        let (o_min, o_max) = config.opacity_range;

        Self {
            position,
            velocity,
            radius: rng.gen_range(r_min..=r_max),
            base_opacity: rng.gen_range(o_min..=o_max),
        }
    }

    /// Center in surface coordinates.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Displacement per tick.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }

    /// Advance one tick and bounce off the `[0, bounds]` box.
    ///
    /// The crossing is detected after the move and the position is not
    /// clamped, so a particle can sit past an edge for one frame before
    /// its flipped velocity carries it back.
    pub(crate) fn integrate(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Push the particle away from `pointer` with linear falloff.
    ///
    /// Returns whether any displacement was applied. A particle sitting
    /// exactly on the pointer has no direction to move in and is left alone.
    pub(crate) fn repel_from(&mut self, pointer: Vec2, radius: f32, strength: f32) -> bool {
        let delta = pointer - self.position;
        let distance = delta.length();

        if distance >= radius || distance <= 0.0 {
            return false;
        }

        let force = (radius - distance) / radius;
        self.position -= delta / distance * force * strength;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_within_ranges() {
        let config = FieldConfig::default();
        let bounds = Vec2::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Particle::random(&mut rng, bounds, &config);
            assert!(p.position.x >= 0.0 && p.position.x <= bounds.x);
            assert!(p.position.y >= 0.0 && p.position.y <= bounds.y);
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!((1.0..=3.0).contains(&p.radius()));
            assert!((0.2..=0.7).contains(&p.base_opacity()));
        }
    }

    #[test]
    fn test_reflection_after_move() {
        let mut p = Particle::new(Vec2::new(99.9, 50.0), Vec2::new(0.25, 0.0), 1.0, 0.5);
        p.integrate(Vec2::new(100.0, 100.0));

        // Past the edge for this frame, heading back
        assert!(p.position.x > 100.0);
        assert_eq!(p.velocity.x, -0.25);

        p.integrate(Vec2::new(100.0, 100.0));
        assert!(p.position.x < 100.0);
        assert_eq!(p.velocity.x, -0.25);
    }

    #[test]
    fn test_reflection_axes_independent() {
        let mut p = Particle::new(Vec2::new(0.1, 50.0), Vec2::new(-0.2, 0.1), 1.0, 0.5);
        p.integrate(Vec2::new(100.0, 100.0));
        assert_eq!(p.velocity, Vec2::new(0.2, 0.1));
    }

    #[test]
    fn test_repel_linear_falloff() {
        let mut p = Particle::new(Vec2::new(50.0, 0.0), Vec2::ZERO, 1.0, 0.5);
        // Pointer 50 units to the left: force 0.5, displacement 0.25 to the right
        assert!(p.repel_from(Vec2::new(0.0, 0.0), 100.0, 0.5));
        assert!((p.position.x - 50.25).abs() < 1e-5);
        assert_eq!(p.position.y, 0.0);
    }

    #[test]
    fn test_repel_outside_radius() {
        let mut p = Particle::new(Vec2::new(100.0, 0.0), Vec2::ZERO, 1.0, 0.5);
        assert!(!p.repel_from(Vec2::ZERO, 100.0, 0.5));
        assert_eq!(p.position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_repel_zero_distance_is_noop() {
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 1.0, 0.5);
        assert!(!p.repel_from(Vec2::new(50.0, 50.0), 100.0, 0.5));
        assert_eq!(p.position, Vec2::new(50.0, 50.0));
    }
}
