//! The particle network itself.
//!
//! A [`ParticleField`] owns a fixed set of particles on a rectangular
//! surface. Each [`tick`](ParticleField::tick):
//!
//! 1. clears the surface,
//! 2. moves every particle by its velocity and flips the velocity
//!    component of any axis that ended up outside the surface,
//! 3. pushes particles within the repulsion radius away from the pointer,
//! 4. links every pair of particles closer than the link distance with a
//!    line whose opacity falls off linearly with distance,
//! 5. draws each particle as a translucent disc with a glowing core.
//!
//! ```ignore
//! use netglow::{FieldConfig, ParticleField, RecordingSurface};
//!
//! let mut field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 42)?;
//! let mut surface = RecordingSurface::new();
//! let stats = field.tick(&mut surface);
//! assert_eq!(stats.particles, 48);
//! ```
//!
//! Linking checks every pair, which is quadratic in the particle count.
//! That is fine at the default cap of 80 but worth revisiting if the cap
//! or the sizing rule changes.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::input::{PointerEvent, PointerState};
use crate::particle::Particle;
use crate::surface::DrawSurface;

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles in the field.
    pub particles: usize,
    /// Lines drawn between particle pairs.
    pub links: usize,
    /// Particles displaced by the pointer.
    pub repelled: usize,
}

/// A link between particles `a` and `b` (indices into
/// [`ParticleField::particles`], `a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Distance between the two particles, below the link distance.
    pub distance: f32,
    /// Stroke alpha for this link.
    pub opacity: f32,
}

/// A fixed set of particles on a `width` x `height` surface, plus the last
/// known pointer position.
///
/// The particle count is chosen once at construction from the surface
/// area. Resizing only moves the bounds the particles bounce off.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: Vec2,
    pointer: PointerState,
}

impl ParticleField {
    /// Create a field sized to a `width` x `height` surface, seeded from the
    /// thread-local RNG.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::with_rng(config, width, height, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new) but reproducible.
    pub fn seeded(
        config: FieldConfig,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, width, height, &mut StdRng::seed_from_u64(seed))
    }

    /// Validate `config` and seed particles from `rng`.
    ///
    /// Fails only when the config is invalid.
    pub fn with_rng<R: Rng + ?Sized>(
        config: FieldConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = Vec2::new(width, height);
        let count = Self::particle_count_for(&config, width, height);
        let particles = (0..count)
            .map(|_| Particle::random(rng, bounds, &config))
            .collect();

        log::debug!(
            "Seeded {} particles on a {}x{} surface",
            count,
            width,
            height
        );

        Ok(Self::from_particles(config, width, height, particles))
    }

    /// Build a field from an explicit particle set. The count formula is
    /// not applied and the config is not validated.
    pub fn from_particles(
        config: FieldConfig,
        width: f32,
        height: f32,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            config,
            particles,
            bounds: Vec2::new(width, height),
            pointer: PointerState::new(),
        }
    }

    /// `min(max_particles, floor(width * height / area_per_particle))`.
    pub fn particle_count_for(config: &FieldConfig, width: f32, height: f32) -> usize {
        let area = f64::from(width.max(0.0)) * f64::from(height.max(0.0));
        let by_area = (area / f64::from(config.area_per_particle)).floor();
        // Float to int casts saturate, so huge surfaces just hit the cap
        (by_area as usize).min(config.max_particles)
    }

    /// Parameters the field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Particles in draw order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface size as `(width, height)`.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }

    /// Last known pointer position in surface coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.position()
    }

    /// Whether a pointer event has arrived. Until then the pointer sits at
    /// the origin and still repels.
    pub fn pointer_seen(&self) -> bool {
        self.pointer.has_moved()
    }

    /// Record a new surface size.
    ///
    /// Particles are neither added, removed nor moved. Any that now lie
    /// outside the surface bounce back on their next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        let bounds = Vec2::new(width, height);
        if bounds != self.bounds {
            log::debug!("Surface resized to {}x{}", width, height);
            self.bounds = bounds;
        }
    }

    /// Store the pointer position carried by `event`.
    pub fn update_pointer(&mut self, event: PointerEvent) {
        if !self.pointer.has_moved() {
            log::debug!("First pointer event at {}", event.local());
        }
        self.pointer.update(event);
    }

    /// Advance the simulation by one tick without drawing.
    ///
    /// Returns how many particles the pointer displaced.
    pub fn step(&mut self) -> usize {
        let bounds = self.bounds;
        let pointer = self.pointer.position();
        let radius = self.config.repulsion_radius;
        let strength = self.config.repulsion_strength;

        for particle in &mut self.particles {
            particle.integrate(bounds);
        }

        let mut repelled = 0;
        for particle in &mut self.particles {
            if particle.repel_from(pointer, radius, strength) {
                repelled += 1;
            }
        }
        repelled
    }

    /// Every pair of particles close enough to be linked, each pair once.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.config.link_distance;
        let peak = self.config.link_opacity;

        self.particles.iter().enumerate().flat_map(move |(a, pa)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, pb)| {
                    let distance = pa.position.distance(pb.position);
                    (distance < max).then(|| Link {
                        a,
                        b: a + 1 + offset,
                        distance,
                        opacity: (max - distance) / max * peak,
                    })
                })
        })
    }

    /// Render the current state: clear, links, then particles.
    ///
    /// Leaves the surface with no shadow active. Returns the number of
    /// links drawn.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> usize {
        surface.clear_rect(Vec2::ZERO, self.bounds);

        let accent = self.config.accent;
        let mut links = 0;
        for link in self.links() {
            surface.set_stroke_color(accent.with_alpha(link.opacity));
            surface.set_line_width(self.config.link_width);
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
            );
            links += 1;
        }

        for particle in &self.particles {
            surface.set_fill_color(accent.with_alpha(particle.base_opacity()));
            surface.fill_circle(particle.position, particle.radius());

            surface.set_shadow(self.config.glow);
            surface.fill_circle(particle.position, particle.radius() * self.config.core_scale);
            surface.clear_shadow();
        }

        links
    }

    /// One full frame: [`step`](Self::step) then [`draw`](Self::draw).
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let repelled = self.step();
        let links = self.draw(surface);

        FrameStats {
            particles: self.particles.len(),
            links,
            repelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, 0.5)
    }

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField::from_particles(FieldConfig::default(), 800.0, 600.0, particles)
    }

    fn far_pointer(field: &mut ParticleField) {
        field.update_pointer(PointerEvent::surface_local(Vec2::new(10_000.0, 10_000.0)));
    }

    #[test]
    fn test_count_formula() {
        let config = FieldConfig::default();
        assert_eq!(ParticleField::particle_count_for(&config, 800.0, 600.0), 48);
        assert_eq!(ParticleField::particle_count_for(&config, 1920.0, 1080.0), 80);
        assert_eq!(ParticleField::particle_count_for(&config, 99.0, 100.0), 0);
        assert_eq!(ParticleField::particle_count_for(&config, 0.0, 0.0), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 9).unwrap();
        let b = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 9).unwrap();
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.len(), 48);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FieldConfig::default().with_opacity_range(0.8, 0.1);
        assert!(ParticleField::seeded(config, 800.0, 600.0, 1).is_err());
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 3).unwrap();
        let before = field.particles().to_vec();

        field.resize(400.0, 300.0);
        assert_eq!(field.bounds(), Vec2::new(400.0, 300.0));
        assert_eq!(field.particles(), &before[..]);

        field.resize(400.0, 300.0);
        assert_eq!(field.bounds(), Vec2::new(400.0, 300.0));
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn test_pointer_starts_at_origin_until_seen() {
        let mut field = field_of(vec![still(30.0, 0.0)]);
        assert!(!field.pointer_seen());
        assert_eq!(field.pointer(), Vec2::ZERO);

        // The unmoved pointer at the origin still repels
        assert_eq!(field.step(), 1);

        field.update_pointer(PointerEvent::new(
            Vec2::new(230.0, 340.0),
            Vec2::new(30.0, 40.0),
        ));
        assert!(field.pointer_seen());
        assert_eq!(field.pointer(), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_links_each_pair_once() {
        let field = field_of(vec![still(0.0, 0.0), still(10.0, 0.0), still(20.0, 0.0)]);
        let pairs: Vec<_> = field.links().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_link_opacity_falloff() {
        let mut field = field_of(vec![still(100.0, 100.0), still(160.0, 100.0)]);
        far_pointer(&mut field);
        let mut surface = RecordingSurface::new();

        let stats = field.tick(&mut surface);
        assert_eq!(stats.links, 1);

        let (_, _, color) = surface.lines().next().unwrap();
        assert!((color.a - 0.15).abs() < 1e-6);
        assert_eq!(surface.line_width(), 1.0);
    }

    #[test]
    fn test_link_cutoff_is_exclusive() {
        let field = field_of(vec![still(0.0, 0.0), still(120.0, 0.0)]);
        assert_eq!(field.links().count(), 0);
    }

    #[test]
    fn test_step_counts_repelled() {
        let mut field = field_of(vec![still(60.0, 50.0), still(500.0, 500.0)]);
        field.update_pointer(PointerEvent::surface_local(Vec2::new(50.0, 50.0)));
        assert_eq!(field.step(), 1);
        assert!(field.particles()[0].position().x > 60.0);
        assert_eq!(field.particles()[1].position(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_draw_order_and_shadow_scope() {
        let mut field = field_of(vec![still(100.0, 100.0), still(150.0, 100.0)]);
        far_pointer(&mut field);
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);

        let commands = surface.commands();
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(commands[1], DrawCommand::Line { shadow: None, .. }));

        // Outer disc plain, inner core glowing at half radius
        match (commands[2], commands[3]) {
            (
                DrawCommand::Circle {
                    radius: outer,
                    shadow: None,
                    ..
                },
                DrawCommand::Circle {
                    radius: inner,
                    shadow: Some(glow),
                    ..
                },
            ) => {
                assert_eq!(outer, 2.0);
                assert_eq!(inner, 1.0);
                assert_eq!(glow, field.config().glow);
            }
            other => panic!("unexpected commands {:?}", other),
        }

        assert_eq!(commands.len(), 1 + 1 + 2 * 2);
        assert!(!surface.shadow_active());
    }
}
