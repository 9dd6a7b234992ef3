//! Tunable parameters of the particle network.
//!
//! Defaults reproduce the landing page animation: at most 80 gold particles,
//! one per 10 000 square units of surface, linked when closer than 120 units
//! and pushed away from the pointer within 100 units.
//!
//! ```ignore
//! use netglow::FieldConfig;
//!
//! let config = FieldConfig::default()
//!     .with_max_particles(120)
//!     .with_link_distance(150.0);
//! ```
//!
//! Configs can be stored as JSON. Missing keys fall back to the defaults,
//! so a file may override a single value:
//!
//! ```json
//! { "max_particles": 40, "accent": { "r": 100, "g": 255, "b": 218, "a": 1.0 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::{Rgba, Shadow};

/// Gold accent used for particles and links.
pub const ACCENT: Rgba = Rgba::rgb(212, 175, 55);

/// Navy page background.
pub const BACKGROUND: Rgba = Rgba::rgb(26, 54, 93);

/// Upper bound for ranges particles are sampled from (speed, radius,
/// opacity). Wider spans overflow the uniform sampler.
pub const MAX_SAMPLED: f32 = 1.0e6;

/// Everything that shapes a [`ParticleField`](crate::ParticleField): sizing,
/// motion, pointer response, links and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Upper bound on the particle count.
    pub max_particles: usize,
    /// Surface area each particle accounts for when sizing the set.
    pub area_per_particle: f32,
    /// Each velocity component is drawn uniformly from `[-speed, speed]`.
    pub speed: f32,
    /// `(min, max)` particle radius.
    pub radius_range: (f32, f32),
    /// `(min, max)` particle base opacity.
    pub opacity_range: (f32, f32),
    /// Pointer influence radius.
    pub repulsion_radius: f32,
    /// Displacement per tick at zero distance from the pointer.
    pub repulsion_strength: f32,
    /// Particles closer than this are linked.
    pub link_distance: f32,
    /// Link opacity at zero distance.
    pub link_opacity: f32,
    /// Stroke width of link lines.
    pub link_width: f32,
    /// Color of particles and links. Its alpha is replaced per draw.
    pub accent: Rgba,
    /// Glow applied to each particle's inner core.
    pub glow: Shadow,
    /// Inner core radius as a fraction of the particle radius.
    pub core_scale: f32,
    /// Clear color for hosts that paint their own backdrop.
    pub background: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 80,
            area_per_particle: 10_000.0,
            speed: 0.25,
            radius_range: (1.0, 3.0),
            opacity_range: (0.2, 0.7),
            repulsion_radius: 100.0,
            repulsion_strength: 0.5,
            link_distance: 120.0,
            link_opacity: 0.3,
            link_width: 1.0,
            accent: ACCENT,
            glow: Shadow {
                color: ACCENT.with_alpha(0.5),
                blur: 10.0,
            },
            core_scale: 0.5,
            background: BACKGROUND,
        }
    }
}

impl FieldConfig {
    /// Cap the particle count regardless of surface area.
    pub fn with_max_particles(mut self, max: usize) -> Self {
        self.max_particles = max;
        self
    }

    /// Surface area per particle. Smaller values give denser fields.
    pub fn with_area_per_particle(mut self, area: f32) -> Self {
        self.area_per_particle = area;
        self
    }

    /// Maximum speed along each axis, in units per tick.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Range particle radii are drawn from.
    pub fn with_radius_range(mut self, min: f32, max: f32) -> Self {
        self.radius_range = (min, max);
        self
    }

    /// Range particle base opacities are drawn from.
    pub fn with_opacity_range(mut self, min: f32, max: f32) -> Self {
        self.opacity_range = (min, max);
        self
    }

    /// Set the pointer influence radius and the displacement at its center.
    pub fn with_repulsion(mut self, radius: f32, strength: f32) -> Self {
        self.repulsion_radius = radius;
        self.repulsion_strength = strength;
        self
    }

    /// Particles closer than `distance` are linked.
    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    /// Link opacity when two particles touch.
    pub fn with_link_opacity(mut self, opacity: f32) -> Self {
        self.link_opacity = opacity;
        self
    }

    /// Stroke width of link lines.
    pub fn with_link_width(mut self, width: f32) -> Self {
        self.link_width = width;
        self
    }

    /// Color shared by particles and links.
    pub fn with_accent(mut self, accent: Rgba) -> Self {
        self.accent = accent;
        self
    }

    /// Glow drawn around each particle's core.
    pub fn with_glow(mut self, glow: Shadow) -> Self {
        self.glow = glow;
        self
    }

    /// Core radius as a fraction of the particle radius.
    pub fn with_core_scale(mut self, scale: f32) -> Self {
        self.core_scale = scale;
        self
    }

    /// Clear color for native windows.
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Check that every range is ordered, every divisor is positive and
    /// every size is non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("area_per_particle", self.area_per_particle)?;
        check_positive("repulsion_radius", self.repulsion_radius)?;
        check_positive("link_distance", self.link_distance)?;
        check_range("radius_range", self.radius_range)?;
        check_range("opacity_range", self.opacity_range)?;
        check_range("speed", (0.0, self.speed))?;
        check_non_negative("link_width", self.link_width)?;
        check_non_negative("core_scale", self.core_scale)?;
        check_non_negative("glow.blur", self.glow.blur)?;
        Ok(())
    }

    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON with every key present.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded field config from {}", path.display());
        Ok(config)
    }

    /// Write the config as JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // `!(v > 0)` also rejects NaN
    if !(value > 0.0) {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn check_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if !(min >= 0.0 && min <= max && max.is_finite()) {
        return Err(ConfigError::InvalidRange { field, min, max });
    }
    if max > MAX_SAMPLED {
        return Err(ConfigError::TooLarge {
            field,
            value: max,
            max: MAX_SAMPLED,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let config = FieldConfig::default()
            .with_max_particles(10)
            .with_repulsion(50.0, 1.0)
            .with_link_distance(80.0);

        assert_eq!(config.max_particles, 10);
        assert_eq!(config.repulsion_radius, 50.0);
        assert_eq!(config.repulsion_strength, 1.0);
        assert_eq!(config.link_distance, 80.0);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = FieldConfig::default().with_radius_range(3.0, 1.0);
        match config.validate() {
            Err(ConfigError::InvalidRange { field, .. }) => assert_eq!(field, "radius_range"),
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_link_distance() {
        let config = FieldConfig::default().with_link_distance(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "link_distance", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = FieldConfig::default().with_speed(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_sampled_bounds() {
        let config = FieldConfig::default().with_speed(3.0e38);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "speed", .. })
        ));

        let config = FieldConfig::default().with_radius_range(0.0, f32::MAX);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "radius_range", .. })
        ));

        let config = FieldConfig::default().with_speed(MAX_SAMPLED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_rejects_huge_speed() {
        let result = FieldConfig::from_json(r#"{ "speed": 3.0e38 }"#);
        assert!(matches!(result, Err(ConfigError::TooLarge { .. })));
    }

    #[test]
    fn test_rejects_negative_sizes() {
        let config = FieldConfig::default().with_core_scale(-0.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "core_scale", .. })
        ));

        let config = FieldConfig::default().with_link_width(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "link_width", .. })
        ));

        let result = FieldConfig::from_json(r#"{ "glow": { "color": { "r": 0, "g": 0, "b": 0, "a": 1.0 }, "blur": -3.0 } }"#);
        assert!(matches!(result, Err(ConfigError::Negative { field: "glow.blur", .. })));
    }

    #[test]
    fn test_zero_sizes_are_allowed() {
        let config = FieldConfig::default()
            .with_link_width(0.0)
            .with_core_scale(0.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.link_width, 0.0);
        assert_eq!(config.core_scale, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FieldConfig::from_json(r#"{ "max_particles": 12 }"#).unwrap();
        assert_eq!(config.max_particles, 12);
        assert_eq!(config.link_distance, 120.0);
        assert_eq!(config.accent, ACCENT);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let result = FieldConfig::from_json(r#"{ "opacity_range": [0.9, 0.1] }"#);
        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = FieldConfig::from_json("{ max_particles: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip_preserves_custom_glow() {
        let config = FieldConfig::default().with_glow(Shadow {
            color: Rgba::new(1, 2, 3, 0.25),
            blur: 4.0,
        });
        let back = FieldConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
