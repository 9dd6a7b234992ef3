//! Immediate-mode 2D drawing surface abstraction.
//!
//! [`DrawSurface`] is the only thing a [`ParticleField`](crate::ParticleField)
//! draws to. It mirrors the small slice of a canvas 2D context the field
//! needs: clear a rectangle, set fill/stroke color and line width, fill a
//! circle, stroke a line, and toggle a glow (shadow) effect.
//!
//! Like a canvas context, a surface is stateful: colors, line width and
//! shadow persist across calls and across frames until changed.
//!
//! [`RecordingSurface`] implements the trait as an in-memory display list.
//! The native GPU host renders from it and tests inspect it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels and a floating-point alpha,
/// the same shape as a CSS `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channels as `[r, g, b, a]` in `0.0..=1.0`.
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }

    /// CSS `rgba(r, g, b, a)` string.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Soft glow drawn around filled shapes while active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur radius in surface units.
    pub blur: f32,
}

/// The drawing capability a particle field renders through.
///
/// Methods take `&mut self` even where a backend could draw through a
/// shared reference, so recording implementations need no interior
/// mutability.
pub trait DrawSurface {
    /// Erase the rectangle starting at `origin` with the given `size`.
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);

    /// Color used by subsequent [`fill_circle`](Self::fill_circle) calls.
    fn set_fill_color(&mut self, color: Rgba);

    /// Color used by subsequent [`stroke_line`](Self::stroke_line) calls.
    fn set_stroke_color(&mut self, color: Rgba);

    /// Width used by subsequent [`stroke_line`](Self::stroke_line) calls.
    fn set_line_width(&mut self, width: f32);

    /// Fill a full circle with the current fill color and shadow.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Stroke a straight segment with the current stroke color, width and shadow.
    fn stroke_line(&mut self, from: Vec2, to: Vec2);

    /// Enable a glow for subsequent draws.
    fn set_shadow(&mut self, shadow: Shadow);

    /// Disable the glow.
    fn clear_shadow(&mut self);
}

/// One recorded draw, with the surface state that applied to it resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
        shadow: Option<Shadow>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        shadow: Option<Shadow>,
    },
}

/// A [`DrawSurface`] that records resolved draw commands.
///
/// State (colors, width, shadow) survives [`begin_frame`](Self::begin_frame),
/// which only drops the recorded commands, so leaks of state from one
/// frame into the next stay observable.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
    shadow: Option<Shadow>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Canvas defaults: opaque black fill and stroke, 1-unit lines, no shadow.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fill: Rgba::rgb(0, 0, 0),
            stroke: Rgba::rgb(0, 0, 0),
            line_width: 1.0,
            shadow: None,
        }
    }

    /// Drop recorded commands but keep drawing state.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether a shadow is currently active.
    pub fn shadow_active(&self) -> bool {
        self.shadow.is_some()
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Recorded lines as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Line { from, to, color, .. } => Some((from, to, color)),
            _ => None,
        })
    }

    /// Recorded circles as `(center, radius, color, shadow)`.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba, Option<Shadow>)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Circle {
                center,
                radius,
                color,
                shadow,
            } => Some((center, radius, color, shadow)),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Clear { origin, size });
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: self.fill,
            shadow: self.shadow,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: self.stroke,
            width: self.line_width,
            shadow: self.shadow,
        });
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = Some(shadow);
    }

    fn clear_shadow(&mut self) {
        self.shadow = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_css() {
        let c = Rgba::rgb(212, 175, 55).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(212, 175, 55, 0.5)");
    }

    #[test]
    fn test_rgba_to_array() {
        let c = Rgba::new(255, 0, 51, 0.25).to_array();
        assert_eq!(c, [1.0, 0.0, 0.2, 0.25]);
    }

    #[test]
    fn test_recording_resolves_state() {
        let mut surface = RecordingSurface::new();
        let glow = Shadow {
            color: Rgba::rgb(1, 2, 3),
            blur: 4.0,
        };

        surface.set_fill_color(Rgba::rgb(10, 20, 30));
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0);
        surface.set_shadow(glow);
        surface.fill_circle(Vec2::new(1.0, 2.0), 1.5);
        surface.clear_shadow();

        let circles: Vec<_> = surface.circles().collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].3, None);
        assert_eq!(circles[1].3, Some(glow));
        assert_eq!(circles[1].2, Rgba::rgb(10, 20, 30));
        assert!(!surface.shadow_active());
    }

    #[test]
    fn test_begin_frame_keeps_state() {
        let mut surface = RecordingSurface::new();
        surface.set_line_width(3.0);
        surface.set_shadow(Shadow {
            color: Rgba::rgb(0, 0, 0),
            blur: 1.0,
        });
        surface.stroke_line(Vec2::ZERO, Vec2::ONE);

        surface.begin_frame();
        assert!(surface.commands().is_empty());
        assert!(surface.shadow_active());
        assert_eq!(surface.line_width(), 3.0);
    }
}
