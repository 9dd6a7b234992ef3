//! Browser host on a `<canvas>` 2D context.
//!
//! [`CanvasRenderingContext2d`] implements [`DrawSurface`] directly.
//! [`CanvasNetwork`] is the wasm-bindgen entry point: JavaScript owns the
//! `requestAnimationFrame` loop and the event listeners, and forwards them:
//!
//! ```js
//! const net = new CanvasNetwork(document.getElementById("aiNetwork"));
//! window.addEventListener("resize", () => net.resize());
//! canvas.addEventListener("mousemove", (e) => net.pointer_move(e.clientX, e.clientY));
//! const loop = () => { if (net.frame()) requestAnimationFrame(loop); };
//! requestAnimationFrame(loop);
//! ```

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::input::PointerEvent;
use crate::scheduler::{AnimationLoop, ManualScheduler};
use crate::surface::{DrawSurface, Rgba, Shadow};

impl DrawSurface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        CanvasRenderingContext2d::clear_rect(
            self,
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.begin_path();
        // Only fails for a negative radius
        if let Err(e) = self.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("Skipped circle of radius {}: {:?}", radius, e);
            return;
        }
        self.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.begin_path();
        self.move_to(from.x as f64, from.y as f64);
        self.line_to(to.x as f64, to.y as f64);
        self.stroke();
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.set_shadow_color(&shadow.color.to_css());
        self.set_shadow_blur(shadow.blur as f64);
    }

    fn clear_shadow(&mut self) {
        self.set_shadow_blur(0.0);
    }
}

/// A particle network bound to a canvas element.
#[wasm_bindgen]
pub struct CanvasNetwork {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    animation: AnimationLoop<ManualScheduler>,
}

#[wasm_bindgen]
impl CanvasNetwork {
    /// Size the canvas to the window and seed particles with the default config.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasNetwork, JsValue> {
        Self::with_config(canvas, FieldConfig::default())
    }

    /// Like the constructor, with a JSON config.
    pub fn from_json(canvas: HtmlCanvasElement, json: &str) -> Result<CanvasNetwork, JsValue> {
        let config = FieldConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::with_config(canvas, config)
    }

    /// Re-read the window size into the canvas and the field.
    pub fn resize(&mut self) {
        let (width, height) = viewport_size();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.animation.field_mut().resize(width, height);
    }

    /// Forward a `mousemove` event's client coordinates.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
        self.animation
            .field_mut()
            .update_pointer(PointerEvent::new(Vec2::new(client_x, client_y), origin));
    }

    /// Draw one frame. Returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        if !self.animation.scheduler_mut().take_request() {
            return false;
        }
        self.animation.frame(&mut self.context);
        self.animation.scheduler().pending() > 0
    }

    /// Stop the loop. The next [`frame`](Self::frame) returns `false`.
    pub fn stop(&self) {
        self.animation.stop();
    }

    /// Particles in the field.
    pub fn particle_count(&self) -> usize {
        self.animation.field().len()
    }
}

impl CanvasNetwork {
    fn with_config(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (width, height) = viewport_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let field = ParticleField::new(config, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut animation = AnimationLoop::new(field, ManualScheduler::default());
        animation.start();

        Ok(Self {
            canvas,
            context,
            animation,
        })
    }
}

fn viewport_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}
