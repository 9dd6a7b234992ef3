//! Pointer tracking and host event translation.
//!
//! Hosts report pointer moves in their own coordinate space together with
//! the drawing surface's current origin in that space. [`PointerEvent`]
//! turns that pair into surface-local coordinates, which is all the
//! [`ParticleField`](crate::ParticleField) ever sees.
//!
//! On native hosts, [`HostEvent::from_window_event`] maps the winit events
//! the animation cares about and ignores the rest.

use glam::Vec2;

/// A pointer move in host (screen or client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in host coordinates.
    pub client: Vec2,
    /// Top-left corner of the drawing surface in the same coordinates.
    pub surface_origin: Vec2,
}

impl PointerEvent {
    pub fn new(client: Vec2, surface_origin: Vec2) -> Self {
        Self {
            client,
            surface_origin,
        }
    }

    /// An event already expressed relative to the surface.
    pub fn surface_local(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO)
    }

    /// Position relative to the surface's top-left corner.
    #[inline]
    pub fn local(&self) -> Vec2 {
        self.client - self.surface_origin
    }
}

/// Last known pointer position, in surface coordinates.
///
/// Starts at the origin and only changes through [`PointerState::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Vec2,
    moved: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether any pointer event has been received yet.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub fn update(&mut self, event: PointerEvent) {
        self.position = event.local();
        self.moved = true;
    }
}

/// Host events that affect the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport now has this size.
    Resize { width: f32, height: f32 },
    Pointer(PointerEvent),
    /// The user asked the animation to stop.
    Stop,
}

#[cfg(not(target_arch = "wasm32"))]
impl HostEvent {
    /// Translate a winit window event.
    ///
    /// Cursor positions from winit are already relative to the window's
    /// client area, which the native host fills with its surface.
    pub fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::{ElementState, WindowEvent};
        use winit::keyboard::{KeyCode, PhysicalKey};

        match event {
            WindowEvent::Resized(size) => Some(HostEvent::Resize {
                width: size.width as f32,
                height: size.height as f32,
            }),
            WindowEvent::CursorMoved { position, .. } => Some(HostEvent::Pointer(
                PointerEvent::surface_local(Vec2::new(position.x as f32, position.y as f32)),
            )),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                Some(HostEvent::Stop)
            }
            WindowEvent::CloseRequested => Some(HostEvent::Stop),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_subtracts_origin() {
        let event = PointerEvent::new(Vec2::new(150.0, 80.0), Vec2::new(100.0, 30.0));
        assert_eq!(event.local(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_pointer_defaults_to_origin() {
        let state = PointerState::new();
        assert_eq!(state.position(), Vec2::ZERO);
        assert!(!state.has_moved());
    }

    #[test]
    fn test_pointer_update() {
        let mut state = PointerState::new();
        state.update(PointerEvent::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 0.0)));
        assert_eq!(state.position(), Vec2::new(-10.0, 10.0));
        assert!(state.has_moved());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_resize_event_translation() {
        let event = winit::event::WindowEvent::Resized(winit::dpi::PhysicalSize::new(800, 600));
        assert_eq!(
            HostEvent::from_window_event(&event),
            Some(HostEvent::Resize {
                width: 800.0,
                height: 600.0
            })
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_cursor_event_translation() {
        let event = winit::event::WindowEvent::CursorMoved {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            position: winit::dpi::PhysicalPosition::new(12.0, 34.0),
        };
        match HostEvent::from_window_event(&event) {
            Some(HostEvent::Pointer(p)) => assert_eq!(p.local(), Vec2::new(12.0, 34.0)),
            other => panic!("expected pointer event, got {:?}", other),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_unrelated_events_ignored() {
        let event = winit::event::WindowEvent::Focused(true);
        assert_eq!(HostEvent::from_window_event(&event), None);
    }
}
