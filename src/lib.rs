//! # netglow - Particle Network Background
//!
//! A drifting network of glowing particles for page and window backdrops.
//! Particles wander at constant speed, bounce off the surface edges, shy
//! away from the pointer, and are linked by faint lines whenever two of
//! them come close.
//!
//! The simulation is host-agnostic: it draws through the [`DrawSurface`]
//! trait and is driven one frame at a time through [`AnimationLoop`] and a
//! [`FrameScheduler`]. Two hosts ship with the crate:
//!
//! - a native window rendered with wgpu ([`run`]),
//! - a browser `<canvas>` via wasm-bindgen (feature `web`, wasm32 only).
//!
//! ## Quick Start
//!
//! ```ignore
//! use netglow::prelude::*;
//!
//! fn main() -> Result<(), netglow::RunError> {
//!     netglow::run(FieldConfig::default().with_max_particles(60))
//! }
//! ```
//!
//! ## Driving a field yourself
//!
//! ```ignore
//! use netglow::prelude::*;
//!
//! let field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 7)?;
//! let mut anim = AnimationLoop::new(field, ManualScheduler::default());
//! let mut surface = RecordingSurface::new();
//!
//! anim.start();
//! while anim.scheduler_mut().take_request() {
//!     surface.begin_frame();
//!     let stats = anim.frame(&mut surface);
//!     // ... present `surface.commands()` ...
//! }
//! ```
//!
//! ## Per-frame behavior
//!
//! | Step | Rule |
//! |------|------|
//! | Move | `position += velocity` |
//! | Bounce | velocity component flips when the moved position is outside `[0, size]` |
//! | Repel | within `repulsion_radius` of the pointer, pushed away by `strength * (1 - d / radius)` |
//! | Link | pairs closer than `link_distance` get a line of alpha `link_opacity * (1 - d / link_distance)` |
//! | Draw | disc at `base_opacity`, then a glowing core at `core_scale * radius` |

pub mod config;
mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
mod gpu;
#[cfg(not(target_arch = "wasm32"))]
mod window;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::FieldConfig;
pub use error::ConfigError;
#[cfg(not(target_arch = "wasm32"))]
pub use error::{GpuError, RunError};
pub use field::{FrameStats, Link, ParticleField};
pub use glam::Vec2;
pub use input::{HostEvent, PointerEvent, PointerState};
pub use particle::Particle;
pub use scheduler::{AnimationLoop, FrameScheduler, ManualScheduler, StopHandle};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Rgba, Shadow};
pub use time::FrameClock;
#[cfg(not(target_arch = "wasm32"))]
pub use window::{run, WindowScheduler};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use netglow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::field::{FrameStats, ParticleField};
    pub use crate::input::PointerEvent;
    pub use crate::scheduler::{AnimationLoop, FrameScheduler, ManualScheduler, StopHandle};
    pub use crate::surface::{DrawSurface, RecordingSurface, Rgba, Shadow};
    pub use crate::Vec2;
}
