//! Self-rescheduling animation loop.
//!
//! Hosts drive animation by calling back once per repaint (a browser's
//! `requestAnimationFrame`, a winit redraw request). [`FrameScheduler`] is
//! that capability; [`AnimationLoop`] runs one field tick per callback and
//! asks for the next one, until stopped.
//!
//! ```ignore
//! let field = ParticleField::seeded(FieldConfig::default(), 800.0, 600.0, 1)?;
//! let mut anim = AnimationLoop::new(field, ManualScheduler::default());
//! let mut surface = RecordingSurface::new();
//!
//! anim.start();
//! while anim.scheduler_mut().take_request() {
//!     anim.frame(&mut surface);
//!     if anim.clock().frame() == 10 {
//!         anim.stop();
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::field::{FrameStats, ParticleField};
use crate::surface::DrawSurface;
use crate::time::FrameClock;

/// Requests one callback before the next repaint.
///
/// There is no interval guarantee and no coalescing contract: a slow frame
/// simply delays the next one.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only counts requests, for hosts that poll and for tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: usize,
    total: usize,
}

impl ManualScheduler {
    /// Consume one pending request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Requests received over the scheduler's lifetime.
    pub fn total_requests(&self) -> usize {
        self.total
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}

/// Cloneable handle that stops an [`AnimationLoop`].
///
/// Stopping is permanent. The flag is atomic so handles may be passed to
/// other threads, though the loop itself runs on the host's event thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Ticks a [`ParticleField`] once per scheduled frame.
pub struct AnimationLoop<S: FrameScheduler> {
    field: ParticleField,
    scheduler: S,
    stop: StopHandle,
    clock: FrameClock,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(field: ParticleField, scheduler: S) -> Self {
        Self {
            field,
            scheduler,
            stop: StopHandle::new(),
            clock: FrameClock::new(),
        }
    }

    /// Request the first frame.
    pub fn start(&mut self) {
        if self.is_running() {
            log::info!("Animation started with {} particles", self.field.len());
            self.scheduler.request_frame();
        }
    }

    /// Run one scheduled frame and request the next.
    ///
    /// Returns `None` without touching the field or the surface once the
    /// loop has been stopped.
    pub fn frame<D: DrawSurface + ?Sized>(&mut self, surface: &mut D) -> Option<FrameStats> {
        if !self.is_running() {
            return None;
        }

        let stats = self.field.tick(surface);

        if self.clock.tick() {
            log::debug!(
                "frame {}: {:.1} fps ({:.2} ms), {} links, {} repelled",
                self.clock.frame(),
                self.clock.fps(),
                self.clock.delta().as_secs_f64() * 1000.0,
                stats.links,
                stats.repelled
            );
        }

        // Another thread may have stopped us mid-tick
        if self.is_running() {
            self.scheduler.request_frame();
        }
        Some(stats)
    }

    pub fn stop(&self) {
        if self.is_running() {
            log::info!(
                "Animation stopped after {} frames ({:.1}s)",
                self.clock.frame(),
                self.clock.elapsed().as_secs_f32()
            );
        }
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Mutable access for event handlers (resize, pointer moves) that run
    /// between frames.
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
