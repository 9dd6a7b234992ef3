//! Native window host.
//!
//! Opens a winit window, renders the field through [`GpuState`] and maps
//! window events onto the [`AnimationLoop`]: resizes and cursor moves
//! update the field between frames, each redraw runs one tick and requests
//! the next redraw, and Escape or closing the window stops the loop.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::RunError;
use crate::field::ParticleField;
use crate::gpu::GpuState;
use crate::input::HostEvent;
use crate::scheduler::{AnimationLoop, FrameScheduler};
use crate::surface::RecordingSurface;

/// Schedules frames by asking the window for a redraw.
pub struct WindowScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

/// Open a window and animate a field until the window is closed.
pub fn run(config: FieldConfig) -> Result<(), RunError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    animation: Option<AnimationLoop<WindowScheduler>>,
    frame: RecordingSurface,
    error: Option<RunError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            animation: None,
            frame: RecordingSurface::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title("netglow")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.background,
        ))?;

        let field = ParticleField::new(self.config.clone(), size.width as f32, size.height as f32)?;
        let mut animation = AnimationLoop::new(
            field,
            WindowScheduler {
                window: window.clone(),
            },
        );
        animation.start();

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.animation = Some(animation);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(animation), Some(gpu_state)) = (&mut self.animation, &mut self.gpu_state) else {
            return;
        };

        self.frame.begin_frame();
        if animation.frame(&mut self.frame).is_none() {
            return;
        }

        match gpu_state.render(&self.frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                gpu_state.resize(winit::dpi::PhysicalSize {
                    width: gpu_state.config.width,
                    height: gpu_state.config.height,
                });
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                animation.stop();
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to start: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        let Some(host_event) = HostEvent::from_window_event(&event) else {
            return;
        };

        match host_event {
            HostEvent::Resize { width, height } => {
                if let WindowEvent::Resized(size) = event {
                    if let Some(gpu_state) = &mut self.gpu_state {
                        gpu_state.resize(size);
                    }
                }
                if let Some(animation) = &mut self.animation {
                    animation.field_mut().resize(width, height);
                }
            }
            HostEvent::Pointer(pointer) => {
                if let Some(animation) = &mut self.animation {
                    animation.field_mut().update_pointer(pointer);
                }
            }
            HostEvent::Stop => {
                if let Some(animation) = &self.animation {
                    animation.stop();
                }
                event_loop.exit();
            }
        }
    }
}
