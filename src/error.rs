//! Error types for netglow.
//!
//! Only setup can fail: loading or validating a [`FieldConfig`](crate::FieldConfig),
//! and on native hosts creating the window and GPU device. Once a
//! [`ParticleField`](crate::ParticleField) exists, ticking it never fails.

use std::fmt;

/// Errors that can occur while loading or validating a field configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    Io(std::io::Error),
    /// The config file is not valid JSON for a `FieldConfig`.
    Parse(serde_json::Error),
    /// A `(min, max)` range has `min > max` or a negative bound.
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A value that must be strictly positive is zero, negative or NaN.
    NotPositive { field: &'static str, value: f32 },
    /// A size or scale is negative or NaN.
    Negative { field: &'static str, value: f32 },
    /// A sampled bound is too large to draw random values from.
    TooLarge {
        field: &'static str,
        value: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::InvalidRange { field, min, max } => write!(
                f,
                "Invalid range for `{}`: [{}, {}] (bounds must be non-negative and ordered)",
                field, min, max
            ),
            ConfigError::NotPositive { field, value } => {
                write!(f, "`{}` must be greater than zero, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "`{}` must not be negative, got {}", field, value)
            }
            ConfigError::TooLarge { field, value, max } => {
                write!(f, "`{}` must be at most {}, got {}", field, max, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur during GPU initialization.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no supported texture formats for this adapter.
    UnsupportedSurface,
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "Surface is not supported by the selected GPU adapter"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the native window host.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum RunError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The field configuration was rejected.
    Config(ConfigError),
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::Config(e) => Some(e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_range_error_message_names_field() {
        let err = ConfigError::InvalidRange {
            field: "radius_range",
            min: 3.0,
            max: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("radius_range"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_bound_error_messages() {
        let err = ConfigError::Negative {
            field: "core_scale",
            value: -1.0,
        };
        assert!(err.to_string().contains("core_scale"));

        let err = ConfigError::TooLarge {
            field: "speed",
            value: 3.0e38,
            max: 1.0e6,
        };
        let msg = err.to_string();
        assert!(msg.contains("speed"));
        assert!(msg.contains("1000000"));
    }

    #[test]
    fn test_io_error_has_source() {
        let err = ConfigError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
    }
}
