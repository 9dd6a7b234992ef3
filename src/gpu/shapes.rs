//! Instanced circle and line rendering.
//!
//! A recorded display list is flattened into one [`ShapeInstance`] per
//! circle or line, in recording order, and drawn with a single instanced
//! call. Primitive order within a draw is preserved by the GPU, so blending
//! matches the immediate-mode order (links under particles).

use bytemuck::{Pod, Zeroable};

use crate::surface::{DrawCommand, Shadow};

pub(crate) const KIND_CIRCLE: u32 = 0;
pub(crate) const KIND_LINE: u32 = 1;

/// One shape, laid out as a per-instance vertex buffer entry.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// Circle center or line start, in surface pixels.
    pub a: [f32; 2],
    /// Line end. Unused for circles.
    pub b: [f32; 2],
    pub color: [f32; 4],
    pub glow_color: [f32; 4],
    /// Circle radius or line width.
    pub size: f32,
    /// Glow blur radius, 0 for none.
    pub glow: f32,
    pub kind: u32,
    pub _pad: u32,
}

impl ShapeInstance {
    pub(crate) const ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32,
        5 => Float32,
        6 => Uint32,
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn glow_of(shadow: Option<Shadow>) -> ([f32; 4], f32) {
    match shadow {
        Some(s) if s.blur > 0.0 => (s.color.to_array(), s.blur),
        _ => ([0.0; 4], 0.0),
    }
}

/// Instances for one frame.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    instances: Vec<ShapeInstance>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a display list. A clear discards everything before it,
    /// since the whole frame is repainted over the host's backdrop.
    pub fn rebuild(&mut self, commands: &[DrawCommand]) {
        self.instances.clear();

        for command in commands {
            match *command {
                DrawCommand::Clear { .. } => self.instances.clear(),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    shadow,
                } => {
                    let (glow_color, glow) = glow_of(shadow);
                    self.instances.push(ShapeInstance {
                        a: center.to_array(),
                        b: center.to_array(),
                        color: color.to_array(),
                        glow_color,
                        size: radius,
                        glow,
                        kind: KIND_CIRCLE,
                        _pad: 0,
                    });
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                    shadow,
                } => {
                    let (glow_color, glow) = glow_of(shadow);
                    self.instances.push(ShapeInstance {
                        a: from.to_array(),
                        b: to.to_array(),
                        color: color.to_array(),
                        glow_color,
                        size: width,
                        glow,
                        kind: KIND_LINE,
                        _pad: 0,
                    });
                }
            }
        }
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Viewport uniform: surface size in pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Viewport {
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

pub(crate) const SHAPE_SHADER: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> viewport: Viewport;

struct ShapeIn {
    @location(0) a: vec2<f32>,
    @location(1) b: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) glow_color: vec4<f32>,
    @location(4) size: f32,
    @location(5) glow: f32,
    @location(6) kind: u32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) glow_color: vec4<f32>,
    @location(3) @interpolate(flat) params: vec2<f32>,
    @location(4) @interpolate(flat) kind: u32,
};

fn to_clip(p: vec2<f32>) -> vec4<f32> {
    let ndc = vec2<f32>(
        p.x / viewport.size.x * 2.0 - 1.0,
        1.0 - p.y / viewport.size.y * 2.0,
    );
    return vec4<f32>(ndc, 0.0, 1.0);
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    shape: ShapeIn,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let corner = corners[vertex_index];

    var out: VertexOutput;
    out.color = shape.color;
    out.glow_color = shape.glow_color;
    out.params = vec2<f32>(shape.size, shape.glow);
    out.kind = shape.kind;

    if shape.kind == 0u {
        // One pixel of slack for the antialiased rim
        let extent = shape.size + shape.glow + 1.0;
        let offset = corner * extent;
        out.clip_position = to_clip(shape.a + offset);
        out.local = offset;
    } else {
        let delta = shape.b - shape.a;
        let len = max(length(delta), 0.0001);
        let dir = delta / len;
        let normal = vec2<f32>(-dir.y, dir.x);
        let half_width = shape.size * 0.5 + 1.0;
        let along = (corner.x * 0.5 + 0.5) * len;
        let across = corner.y * half_width;
        out.clip_position = to_clip(shape.a + dir * along + normal * across);
        out.local = vec2<f32>(along, across);
    }

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if in.kind == 0u {
        let radius = in.params.x;
        let glow = in.params.y;
        let dist = length(in.local);
        let coverage = clamp(radius + 0.5 - dist, 0.0, 1.0);

        var halo = 0.0;
        if glow > 0.0 {
            halo = 1.0 - smoothstep(radius * 0.5, radius + glow, dist);
        }

        let fill_a = in.color.a * coverage;
        let glow_a = in.glow_color.a * halo * (1.0 - fill_a);
        let alpha = fill_a + glow_a;
        if alpha <= 0.0 {
            discard;
        }
        let rgb = (in.color.rgb * fill_a + in.glow_color.rgb * glow_a) / alpha;
        return vec4<f32>(rgb, alpha);
    }

    let half_width = in.params.x * 0.5;
    let coverage = clamp(half_width + 0.5 - abs(in.local.y), 0.0, 1.0);
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
