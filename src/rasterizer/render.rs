//! The triangle rasterizer core.
//!
//! Generic over the vertex element (`VB`) and the render target pixel (`RT`):
//! the engine only needs a 3D position out of a vertex and a conversion from
//! float color into a pixel. Shading is injected as two replaceable function
//! stages, so callers vary the look per draw call without touching the
//! scan-conversion loop.

use std::collections::HashMap;

use super::buffer::{Buffer, SharedBuffer};
use super::error::RenderError;
use super::math::{Vec3, Vec4};
use super::types::{Color, VertexData};

/// Vertex stage: takes the homogeneous position and the vertex payload,
/// returns the transformed position and a (possibly rewritten) payload
pub type VertexShader<VB> = Box<dyn Fn(Vec4, VB) -> (Vec4, VB)>;

/// Pixel stage: takes a vertex payload and the interpolated depth, returns
/// the fragment color
pub type PixelShader<VB> = Box<dyn Fn(&VB, f32) -> Color>;

/// Side-of-edge test: the signed, doubled area of triangle (a, b, c).
/// Antisymmetric in its first two arguments: E(a, b, c) == -E(b, a, c).
pub fn edge_function(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> i32 {
    (c.0 - a.0) * (b.1 - a.1) - (c.1 - a.1) * (b.0 - a.0)
}

fn write_checked<T>(
    buffer: &mut Buffer<T>,
    x: usize,
    y: usize,
    value: T,
) -> Result<(), RenderError> {
    let len = buffer.count();
    let index = y * buffer.width() + x;
    *buffer
        .get_xy_mut(x, y)
        .ok_or(RenderError::IndexOutOfRange { index, len })? = value;
    Ok(())
}

/// Software rasterizer binding buffers and shader stages
pub struct Rasterizer<VB, RT> {
    vertex_buffer: Option<SharedBuffer<VB>>,
    index_buffer: Option<SharedBuffer<u32>>,
    render_target: Option<SharedBuffer<RT>>,
    depth_buffer: Option<SharedBuffer<f32>>,

    width: usize,
    height: usize,

    vertex_shader: VertexShader<VB>,
    pixel_shader: PixelShader<VB>,

    /// Debug overlay: color painted on pixels lying exactly on a triangle edge
    pub edge_color: Color,
    /// Debug overlay: color painted over every submitted triangle corner
    pub vertex_color: Color,
    /// Half-side of the square painted around each corner, in pixels
    pub vertex_radius: i32,
}

impl<VB: VertexData, RT: Copy + From<Color>> Rasterizer<VB, RT> {
    pub fn new() -> Self {
        Self {
            vertex_buffer: None,
            index_buffer: None,
            render_target: None,
            depth_buffer: None,
            width: 1920,
            height: 1080,
            vertex_shader: Box::new(|position, data| (position, data)),
            pixel_shader: Box::new(|_, _| Color::WHITE),
            edge_color: Color::new(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0),
            vertex_color: Color::new(1.0, 10.0 / 255.0, 10.0 / 255.0),
            vertex_radius: 5,
        }
    }

    /// Rebind the color and/or depth target. `None` leaves the existing
    /// binding untouched, so either can be swapped independently.
    pub fn set_render_target(
        &mut self,
        render_target: Option<SharedBuffer<RT>>,
        depth_buffer: Option<SharedBuffer<f32>>,
    ) {
        if let Some(render_target) = render_target {
            self.render_target = Some(render_target);
        }
        if let Some(depth_buffer) = depth_buffer {
            self.depth_buffer = Some(depth_buffer);
        }
    }

    pub fn set_vertex_buffer(&mut self, vertex_buffer: SharedBuffer<VB>) {
        self.vertex_buffer = Some(vertex_buffer);
    }

    pub fn set_index_buffer(&mut self, index_buffer: SharedBuffer<u32>) {
        self.index_buffer = Some(index_buffer);
    }

    pub fn set_viewport(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_vertex_shader(&mut self, shader: impl Fn(Vec4, VB) -> (Vec4, VB) + 'static) {
        self.vertex_shader = Box::new(shader);
    }

    pub fn set_pixel_shader(&mut self, shader: impl Fn(&VB, f32) -> Color + 'static) {
        self.pixel_shader = Box::new(shader);
    }

    /// Overwrite every color element with `clear_color` and, when a depth
    /// target is bound, every depth element with `clear_depth`
    pub fn clear_render_target(&self, clear_color: RT, clear_depth: f32) -> Result<(), RenderError> {
        let mut target = self
            .render_target
            .as_ref()
            .ok_or(RenderError::NoRenderTargetBound)?
            .borrow_mut();
        if let Some(depth_buffer) = &self.depth_buffer {
            let mut depth_buffer = depth_buffer.borrow_mut();
            if depth_buffer.count() != target.count() {
                return Err(RenderError::BufferSizeMismatch {
                    color: target.count(),
                    depth: depth_buffer.count(),
                });
            }
            depth_buffer.fill(clear_depth);
        }
        target.fill(clear_color);
        Ok(())
    }

    /// Rasterize `num_vertices / 3` triangles, starting at `vertex_offset` in
    /// the bound index buffer
    pub fn draw(&self, num_vertices: usize, vertex_offset: usize) -> Result<(), RenderError> {
        let vertex_buffer = self
            .vertex_buffer
            .as_ref()
            .ok_or(RenderError::NoVertexBufferBound)?
            .borrow();
        let index_buffer = self
            .index_buffer
            .as_ref()
            .ok_or(RenderError::NoIndexBufferBound)?
            .borrow();
        let mut target = self
            .render_target
            .as_ref()
            .ok_or(RenderError::NoRenderTargetBound)?
            .borrow_mut();
        let mut depth_target = self.depth_buffer.as_ref().map(|d| d.borrow_mut());
        if let Some(depth_target) = &depth_target {
            if depth_target.count() != target.count() {
                return Err(RenderError::BufferSizeMismatch {
                    color: target.count(),
                    depth: depth_target.count(),
                });
            }
        }

        // Every screen-space corner submitted in this call, for the debug
        // vertex pass at the end
        let mut corners: Vec<(i32, i32)> = Vec::with_capacity(num_vertices);

        for triangle in 0..num_vertices / 3 {
            let first = vertex_offset + triangle * 3;
            let fetch = |slot: usize| -> Result<VB, RenderError> {
                let index = *index_buffer.get(slot).ok_or(RenderError::IndexOutOfRange {
                    index: slot,
                    len: index_buffer.count(),
                })?;
                vertex_buffer
                    .get(index as usize)
                    .copied()
                    .ok_or(RenderError::IndexOutOfRange {
                        index: index as usize,
                        len: vertex_buffer.count(),
                    })
            };
            let raw = [fetch(first)?, fetch(first + 1)?, fetch(first + 2)?];

            // Vertex stage runs once per occurrence; shared vertices are
            // re-transformed for every triangle that references them
            let shaded = raw.map(|vertex| {
                let (clip, data) = (self.vertex_shader)(Vec4::from_point(vertex.position()), vertex);
                let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
                let screen = Vec3::new(
                    (ndc.x + 1.0) * self.width as f32 / 2.0,
                    (-ndc.y + 1.0) * self.height as f32 / 2.0,
                    ndc.z,
                );
                (screen, data)
            });

            let a = (shaded[0].0.x as i32, shaded[0].0.y as i32);
            let b = (shaded[1].0.x as i32, shaded[1].0.y as i32);
            let c = (shaded[2].0.x as i32, shaded[2].0.y as i32);
            corners.extend_from_slice(&[a, b, c]);

            let right = self.width as i32 - 1;
            let bottom = self.height as i32 - 1;
            let min_x = a.0.min(b.0).min(c.0).clamp(0, right);
            let max_x = a.0.max(b.0).max(c.0).clamp(0, right);
            let min_y = a.1.min(b.1).min(c.1).clamp(0, bottom);
            let max_y = a.1.max(b.1).max(c.1).clamp(0, bottom);

            let area = edge_function(a, b, c);
            if area == 0 {
                return Err(RenderError::DegenerateTriangle);
            }
            let area = area as f32;

            for x in min_x..=max_x {
                for y in min_y..=max_y {
                    let p = (x, y);
                    let u = edge_function(b, c, p) as f32 / area;
                    let v = edge_function(c, a, p) as f32 / area;
                    let w = edge_function(a, b, p) as f32 / area;
                    if u < 0.0 || v < 0.0 || w < 0.0 {
                        continue;
                    }

                    let depth = u * shaded[0].0.z + v * shaded[1].0.z + w * shaded[2].0.z;
                    let (px, py) = (x as usize, y as usize);
                    if let Some(depth_target) = &depth_target {
                        let stored =
                            *depth_target
                                .get_xy(px, py)
                                .ok_or(RenderError::IndexOutOfRange {
                                    index: py * self.width + px,
                                    len: depth_target.count(),
                                })?;
                        if stored <= depth {
                            continue;
                        }
                    }

                    // A zero barycentric weight puts the pixel exactly on a
                    // triangle edge; those get the overlay color instead of
                    // the pixel shader. Shading always samples the first
                    // vertex's payload, with depth as the only interpolated
                    // input.
                    let color = if u == 0.0 || v == 0.0 || w == 0.0 {
                        RT::from(self.edge_color)
                    } else {
                        RT::from((self.pixel_shader)(&shaded[0].1, depth))
                    };
                    write_checked(&mut target, px, py, color)?;
                    if let Some(depth_target) = &mut depth_target {
                        write_checked(depth_target, px, py, depth)?;
                    }
                }
            }
        }

        self.highlight_vertices(&corners, &mut target)
    }

    /// Debug vertex pass: paint a filled square over every distinct corner
    /// submitted during the draw call, clipped to the viewport
    fn highlight_vertices(
        &self,
        corners: &[(i32, i32)],
        target: &mut Buffer<RT>,
    ) -> Result<(), RenderError> {
        let mut occurrences: HashMap<(i32, i32), usize> = HashMap::new();
        for &corner in corners {
            *occurrences.entry(corner).or_insert(0) += 1;
        }

        let color = RT::from(self.vertex_color);
        for (&(cx, cy), &count) in &occurrences {
            // A corner referenced by several triangles would pass a stricter
            // threshold; as configured, every submitted corner is marked
            if count >= 1 {
                for dx in -self.vertex_radius..=self.vertex_radius {
                    for dy in -self.vertex_radius..=self.vertex_radius {
                        let px = cx + dx;
                        let py = cy + dy;
                        if px >= 0
                            && (px as usize) < self.width
                            && py >= 0
                            && (py as usize) < self.height
                        {
                            write_checked(target, px as usize, py as usize, color)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl<VB: VertexData, RT: Copy + From<Color>> Default for Rasterizer<VB, RT> {
    fn default() -> Self {
        Self::new()
    }
}
