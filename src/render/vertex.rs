//! GPU vertex and uniform layouts
//!
//! All types are `#[repr(C)]` and `Pod` so they can be uploaded with
//! `bytemuck::cast_slice` and match the WGSL structs field for field.

use bytemuck::{Pod, Zeroable};

/// Vertex for the full-tile image pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex2D {
    /// Position in pixels, centered on the tile
    pub position: [f32; 2],
    /// Texture coordinate (0,0 = top-left texel)
    pub texture_coordinate: [f32; 2],
}

impl Vertex2D {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex2D>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 2], texture_coordinate: [f32; 2]) -> Self {
        Self {
            position,
            texture_coordinate,
        }
    }
}

/// Vertex for the mask outline/fill and the on-screen overlay
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    /// RGBA color (0.0-1.0 per channel)
    pub color: [f32; 4],
}

impl ShapeVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };

    pub fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Viewport size uniform (vertex stage)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewportUniform {
    /// Tile size in pixels: [width, height]
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width as f32, height as f32],
            _pad: [0.0; 2],
        }
    }
}

/// Brightness parameter block (fragment stage)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BrightnessParams {
    /// Offset added to RGB, -1.0 to 1.0 (0.0 = unmodified)
    pub brightness: f32,
    pub _pad: [f32; 3],
}

/// Axis-aligned quad expanded into two triangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeQuad {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub color: [f32; 4],
}

impl ShapeQuad {
    pub const VERTEX_COUNT: usize = 6;

    pub fn new(min: [f32; 2], max: [f32; 2], color: [f32; 4]) -> Self {
        Self { min, max, color }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: [f32; 2], size: f32, color: [f32; 4]) -> Self {
        let h = size * 0.5;
        Self::new([center[0] - h, center[1] - h], [center[0] + h, center[1] + h], color)
    }

    /// Vertex `i` (0..6) of the triangle list: (min, max.x/min.y, max.x/max.y),
    /// (min, max, min.x/max.y)
    pub fn vertex(&self, i: usize) -> ShapeVertex {
        let [x0, y0] = self.min;
        let [x1, y1] = self.max;
        let position = match i % Self::VERTEX_COUNT {
            0 => [x0, y0],
            1 => [x1, y0],
            2 => [x1, y1],
            3 => [x0, y0],
            4 => [x1, y1],
            _ => [x0, y1],
        };
        ShapeVertex::new(position, self.color)
    }

    pub fn vertices(&self) -> [ShapeVertex; 6] {
        std::array::from_fn(|i| self.vertex(i))
    }
}

/// Four edge quads outlining the rectangle `min..max`, each `thickness`
/// wide and centered on the edge
pub fn outline_quads(min: [f32; 2], max: [f32; 2], thickness: f32, color: [f32; 4]) -> [ShapeQuad; 4] {
    let h = thickness * 0.5;
    let [x0, y0] = min;
    let [x1, y1] = max;
    [
        // bottom and top span the full width including the corners
        ShapeQuad::new([x0 - h, y0 - h], [x1 + h, y0 + h], color),
        ShapeQuad::new([x0 - h, y1 - h], [x1 + h, y1 + h], color),
        // left and right fill the gap between them
        ShapeQuad::new([x0 - h, y0 + h], [x0 + h, y1 - h], color),
        ShapeQuad::new([x1 - h, y0 + h], [x1 + h, y1 - h], color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_sizes() {
        assert_eq!(std::mem::size_of::<Vertex2D>(), 16);
        assert_eq!(std::mem::size_of::<ShapeVertex>(), 24);
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert_eq!(std::mem::size_of::<BrightnessParams>(), 16);
    }

    #[test]
    fn test_layout_strides_match_structs() {
        assert_eq!(Vertex2D::LAYOUT.array_stride, 16);
        assert_eq!(ShapeVertex::LAYOUT.array_stride, 24);
    }

    #[test]
    fn test_quad_covers_corners() {
        let quad = ShapeQuad::new([0.0, 0.0], [2.0, 1.0], [1.0; 4]);
        let positions: Vec<[f32; 2]> = quad.vertices().iter().map(|v| v.position).collect();
        for corner in [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]] {
            assert!(positions.contains(&corner));
        }
    }

    #[test]
    fn test_outline_quads_surround_rect() {
        let quads = outline_quads([0.0, 0.0], [10.0, 10.0], 2.0, [1.0; 4]);
        assert_eq!(quads[0].min, [-1.0, -1.0]);
        assert_eq!(quads[1].max, [11.0, 11.0]);
        assert_eq!(quads[2].min, [-1.0, 1.0]);
        assert_eq!(quads[3].max, [11.0, 9.0]);
    }
}
