//! Per-tile draw data builders
//!
//! Pure functions from parameters to the fixed-layout data the two draw
//! passes consume. They never touch the GPU; the runtime uploads their
//! output.

use super::vertex::{outline_quads, BrightnessParams, ShapeQuad, ShapeVertex, Vertex2D, ViewportUniform};
use crate::mask::{MaskRegion, Point2D};

/// Brightness range accepted by the fragment stage
pub const BRIGHTNESS_RANGE: (f32, f32) = (-1.0, 1.0);

/// The rectangle of the full output image covered by one tile
///
/// Sizes and origins are in pixels. `tile_origin` is the tile's lower-left
/// corner measured from the image's lower-left (render space, y up); it is
/// negative for tiles that start outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileViewport {
    pub image_size: [u32; 2],
    pub tile_origin: [i32; 2],
    pub tile_size: [u32; 2],
}

impl TileViewport {
    /// A single tile covering the whole image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            image_size: [width, height],
            tile_origin: [0, 0],
            tile_size: [width, height],
        }
    }

    /// Tile size clamped to at least 1x1
    pub fn clamped_tile_size(&self) -> [u32; 2] {
        clamp_size(self.tile_size)
    }

    /// Map a render-space point into the tile's centered pixel space
    pub fn to_tile_pixels(&self, p: Point2D) -> [f32; 2] {
        let [iw, ih] = clamp_size(self.image_size);
        let [tw, th] = self.clamped_tile_size();
        [
            p.x * iw as f32 - self.tile_origin[0] as f32 - tw as f32 * 0.5,
            p.y * ih as f32 - self.tile_origin[1] as f32 - th as f32 * 0.5,
        ]
    }
}

fn clamp_size([w, h]: [u32; 2]) -> [u32; 2] {
    [w.max(1), h.max(1)]
}

/// Data for the full-tile image pass
///
/// `T` is the host's texture handle type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePass<T> {
    /// Triangle strip covering the tile, bound at [`VertexInputIndex::Vertices`](crate::shaders::VertexInputIndex::Vertices)
    pub vertices: [Vertex2D; 4],
    /// Bound at [`VertexInputIndex::ViewportSize`](crate::shaders::VertexInputIndex::ViewportSize)
    pub viewport_size: ViewportUniform,
    /// Bound at [`TextureIndex::InputImage`](crate::shaders::TextureIndex::InputImage)
    pub texture: T,
}

/// Build the image pass for a viewport of `viewport_size` pixels
///
/// Zero dimensions are clamped to 1.
pub fn build_image_pass<T>(viewport_size: [u32; 2], source_texture: T) -> ImagePass<T> {
    let [w, h] = clamp_size(viewport_size);
    let hw = w as f32 * 0.5;
    let hh = h as f32 * 0.5;

    // Strip order: bottom-left, bottom-right, top-left, top-right.
    // Texture v runs top to bottom.
    let vertices = [
        Vertex2D::new([-hw, -hh], [0.0, 1.0]),
        Vertex2D::new([hw, -hh], [1.0, 1.0]),
        Vertex2D::new([-hw, hh], [0.0, 0.0]),
        Vertex2D::new([hw, hh], [1.0, 0.0]),
    ];

    ImagePass {
        vertices,
        viewport_size: ViewportUniform::new(w, h),
        texture: source_texture,
    }
}

/// Appearance of the rendered mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStyle {
    pub fill_color: [f32; 4],
    pub outline_color: [f32; 4],
    /// Outline thickness in pixels
    pub outline_width: f32,
    /// Draw the interior as well as the outline
    pub filled: bool,
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self {
            fill_color: [0.0, 0.0, 0.0, 0.5],
            outline_color: [1.0, 1.0, 1.0, 1.0],
            outline_width: 2.0,
            filled: false,
        }
    }
}

/// Geometry for the mask shape pass
#[derive(Debug, Clone, PartialEq)]
pub struct MaskPass {
    /// Triangle list: fill (if any) first, then the outline
    pub vertices: Vec<ShapeVertex>,
    /// Number of leading vertices that belong to the fill
    pub fill_vertex_count: usize,
    /// Bound at [`VertexInputIndex::ViewportSize`](crate::shaders::VertexInputIndex::ViewportSize)
    pub viewport_size: ViewportUniform,
}

impl MaskPass {
    pub const OUTLINE_VERTEX_COUNT: usize = 4 * ShapeQuad::VERTEX_COUNT;
    /// Upper bound on vertices per mask pass
    pub const MAX_VERTEX_COUNT: usize = Self::OUTLINE_VERTEX_COUNT + ShapeQuad::VERTEX_COUNT;

    pub fn fill(&self) -> &[ShapeVertex] {
        &self.vertices[..self.fill_vertex_count]
    }

    pub fn outline(&self) -> &[ShapeVertex] {
        &self.vertices[self.fill_vertex_count..]
    }
}

/// Build the mask geometry for one tile
pub fn build_mask_pass(region: &MaskRegion, viewport: &TileViewport, style: &MaskStyle) -> MaskPass {
    let min = viewport.to_tile_pixels(region.lower_left);
    let max = viewport.to_tile_pixels(region.upper_right);
    let thickness = style.outline_width.max(1.0);

    let mut vertices = Vec::with_capacity(MaskPass::MAX_VERTEX_COUNT);
    if style.filled {
        vertices.extend(ShapeQuad::new(min, max, style.fill_color).vertices());
    }
    let fill_vertex_count = vertices.len();
    for quad in outline_quads(min, max, thickness, style.outline_color) {
        vertices.extend(quad.vertices());
    }

    let [w, h] = viewport.clamped_tile_size();
    MaskPass {
        vertices,
        fill_vertex_count,
        viewport_size: ViewportUniform::new(w, h),
    }
}

/// Pack the fragment-stage brightness block, bound at
/// [`FragmentIndex::Brightness`](crate::shaders::FragmentIndex::Brightness)
///
/// The value is clamped to [`BRIGHTNESS_RANGE`]; NaN becomes 0.
pub fn build_brightness_params(brightness: f32) -> BrightnessParams {
    let value = if brightness.is_nan() {
        0.0
    } else {
        brightness.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1)
    };
    BrightnessParams {
        brightness: value,
        _pad: [0.0; 3],
    }
}
