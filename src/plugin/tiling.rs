//! Region-of-interest callbacks for tiled rendering
//!
//! The effect is a point operation: every output pixel depends only on the
//! input pixel at the same position, so both mappings are the identity.

use serde::Serialize;

use crate::render::TileViewport;

/// Pixel rectangle in image space (origin lower-left, y up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport for rendering this rect as a tile of an `image_size` image
    pub fn tile_viewport(&self, image_size: [u32; 2]) -> TileViewport {
        TileViewport {
            image_size,
            tile_origin: [self.x, self.y],
            tile_size: [self.width, self.height],
        }
    }
}

/// Output bounds produced from an input of `source` bounds
pub fn destination_image_rect(source: PixelRect) -> PixelRect {
    source
}

/// Input region needed to render `destination_tile`
pub fn source_tile_rect(destination_tile: PixelRect) -> PixelRect {
    destination_tile
}
