//! Overlay geometry for the rectangle control
//!
//! Vertices are generated on demand from a region snapshot. The iterator is
//! `Clone`, so the host can walk it as many times as it needs.

use crate::mask::MaskRegion;
use crate::render::{outline_quads, ShapeQuad, ShapeVertex};

/// Overlay appearance, in render-space units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Outline thickness
    pub outline_width: f32,
    /// Side length of the corner handle squares
    pub handle_size: f32,
    pub outline_color: [f32; 4],
    pub handle_color: [f32; 4],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            outline_width: 0.003,
            handle_size: 0.015,
            outline_color: [1.0, 1.0, 1.0, 0.9],
            handle_color: [0.2, 0.6, 1.0, 1.0],
        }
    }
}

const QUAD_COUNT: usize = 6;

/// Lazy triangle-list of the outline (4 quads) followed by the lower-left
/// and upper-right handle squares
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayVertices {
    quads: [ShapeQuad; QUAD_COUNT],
    next: usize,
    /// Yields nothing (configuration fault)
    empty: bool,
}

impl OverlayVertices {
    pub const VERTEX_COUNT: usize = QUAD_COUNT * ShapeQuad::VERTEX_COUNT;

    pub fn new(region: &MaskRegion, style: &OverlayStyle) -> Self {
        let min = region.lower_left.to_array();
        let max = region.upper_right.to_array();
        let [bottom, top, left, right] = outline_quads(min, max, style.outline_width, style.outline_color);
        Self {
            quads: [
                bottom,
                top,
                left,
                right,
                ShapeQuad::centered(min, style.handle_size, style.handle_color),
                ShapeQuad::centered(max, style.handle_size, style.handle_color),
            ],
            next: 0,
            empty: false,
        }
    }

    /// An overlay with no geometry
    pub fn empty() -> Self {
        Self {
            quads: [ShapeQuad::new([0.0; 2], [0.0; 2], [0.0; 4]); QUAD_COUNT],
            next: 0,
            empty: true,
        }
    }

    fn total(&self) -> usize {
        if self.empty {
            0
        } else {
            Self::VERTEX_COUNT
        }
    }

    /// Start again from the first vertex
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for OverlayVertices {
    type Item = ShapeVertex;

    fn next(&mut self) -> Option<ShapeVertex> {
        if self.next >= self.total() {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(self.quads[i / ShapeQuad::VERTEX_COUNT].vertex(i % ShapeQuad::VERTEX_COUNT))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OverlayVertices {}
