//! Mask rectangle data model
//!
//! The mask is an axis-aligned rectangle in normalized render space
//! (0.0-1.0, origin at the lower-left, y up) described by two corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D point in normalized render space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate (normalized 0.0-1.0, left to right)
    pub x: f32,
    /// Y coordinate (normalized 0.0-1.0, bottom to top)
    pub y: f32,
}

impl Point2D {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Point2D {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for Point2D {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point2D> for Vec2 {
    fn from(p: Point2D) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Which corner handle of the mask is grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DragHandleId {
    LowerLeft,
    UpperRight,
    /// No handle grabbed (idle)
    #[default]
    None,
}

impl DragHandleId {
    pub fn is_some(self) -> bool {
        self != DragHandleId::None
    }
}

/// The masked rectangle
///
/// Always satisfies `lower_left.x <= upper_right.x` and
/// `lower_left.y <= upper_right.y` when built through [`MaskRegion::new`]
/// or mutated through [`MaskRegion::move_corner`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskRegion {
    #[serde(rename = "lowerLeft")]
    pub lower_left: Point2D,
    #[serde(rename = "upperRight")]
    pub upper_right: Point2D,
}

impl Default for MaskRegion {
    fn default() -> Self {
        Self {
            lower_left: Point2D::new(0.25, 0.25),
            upper_right: Point2D::new(0.75, 0.75),
        }
    }
}

impl MaskRegion {
    /// Create a region from two arbitrary corners, swapping per axis so the
    /// rectangle is never inverted
    pub fn new(a: Point2D, b: Point2D) -> Self {
        Self {
            lower_left: Point2D::new(a.x.min(b.x), a.y.min(b.y)),
            upper_right: Point2D::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Whether the ordering invariant holds
    pub fn is_ordered(&self) -> bool {
        self.lower_left.x <= self.upper_right.x && self.lower_left.y <= self.upper_right.y
    }

    /// Move one corner, clamping each axis to the opposite corner so the
    /// rectangle cannot invert. Returns the stored position.
    pub fn move_corner(&mut self, handle: DragHandleId, to: Point2D) -> Option<Point2D> {
        match handle {
            DragHandleId::LowerLeft => {
                self.lower_left = Point2D::new(
                    to.x.min(self.upper_right.x),
                    to.y.min(self.upper_right.y),
                );
                Some(self.lower_left)
            }
            DragHandleId::UpperRight => {
                self.upper_right = Point2D::new(
                    to.x.max(self.lower_left.x),
                    to.y.max(self.lower_left.y),
                );
                Some(self.upper_right)
            }
            DragHandleId::None => None,
        }
    }
}
