//! Mask region model and coordinate spaces

mod region;
mod transform;

pub use region::{DragHandleId, MaskRegion, Point2D};
pub use transform::ViewTransform;
