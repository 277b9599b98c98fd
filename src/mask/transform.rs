//! Screen-to-render coordinate mapping
//!
//! The host supplies, with every pointer event, an affine transform from
//! screen pixels (origin top-left, y down) to normalized render space.
//! Handle tolerances are measured in screen pixels, so hit-testing also
//! needs the inverse mapping.

use glam::{Affine2, Vec2};

use super::Point2D;
use crate::error::FxMaskError;

/// Smallest |determinant| accepted as invertible
///
/// A 16K canvas mapped to 0-1 has a determinant around 4e-9, so this only
/// rejects transforms that are singular in practice.
const MIN_DETERMINANT: f32 = 1.0e-12;

/// Host-supplied screen-to-render transform for one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    screen_to_render: Affine2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            screen_to_render: Affine2::IDENTITY,
        }
    }
}

impl ViewTransform {
    /// Wrap an arbitrary affine screen-to-render transform
    pub fn new(screen_to_render: Affine2) -> Self {
        Self { screen_to_render }
    }

    /// Transform for a canvas drawn at `origin` (top-left, screen pixels)
    /// with the given on-screen `size`
    ///
    /// The canvas' bottom edge maps to render y = 0 and its top edge to 1.
    pub fn from_canvas(origin: Vec2, size: Vec2) -> Self {
        let inv_w = 1.0 / size.x;
        let inv_h = 1.0 / size.y;
        Self::new(Affine2::from_cols(
            Vec2::new(inv_w, 0.0),
            Vec2::new(0.0, -inv_h),
            Vec2::new(-origin.x * inv_w, 1.0 + origin.y * inv_h),
        ))
    }

    /// The wrapped affine transform
    pub fn affine(&self) -> Affine2 {
        self.screen_to_render
    }

    /// Whether the transform can be inverted
    pub fn is_invertible(&self) -> bool {
        let det = self.screen_to_render.matrix2.determinant();
        det.is_finite()
            && det.abs() > MIN_DETERMINANT
            && self.screen_to_render.translation.is_finite()
    }

    /// Map a screen-space point into render space
    pub fn screen_to_render(&self, screen: Vec2) -> Point2D {
        self.screen_to_render.transform_point2(screen).into()
    }

    /// Map a render-space point back to screen pixels
    pub fn render_to_screen(&self, render: Point2D) -> Result<Vec2, FxMaskError> {
        if !self.is_invertible() {
            return Err(FxMaskError::NonInvertibleTransform);
        }
        Ok(self.screen_to_render.inverse().transform_point2(render.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_canvas_corners() {
        let view = ViewTransform::from_canvas(Vec2::new(100.0, 50.0), Vec2::new(800.0, 400.0));

        let bottom_left = view.screen_to_render(Vec2::new(100.0, 450.0));
        assert!((bottom_left.x - 0.0).abs() < 1e-6);
        assert!((bottom_left.y - 0.0).abs() < 1e-6);

        let top_right = view.screen_to_render(Vec2::new(900.0, 50.0));
        assert!((top_right.x - 1.0).abs() < 1e-6);
        assert!((top_right.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_to_screen_inverts() {
        let view = ViewTransform::from_canvas(Vec2::new(10.0, 20.0), Vec2::new(1920.0, 1080.0));
        let screen = Vec2::new(500.0, 300.0);
        let render = view.screen_to_render(screen);
        let back = view.render_to_screen(render).unwrap();
        assert!(approx(back, screen));
    }

    #[test]
    fn test_zero_size_canvas_is_not_invertible() {
        let view = ViewTransform::from_canvas(Vec2::ZERO, Vec2::new(0.0, 100.0));
        assert!(!view.is_invertible());
        assert_eq!(
            view.render_to_screen(Point2D::new(0.5, 0.5)),
            Err(FxMaskError::NonInvertibleTransform)
        );
    }

    #[test]
    fn test_singular_matrix_is_not_invertible() {
        let view = ViewTransform::new(Affine2::from_cols(
            Vec2::new(1.0, 2.0),
            Vec2::new(2.0, 4.0),
            Vec2::ZERO,
        ));
        assert!(!view.is_invertible());
    }
}
