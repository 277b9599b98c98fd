//! On-screen rectangle control
//!
//! Translates pointer events on the host canvas into edits of the mask
//! corners. The region itself lives in the host's parameter store and is
//! re-read on every call; the control only keeps the transient drag state.
//!
//! Every operation runs on the host's UI thread inside its event loop and
//! is a bounded computation. None of them return errors: configuration
//! faults are reported to the host and turn the call into a no-op.

mod overlay;

pub use overlay::{OverlayStyle, OverlayVertices};

use std::sync::Arc;

use glam::Vec2;
use tracing::{debug, warn};

use crate::error::FxMaskError;
use crate::host::HostApi;
use crate::mask::{DragHandleId, MaskRegion, ViewTransform};
use crate::params::{read_region, write_region};

/// Default handle grab radius in screen pixels
pub const DEFAULT_HIT_TOLERANCE_PX: f32 = 8.0;

/// Pointer events delivered by the host, each with its current view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2, view: ViewTransform },
    Drag { position: Vec2, view: ViewTransform },
    Up,
}

/// Interactive control for the two mask corners
pub struct RectangleControl {
    host: Arc<dyn HostApi>,
    hit_tolerance_px: f32,
    style: OverlayStyle,
    active: DragHandleId,
    drag_origin: Option<Vec2>,
    last_pointer: Option<Vec2>,
}

impl RectangleControl {
    /// Create a control bound to the host's parameter accessor
    pub fn new(host: Arc<dyn HostApi>) -> Self {
        Self {
            host,
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            style: OverlayStyle::default(),
            active: DragHandleId::None,
            drag_origin: None,
            last_pointer: None,
        }
    }

    pub fn with_hit_tolerance(mut self, pixels: f32) -> Self {
        self.hit_tolerance_px = pixels.max(0.0);
        self
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Handle currently being dragged
    pub fn active_handle(&self) -> DragHandleId {
        self.active
    }

    /// Screen position where the active drag started
    pub fn drag_origin(&self) -> Option<Vec2> {
        self.drag_origin
    }

    /// Last pointer position seen, in screen pixels
    pub fn last_pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    pub fn hit_tolerance(&self) -> f32 {
        self.hit_tolerance_px
    }

    fn report(&self, err: FxMaskError) {
        warn!("On-screen control fault: {}", err);
        self.host.report_error(&err);
    }

    fn region(&self) -> Option<MaskRegion> {
        match read_region(&*self.host) {
            Ok(region) => Some(region),
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Which handle, if any, lies within the hit tolerance of `screen_point`
    ///
    /// Distances are measured in screen pixels. When both handles qualify
    /// (a near-zero-size rectangle) the lower-left one wins.
    pub fn hit_test(&self, screen_point: Vec2, view: &ViewTransform) -> DragHandleId {
        let Some(region) = self.region() else {
            return DragHandleId::None;
        };
        match hit_test_region(&region, screen_point, view, self.hit_tolerance_px) {
            Ok(handle) => handle,
            Err(err) => {
                self.report(err);
                DragHandleId::None
            }
        }
    }

    /// Start dragging the handle under `screen_point`, if there is one
    pub fn begin_drag(&mut self, screen_point: Vec2, view: &ViewTransform) {
        self.last_pointer = Some(screen_point);
        let handle = self.hit_test(screen_point, view);
        if handle.is_some() {
            debug!(?handle, x = screen_point.x, y = screen_point.y, "Begin drag");
            self.active = handle;
            self.drag_origin = Some(screen_point);
        }
    }

    /// Move the active corner to `screen_point`
    ///
    /// The corner is clamped per axis so it never crosses the opposite one.
    pub fn continue_drag(&mut self, screen_point: Vec2, view: &ViewTransform) {
        self.last_pointer = Some(screen_point);
        if !self.active.is_some() {
            return;
        }
        if !view.is_invertible() {
            self.report(FxMaskError::NonInvertibleTransform);
            return;
        }
        let Some(mut region) = self.region() else {
            return;
        };

        let target = view.screen_to_render(screen_point);
        let Some(stored) = region.move_corner(self.active, target) else {
            return;
        };
        debug!(handle = ?self.active, x = stored.x, y = stored.y, "Drag corner");
        if let Err(err) = write_region(&*self.host, &region) {
            self.report(err);
        }
    }

    /// Release the active handle
    pub fn end_drag(&mut self) {
        if self.active.is_some() {
            debug!(handle = ?self.active, "End drag");
        }
        self.active = DragHandleId::None;
        self.drag_origin = None;
    }

    /// Overlay geometry for the current region, in render space
    pub fn render_overlay(&self) -> OverlayVertices {
        match self.region() {
            Some(region) => OverlayVertices::new(&region, &self.style),
            None => OverlayVertices::empty(),
        }
    }

    /// Dispatch one pointer event and return the updated overlay
    pub fn handle_event(&mut self, event: PointerEvent) -> OverlayVertices {
        match event {
            PointerEvent::Down { position, view } => self.begin_drag(position, &view),
            PointerEvent::Drag { position, view } => self.continue_drag(position, &view),
            PointerEvent::Up => self.end_drag(),
        }
        self.render_overlay()
    }
}

/// Hit-test a region without touching any host state
pub fn hit_test_region(
    region: &MaskRegion,
    screen_point: Vec2,
    view: &ViewTransform,
    tolerance_px: f32,
) -> Result<DragHandleId, FxMaskError> {
    let lower_left = view.render_to_screen(region.lower_left)?;
    let upper_right = view.render_to_screen(region.upper_right)?;

    if lower_left.distance(screen_point) <= tolerance_px {
        Ok(DragHandleId::LowerLeft)
    } else if upper_right.distance(screen_point) <= tolerance_px {
        Ok(DragHandleId::UpperRight)
    } else {
        Ok(DragHandleId::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ParameterAccess, SimulatedHost};
    use crate::mask::Point2D;
    use crate::params::{Parameter, ParameterId, ParameterMeta, ParameterValue};

    fn host_with_region(lower_left: Point2D, upper_right: Point2D) -> Arc<SimulatedHost> {
        Arc::new(SimulatedHost::with_parameters([
            Parameter::new(ParameterMeta::point(ParameterId::LowerLeft, "lower_left", "Lower Left", lower_left)),
            Parameter::new(ParameterMeta::point(ParameterId::UpperRight, "upper_right", "Upper Right", upper_right)),
        ]))
    }

    /// 1000x1000 canvas at the screen origin: render (x, y) is screen (1000x, 1000 - 1000y)
    fn view() -> ViewTransform {
        ViewTransform::from_canvas(Vec2::ZERO, Vec2::new(1000.0, 1000.0))
    }

    fn control(host: &Arc<SimulatedHost>) -> RectangleControl {
        RectangleControl::new(host.clone())
    }

    fn region_of(host: &SimulatedHost) -> MaskRegion {
        read_region(host).unwrap()
    }

    #[test]
    fn test_hit_test_finds_corners() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let osc = control(&host);
        assert_eq!(osc.hit_test(Vec2::new(203.0, 797.0), &view()), DragHandleId::LowerLeft);
        assert_eq!(osc.hit_test(Vec2::new(800.0, 200.0), &view()), DragHandleId::UpperRight);
    }

    #[test]
    fn test_hit_test_misses_far_points() {
        let host = host_with_region(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0));
        let osc = control(&host);
        assert_eq!(osc.hit_test(Vec2::new(500.0, 500.0), &view()), DragHandleId::None);
        // just outside the 8px radius of the lower-left corner at (0, 1000)
        assert_eq!(osc.hit_test(Vec2::new(6.0, 994.0), &view()), DragHandleId::None);
    }

    #[test]
    fn test_hit_test_is_idempotent() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let osc = control(&host);
        let p = Vec2::new(801.0, 199.0);
        assert_eq!(osc.hit_test(p, &view()), osc.hit_test(p, &view()));
    }

    #[test]
    fn test_degenerate_region_prefers_lower_left() {
        let host = host_with_region(Point2D::new(0.5, 0.5), Point2D::new(0.5, 0.5));
        let osc = control(&host);
        assert_eq!(osc.hit_test(Vec2::new(500.0, 500.0), &view()), DragHandleId::LowerLeft);
    }

    #[test]
    fn test_drag_lower_left_past_upper_right_clamps() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);

        osc.begin_drag(Vec2::new(200.0, 800.0), &view());
        assert_eq!(osc.active_handle(), DragHandleId::LowerLeft);
        assert_eq!(osc.drag_origin(), Some(Vec2::new(200.0, 800.0)));

        osc.continue_drag(Vec2::new(900.0, 100.0), &view());
        osc.end_drag();

        let region = region_of(&host);
        assert_eq!(region.lower_left, Point2D::new(0.8, 0.8));
        assert_eq!(region.upper_right, Point2D::new(0.8, 0.8));
        assert!(region.is_ordered());
        assert_eq!(osc.active_handle(), DragHandleId::None);
    }

    #[test]
    fn test_drag_upper_right_moves_corner() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);

        osc.begin_drag(Vec2::new(800.0, 200.0), &view());
        osc.continue_drag(Vec2::new(900.0, 400.0), &view());

        let region = region_of(&host);
        assert!((region.upper_right.x - 0.9).abs() < 1e-5);
        assert!((region.upper_right.y - 0.6).abs() < 1e-5);
        assert_eq!(region.lower_left, Point2D::new(0.2, 0.2));
    }

    #[test]
    fn test_invariant_holds_over_drag_sequences() {
        let host = host_with_region(Point2D::new(0.3, 0.3), Point2D::new(0.7, 0.7));
        let mut osc = control(&host);
        let path = [
            Vec2::new(950.0, 50.0),
            Vec2::new(10.0, 990.0),
            Vec2::new(600.0, 900.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(700.0, 300.0),
        ];

        for start in [Vec2::new(300.0, 700.0), Vec2::new(700.0, 300.0)] {
            osc.begin_drag(start, &view());
            for p in path {
                osc.continue_drag(p, &view());
                assert!(region_of(&host).is_ordered());
            }
            osc.end_drag();
            assert!(region_of(&host).is_ordered());
        }
    }

    #[test]
    fn test_drag_with_inverted_host_corners() {
        // host holds the visible upper-right in its LowerLeft parameter
        let host = host_with_region(Point2D::new(0.8, 0.8), Point2D::new(0.2, 0.2));
        let mut osc = control(&host);

        osc.begin_drag(Vec2::new(800.0, 200.0), &view());
        assert_eq!(osc.active_handle(), DragHandleId::UpperRight);
        osc.continue_drag(Vec2::new(500.0, 500.0), &view());
        osc.end_drag();

        let region = region_of(&host);
        assert_eq!(region.lower_left, Point2D::new(0.2, 0.2));
        assert!((region.upper_right.x - 0.5).abs() < 1e-5);
        assert!((region.upper_right.y - 0.5).abs() < 1e-5);

        let stored_ll = host.get_parameter(ParameterId::LowerLeft).and_then(|v| v.as_point()).unwrap();
        let stored_ur = host.get_parameter(ParameterId::UpperRight).and_then(|v| v.as_point()).unwrap();
        assert!(MaskRegion { lower_left: stored_ll, upper_right: stored_ur }.is_ordered());
        assert_eq!(stored_ll, Point2D::new(0.2, 0.2));
    }

    #[test]
    fn test_rejected_write_is_reported() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        host.set_locked(ParameterId::LowerLeft, true);
        let mut osc = control(&host);
        let before = region_of(&host);

        osc.begin_drag(Vec2::new(200.0, 800.0), &view());
        osc.continue_drag(Vec2::new(300.0, 700.0), &view());

        assert_eq!(region_of(&host), before);
        let errors = host.take_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FxMaskError::HostRejected { id: ParameterId::LowerLeft, .. }));
    }

    #[test]
    fn test_begin_drag_on_miss_does_nothing() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);
        let before = region_of(&host);

        osc.begin_drag(Vec2::new(500.0, 500.0), &view());
        assert_eq!(osc.active_handle(), DragHandleId::None);
        assert_eq!(osc.last_pointer(), Some(Vec2::new(500.0, 500.0)));

        osc.continue_drag(Vec2::new(10.0, 10.0), &view());
        assert_eq!(region_of(&host), before);
    }

    #[test]
    fn test_end_drag_is_idempotent() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);
        osc.end_drag();
        osc.end_drag();
        assert_eq!(osc.active_handle(), DragHandleId::None);
    }

    #[test]
    fn test_non_invertible_transform_is_reported() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);
        let broken = ViewTransform::from_canvas(Vec2::ZERO, Vec2::new(0.0, 0.0));

        assert_eq!(osc.hit_test(Vec2::new(200.0, 800.0), &broken), DragHandleId::None);
        assert_eq!(host.take_errors(), vec![FxMaskError::NonInvertibleTransform]);

        // a drag that started under a good transform stops when the view breaks
        osc.begin_drag(Vec2::new(200.0, 800.0), &view());
        let before = region_of(&host);
        osc.continue_drag(Vec2::new(300.0, 700.0), &broken);
        assert_eq!(region_of(&host), before);
        assert_eq!(host.take_errors(), vec![FxMaskError::NonInvertibleTransform]);
    }

    #[test]
    fn test_missing_accessor_parameter_is_reported() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        host.remove_parameter(ParameterId::UpperRight);
        let osc = control(&host);

        assert_eq!(osc.hit_test(Vec2::new(200.0, 800.0), &view()), DragHandleId::None);
        assert_eq!(osc.render_overlay().count(), 0);
        assert_eq!(
            host.reported_errors(),
            vec![
                FxMaskError::MissingParameter(ParameterId::UpperRight),
                FxMaskError::MissingParameter(ParameterId::UpperRight),
            ]
        );
    }

    #[test]
    fn test_region_is_never_cached() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let osc = control(&host);
        assert_eq!(osc.hit_test(Vec2::new(200.0, 800.0), &view()), DragHandleId::LowerLeft);

        // host-side edit between events
        host.set_parameter(ParameterId::LowerLeft, ParameterValue::Point([0.1, 0.1]))
            .unwrap();
        assert_eq!(osc.hit_test(Vec2::new(200.0, 800.0), &view()), DragHandleId::None);
        assert_eq!(osc.hit_test(Vec2::new(100.0, 900.0), &view()), DragHandleId::LowerLeft);
    }

    #[test]
    fn test_render_overlay_is_deterministic() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let osc = control(&host);
        let a: Vec<_> = osc.render_overlay().collect();
        let b: Vec<_> = osc.render_overlay().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), OverlayVertices::VERTEX_COUNT);
    }

    #[test]
    fn test_handle_event_sequence() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let mut osc = control(&host);

        osc.handle_event(PointerEvent::Down {
            position: Vec2::new(800.0, 200.0),
            view: view(),
        });
        let overlay = osc.handle_event(PointerEvent::Drag {
            position: Vec2::new(850.0, 150.0),
            view: view(),
        });
        osc.handle_event(PointerEvent::Up);

        assert_eq!(osc.active_handle(), DragHandleId::None);
        let region = region_of(&host);
        assert!((region.upper_right.x - 0.85).abs() < 1e-5);
        // the returned overlay reflects the edit: the last quad is the upper-right handle
        let last: Vec<_> = overlay.skip(30).collect();
        let cx = last.iter().map(|v| v.position[0]).sum::<f32>() / 6.0;
        assert!((cx - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_hit_tolerance_is_configurable() {
        let host = host_with_region(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let osc = control(&host).with_hit_tolerance(20.0);
        assert_eq!(osc.hit_test(Vec2::new(215.0, 800.0), &view()), DragHandleId::LowerLeft);
    }
}
