//! Typed reads and writes through the host accessor
//!
//! The render path takes an owned [`ParameterSnapshot`] once per tile so
//! tiles rendered concurrently never share mutable state.

use serde::Serialize;
use tracing::warn;

use super::{ParameterId, ParameterValue};
use crate::error::FxMaskError;
use crate::host::{HostApi, ParameterAccess};
use crate::mask::{MaskRegion, Point2D};

fn read<H: ParameterAccess + ?Sized>(host: &H, id: ParameterId) -> Result<ParameterValue, FxMaskError> {
    host.get_parameter(id).ok_or(FxMaskError::MissingParameter(id))
}

fn read_point<H: ParameterAccess + ?Sized>(host: &H, id: ParameterId) -> Result<Point2D, FxMaskError> {
    read(host, id)?
        .as_point()
        .ok_or(FxMaskError::ParameterType { id, expected: "point" })
}

fn read_f32<H: ParameterAccess + ?Sized>(host: &H, id: ParameterId) -> Result<f32, FxMaskError> {
    read(host, id)?
        .as_f32()
        .ok_or(FxMaskError::ParameterType { id, expected: "float" })
}

fn read_bool<H: ParameterAccess + ?Sized>(host: &H, id: ParameterId) -> Result<bool, FxMaskError> {
    read(host, id)?
        .as_bool()
        .ok_or(FxMaskError::ParameterType { id, expected: "bool" })
}

fn read_color<H: ParameterAccess + ?Sized>(host: &H, id: ParameterId) -> Result<[f32; 4], FxMaskError> {
    read(host, id)?
        .as_color()
        .ok_or(FxMaskError::ParameterType { id, expected: "color" })
}

/// Read the mask rectangle from the host
///
/// Corners stored inverted (e.g. edited numerically in the inspector) are
/// swapped per axis.
pub fn read_region<H: ParameterAccess + ?Sized>(host: &H) -> Result<MaskRegion, FxMaskError> {
    let lower_left = read_point(host, ParameterId::LowerLeft)?;
    let upper_right = read_point(host, ParameterId::UpperRight)?;
    Ok(MaskRegion::new(lower_left, upper_right))
}

/// Write both corners back to the host
///
/// Both are written so that corners the host held in the wrong order end
/// up stored normalized.
pub fn write_region<H: ParameterAccess + ?Sized>(host: &H, region: &MaskRegion) -> Result<(), FxMaskError> {
    host.set_parameter(ParameterId::LowerLeft, region.lower_left.into())?;
    host.set_parameter(ParameterId::UpperRight, region.upper_right.into())
}

/// Owned copy of every parameter the render path needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSnapshot {
    pub region: MaskRegion,
    pub filled: bool,
    pub brightness: f32,
    #[serde(rename = "fillColor")]
    pub fill_color: [f32; 4],
    #[serde(rename = "outlineColor")]
    pub outline_color: [f32; 4],
}

impl ParameterSnapshot {
    /// Read all parameters from the host
    pub fn read<H: ParameterAccess + ?Sized>(host: &H) -> Result<Self, FxMaskError> {
        Ok(Self {
            region: read_region(host)?,
            filled: read_bool(host, ParameterId::FillMode)?,
            brightness: read_f32(host, ParameterId::Brightness)?,
            fill_color: read_color(host, ParameterId::FillColor)?,
            outline_color: read_color(host, ParameterId::OutlineColor)?,
        })
    }
}

/// What a tile should render this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameParams {
    /// Apply brightness and draw the mask
    Render(ParameterSnapshot),
    /// Copy the source unchanged (configuration fault)
    PassThrough,
}

impl FrameParams {
    /// Snapshot the host's parameters, downgrading to pass-through and
    /// reporting to the host on a configuration fault
    pub fn from_host<H: HostApi + ?Sized>(host: &H) -> Self {
        match ParameterSnapshot::read(host) {
            Ok(snapshot) => FrameParams::Render(snapshot),
            Err(err) => {
                warn!("Rendering pass-through: {}", err);
                host.report_error(&err);
                FrameParams::PassThrough
            }
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, FrameParams::PassThrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use crate::params::{Parameter, ParameterMeta};

    fn full_host() -> SimulatedHost {
        SimulatedHost::with_parameters([
            Parameter::new(ParameterMeta::point(ParameterId::LowerLeft, "lower_left", "Lower Left", Point2D::new(0.2, 0.3))),
            Parameter::new(ParameterMeta::point(ParameterId::UpperRight, "upper_right", "Upper Right", Point2D::new(0.7, 0.9))),
            Parameter::new(ParameterMeta::bool(ParameterId::FillMode, "filled", "Filled", true)),
            Parameter::new(ParameterMeta::float(ParameterId::Brightness, "brightness", "Brightness", 0.25, -1.0, 1.0)),
            Parameter::new(ParameterMeta::color(ParameterId::FillColor, "fill_color", "Fill Color", [1.0, 0.0, 0.0, 0.5])),
            Parameter::new(ParameterMeta::color(ParameterId::OutlineColor, "outline_color", "Outline Color", [1.0, 1.0, 1.0, 1.0])),
        ])
    }

    #[test]
    fn test_snapshot_reads_everything() {
        let host = full_host();
        let snapshot = ParameterSnapshot::read(&host).unwrap();
        assert_eq!(snapshot.region.lower_left, Point2D::new(0.2, 0.3));
        assert_eq!(snapshot.region.upper_right, Point2D::new(0.7, 0.9));
        assert!(snapshot.filled);
        assert_eq!(snapshot.brightness, 0.25);
        assert_eq!(snapshot.fill_color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_inverted_corners_are_swapped_on_read() {
        let host = full_host();
        host.set_parameter(ParameterId::LowerLeft, ParameterValue::Point([0.9, 0.95])).unwrap();
        let region = read_region(&host).unwrap();
        assert!(region.is_ordered());
        assert_eq!(region.lower_left, Point2D::new(0.7, 0.9));
        assert_eq!(region.upper_right, Point2D::new(0.9, 0.95));
    }

    #[test]
    fn test_missing_parameter_falls_back_to_pass_through() {
        let host = full_host();
        host.remove_parameter(ParameterId::Brightness);

        let frame = FrameParams::from_host(&host);
        assert!(frame.is_pass_through());
        assert_eq!(
            host.reported_errors(),
            vec![FxMaskError::MissingParameter(ParameterId::Brightness)]
        );
    }

    #[test]
    fn test_write_region_normalizes_host_storage() {
        let host = full_host();
        host.set_parameter(ParameterId::LowerLeft, ParameterValue::Point([0.8, 0.8])).unwrap();
        host.set_parameter(ParameterId::UpperRight, ParameterValue::Point([0.2, 0.2])).unwrap();

        let region = read_region(&host).unwrap();
        write_region(&host, &region).unwrap();
        assert_eq!(
            host.get_parameter(ParameterId::LowerLeft),
            Some(ParameterValue::Point([0.2, 0.2]))
        );
        assert_eq!(
            host.get_parameter(ParameterId::UpperRight),
            Some(ParameterValue::Point([0.8, 0.8]))
        );
    }
}
