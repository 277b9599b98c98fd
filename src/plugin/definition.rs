//! Effect definition and host registration
//!
//! A definition is a factory: it tells the host which parameters to create,
//! which on-screen control to attach to which parameters, and builds the
//! GPU runtime on request.

use std::sync::Arc;

use serde::Serialize;

use crate::error::FxMaskError;
use crate::host::{HostApi, ParameterAccess};
use crate::mask::MaskRegion;
use crate::osc::RectangleControl;
use crate::params::{Parameter, ParameterId, ParameterMeta};
use crate::render::{MaskEffectRuntime, TileRenderTarget};
use crate::settings::PluginSettings;

/// Identity presented to the host's plugin browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    /// Reverse-DNS bundle identifier
    pub identifier: &'static str,
    pub version: &'static str,
    pub category: &'static str,
}

impl PluginInfo {
    pub const fn fx_mask() -> Self {
        Self {
            name: "FxMask",
            identifier: "org.fxmask.rectangle-mask",
            version: env!("CARGO_PKG_VERSION"),
            category: "Mask",
        }
    }
}

/// On-screen control types the host can attach to an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlKind {
    /// Two-corner rectangle editor
    Rectangle,
}

/// Attaches an on-screen control to the parameters it edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlBinding {
    pub kind: ControlKind,
    pub parameters: Vec<ParameterId>,
}

/// Runtime trait for GPU tile renderers
pub trait TileEffectRuntime: Send {
    /// Encode one tile into `encoder`
    fn render_tile(&self, encoder: &mut wgpu::CommandEncoder, device: &wgpu::Device, target: &TileRenderTarget<'_>);
}

impl TileEffectRuntime for MaskEffectRuntime {
    fn render_tile(&self, encoder: &mut wgpu::CommandEncoder, device: &wgpu::Device, target: &TileRenderTarget<'_>) {
        MaskEffectRuntime::render_tile(self, encoder, device, target)
    }
}

/// Trait for effect definitions (factory pattern)
pub trait EffectDefinition: Send + Sync {
    /// Unique identifier for this effect type
    fn effect_type(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Category for grouping in the host's browser
    fn category(&self) -> &'static str;

    /// Parameters the host should create, holding their defaults
    fn default_parameters(&self) -> Vec<Parameter>;

    /// On-screen controls and the parameters they edit
    fn control_bindings(&self) -> Vec<ControlBinding>;

    /// Create a GPU runtime for this effect
    /// Returns None if the effect renders nothing on the GPU
    fn create_gpu_runtime(
        &self,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
    ) -> Option<Box<dyn TileEffectRuntime>>;
}

/// The rectangle mask effect
#[derive(Debug, Clone, Default)]
pub struct FxMaskDefinition {
    settings: PluginSettings,
}

impl FxMaskDefinition {
    pub const EFFECT_TYPE: &'static str = "fx_mask";

    pub fn new(settings: PluginSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Create the rectangle control for one effect instance
    pub fn create_control(&self, host: Arc<dyn HostApi>) -> RectangleControl {
        RectangleControl::new(host)
            .with_hit_tolerance(self.settings.hit_tolerance_px)
            .with_style(self.settings.overlay_style())
    }
}

impl EffectDefinition for FxMaskDefinition {
    fn effect_type(&self) -> &'static str {
        Self::EFFECT_TYPE
    }

    fn display_name(&self) -> &'static str {
        "Rectangle Mask"
    }

    fn category(&self) -> &'static str {
        PluginInfo::fx_mask().category
    }

    fn default_parameters(&self) -> Vec<Parameter> {
        let region = MaskRegion::default();
        vec![
            Parameter::new(ParameterMeta::point(
                ParameterId::LowerLeft,
                "lower_left",
                "Lower Left",
                region.lower_left,
            )),
            Parameter::new(ParameterMeta::point(
                ParameterId::UpperRight,
                "upper_right",
                "Upper Right",
                region.upper_right,
            )),
            Parameter::new(ParameterMeta::bool(
                ParameterId::FillMode,
                "filled",
                "Fill",
                self.settings.filled,
            )),
            Parameter::new(ParameterMeta::float(
                ParameterId::Brightness,
                "brightness",
                "Brightness",
                0.0,
                -1.0,
                1.0,
            )),
            Parameter::new(ParameterMeta::color(
                ParameterId::FillColor,
                "fill_color",
                "Fill Color",
                self.settings.fill_color.into(),
            )),
            Parameter::new(ParameterMeta::color(
                ParameterId::OutlineColor,
                "outline_color",
                "Outline Color",
                self.settings.outline_color.into(),
            )),
        ]
    }

    fn control_bindings(&self) -> Vec<ControlBinding> {
        vec![ControlBinding {
            kind: ControlKind::Rectangle,
            parameters: vec![ParameterId::LowerLeft, ParameterId::UpperRight],
        }]
    }

    fn create_gpu_runtime(
        &self,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
    ) -> Option<Box<dyn TileEffectRuntime>> {
        Some(Box::new(MaskEffectRuntime::new(device, output_format)))
    }
}

/// Reset every parameter of `definition` to its default value
pub fn install_defaults<H: ParameterAccess + ?Sized>(
    host: &H,
    definition: &dyn EffectDefinition,
) -> Result<(), FxMaskError> {
    for param in definition.default_parameters() {
        host.set_parameter(param.id(), param.meta.default)?;
    }
    Ok(())
}
