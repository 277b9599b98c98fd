//! FxMask
//!
//! A rectangle mask effect for tile-based video hosts: an on-screen control
//! that edits the mask corners, and a two-pass GPU pipeline that applies a
//! brightness offset and draws the mask over each tile.

pub mod error;
pub mod host;
pub mod mask;
pub mod osc;
pub mod params;
pub mod plugin;
pub mod render;
pub mod settings;
pub mod shaders;
pub mod telemetry;

pub use error::{FxMaskError, SettingsError};
pub use host::{ErrorReporter, HostApi, ParameterAccess, SimulatedHost};
pub use mask::{DragHandleId, MaskRegion, Point2D, ViewTransform};
pub use osc::{PointerEvent, RectangleControl};
pub use params::{FrameParams, ParameterId, ParameterSnapshot, ParameterValue};
pub use plugin::{EffectDefinition, FxMaskDefinition, PluginInfo, PluginRegistry};
pub use render::{build_brightness_params, build_image_pass, build_mask_pass, MaskEffectRuntime, TileViewport};
pub use settings::PluginSettings;
