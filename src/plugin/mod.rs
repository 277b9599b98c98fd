//! Plugin registration
//!
//! - **Definition** (`definition.rs`): plugin identity, the effect factory
//!   trait and the rectangle mask effect
//! - **Registry** (`registry.rs`): lookup of registered effects
//! - **Tiling** (`tiling.rs`): region-of-interest callbacks

mod definition;
mod registry;
mod tiling;

pub use definition::{
    install_defaults, ControlBinding, ControlKind, EffectDefinition, FxMaskDefinition, PluginInfo, TileEffectRuntime,
};
pub use registry::PluginRegistry;
pub use tiling::{destination_image_rect, source_tile_rect, PixelRect};
