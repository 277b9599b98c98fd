//! Shading pipeline
//!
//! - **Vertex** (`vertex.rs`): POD vertex/uniform layouts shared with the WGSL
//! - **Passes** (`passes.rs`): pure builders producing per-tile draw data
//! - **Runtime** (`runtime.rs`): wgpu pipelines encoding the passes into a
//!   host-supplied command encoder

mod passes;
mod runtime;
mod vertex;

pub use passes::*;
pub use runtime::{MaskEffectRuntime, TileRenderTarget};
pub use vertex::*;
