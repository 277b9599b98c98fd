//! Shader sources and slot indices
//!
//! The slot enums are the contract between the CPU-side packing code in
//! [`crate::render`] and the WGSL entry points below. Changing a value is a
//! breaking change for both sides.
//!
//! | Slot | wgpu binding |
//! |------|--------------|
//! | [`VertexInputIndex::Vertices`] | vertex buffer slot 0 |
//! | [`VertexInputIndex::ViewportSize`] | `@group(0) @binding(1)` uniform |
//! | [`TextureIndex::InputImage`] | `@group(1) @binding(0)` texture, sampler at binding 1 |
//! | [`FragmentIndex::Brightness`] | `@group(2) @binding(0)` uniform |

/// Brightness pass: samples the input tile and offsets RGB
pub const BRIGHTNESS_SHADER: &str = include_str!("brightness.wgsl");

/// Shape pass: flat per-vertex colored geometry for the mask fill and outline
pub const SHAPE_SHADER: &str = include_str!("shape.wgsl");

/// Bind group holding vertex-stage uniforms
pub const VERTEX_UNIFORM_GROUP: u32 = 0;
/// Bind group holding the input texture and its sampler
pub const TEXTURE_GROUP: u32 = 1;
/// Bind group holding fragment-stage uniforms
pub const FRAGMENT_UNIFORM_GROUP: u32 = 2;
/// Sampler binding inside [`TEXTURE_GROUP`]
pub const INPUT_SAMPLER_BINDING: u32 = 1;

/// Vertex-stage inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum VertexInputIndex {
    Vertices = 0,
    ViewportSize = 1,
}

/// Texture-stage inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureIndex {
    InputImage = 0,
}

/// Fragment-stage parameter buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FragmentIndex {
    Brightness = 0,
}

impl VertexInputIndex {
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl TextureIndex {
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl FragmentIndex {
    pub const fn index(self) -> u32 {
        self as u32
    }
}
