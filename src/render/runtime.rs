//! GPU runtime for the mask effect
//!
//! Compiles both pipelines once against the host's device. Each tile gets
//! its own buffers and bind groups, so tiles encoded back to back into one
//! command encoder never see each other's data.

use tracing::{debug, info};
use wgpu::util::DeviceExt;

use super::passes::{build_brightness_params, build_image_pass, build_mask_pass, MaskStyle, TileViewport};
use super::vertex::{ShapeVertex, Vertex2D};
use crate::params::FrameParams;
use crate::shaders::{
    FragmentIndex, TextureIndex, VertexInputIndex, BRIGHTNESS_SHADER, FRAGMENT_UNIFORM_GROUP, INPUT_SAMPLER_BINDING,
    SHAPE_SHADER, TEXTURE_GROUP, VERTEX_UNIFORM_GROUP,
};

/// Everything the host supplies to render one tile
pub struct TileRenderTarget<'a> {
    /// Source tile
    pub input: &'a wgpu::TextureView,
    /// Destination tile (same size as the source)
    pub output: &'a wgpu::TextureView,
    pub viewport: TileViewport,
    pub frame: FrameParams,
    /// Outline thickness in pixels
    pub outline_width: f32,
}

/// GPU runtime for the mask/brightness effect
pub struct MaskEffectRuntime {
    image_pipeline: wgpu::RenderPipeline,
    shape_pipeline: wgpu::RenderPipeline,
    viewport_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    brightness_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl MaskEffectRuntime {
    /// Create a new runtime rendering into `output_format` targets
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat) -> Self {
        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FxMask Viewport Bind Group Layout"),
            entries: &[uniform_entry(VertexInputIndex::ViewportSize.index(), wgpu::ShaderStages::VERTEX)],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FxMask Input Image Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: TextureIndex::InputImage.index(),
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: INPUT_SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let brightness_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FxMask Brightness Bind Group Layout"),
            entries: &[uniform_entry(FragmentIndex::Brightness.index(), wgpu::ShaderStages::FRAGMENT)],
        });

        let image_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("FxMask Brightness Shader"),
            source: wgpu::ShaderSource::Wgsl(BRIGHTNESS_SHADER.into()),
        });
        let shape_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("FxMask Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(SHAPE_SHADER.into()),
        });

        // Bind group indices follow VERTEX_UNIFORM_GROUP, TEXTURE_GROUP, FRAGMENT_UNIFORM_GROUP
        let image_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("FxMask Image Pipeline Layout"),
            bind_group_layouts: &[&viewport_layout, &texture_layout, &brightness_layout],
            push_constant_ranges: &[],
        });
        let shape_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("FxMask Shape Pipeline Layout"),
            bind_group_layouts: &[&viewport_layout],
            push_constant_ranges: &[],
        });

        let image_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("FxMask Image Pipeline"),
            layout: Some(&image_layout),
            vertex: wgpu::VertexState {
                module: &image_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex2D::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &image_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: output_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let shape_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("FxMask Shape Pipeline"),
            layout: Some(&shape_layout),
            vertex: wgpu::VertexState {
                module: &shape_shader,
                entry_point: Some("vs_main"),
                buffers: &[ShapeVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shape_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: output_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("FxMask Input Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        info!("FxMask runtime created for {:?}", output_format);

        Self {
            image_pipeline,
            shape_pipeline,
            viewport_layout,
            texture_layout,
            brightness_layout,
            sampler,
        }
    }

    /// Encode the image pass and, unless passing through, the mask pass
    pub fn render_tile(&self, encoder: &mut wgpu::CommandEncoder, device: &wgpu::Device, target: &TileRenderTarget<'_>) {
        let image_pass = build_image_pass(target.viewport.tile_size, target.input);

        let (brightness, mask_pass) = match &target.frame {
            FrameParams::Render(snapshot) => {
                let style = MaskStyle {
                    fill_color: snapshot.fill_color,
                    outline_color: snapshot.outline_color,
                    outline_width: target.outline_width,
                    filled: snapshot.filled,
                };
                (
                    build_brightness_params(snapshot.brightness),
                    Some(build_mask_pass(&snapshot.region, &target.viewport, &style)),
                )
            }
            FrameParams::PassThrough => (build_brightness_params(0.0), None),
        };

        debug!(
            tile = ?target.viewport,
            brightness = brightness.brightness,
            mask_vertices = mask_pass.as_ref().map_or(0, |p| p.vertices.len()),
            "Encoding FxMask tile"
        );

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("FxMask Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&image_pass.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("FxMask Viewport Buffer"),
            contents: bytemuck::bytes_of(&image_pass.viewport_size),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let brightness_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("FxMask Brightness Buffer"),
            contents: bytemuck::bytes_of(&brightness),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let shape_buffer = mask_pass.as_ref().filter(|p| !p.vertices.is_empty()).map(|pass| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("FxMask Shape Vertex Buffer"),
                contents: bytemuck::cast_slice(&pass.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FxMask Viewport Bind Group"),
            layout: &self.viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: VertexInputIndex::ViewportSize.index(),
                resource: viewport_buffer.as_entire_binding(),
            }],
        });
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FxMask Input Image Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TextureIndex::InputImage.index(),
                    resource: wgpu::BindingResource::TextureView(image_pass.texture),
                },
                wgpu::BindGroupEntry {
                    binding: INPUT_SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        let brightness_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FxMask Brightness Bind Group"),
            layout: &self.brightness_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: FragmentIndex::Brightness.index(),
                resource: brightness_buffer.as_entire_binding(),
            }],
        });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("FxMask Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.image_pipeline);
        render_pass.set_bind_group(VERTEX_UNIFORM_GROUP, &viewport_bind_group, &[]);
        render_pass.set_bind_group(TEXTURE_GROUP, &texture_bind_group, &[]);
        render_pass.set_bind_group(FRAGMENT_UNIFORM_GROUP, &brightness_bind_group, &[]);
        render_pass.set_vertex_buffer(VertexInputIndex::Vertices.index(), quad_buffer.slice(..));
        render_pass.draw(0..image_pass.vertices.len() as u32, 0..1);

        if let (Some(pass), Some(buffer)) = (mask_pass.as_ref(), shape_buffer.as_ref()) {
            render_pass.set_pipeline(&self.shape_pipeline);
            render_pass.set_bind_group(VERTEX_UNIFORM_GROUP, &viewport_bind_group, &[]);
            render_pass.set_vertex_buffer(VertexInputIndex::Vertices.index(), buffer.slice(..));
            render_pass.draw(0..pass.vertices.len() as u32, 0..1);
        }
    }
}
