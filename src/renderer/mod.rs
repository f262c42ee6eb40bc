//! Forward renderer for the gallery scene.
//!
//! One shader, two pipelines: opaque objects first with depth writes, then
//! blended objects back to front with depth writes off. Every object gets
//! a slot in a dynamic-offset uniform buffer holding its transform and
//! material, so the whole scene is drawn from three bind groups.

/// Uniform layouts shared with `gallery.wgsl`.
pub mod uniforms;

use glam::Vec3;
use wgpu::util::DeviceExt;

pub use uniforms::{AtmosphereUniform, ObjectUniform};

use crate::camera::{Camera, CameraUniform};
use crate::glyph::PixelCanvas;
use crate::gpu::pipeline_helpers::{
    align_uniform, dynamic_uniform_buffer, filtering_sampler, repeat_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::{DepthTexture, DynamicTexture, RenderContext, DEPTH_FORMAT};
use crate::options::Options;
use crate::scene::{ObjectId, Scene, Vertex};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Uploaded geometry of one scene mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Per-object draw record rebuilt from the scene on sync.
#[derive(Debug, Clone, Copy)]
struct DrawItem {
    mesh: usize,
    slot: u32,
    center: Vec3,
    transparent: bool,
}

/// Procedural textures the renderer samples.
pub struct SurfaceTextures<'a> {
    /// Glyph rain canvas for stone surfaces.
    pub glyph: &'a PixelCanvas,
    /// Placard label canvas.
    pub label: &'a PixelCanvas,
}

/// Draws a [`Scene`] into the surface.
pub struct GalleryRenderer {
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    glyph_texture: DynamicTexture,
    texture_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    meshes: Vec<GpuMesh>,
    items: Vec<DrawItem>,
    depth: DepthTexture,
    clear_color: wgpu::Color,
}

impl GalleryRenderer {
    /// Upload the scene and create pipelines for the surface format.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        scene: &Scene,
        options: &Options,
        textures: &SurfaceTextures<'_>,
    ) -> Self {
        let device = &context.device;

        // -- Group 0: camera + atmosphere --
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::bytes_of(&CameraUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let atmosphere =
            AtmosphereUniform::new(&options.atmosphere, &options.lighting);
        let atmosphere_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Atmosphere Uniform"),
                contents: bytemuck::bytes_of(&atmosphere),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Layout"),
                entries: &[uniform_buffer(0), uniform_buffer(1)],
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: atmosphere_buffer.as_entire_binding(),
                    },
                ],
            });

        // -- Group 1: procedural textures --
        let glyph_texture = DynamicTexture::from_canvas(
            device,
            &context.queue,
            textures.glyph,
            "Glyph Rain Texture",
        );
        let label_texture = DynamicTexture::from_canvas(
            device,
            &context.queue,
            textures.label,
            "Placard Label Texture",
        );
        let sampler = repeat_sampler(device, "Surface Sampler");
        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Layout"),
                entries: &[texture_2d(0), texture_2d(1), filtering_sampler(2)],
            });
        let texture_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Texture Bind Group"),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &glyph_texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &label_texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

        // -- Group 2: per-object slots --
        let object_size = size_of::<ObjectUniform>() as u64;
        let object_stride = align_uniform(
            object_size,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );
        let slots = scene.objects().len().max(1) as u64;
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniforms"),
            size: object_stride * slots,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Layout"),
                entries: &[dynamic_uniform_buffer(0, object_size)],
            });
        let object_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object Bind Group"),
                layout: &object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(
                        wgpu::BufferBinding {
                            buffer: &object_buffer,
                            offset: 0,
                            size: wgpu::BufferSize::new(object_size),
                        },
                    ),
                }],
            });

        // -- Pipelines --
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/gallery.wgsl"
        ));
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Gallery Pipeline Layout"),
                bind_group_layouts: &[
                    &frame_layout,
                    &texture_layout,
                    &object_layout,
                ],
                push_constant_ranges: &[],
            });
        let opaque_pipeline = create_pipeline(
            device,
            "Opaque Pipeline",
            &layout,
            &shader,
            context.format(),
            false,
        );
        let transparent_pipeline = create_pipeline(
            device,
            "Transparent Pipeline",
            &layout,
            &shader,
            context.format(),
            true,
        );

        let meshes = scene
            .meshes()
            .iter()
            .enumerate()
            .map(|(i, mesh)| GpuMesh {
                vertex_buffer: device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Mesh {i} Vertices")),
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                ),
                index_buffer: device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Mesh {i} Indices")),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    },
                ),
                index_count: mesh.indices.len() as u32,
            })
            .collect();

        let (width, height) = context.size();
        let [r, g, b] = options.atmosphere.clear_color;
        let mut renderer = Self {
            opaque_pipeline,
            transparent_pipeline,
            camera_buffer,
            frame_bind_group,
            glyph_texture,
            texture_bind_group,
            object_buffer,
            object_bind_group,
            object_stride,
            meshes,
            items: Vec::new(),
            depth: DepthTexture::new(device, width, height),
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
        };
        renderer.sync_scene(&context.queue, scene);
        log::info!(
            "renderer ready: {} meshes, {} objects, stride {}",
            renderer.meshes.len(),
            renderer.items.len(),
            renderer.object_stride
        );
        renderer
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }

    /// Rewrite every object's transform and material.
    pub fn sync_scene(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        let stride = self.object_stride as usize;
        let mut bytes = vec![0u8; stride * scene.objects().len()];
        self.items.clear();
        for (slot, object) in scene.objects().iter().enumerate() {
            let Some(material) = scene.material(object.material) else {
                log::warn!("object {} has no material", object.name);
                continue;
            };
            let uniform = ObjectUniform::new(object.model, material);
            let start = slot * stride;
            bytes[start..start + size_of::<ObjectUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
            self.items.push(DrawItem {
                mesh: object.mesh.0,
                slot: slot as u32,
                center: object.model.w_axis.truncate(),
                transparent: material.is_transparent(),
            });
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.object_buffer, 0, &bytes);
        }
    }

    /// Rewrite the uniform slots of `ids` only. Draw order and
    /// transparency are kept from the last full sync.
    pub fn sync_objects(
        &self,
        queue: &wgpu::Queue,
        scene: &Scene,
        ids: impl IntoIterator<Item = ObjectId>,
    ) {
        for id in ids {
            let Some(object) = scene.object(id) else {
                continue;
            };
            let Some(material) = scene.material(object.material) else {
                continue;
            };
            let uniform = ObjectUniform::new(object.model, material);
            queue.write_buffer(
                &self.object_buffer,
                id.0 as u64 * self.object_stride,
                bytemuck::bytes_of(&uniform),
            );
        }
    }

    /// Push the latest glyph rain frame.
    pub fn upload_glyphs(&self, queue: &wgpu::Queue, canvas: &PixelCanvas) {
        self.glyph_texture.upload(queue, canvas);
    }

    /// Write the camera uniform.
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Record the scene into `target`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        eye: Vec3,
    ) {
        let mut transparent: Vec<&DrawItem> =
            self.items.iter().filter(|item| item.transparent).collect();
        transparent.sort_by(|a, b| {
            b.center
                .distance_squared(eye)
                .total_cmp(&a.center.distance_squared(eye))
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Gallery Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);

        pass.set_pipeline(&self.opaque_pipeline);
        for item in self.items.iter().filter(|item| !item.transparent) {
            self.draw(&mut pass, item);
        }
        pass.set_pipeline(&self.transparent_pipeline);
        for item in transparent {
            self.draw(&mut pass, item);
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, item: &DrawItem) {
        let Some(mesh) = self.meshes.get(item.mesh) else {
            return;
        };
        let offset = (u64::from(item.slot) * self.object_stride) as u32;
        pass.set_bind_group(2, &self.object_bind_group, &[offset]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(
            mesh.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

/// Two-sided triangle pipeline; `blended` selects alpha blending with
/// depth writes off.
fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blended: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: blended.then_some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !blended,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
