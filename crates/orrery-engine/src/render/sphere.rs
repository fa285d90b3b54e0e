//! Lit, textured sphere renderer.

use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::device::DepthBuffer;
use crate::render::mesh::{SphereMesh, SphereVertex};
use crate::render::texture::{Texture, TextureLoader};
use crate::render::{RenderCtx, RenderTarget};

/// Slices and stacks used for every sphere.
pub const SPHERE_SLICES: u32 = 32;
pub const SPHERE_STACKS: u32 = 32;

/// One directional light plus a single front material.
///
/// Colors are RGBA in `[0, 1]`. The light direction is in eye space, so it
/// stays fixed relative to the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    pub light_dir_eye: Vec3,
    pub scene_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            light_dir_eye: Vec3::ONE,
            scene_ambient: [0.2, 0.2, 0.2, 1.0],
            light_diffuse: [1.0; 4],
            light_specular: [1.0; 4],
            material_ambient: [0.1, 0.1, 0.1, 1.0],
            material_diffuse: [1.0; 4],
            material_specular: [1.0; 4],
            shininess: 50.0,
        }
    }
}

/// A sphere to draw this frame.
#[derive(Debug, Copy, Clone)]
pub struct SphereDraw<'t> {
    /// Name used in diagnostics.
    pub label: &'t str,
    /// Object → world transform, excluding the radius.
    pub model: Mat4,
    pub radius: f32,
    /// `None` draws the sphere untextured.
    pub texture: Option<&'t Texture>,
}

/// Renders unit-sphere instances scaled to their radius.
///
/// Draws are issued in slice order, one indexed draw per sphere, with depth
/// testing against the frame's depth buffer.
pub struct SphereRenderer {
    pipeline: wgpu::RenderPipeline,

    uniform_bgl: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
    frame_ubo: wgpu::Buffer,
    object_ubo: wgpu::Buffer,
    object_capacity: usize,
    object_stride: u64,

    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,

    fallback: Texture,
    lighting: Lighting,

    warned_untextured: HashSet<String>,
}

impl SphereRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        textures: &TextureLoader,
        lighting: Lighting,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery sphere shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sphere.wgsl").into()),
        });

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery sphere uniform bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<FrameUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ObjectUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orrery sphere pipeline layout"),
            bind_group_layouts: &[&uniform_bgl, textures.bind_group_layout()],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("orrery sphere pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SphereVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let mesh = SphereMesh::uv_sphere(1.0, SPHERE_SLICES, SPHERE_STACKS);
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery sphere vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery sphere ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery sphere frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let object_stride = object_stride(device.limits().min_uniform_buffer_offset_alignment);
        let object_capacity = 4;
        let object_ubo = create_object_ubo(device, object_stride, object_capacity);
        let uniform_bind_group =
            create_uniform_bind_group(device, &uniform_bgl, &frame_ubo, &object_ubo);

        Self {
            pipeline,
            uniform_bgl,
            uniform_bind_group,
            frame_ubo,
            object_ubo,
            object_capacity,
            object_stride,
            vbo,
            ibo,
            index_count: mesh.index_count(),
            fallback: textures.white(device, queue),
            lighting,
            warned_untextured: HashSet::new(),
        }
    }

    /// Records one pass drawing `draws` in order.
    ///
    /// Expects the target's color and depth to be cleared already.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view: Mat4,
        projection: Mat4,
        draws: &[SphereDraw<'_>],
    ) {
        if draws.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        for draw in draws {
            if draw.texture.is_none() && self.warned_untextured.insert(draw.label.to_string()) {
                log::warn!("{}: no texture, drawing untextured", draw.label);
            }
        }

        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&FrameUniform::new(projection, &self.lighting)),
        );

        self.ensure_object_capacity(ctx, draws.len());
        let staged = stage_objects(view, draws, self.object_stride);
        ctx.queue.write_buffer(&self.object_ubo, 0, &staged);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orrery sphere pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, ctx.viewport.width, ctx.viewport.height, 0.0, 1.0);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint32);

        for (i, draw) in draws.iter().enumerate() {
            let offset = (i as u64 * self.object_stride) as u32;
            let texture = draw.texture.unwrap_or(&self.fallback);
            rpass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
            rpass.set_bind_group(1, texture.bind_group(), &[]);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_object_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.object_capacity {
            return;
        }
        let new_cap = required.next_power_of_two();
        self.object_ubo = create_object_ubo(ctx.device, self.object_stride, new_cap);
        self.uniform_bind_group = create_uniform_bind_group(
            ctx.device,
            &self.uniform_bgl,
            &self.frame_ubo,
            &self.object_ubo,
        );
        self.object_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Per-frame uniform (176 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    projection: [[f32; 4]; 4],
    light_dir: [f32; 4],
    scene_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
    material_ambient: [f32; 4],
    material_diffuse: [f32; 4],
    material_specular: [f32; 4], // w = shininess
}

impl FrameUniform {
    fn new(projection: Mat4, lighting: &Lighting) -> Self {
        let dir = lighting.light_dir_eye.try_normalize().unwrap_or(Vec3::Z);
        let [sr, sg, sb, _] = lighting.material_specular;
        Self {
            projection: projection.to_cols_array_2d(),
            light_dir: dir.extend(0.0).to_array(),
            scene_ambient: lighting.scene_ambient,
            light_diffuse: lighting.light_diffuse,
            light_specular: lighting.light_specular,
            material_ambient: lighting.material_ambient,
            material_diffuse: lighting.material_diffuse,
            material_specular: [sr, sg, sb, lighting.shininess],
        }
    }
}

/// Per-sphere uniform (128 bytes), addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model_view: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
}

impl ObjectUniform {
    fn new(view: Mat4, model: Mat4, radius: f32) -> Self {
        let model_view = view * model * Mat4::from_scale(Vec3::splat(radius));
        Self {
            model_view: model_view.to_cols_array_2d(),
            normal_matrix: normal_matrix(model_view).to_cols_array_2d(),
        }
    }
}

/// Inverse-transpose of the upper 3x3, used to carry normals into eye space.
///
/// Degenerate (zero-radius) transforms fall back to the identity.
fn normal_matrix(model_view: Mat4) -> Mat4 {
    if model_view.determinant().abs() <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    let mut m = model_view;
    m.w_axis = glam::Vec4::W;
    m.inverse().transpose()
}

fn object_stride(alignment: u32) -> u64 {
    let size = std::mem::size_of::<ObjectUniform>() as u64;
    let align = u64::from(alignment.max(1));
    size.div_ceil(align) * align
}

fn stage_objects(view: Mat4, draws: &[SphereDraw<'_>], stride: u64) -> Vec<u8> {
    let mut staged = vec![0u8; draws.len() * stride as usize];
    for (i, draw) in draws.iter().enumerate() {
        let uniform = ObjectUniform::new(view, draw.model, draw.radius);
        let start = i * stride as usize;
        let bytes = bytemuck::bytes_of(&uniform);
        staged[start..start + bytes.len()].copy_from_slice(bytes);
    }
    staged
}

fn create_object_ubo(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("orrery sphere object ubo"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    frame_ubo: &wgpu::Buffer,
    object_ubo: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("orrery sphere uniform bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: object_ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::device::test_device;

    const TARGET_SIZE: u32 = 256;
    const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Color and depth attachments standing in for a window surface.
    struct Offscreen {
        color: wgpu::Texture,
        color_view: wgpu::TextureView,
        depth: DepthBuffer,
    }

    impl Offscreen {
        fn new(device: &wgpu::Device) -> Self {
            let color = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("offscreen color"),
                size: wgpu::Extent3d {
                    width: TARGET_SIZE,
                    height: TARGET_SIZE,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TARGET_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            });
            let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
            let depth = DepthBuffer::new(device, TARGET_SIZE, TARGET_SIZE);
            Self {
                color,
                color_view,
                depth,
            }
        }

        /// Clears to black, records the renderer's pass and submits.
        fn draw_frame(
            &self,
            device: &wgpu::Device,
            queue: &wgpu::Queue,
            renderer: &mut SphereRenderer,
            draws: &[SphereDraw<'_>],
        ) {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen frame"),
            });
            {
                let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("offscreen clear"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &self.color_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }

            let ctx = RenderCtx::new(
                device,
                queue,
                TARGET_FORMAT,
                Viewport::from_size(TARGET_SIZE, TARGET_SIZE),
            );
            {
                let mut target =
                    RenderTarget::new(&mut encoder, &self.color_view, &self.depth.view);
                let (view, projection) = front_view();
                renderer.render(&ctx, &mut target, view, projection, draws);
            }
            queue.submit(std::iter::once(encoder.finish()));
        }

        fn read_pixel(
            &self,
            device: &wgpu::Device,
            queue: &wgpu::Queue,
            x: u32,
            y: u32,
        ) -> [u8; 4] {
            // 256 texels * 4 bytes already meets the row alignment.
            let row = TARGET_SIZE * 4;
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("offscreen readback"),
                size: u64::from(row * TARGET_SIZE),
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                mapped_at_creation: false,
            });

            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen readback"),
            });
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    texture: &self.color,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: &buffer,
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(row),
                        rows_per_image: Some(TARGET_SIZE),
                    },
                },
                wgpu::Extent3d {
                    width: TARGET_SIZE,
                    height: TARGET_SIZE,
                    depth_or_array_layers: 1,
                },
            );
            queue.submit(std::iter::once(encoder.finish()));

            let slice = buffer.slice(..);
            let (tx, rx) = std::sync::mpsc::channel();
            slice.map_async(wgpu::MapMode::Read, move |result| {
                let _ = tx.send(result);
            });
            let _ = device.poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            });
            rx.recv().unwrap().unwrap();

            let data = slice.get_mapped_range();
            let at = (y * row + x * 4) as usize;
            [data[at], data[at + 1], data[at + 2], data[at + 3]]
        }
    }

    /// Camera on +Z with an orthographic frustum, so a unit sphere at the
    /// origin fills most of the target.
    fn front_view() -> (Mat4, Mat4) {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::orthographic_rh(-1.5, 1.5, -1.5, 1.5, 0.1, 50.0);
        (view, projection)
    }

    fn sphere<'t>(
        label: &'t str,
        x: f32,
        radius: f32,
        texture: Option<&'t Texture>,
    ) -> SphereDraw<'t> {
        SphereDraw {
            label,
            model: Mat4::from_translation(Vec3::X * x),
            radius,
            texture,
        }
    }

    // wgpu's default error handler panics on validation errors, so reaching
    // the assertions means every frame was valid.
    #[test]
    fn untextured_sphere_draws_with_fallback_and_warns_once() {
        let Some((device, queue)) = test_device() else {
            return;
        };
        let loader = TextureLoader::new(&device);
        let mut renderer =
            SphereRenderer::new(&device, &queue, TARGET_FORMAT, &loader, Lighting::default());
        let white = loader.white(&device, &queue);
        let target = Offscreen::new(&device);

        for _ in 0..3 {
            let draws = [
                sphere("sun", 1.2, 0.2, Some(&white)),
                sphere("moon", 0.0, 0.5, None),
            ];
            target.draw_frame(&device, &queue, &mut renderer, &draws);
        }

        assert_eq!(renderer.warned_untextured.len(), 1);
        assert!(renderer.warned_untextured.contains("moon"));

        // The untextured sphere covers the center and is lit, not skipped.
        let center = target.read_pixel(&device, &queue, TARGET_SIZE / 2, TARGET_SIZE / 2);
        assert!(center[0] > 100, "center {center:?}");
        let corner = target.read_pixel(&device, &queue, 0, 0);
        assert_eq!(corner, [0, 0, 0, 255]);
    }

    #[test]
    fn white_texel_passes_lit_color_through_unencoded() {
        let Some((device, queue)) = test_device() else {
            return;
        };
        let loader = TextureLoader::new(&device);
        let lighting = Lighting::default();
        let mut renderer = SphereRenderer::new(&device, &queue, TARGET_FORMAT, &loader, lighting);
        let white = loader.white(&device, &queue);
        let target = Offscreen::new(&device);

        let draws = [sphere("sun", 0.0, 1.0, Some(&white))];
        target.draw_frame(&device, &queue, &mut renderer, &draws);

        // The sphere's center faces the viewer: n = +Z in eye space.
        let l = lighting.light_dir_eye.normalize();
        let h = (l + Vec3::Z).normalize();
        let lit = lighting.material_ambient[0] * lighting.scene_ambient[0]
            + l.z
            + h.z.powf(lighting.shininess);
        let expected = (lit.min(1.0) * 255.0).round() as i32;

        let center = target.read_pixel(&device, &queue, TARGET_SIZE / 2, TARGET_SIZE / 2);
        for channel in &center[..3] {
            // An sRGB round trip would land near 203 for a lit value of 0.6.
            assert!(
                (i32::from(*channel) - expected).abs() <= 6,
                "center {center:?}, expected {expected}"
            );
        }
        assert_eq!(center[3], 255);
    }

    #[test]
    fn uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 176);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
    }

    #[test]
    fn stride_respects_alignment() {
        assert_eq!(object_stride(256), 256);
        assert_eq!(object_stride(64), 128);
        assert_eq!(object_stride(0), 128);
    }

    #[test]
    fn staged_objects_sit_at_stride_offsets() {
        let draws = [
            SphereDraw {
                label: "a",
                model: Mat4::IDENTITY,
                radius: 1.0,
                texture: None,
            },
            SphereDraw {
                label: "b",
                model: Mat4::from_translation(Vec3::X * 3.0),
                radius: 0.5,
                texture: None,
            },
        ];
        let staged = stage_objects(Mat4::IDENTITY, &draws, 256);
        assert_eq!(staged.len(), 512);

        let second: ObjectUniform = bytemuck::pod_read_unaligned(&staged[256..384]);
        let mv = Mat4::from_cols_array_2d(&second.model_view);
        assert_eq!(mv.transform_point3(Vec3::ZERO), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(mv.transform_point3(Vec3::X), Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_scale() {
        let mv = Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(0.3));
        let n = normal_matrix(mv).transform_vector3(Vec3::X).normalize();
        let expected = Mat4::from_rotation_y(0.7).transform_vector3(Vec3::X);
        assert!((n - expected).length() < 1e-5);
    }

    #[test]
    fn zero_radius_normal_matrix_is_identity() {
        assert_eq!(normal_matrix(Mat4::from_scale(Vec3::ZERO)), Mat4::IDENTITY);
    }

    #[test]
    fn default_lighting_is_white_light_on_dim_ambient() {
        let l = Lighting::default();
        assert_eq!(l.shininess, 50.0);
        assert_eq!(l.material_ambient, [0.1, 0.1, 0.1, 1.0]);
        let u = FrameUniform::new(Mat4::IDENTITY, &l);
        let d = Vec3::new(u.light_dir[0], u.light_dir[1], u.light_dir[2]);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert_eq!(u.material_specular[3], 50.0);
    }
}
