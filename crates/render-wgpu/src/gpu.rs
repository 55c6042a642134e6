use crate::policy::{ShaderRoster, resolve_shaders};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use framekit_common::ShaderPolicy;
use framekit_render::{
    DrawStats, FrameSubmission, Image, MeshData, Primitive, RenderError, RenderRecord,
    SceneResources, ShaderError, ShaderKind, VertexLayout, attribute_bindings,
};
use glam::Vec4;
use std::collections::HashMap;
use thiserror::Error;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const DIFFUSE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
// Specular intensities are linear data, not colour.
const SPECULAR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const INITIAL_OBJECT_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("pipeline for {shader} on {layout:?} failed validation: {diagnostic}")]
    Pipeline {
        shader: ShaderKind,
        layout: VertexLayout,
        diagnostic: String,
    },
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_pos: [f32; 4],
    light_vector: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
    attenuation: [f32; 4],
}

impl FrameUniforms {
    fn from_frame(frame: &FrameSubmission) -> Self {
        let mut uniforms = Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            view_pos: frame.view_pos.extend(1.0).to_array(),
            light_vector: [0.0; 4],
            light_ambient: [0.0; 4],
            light_diffuse: [0.0; 4],
            light_specular: [0.0; 4],
            attenuation: [1.0, 0.0, 0.0, 32.0],
        };
        if let Some(light) = &frame.light {
            let att = light.attenuation();
            uniforms.light_vector = light.position_or_direction().to_array();
            uniforms.light_ambient = light.ambient.extend(1.0).to_array();
            uniforms.light_diffuse = light.diffuse.extend(1.0).to_array();
            uniforms.light_specular = light.specular.extend(1.0).to_array();
            uniforms.attenuation =
                Vec4::new(att.constant, att.linear, att.quadratic, light.shininess).to_array();
        }
        uniforms
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl ObjectUniforms {
    fn from_record(record: &RenderRecord) -> Self {
        Self {
            model: record.model.to_cols_array_2d(),
            color: record.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    shader: ShaderKind,
    layout: VertexLayout,
    primitive: Primitive,
    polygon_mode: wgpu::PolygonMode,
}

/// Outlines apply to triangle meshes only, and only when the device was
/// created with `POLYGON_MODE_LINE`.
fn polygon_mode(wireframe: bool, primitive: Primitive, line_supported: bool) -> wgpu::PolygonMode {
    match primitive {
        Primitive::Triangles if wireframe && line_supported => wgpu::PolygonMode::Line,
        _ => wgpu::PolygonMode::Fill,
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    draw_count: u32,
    layout: VertexLayout,
    primitive: Primitive,
}

/// One resolved draw call.
struct Draw {
    pipeline: usize,
    mesh: usize,
    material: Option<usize>,
}

/// Round `size` up to a multiple of `alignment`.
fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// wgpu backend issuing one draw call per [`RenderRecord`].
///
/// Meshes and materials are uploaded once from [`SceneResources`]; pipelines
/// are built on first use of a (shader, layout, primitive, polygon mode)
/// combination and kept for the renderer's lifetime.
pub struct WgpuRenderer {
    shaders: ShaderRoster<wgpu::ShaderModule>,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_capacity: usize,
    flat_pipeline_layout: wgpu::PipelineLayout,
    material_pipeline_layout: wgpu::PipelineLayout,
    pipelines: Vec<wgpu::RenderPipeline>,
    pipeline_index: HashMap<PipelineKey, usize>,
    meshes: Vec<GpuMesh>,
    materials: Vec<wgpu::BindGroup>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    line_supported: bool,
    wireframe_warned: bool,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        resources: &SceneResources,
        policy: ShaderPolicy,
    ) -> Result<Self, GpuError> {
        let compiled = ShaderKind::ALL
            .into_iter()
            .map(|kind| (kind, compile_shader(device, kind)))
            .collect();
        let shaders = resolve_shaders(compiled, policy)?;

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[uniform_entry::<FrameUniforms>(false)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry::<ObjectUniforms>(true)],
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bind_group_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniform_buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_stride = align_to(std::mem::size_of::<ObjectUniforms>() as u64, alignment);
        let (object_buffer, object_bind_group) = create_object_buffer(
            device,
            &object_layout,
            object_stride,
            INITIAL_OBJECT_CAPACITY,
        );

        let flat_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let material_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("material_pipeline_layout"),
                bind_group_layouts: &[&frame_layout, &object_layout, &material_layout],
                push_constant_ranges: &[],
            });

        let meshes = resources
            .meshes()
            .map(|(id, mesh)| {
                tracing::debug!(?id, vertices = mesh.vertex_count(), "uploading mesh");
                upload_mesh(device, mesh)
            })
            .collect();

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let materials = resources
            .materials()
            .map(|(id, material)| {
                let diffuse = upload_image(
                    device,
                    queue,
                    &material.diffuse,
                    DIFFUSE_FORMAT,
                    "diffuse_map",
                );
                let specular = upload_image(
                    device,
                    queue,
                    &material.specular,
                    SPECULAR_FORMAT,
                    "specular_map",
                );
                tracing::debug!(?id, "uploaded material");
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("material_bind_group"),
                    layout: &material_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&diffuse),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&specular),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                })
            })
            .collect();

        let depth_texture = Self::create_depth_texture(device, width, height);
        let line_supported = device
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);

        tracing::info!(
            meshes = resources.mesh_count(),
            materials = resources.material_count(),
            ?policy,
            line_supported,
            "wgpu renderer ready"
        );

        Ok(Self {
            shaders,
            frame_buffer,
            frame_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            flat_pipeline_layout,
            material_pipeline_layout,
            pipelines: Vec::new(),
            pipeline_index: HashMap::new(),
            meshes,
            materials,
            depth_texture,
            surface_format,
            line_supported,
            wireframe_warned: false,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Programs replaced by the flat shader at startup.
    pub fn degraded_shaders(&self) -> Vec<ShaderKind> {
        self.shaders.degraded()
    }

    /// Render one frame: one draw call per record, in record order.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameSubmission,
    ) -> Result<DrawStats, GpuError> {
        let draws = frame
            .records
            .iter()
            .map(|record| self.prepare(device, record, frame.light.is_some(), frame.wireframe))
            .collect::<Result<Vec<_>, _>>()?;
        if frame.wireframe && !self.line_supported && !self.wireframe_warned {
            tracing::warn!("device lacks POLYGON_MODE_LINE, drawing wireframe frames filled");
            self.wireframe_warned = true;
        }

        self.ensure_object_capacity(device, draws.len());
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_frame(frame)),
        );
        if !frame.records.is_empty() {
            let stride = self.object_stride as usize;
            let mut bytes = vec![0u8; stride * frame.records.len()];
            for (slot, record) in bytes.chunks_mut(stride).zip(&frame.records) {
                let object = ObjectUniforms::from_record(record);
                slot[..std::mem::size_of::<ObjectUniforms>()]
                    .copy_from_slice(bytemuck::bytes_of(&object));
            }
            queue.write_buffer(&self.object_buffer, 0, &bytes);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        let mut stats = DrawStats::default();
        {
            let [r, g, b, a] = frame.clear_color.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (i, draw) in draws.iter().enumerate() {
                let mesh = &self.meshes[draw.mesh];
                pass.set_pipeline(&self.pipelines[draw.pipeline]);
                let offset = (i as u64 * self.object_stride) as u32;
                pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                if let Some(material) = draw.material {
                    pass.set_bind_group(2, &self.materials[material], &[]);
                }
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index_buffer {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.draw_count, 0, 0..1);
                    }
                    None => pass.draw(0..mesh.draw_count, 0..1),
                }
                stats.record(mesh.draw_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(stats)
    }

    /// Resolve a record to its mesh, material and (possibly new) pipeline.
    fn prepare(
        &mut self,
        device: &wgpu::Device,
        record: &RenderRecord,
        has_light: bool,
        wireframe: bool,
    ) -> Result<Draw, GpuError> {
        let mesh_index = record.mesh.0 as usize;
        let mesh = self
            .meshes
            .get(mesh_index)
            .ok_or_else(|| RenderError::UnknownMesh {
                label: record.label.clone(),
                mesh: record.mesh,
            })?;
        let shader = self.shaders.effective(record.shader);
        let key = PipelineKey {
            shader,
            layout: mesh.layout,
            primitive: mesh.primitive,
            polygon_mode: polygon_mode(wireframe, mesh.primitive, self.line_supported),
        };

        let material = if shader.needs_material() {
            let id = record.material.ok_or_else(|| RenderError::MissingMaterial {
                label: record.label.clone(),
                shader,
            })?;
            if id.0 as usize >= self.materials.len() {
                return Err(RenderError::UnknownMaterial {
                    label: record.label.clone(),
                    material: id,
                }
                .into());
            }
            Some(id.0 as usize)
        } else {
            None
        };
        if shader.needs_light() && !has_light {
            return Err(RenderError::MissingLight {
                label: record.label.clone(),
                shader,
            }
            .into());
        }

        let pipeline = match self.pipeline_index.get(&key) {
            Some(&index) => index,
            None => {
                let pipeline = self.create_pipeline(device, key).map_err(|err| match err {
                    GpuError::Shader(source) => GpuError::Render(RenderError::Shader {
                        label: record.label.clone(),
                        source,
                    }),
                    other => other,
                })?;
                self.pipelines.push(pipeline);
                let index = self.pipelines.len() - 1;
                self.pipeline_index.insert(key, index);
                index
            }
        };

        Ok(Draw {
            pipeline,
            mesh: mesh_index,
            material,
        })
    }

    fn create_pipeline(
        &self,
        device: &wgpu::Device,
        key: PipelineKey,
    ) -> Result<wgpu::RenderPipeline, GpuError> {
        let bindings = attribute_bindings(key.shader, key.layout)?;
        let attributes: Vec<wgpu::VertexAttribute> = bindings
            .iter()
            .map(|binding| wgpu::VertexAttribute {
                format: match binding.components {
                    2 => wgpu::VertexFormat::Float32x2,
                    _ => wgpu::VertexFormat::Float32x3,
                },
                offset: binding.byte_offset(),
                shader_location: binding.location,
            })
            .collect();
        let layout = if key.shader.needs_material() {
            &self.material_pipeline_layout
        } else {
            &self.flat_pipeline_layout
        };
        let module = self.shaders.module(key.shader);
        let topology = match key.primitive {
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Primitive::Points => wgpu::PrimitiveTopology::PointList,
        };

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(key.shader.name()),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: key.layout.stride_bytes(),
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                polygon_mode: key.polygon_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!(shader = %key.shader, layout = ?key.layout, "pipeline rejected");
            return Err(GpuError::Pipeline {
                shader: key.shader,
                layout: key.layout,
                diagnostic: err.to_string(),
            });
        }
        tracing::debug!(
            shader = %key.shader,
            layout = ?key.layout,
            primitive = ?key.primitive,
            polygon_mode = ?key.polygon_mode,
            "pipeline created"
        );
        Ok(pipeline)
    }

    /// Grow the per-record uniform buffer to hold at least `records` slots.
    fn ensure_object_capacity(&mut self, device: &wgpu::Device, records: usize) {
        if records <= self.object_capacity {
            return;
        }
        let capacity = records.next_power_of_two();
        let (buffer, bind_group) =
            create_object_buffer(device, &self.object_layout, self.object_stride, capacity);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_capacity = capacity;
        tracing::debug!(capacity, "object uniform buffer grown");
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Compile one program inside a validation error scope.
fn compile_shader(
    device: &wgpu::Device,
    kind: ShaderKind,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let source = shaders::source(kind);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(kind.name()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => {
            tracing::debug!(shader = %kind, "shader compiled");
            Ok(module)
        }
        Some(err) => Err(ShaderError::Compile {
            kind,
            diagnostic: err.to_string(),
        }),
    }
}

fn uniform_entry<T>(dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn create_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniform_buffer"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bind_group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

fn upload_mesh(device: &wgpu::Device, mesh: &MeshData) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vertex_buffer"),
        contents: bytemuck::cast_slice(mesh.vertices()),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = mesh.indices().map(|indices| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        })
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        draw_count: mesh.draw_count(),
        layout: mesh.layout(),
        primitive: mesh.primitive(),
    }
}

fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &Image,
    format: wgpu::TextureFormat,
    label: &str,
) -> wgpu::TextureView {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        image.rgba(),
    );
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_render::{Attenuation, Camera, Light, MeshId};
    use glam::{Mat4, Vec3};

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 224);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 80);
    }

    #[test]
    fn alignment_rounds_up() {
        assert_eq!(align_to(80, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
    }

    #[test]
    fn frame_uniforms_without_light() {
        let frame = FrameSubmission::new([0.0; 4], &Camera::default(), 1.0);
        let uniforms = FrameUniforms::from_frame(&frame);
        assert_eq!(uniforms.light_vector, [0.0; 4]);
        assert_eq!(uniforms.attenuation, [1.0, 0.0, 0.0, 32.0]);
        assert_eq!(uniforms.view_pos, [0.0, 0.0, 3.0, 1.0]);
    }

    #[test]
    fn frame_uniforms_pack_point_light() {
        let light = Light::point(Vec3::new(1.0, 2.0, 3.0), Attenuation::RANGE_50)
            .with_intensities(0.2, 0.5, 1.0)
            .with_shininess(76.8);
        let frame = FrameSubmission::new([0.0; 4], &Camera::default(), 1.0).with_light(light);
        let uniforms = FrameUniforms::from_frame(&frame);
        assert_eq!(uniforms.light_vector, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniforms.light_ambient, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(uniforms.attenuation, [1.0, 0.09, 0.032, 76.8]);
    }

    #[test]
    fn object_uniforms_copy_record() {
        let model = Mat4::from_translation(Vec3::new(0.0, -20.0, 0.0));
        let record = RenderRecord::new("paddle", MeshId(0), ShaderKind::Flat, model)
            .with_color([1.0, 0.5, 0.31, 1.0]);
        let object = ObjectUniforms::from_record(&record);
        assert_eq!(object.model, model.to_cols_array_2d());
        assert_eq!(object.color, [1.0, 0.5, 0.31, 1.0]);
    }

    #[test]
    fn only_diffuse_maps_are_srgb() {
        assert!(DIFFUSE_FORMAT.is_srgb());
        assert!(!SPECULAR_FORMAT.is_srgb());
    }

    #[test]
    fn wireframe_outlines_triangles_when_supported() {
        assert_eq!(
            polygon_mode(true, Primitive::Triangles, true),
            wgpu::PolygonMode::Line
        );
        assert_eq!(
            polygon_mode(false, Primitive::Triangles, true),
            wgpu::PolygonMode::Fill
        );
    }

    #[test]
    fn wireframe_falls_back_to_fill() {
        assert_eq!(
            polygon_mode(true, Primitive::Triangles, false),
            wgpu::PolygonMode::Fill
        );
        assert_eq!(
            polygon_mode(true, Primitive::Points, true),
            wgpu::PolygonMode::Fill
        );
    }
}
