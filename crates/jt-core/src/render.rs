//! Surface-agnostic wgpu renderer for the octahedron scene.
//!
//! The frontends own the surface, device and queue; [`SceneGpu`] owns
//! everything it creates from the device (pipelines, meshes, instance and
//! uniform buffers, depth target) and releases it in [`SceneGpu::destroy`].

use crate::constants::{CYLINDER_SEGMENTS, SPHERE_SEGMENTS};
use crate::geometry::{MeshKind, SceneInstance};
use crate::mesh::{unit_cylinder, unit_sphere, MeshData, Vertex};
use crate::state::{Camera, DirectionalLight, SceneLighting};
use std::ops::Range;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCE_CAPACITY: usize = 32;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
// model matrix columns, then color
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
}

impl Globals {
    fn new(camera: &Camera, lighting: &SceneLighting) -> Self {
        let light = |l: &DirectionalLight| l.direction().extend(l.intensity).to_array();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: [lighting.ambient, lighting.ambient, lighting.ambient, 0.0],
            key_light: light(&lighting.key),
            fill_light: light(&lighting.fill),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl From<&SceneInstance> for InstanceRaw {
    fn from(i: &SceneInstance) -> Self {
        Self {
            model: i.transform.to_cols_array_2d(),
            color: i.color.to_array(),
        }
    }
}

/// A contiguous run of instances sharing mesh and blend mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    pub mesh: MeshKind,
    pub translucent: bool,
    pub instances: Range<u32>,
}

/// Order instances opaque-first and group them into batches.
///
/// Translucent geometry must be drawn after all opaque geometry so the depth
/// buffer already holds the bonds and atoms it overlaps.
pub fn batch_instances(instances: &[SceneInstance]) -> (Vec<InstanceRaw>, Vec<DrawBatch>) {
    let key = |i: &SceneInstance| {
        (
            i.translucent as u8,
            match i.mesh {
                MeshKind::Sphere => 0u8,
                MeshKind::Cylinder => 1u8,
            },
        )
    };
    let mut order: Vec<&SceneInstance> = instances.iter().collect();
    order.sort_by_key(|i| key(i));

    let raw: Vec<InstanceRaw> = order.iter().map(|i| InstanceRaw::from(*i)).collect();
    let mut batches: Vec<DrawBatch> = Vec::new();
    for (idx, inst) in order.iter().enumerate() {
        let idx = idx as u32;
        match batches.last_mut() {
            Some(b) if b.mesh == inst.mesh && b.translucent == inst.translucent => {
                b.instances.end = idx + 1;
            }
            _ => batches.push(DrawBatch {
                mesh: inst.mesh,
                translucent: inst.translucent,
                instances: idx..idx + 1,
            }),
        }
    }
    (raw, batches)
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vb")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_ib")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count(),
        }
    }

    fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_tex"),
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
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

pub struct SceneGpu {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    sphere: GpuMesh,
    cylinder: GpuMesh,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth: DepthTarget,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    destroyed: bool,
}

impl SceneGpu {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = make_mesh_pipeline(device, &layout, &shader, color_format, false);
        let translucent_pipeline =
            make_mesh_pipeline(device, &layout, &shader, color_format, true);

        let sphere = GpuMesh::upload(device, "sphere", &unit_sphere(SPHERE_SEGMENTS));
        let cylinder = GpuMesh::upload(device, "cylinder", &unit_cylinder(CYLINDER_SEGMENTS));
        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        log::info!(
            "[gpu] scene resources ready ({}x{}, {:?})",
            width,
            height,
            color_format
        );

        Self {
            opaque_pipeline,
            translucent_pipeline,
            globals_buffer,
            bind_group,
            sphere,
            cylinder,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            depth: DepthTarget::new(device, width, height),
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            destroyed: false,
        }
    }

    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    /// Recreate the depth target when the drawable size changes.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.depth.texture.destroy();
        self.depth = DepthTarget::new(device, width, height);
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &Camera,
        lighting: &SceneLighting,
        instances: &[SceneInstance],
    ) {
        if self.destroyed {
            return;
        }
        let (raw, batches) = batch_instances(instances);
        if raw.len() > self.instance_capacity {
            self.instance_buffer.destroy();
            self.instance_capacity = raw.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::new(camera, lighting)),
        );
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for batch in &batches {
                let pipeline = if batch.translucent {
                    &self.translucent_pipeline
                } else {
                    &self.opaque_pipeline
                };
                let mesh = match batch.mesh {
                    MeshKind::Sphere => &self.sphere,
                    MeshKind::Cylinder => &self.cylinder,
                };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }
        queue.submit(Some(encoder.finish()));
    }

    /// Release every GPU object this renderer created. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.sphere.destroy();
        self.cylinder.destroy();
        self.instance_buffer.destroy();
        self.globals_buffer.destroy();
        self.depth.texture.destroy();
        log::info!("[gpu] scene resources released");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Drop for SceneGpu {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_instances"),
        size: (std::mem::size_of::<InstanceRaw>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn make_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    translucent: bool,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: mesh vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        // slot 1: per-instance model matrix columns + color
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if translucent {
            "scene_translucent_pipeline"
        } else {
            "scene_opaque_pipeline"
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !translucent,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(if translucent {
                    wgpu::BlendState::ALPHA_BLENDING
                } else {
                    wgpu::BlendState::REPLACE
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
