use std::sync::Arc;

use anyhow::Context;
use glam::{Mat4, Vec3};
use winit::window::Window;

use crate::camera::ViewProjection;
use crate::mesh::{Mesh, Vertex};
use crate::scene;
use crate::shaders;

/// Uniform block for the clay program.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ClayUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    object_color: [f32; 3],
    _pad0: f32,
    light_color: [f32; 3],
    _pad1: f32,
    light_pos: [f32; 3],
    _pad2: f32,
    view_position: [f32; 3],
    _pad3: f32,
}

/// Uniform block for the lamp program.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LampUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

/// One compiled shader program with its uniform buffer and bind group.
/// The bind group is built once at link time; per frame the only uniform
/// work left is a single buffer write.
struct Program {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Owns the GPU context and everything needed to draw the scene: surface,
/// depth buffer, the two programs and the uploaded mesh.
pub struct SceneRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    clay: Program,
    lamp: Program,
    mesh: Mesh,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create render surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;

        let info = adapter.get_info();
        log::info!("graphics adapter: {} ({})", info.name, info.backend.to_str());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to create graphics device")?;

        let config = Self::create_surface_config(&surface, &adapter, size.width, size.height);
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_texture(&device, config.width, config.height);

        let clay = Self::create_program(
            &device,
            "clay",
            shaders::CLAY_SHADER,
            std::mem::size_of::<ClayUniforms>() as u64,
            config.format,
        );
        let lamp = Self::create_program(
            &device,
            "lamp",
            shaders::LAMP_SHADER,
            std::mem::size_of::<LampUniforms>() as u64,
            config.format,
        );

        let mesh = Mesh::upload(&device, &scene::scene_vertices(), &scene::scene_indices());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            clay,
            lamp,
            mesh,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
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
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_program(
        device: &wgpu::Device,
        label: &str,
        shader_source: &str,
        uniform_size: u64,
        surface_format: wgpu::TextureFormat,
    ) -> Program {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
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
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Program {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    /// Reconfigure the surface and rebuild the depth buffer for a new
    /// framebuffer size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view =
            Self::create_depth_texture(&self.device, self.config.width, self.config.height);
    }

    /// Draw one frame: the clay scene geometry, then the lamp marker at the
    /// light's position. Both draws use the view/projection computed for
    /// this frame.
    pub fn render(
        &mut self,
        vp: &ViewProjection,
        view_position: Vec3,
        light_position: Vec3,
    ) -> Result<(), wgpu::SurfaceError> {
        let model =
            Mat4::from_translation(scene::SUBJECT_POSITION) * Mat4::from_scale(scene::SUBJECT_SCALE);
        let clay_uniforms = ClayUniforms {
            model: model.to_cols_array_2d(),
            view: vp.view.to_cols_array_2d(),
            projection: vp.projection.to_cols_array_2d(),
            object_color: scene::OBJECT_COLOR,
            _pad0: 0.0,
            light_color: scene::LIGHT_COLOR,
            _pad1: 0.0,
            light_pos: light_position.to_array(),
            _pad2: 0.0,
            view_position: view_position.to_array(),
            _pad3: 0.0,
        };
        self.queue.write_buffer(
            &self.clay.uniform_buffer,
            0,
            bytemuck::bytes_of(&clay_uniforms),
        );

        let lamp_model =
            Mat4::from_translation(light_position) * Mat4::from_scale(scene::LAMP_SCALE);
        let lamp_uniforms = LampUniforms {
            model: lamp_model.to_cols_array_2d(),
            view: vp.view.to_cols_array_2d(),
            projection: vp.projection.to_cols_array_2d(),
        };
        self.queue.write_buffer(
            &self.lamp.uniform_buffer,
            0,
            bytemuck::bytes_of(&lamp_uniforms),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_pipeline(&self.clay.pipeline);
            pass.set_bind_group(0, &self.clay.bind_group, &[]);
            self.mesh.draw(&mut pass);

            pass.set_pipeline(&self.lamp.pipeline);
            pass.set_bind_group(0, &self.lamp.bind_group, &[]);
            self.mesh.draw(&mut pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clay_uniforms_match_wgsl_layout() {
        // Three mat4x4 plus four vec3s each padded to 16 bytes.
        assert_eq!(std::mem::size_of::<ClayUniforms>(), 3 * 64 + 4 * 16);
    }

    #[test]
    fn lamp_uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<LampUniforms>(), 3 * 64);
    }
}
