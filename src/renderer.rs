use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::{ClearState, DisplayContext, DrawTarget, GpuContext};
use crate::geometry::{Geometry, Topology};
use crate::scene::{DrawableId, SceneGraph};
use crate::types::{DrawUniform, Vertex};
use crate::uniforms::Uniforms;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Fixed-function variations a sketch can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    topology: Topology,
    depth_test: bool,
    cull_back_faces: bool,
}

impl PipelineKey {
    fn new(topology: Topology, clear: &ClearState) -> Self {
        Self {
            topology,
            depth_test: clear.depth_test,
            // Culling only means something for filled triangles
            cull_back_faces: clear.cull_back_faces && topology == Topology::Triangles,
        }
    }
}

/// GPU resources owned by one drawable
struct DrawableSlot {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    topology: Topology,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu implementation of [`DrawTarget`] for a window surface.
///
/// Vertex buffers are uploaded once when the renderer is created; each
/// drawable also gets its own uniform buffer, rewritten every frame.
pub struct SketchRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    slots: Vec<DrawableSlot>,
    clear: ClearState,
    queued: Vec<(DrawableId, DrawUniform)>,
}

impl SketchRenderer {
    pub async fn new(window: Arc<Window>, scene: &SceneGraph, clear: &ClearState) -> Result<Self> {
        let size = window.inner_size();
        let (gpu, surface) = GpuContext::with_surface(window).await?;

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size.width, size.height);
        surface.configure(gpu.device(), &surface_config);

        let depth_view = Self::create_depth_view(gpu.device(), &surface_config);

        let shader = gpu.device().create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sketch Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sketch.wgsl").into()),
        });

        let bind_group_layout = gpu.device().create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Uniform Bind Group Layout"),
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

        let pipeline_layout = gpu.device().create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sketch Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mut renderer = Self {
            gpu,
            surface,
            surface_config,
            depth_view,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            slots: Vec::with_capacity(scene.len()),
            clear: *clear,
            queued: Vec::with_capacity(scene.len()),
        };

        for (id, drawable) in scene.iter() {
            let slot = renderer.create_slot(id, drawable.geometry());
            renderer.slots.push(slot);
            renderer.ensure_pipeline(PipelineKey::new(drawable.geometry().topology(), clear));
        }

        log::info!(
            "Renderer ready: {} vertex buffers, {} pipelines, {:?}",
            renderer.slots.len(),
            renderer.pipelines.len(),
            renderer.surface_config.format
        );

        Ok(renderer)
    }

    /// Reconfigure the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if !DisplayContext::new(width, height).is_drawable() {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), &self.surface_config);
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        // Linear output keeps vertex colors as authored
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_slot(&self, id: DrawableId, geometry: &Geometry) -> DrawableSlot {
        let device = self.gpu.device();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Vertex Buffer {}", id.0)),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Draw Uniform Buffer {}", id.0)),
            contents: bytemuck::cast_slice(&[DrawUniform::from_uniforms(&Uniforms::new())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Draw Bind Group {}", id.0)),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        DrawableSlot {
            vertex_buffer,
            vertex_count: geometry.vertex_count(),
            topology: geometry.topology(),
            uniform_buffer,
            bind_group,
        }
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        log::debug!("Creating pipeline {:?}", key);
        let pipeline = self.create_pipeline(key);
        self.pipelines.insert(key, pipeline);
    }

    fn create_pipeline(&self, key: PipelineKey) -> wgpu::RenderPipeline {
        let (depth_write_enabled, depth_compare) = if key.depth_test {
            (true, wgpu::CompareFunction::Less)
        } else {
            (false, wgpu::CompareFunction::Always)
        };

        self.gpu.device().create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sketch Render Pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: key.topology.primitive(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: key.cull_back_faces.then_some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Acquire the next surface texture, reconfiguring after a lost or
    /// outdated surface. `None` means skip this frame.
    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(Some(texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.surface_config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl DrawTarget for SketchRenderer {
    fn begin_frame(&mut self, clear: &ClearState) {
        self.clear = *clear;
        self.queued.clear();
    }

    fn draw(&mut self, id: DrawableId, geometry: &Geometry, uniforms: &Uniforms) {
        if id.0 >= self.slots.len() {
            log::warn!("Drawable {} has no GPU buffers, skipping", id.0);
            return;
        }
        self.ensure_pipeline(PipelineKey::new(geometry.topology(), &self.clear));
        self.queued.push((id, DrawUniform::from_uniforms(uniforms)));
    }

    fn finish_frame(&mut self) -> Result<()> {
        let mut queued = std::mem::take(&mut self.queued);

        for (id, uniform) in &queued {
            self.gpu
                .queue()
                .write_buffer(&self.slots[id.0].uniform_buffer, 0, bytemuck::cast_slice(&[*uniform]));
        }

        let Some(output) = self.acquire_frame()? else {
            queued.clear();
            self.queued = queued;
            return Ok(());
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Sketch Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sketch Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear.wgpu_color()),
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (id, _) in &queued {
                let slot = &self.slots[id.0];
                let key = PipelineKey::new(slot.topology, &self.clear);
                let Some(pipeline) = self.pipelines.get(&key) else {
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                render_pass.set_vertex_buffer(0, slot.vertex_buffer.slice(..));
                render_pass.draw(0..slot.vertex_count, 0..1);
            }
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        output.present();

        queued.clear();
        self.queued = queued;
        Ok(())
    }
}
