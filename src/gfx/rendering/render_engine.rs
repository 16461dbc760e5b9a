//! WGPU-based rendering engine for the torus viewer
//!
//! Owns the surface, device, depth buffer, the single render pipeline and
//! the uploaded torus. Every frame clears color and depth, binds the MVP
//! uniform and the surface texture, and draws the indexed mesh.

use std::{iter, path::PathBuf, sync::Arc};

use wgpu::TextureFormat;

use crate::{
    error::RenderError,
    gfx::{
        camera::{FixedCamera, MvpUniform},
        geometry::GeometryData,
        mesh::{DrawMesh, GpuMesh},
        resources::{DepthTexture, TextureResource},
        shader::{ShaderProgram, ShaderSources, FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT},
        vertex::TexturedVertex,
    },
    wgpu_utils::{binding_types, capture_validation, UniformBuffer},
};

/// Assets and fixed view parameters the engine is built from
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub shader_path: PathBuf,
    pub texture_path: PathBuf,
    pub camera: FixedCamera,
    pub clear_color: wgpu::Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("assets/basic.shader"),
            texture_path: PathBuf::from("assets/bands.ppm"),
            camera: FixedCamera::default(),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    mvp_buffer: UniformBuffer<MvpUniform>,
    // Keeps the texture alive for the bind group.
    _surface_texture: TextureResource,
    mesh: GpuMesh,

    camera: FixedCamera,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates the engine for the given window and uploads the torus.
    ///
    /// Loads and compiles the shader description, decodes the texture and
    /// builds the pipeline. Any failure, including a shader whose entry
    /// points or bindings do not match the pipeline, is returned; nothing is
    /// retried.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        geometry: &GeometryData,
        settings: &RenderSettings,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "using adapter {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.device_type,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        log::info!("surface format {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = DepthTexture::new(&device, &config, "depth_texture");

        let sources = ShaderSources::load(&settings.shader_path)?;
        let program = ShaderProgram::compile(&device, &sources).await?;

        let surface_texture = TextureResource::load(&device, &queue, &settings.texture_path)?;

        let mvp_buffer = UniformBuffer::new_with_data(
            &device,
            &MvpUniform::new(settings.camera.build_mvp(config.width, config.height)),
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Torus Bind Group Layout"),
            entries: &[
                binding_types::layout_entry(
                    0,
                    wgpu::ShaderStages::VERTEX,
                    binding_types::uniform(),
                ),
                binding_types::layout_entry(
                    1,
                    wgpu::ShaderStages::FRAGMENT,
                    binding_types::texture_2d(),
                ),
                binding_types::layout_entry(
                    2,
                    wgpu::ShaderStages::FRAGMENT,
                    binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Torus Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: mvp_buffer.binding_resource(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&surface_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&surface_texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Torus Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Shader entry points and bindings are first checked against the
        // layouts here.
        let pipeline = capture_validation(&device, |device| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Torus Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &program.vertex,
                    entry_point: Some(VERTEX_ENTRY_POINT),
                    buffers: &[TexturedVertex::desc()],
                    compilation_options: Default::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                    unclipped_depth: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &program.fragment,
                    entry_point: Some(FRAGMENT_ENTRY_POINT),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                multiview: None,
                cache: None,
            })
        })
        .await
        .map_err(|error| RenderError::Pipeline(error.to_string()))?;

        let mesh = GpuMesh::upload(&device, geometry, "Torus");
        log::info!(
            "torus ready: {} vertices, {} triangles",
            geometry.vertex_count(),
            mesh.index_count() / 3
        );

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            pipeline,
            bind_group,
            mvp_buffer,
            _surface_texture: surface_texture,
            mesh,
            camera: settings.camera,
            clear_color: settings.clear_color,
        })
    }

    /// Draws one frame and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame(&mut self) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw_mesh(&self.mesh);
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Reconfigures the surface and depth buffer; the MVP picks up the new
    /// aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {}x{}", width, height);
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture = DepthTexture::new(&self.device, &self.config, "depth_texture");

        let mvp = MvpUniform::new(self.camera.build_mvp(width, height));
        if self.mvp_buffer.update_content(&self.queue, mvp) {
            log::debug!("resized to {}x{}, updated MVP", width, height);
        }
    }
}
