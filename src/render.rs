use crate::dom;
use fnv::FnvHashMap;
use viewer_core::{
    Color, FrameUniforms, MeshUniforms, NodeId, PerspectiveCamera, RenderError, Renderer, Scene,
};
use web_sys as web;

mod helpers;
mod mesh;
mod targets;
use mesh::{GpuMesh, MeshPipeline};
use targets::DepthTarget;

/// WebGPU implementation of [`Renderer`]: one lit mesh pass into the canvas.
pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    mesh: MeshPipeline,
    frame_uniforms: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    // GPU copies of model nodes, uploaded the first time each is drawn
    models: FnvHashMap<NodeId, Vec<GpuMesh>>,

    clear_color: wgpu::Color,
}

impl GpuRenderer {
    /// Acquire a WebGPU device for `canvas`. Failure means the browser cannot
    /// run the viewer at all.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (px_w, px_h) = dom::size_canvas(canvas, width, height);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::Gpu("No WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| RenderError::Gpu(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: px_w,
            height: px_h,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{}", format, px_w, px_h);

        let depth = DepthTarget::new(&device, px_w, px_h);
        let mesh = mesh::create_mesh_pipeline(&device, format);
        let frame_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &mesh.frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniforms.as_entire_binding(),
            }],
        });

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            depth,
            mesh,
            frame_uniforms,
            frame_bind_group,
            models: FnvHashMap::default(),
            clear_color: helpers::to_wgpu_color(Color::BLACK.to_linear()),
        })
    }

    fn reconfigure(&mut self, px_w: u32, px_h: u32) {
        self.config.width = px_w.max(1);
        self.config.height = px_h.max(1);
        self.surface.configure(&self.device, &self.config);
        if self.depth.size() != (self.config.width, self.config.height) {
            self.depth
                .recreate(&self.device, self.config.width, self.config.height);
        }
    }

    fn ensure_uploaded(&mut self, scene: &Scene) {
        for (id, node) in scene.models() {
            if !self.models.contains_key(&id) {
                let meshes = mesh::upload_model(&self.device, &self.mesh.mesh_bgl, &node.data);
                log::info!("[gpu] uploaded {} ({} meshes)", node.data.name, meshes.len());
                self.models.insert(id, meshes);
            }
        }
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure(self.config.width, self.config.height);
                self.surface
                    .get_current_texture()
                    .map_err(|e| RenderError::Surface(e.to_string()))
            }
            Err(e) => Err(RenderError::Surface(e.to_string())),
        }
    }
}

impl Renderer for GpuRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.ensure_uploaded(scene);

        let frame_uniforms = FrameUniforms::from_scene(scene, camera);
        self.queue
            .write_buffer(&self.frame_uniforms, 0, bytemuck::bytes_of(&frame_uniforms));
        for (id, node) in scene.models() {
            let root = node.world_matrix();
            for gpu in self.models.get(&id).into_iter().flatten() {
                let u = MeshUniforms::new(root * gpu.transform, gpu.base_color);
                self.queue
                    .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
            }
        }

        let frame = self.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            rpass.set_pipeline(&self.mesh.pipeline);
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (id, _) in scene.models() {
                for gpu in self.models.get(&id).into_iter().flatten() {
                    rpass.set_bind_group(1, &gpu.bind_group, &[]);
                    rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    rpass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let (px_w, px_h) = dom::size_canvas(&self.canvas, width, height);
        if (px_w, px_h) != (self.config.width, self.config.height) {
            self.reconfigure(px_w, px_h);
        }
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = helpers::to_wgpu_color(color.to_linear());
    }
}
