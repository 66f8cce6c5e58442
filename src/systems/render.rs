//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene meshes and the scene pipeline
//! - Frame rendering and screenshots

use std::sync::Arc;
use winit::window::Window;
use pickup_core::Scene;
use pickup_render::{
    camera::OrbitCamera,
    context::{ContextError, RenderContext},
    pipeline::{FrameUniforms, ScenePipeline},
    screenshot::{self, ScreenshotTarget},
    MeshStore, SceneMeshes,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// No GPU adapter can present to the window
    NoAdapter,
    /// Device creation failed
    Device(String),
    /// Surface creation or configuration failed
    Surface(String),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::NoAdapter => write!(f, "No suitable GPU adapter"),
            RenderError::Device(msg) => write!(f, "Device error: {}", msg),
            RenderError::Surface(msg) => write!(f, "Surface error: {}", msg),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        match e {
            ContextError::NoAdapter => RenderError::NoAdapter,
            ContextError::Device(msg) => RenderError::Device(msg),
            ContextError::Surface(msg) => RenderError::Surface(msg),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    meshes: MeshStore,
    scene_meshes: SceneMeshes,
    render_config: RenderingConfig,
    screenshot_requested: bool,
}

impl RenderSystem {
    /// Create render system from window and config, uploading the scene's meshes
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
        scene: &Scene,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        let pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            context.config.width,
            context.config.height,
        );

        let mut meshes = MeshStore::with_key();
        let scene_meshes = SceneMeshes::upload(&context.device, &mut meshes, scene);

        Ok(Self {
            context,
            pipeline,
            meshes,
            scene_meshes,
            render_config,
            screenshot_requested: false,
        })
    }

    /// Handle window resize
    ///
    /// Zero sizes (minimized window) keep the previous surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        let (width, height) = self.size();
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Save the next rendered frame to the configured screenshot path
    pub fn request_screenshot(&mut self) {
        self.screenshot_requested = true;
    }

    /// Render a single frame
    pub fn render_frame(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), RenderError> {
        let eye = camera.eye();
        let frame_uniforms = FrameUniforms {
            view_projection: camera.view_projection(),
            light_dir: self.render_config.light_dir,
            eye: eye.to_array(),
            ambient_strength: self.render_config.ambient_strength,
            diffuse_strength: self.render_config.diffuse_strength,
            ..Default::default()
        };
        self.pipeline.update_frame(&self.context.queue, &frame_uniforms);

        let draws = self.scene_meshes.draw_list(scene);
        self.pipeline
            .write_models(&self.context.device, &self.context.queue, &draws);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        let clear_color = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        };

        self.pipeline
            .render(&mut encoder, &view, &self.meshes, &draws, clear_color);

        let capture = if self.screenshot_requested {
            self.screenshot_requested = false;
            let target = ScreenshotTarget::new(
                &self.context.device,
                self.context.config.format,
                self.context.config.width,
                self.context.config.height,
            );
            self.pipeline
                .render(&mut encoder, target.view(), &self.meshes, &draws, clear_color);
            Some(target)
        } else {
            None
        };

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(target) = capture {
            self.save_screenshot(&target);
        }

        Ok(())
    }

    /// Read the capture back and write it; failures are logged, never fatal
    fn save_screenshot(&self, target: &ScreenshotTarget) {
        let path = &self.render_config.screenshot_path;
        let result = target
            .read_rgba(&self.context.device, &self.context.queue)
            .and_then(|image| screenshot::save_png(&image, path));

        match result {
            Ok(()) => log::info!("Saved screenshot to {}", path.display()),
            Err(e) => log::error!("{}", e),
        }
    }

    /// Get current surface size
    ///
    /// Always the configured extent, which stays non-zero while minimized.
    pub fn size(&self) -> (u32, u32) {
        surface_extent(&self.context.config)
    }
}

fn surface_extent(config: &wgpu::SurfaceConfiguration) -> (u32, u32) {
    (config.width, config.height)
}
