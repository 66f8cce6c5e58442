//! Pickup - drive a pickup truck over rolling hills
//!
//! WASD drives, left-drag orbits the camera, the wheel zooms.

use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use pickup::config::AppConfig;
use pickup::input::{InputAction, InputMapper};
use pickup::scene::SceneBuilder;
use pickup::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use pickup_core::{CameraMode, Scene, Vec3};
use pickup_input::DriveController;
use pickup_render::camera::OrbitCamera;

/// Pixels of trackpad scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 100.0;

/// Main application state
struct App {
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    scene: Scene,
    camera: OrbitCamera,
    controller: DriveController,
    failed: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = SceneBuilder::from_config(&config).build();

        let cam = &config.camera;
        let start = cam.start_position;
        let camera = OrbitCamera::new(Vec3::new(start[0], start[1], start[2]), scene.camera_target())
            .with_fov_degrees(cam.fov)
            .with_clip(cam.near, cam.far)
            .with_sensitivity(cam.orbit_sensitivity)
            .with_radius_limits(cam.min_radius, cam.max_radius);

        let controller = DriveController::new()
            .with_zoom_speed(cam.zoom_speed)
            .with_smoothing_half_life(cam.smoothing_half_life)
            .with_smoothing(cam.smoothing_enabled);

        let simulation = SimulationSystem::new(config.rendering.max_dt)
            .with_vehicle_logging(config.debug.log_vehicle_state);

        Self {
            config,
            window_system: None,
            render_system: None,
            simulation,
            scene,
            camera,
            controller,
            failed: false,
        }
    }

    /// Stop the event loop and report failure from main
    fn fail(&mut self, event_loop: &ActiveEventLoop, message: &str) {
        log::error!("{}", message);
        self.failed = true;
        event_loop.exit();
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::Screenshot => {
                if let Some(render) = &mut self.render_system {
                    render.request_screenshot();
                }
            }
            InputAction::CameraOrigin => self.scene.set_camera_mode(CameraMode::Origin),
            InputAction::CameraFollow => self.scene.set_camera_mode(CameraMode::FollowPickup),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window_system {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ResetVehicle => {
                self.scene.reset();
                log::info!("Pickup reset to spawn");
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation
            .update(&mut self.scene, &mut self.camera, &mut self.controller);

        if let Some(render) = &mut self.render_system {
            match render.render_frame(&self.scene, &self.camera) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    self.fail(event_loop, "GPU out of memory");
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window_system {
            window.update_title(self.scene.vehicle_state(), self.scene.camera_mode());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, &e.to_string()),
        };

        let render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
            &self.scene,
        ) {
            Ok(render) => render,
            Err(e) => return self.fail(event_loop, &e.to_string()),
        };

        let (width, height) = render_system.size();
        self.camera.resize(width, height);

        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render_system {
                    render.resize(size.width, size.height);
                }
                self.camera.resize(size.width, size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    // Special keys fire on press; everything else is a drive key
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        if !event.repeat {
                            self.handle_action(action, event_loop);
                        }
                    } else {
                        self.controller.process_keyboard(key, event.state);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.controller.process_scroll(lines);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window_system {
            window.request_redraw();
        }
    }
}

fn main() -> ExitCode {
    // Load configuration
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Pickup");

    // Create event loop
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
