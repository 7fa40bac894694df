//! Spacescape - a 3D space vignette
//!
//! A sun with orbiting planets, a wandering butterfly swarm and a spinning
//! torus knot inside a starfield, viewed through an orbiting camera.

use std::path::Path;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacescape::config::AppConfig;
use spacescape::input::{InputAction, InputMapper};
use spacescape::systems::{CameraSystem, RenderSystem, SimulationSystem, WindowSystem};
use spacescape_core::{FrameDriver, SceneAssets, SceneError, SceneLayout, SceneLoadError, World};
use spacescape_render::{GltfDecoder, ImageDecoder};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    world: World,
    driver: FrameDriver,
    assets: SceneAssets,
    camera: CameraSystem,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Set when the app stops because of an unrecoverable error
    failed: bool,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let layout = match SceneLayout::load(&config.scene.path) {
            Ok(layout) => layout,
            Err(SceneLoadError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Scene '{}' not found, using the built-in solar system",
                    config.scene.path
                );
                SceneLayout::solar_system()
            }
            Err(e) => return Err(e.into()),
        };

        let world = World::from_layout(layout, config.motion, config.scene.rng())?;

        // Decoding starts right away; results are applied once rendering is up
        let mut assets = SceneAssets::new(ImageDecoder, GltfDecoder);
        assets.request_layout(world.layout(), Path::new(&config.scene.asset_root));

        let camera = CameraSystem::new(config.camera.to_camera(), config.controls.to_controller());

        Ok(Self {
            config,
            world,
            driver: FrameDriver::new(),
            assets,
            camera,
            simulation: SimulationSystem::new(),
            window: None,
            render: None,
            failed: false,
        })
    }

    /// Release GPU resources and stop the event loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(render) = self.render.as_mut() {
            self.driver.teardown(render.renderer_mut());
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("{}", message);
        self.failed = true;
        self.shutdown(event_loop);
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => self.shutdown(event_loop),
            InputAction::ResetCamera => self.camera.reset(),
            InputAction::ToggleAutoRotate => {
                let enabled = self.camera.toggle_auto_rotate();
                log::info!("Auto-rotate: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::TogglePause => {
                let paused = self.simulation.toggle_pause();
                log::info!("Animation {}", if paused { "paused" } else { "resumed" });
                if let Some(window) = &self.window {
                    window.update_title(None, paused);
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render) = self.render.as_mut() else {
            return;
        };

        let time = self.simulation.tick();
        let result = if time.paused {
            self.driver
                .redraw(&self.world, render.renderer_mut(), &mut self.camera, time.dt)
        } else {
            self.driver.frame(
                &mut self.world,
                render.renderer_mut(),
                &mut self.camera,
                &mut self.assets,
                time.elapsed,
                time.dt,
            )
        };

        if let Err(e) = result {
            self.fail(event_loop, format!("Rendering stopped: {}", e));
            return;
        }

        if let Some(window) = &self.window {
            if self.config.debug.show_fps {
                window.update_title(self.simulation.fps(), time.paused);
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e.to_string()),
        };

        // No surface or adapter is fatal: there is no headless mode
        let mut render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => return self.fail(event_loop, format!("Cannot start renderer: {}", e)),
        };

        self.camera.set_aspect(render.aspect_ratio());
        if let Err(e) = self.driver.setup(&self.world, render.renderer_mut()) {
            self.render = Some(render);
            return self.fail(event_loop, format!("Cannot upload scene: {}", e));
        }

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(physical_size.width, physical_size.height);
                    self.camera.set_aspect(render.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.camera.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.camera.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.camera.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    let config = AppConfig::load();

    // RUST_LOG wins over the configured level
    let level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting Spacescape");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }

    if app.failed {
        std::process::exit(1);
    }
}
