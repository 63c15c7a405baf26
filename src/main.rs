//! Sward - procedural grass renderer

use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

use sward::bench::BenchmarkSession;
use sward::core::{
    camera::Camera,
    camera_controller::OrbitCameraController,
    input::InputState,
    logging,
    time::FrameTimer,
};
use sward::render::{Renderer, buffer::StateBuffer, context::GpuContext};
use sward::scene::{Blades, BladesConfig, CullingMode, Model, Scene};

/// Sphere movement per key press in meters
const SPHERE_STEP: f32 = 0.5;

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    scene: Option<Scene<StateBuffer>>,
    session: BenchmarkSession,
    camera: Camera,
    controller: OrbitCameraController,
    input: InputState,
    timer: FrameTimer,
    blades_config: BladesConfig,
}

impl App {
    fn new(report_path: PathBuf, blades_config: BladesConfig) -> Self {
        Self {
            window: None,
            gpu: None,
            renderer: None,
            scene: None,
            session: BenchmarkSession::new(report_path),
            camera: Camera::default(),
            controller: OrbitCameraController::default(),
            input: InputState::new(),
            timer: FrameTimer::default(),
            blades_config,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        // Sphere movement
        let mut sphere = scene.sphere_position();
        match key {
            KeyCode::KeyW => sphere.z -= SPHERE_STEP,
            KeyCode::KeyS => sphere.z += SPHERE_STEP,
            KeyCode::KeyA => sphere.x -= SPHERE_STEP,
            KeyCode::KeyD => sphere.x += SPHERE_STEP,
            KeyCode::KeyQ => sphere.y -= SPHERE_STEP,
            KeyCode::KeyE => sphere.y += SPHERE_STEP,
            _ => {}
        }
        if sphere != scene.sphere_position() {
            scene.set_sphere_position(sphere);
        }

        match key {
            // Start the automatic benchmark (ignored while one is running)
            KeyCode::KeyP => self.session.start(scene),
            // Manual culling switches
            KeyCode::Digit1 => {
                scene.set_culling_mode(CullingMode::None);
                log::info!("Culling: NONE");
            }
            KeyCode::Digit2 => {
                scene.set_culling_mode(CullingMode::Orientation);
                log::info!("Culling: ORIENTATION only");
            }
            KeyCode::Digit3 => {
                scene.set_culling_mode(CullingMode::Frustum);
                log::info!("Culling: FRUSTUM only");
            }
            KeyCode::Digit4 => {
                scene.set_culling_mode(CullingMode::Distance);
                log::info!("Culling: DISTANCE only");
            }
            KeyCode::Digit5 => {
                scene.set_culling_mode(CullingMode::All);
                log::info!("Culling: ALL");
            }
            _ => {}
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let mut title = format!("Sward - FPS: {:.1}", self.timer.fps());
        if let Some((mode, collected)) = self.session.progress() {
            title.push_str(&format!(
                " [RECORDING {} {}/{}]",
                mode.name(),
                collected,
                sward::bench::SAMPLES_PER_MODE
            ));
        }
        window.set_title(&title);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Sward - Grass Rendering")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .expect("Failed to create GPU context");

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        log::info!("Window created: {}x{}", size.width, size.height);
        log::info!("GPU: {}", gpu.adapter.get_info().name);

        let state_buffer = StateBuffer::new(&gpu.device, gpu.queue.clone());
        let renderer = Renderer::new(
            &gpu.device,
            gpu.format(),
            state_buffer.bind_group_layout(),
            size.width,
            size.height,
        );

        let mut scene = Scene::new(state_buffer);
        scene.add_model(Model::plane(&gpu.device, &gpu.queue, self.blades_config.dim));
        scene.add_blades(Blades::new(&gpu.device, &gpu.queue, &self.blades_config));

        log::info!("=== CONTROLS ===");
        log::info!("Press P: Start automatic performance test");
        log::info!("Press 1-5: Manual culling mode switch (1=None, 2=Orientation, 3=Frustum, 4=Distance, 5=All)");
        log::info!("WASDQE: Move sphere");
        log::info!("Mouse: left-drag orbit, right-drag zoom");

        self.window = Some(window);
        self.scene = Some(scene);
        self.renderer = Some(renderer);
        self.gpu = Some(gpu);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                        self.camera.set_aspect(size.width as f32, size.height as f32);
                        if let Some(renderer) = &mut self.renderer {
                            renderer.recreate_frame_resources(&gpu.device, size.width, size.height);
                        }
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key {
                        if code == KeyCode::Escape {
                            event_loop.exit();
                        } else {
                            self.handle_key(code);
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let title_refreshed = self.timer.tick();
                let frame_time_ms = self.timer.delta_ms();

                if let Some(scene) = &mut self.scene {
                    // Benchmark transitions happen here, before this frame's
                    // state writes, so every sample set measures the culling
                    // configuration it claims to
                    self.session.record_frame(frame_time_ms, scene);
                }

                if title_refreshed {
                    self.update_title();
                }

                self.controller.update(&mut self.camera, &self.input);

                if let (Some(gpu), Some(renderer), Some(scene)) =
                    (&mut self.gpu, &mut self.renderer, &mut self.scene)
                {
                    scene.advance_time();
                    if let Err(e) = renderer.frame(gpu, scene, &self.camera) {
                        log::error!("Render failure: {}", e);
                        event_loop.exit();
                    }
                }

                self.input.end_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // The device must be idle before any owned resource is released,
        // and release order is the reverse of acquisition
        if let Some(gpu) = &self.gpu {
            gpu.wait_idle();
        }
        self.renderer.take();
        self.scene.take();
        self.gpu.take();
        self.window.take();
    }
}

fn main() {
    logging::init();
    log::info!("Sward starting...");

    let args: Vec<String> = std::env::args().collect();
    let report_path =
        parse_report_arg(&args).unwrap_or_else(|| PathBuf::from("performance_results.csv"));
    let mut blades_config = BladesConfig::default();
    if let Some(dim) = parse_dim_arg(&args) {
        blades_config.dim = dim;
    }

    log::info!("Report path: {}", report_path.display());

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(report_path, blades_config);

    event_loop.run_app(&mut app).expect("Event loop error");
}

/// Parse --report argument from command line
fn parse_report_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--report" || args[i] == "-r" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Parse --dim argument from command line (field size in meters)
fn parse_dim_arg(args: &[String]) -> Option<f32> {
    for i in 0..args.len() {
        if args[i] == "--dim" || args[i] == "-d" {
            if let Some(dim_str) = args.get(i + 1) {
                return dim_str.parse().ok();
            }
        }
    }
    None
}
