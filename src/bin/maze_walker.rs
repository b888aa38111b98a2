//! Maze Walker - First-Person Cubicmap Maze
//!
//! Run with: `cargo run --bin maze_walker [config.json]`
//!
//! Controls:
//! - Click: Capture the mouse
//! - Mouse: Look around
//! - WASD: Move
//! - E / Q: Move up / down
//! - Space: Log the current map cell
//! - ESC: Exit
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-second
//! frame statistics.

use std::sync::Arc;

use log::{debug, error, info, warn};
use maze_walker_engine::config::MazeConfig;
use maze_walker_engine::error::{MazeError, MazeResult};
use maze_walker_engine::game::MazeScene;
use maze_walker_engine::input::{InputState, KeyCode as MazeKey};
use maze_walker_engine::render::{
    AtlasImage, FrameStatus, GpuContext, GpuContextConfig, MazeRenderer, MazeUniforms,
    ShaderSource,
};
use maze_walker_engine::timing::FrameLimiter;
use maze_walker_engine::world::Color;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

fn map_key(key: KeyCode) -> MazeKey {
    match key {
        KeyCode::KeyW => MazeKey::W,
        KeyCode::KeyA => MazeKey::A,
        KeyCode::KeyS => MazeKey::S,
        KeyCode::KeyD => MazeKey::D,
        KeyCode::KeyQ => MazeKey::Q,
        KeyCode::KeyE => MazeKey::E,
        KeyCode::Space => MazeKey::Space,
        KeyCode::Escape => MazeKey::Escape,
        _ => MazeKey::Unknown,
    }
}

struct MazeWalkerApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<MazeRenderer>,
    scene: MazeScene,
    atlas: AtlasImage,
    shader: ShaderSource,
    input: InputState,
    limiter: FrameLimiter,
    failure: Option<MazeError>,
}

impl MazeWalkerApp {
    fn new(scene: MazeScene, atlas: AtlasImage, shader: ShaderSource) -> Self {
        let limiter = FrameLimiter::new(scene.config.target_fps);
        Self {
            window: None,
            gpu: None,
            renderer: None,
            scene,
            atlas,
            shader,
            input: InputState::new(),
            limiter,
            failure: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> MazeResult<()> {
        let window_config = &self.scene.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| MazeError::EventLoop(e.to_string()))?,
        );

        let gpu = GpuContext::new(Arc::clone(&window), GpuContextConfig::default())?;
        let renderer = MazeRenderer::new(&gpu, &self.scene.mesh, &self.atlas, &self.shader)?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        info!("[MazeWalker] Click the window to capture the mouse");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: MazeError) {
        self.failure = Some(err);
        event_loop.exit();
    }

    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
            {
                warn!("[MazeWalker] Cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        }
        self.input.mouse.set_captured(true);
    }

    fn release_cursor(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.input.mouse.set_captured(false);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_ref()) else {
            return;
        };

        let report = self.scene.update(&self.input);
        self.input.end_frame();

        let uniforms = MazeUniforms::new(self.scene.mvp(gpu.aspect_ratio()), Color::WHITE);
        renderer.update_uniforms(gpu, &uniforms);
        if renderer.render(gpu) == FrameStatus::Fatal {
            self.fail(event_loop, MazeError::Render("GPU out of memory".to_string()));
            return;
        }

        self.limiter.sync();

        let frame = self.scene.frame_count();
        if frame % u64::from(self.scene.config.target_fps.max(1)) == 0 {
            debug!(
                "[MazeWalker] frame {} | {:.0} fps | {:.2}ms | cell {:?} | collided {}",
                frame,
                self.limiter.fps(),
                self.limiter.frame_time().as_secs_f32() * 1000.0,
                report.cell,
                report.collided
            );
        }
    }
}

impl ApplicationHandler for MazeWalkerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.initialize(event_loop)
        {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if key == KeyCode::Escape && pressed {
                        event_loop.exit();
                        return;
                    }
                    self.input.keyboard.handle_key(map_key(key), pressed);
                }
            }
            WindowEvent::MouseInput { state, .. } => {
                if state == ElementState::Pressed && !self.input.mouse.is_captured() {
                    self.capture_cursor();
                }
            }
            WindowEvent::Focused(false) => {
                self.input.keyboard.reset();
                self.release_cursor();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input
                .mouse
                .accumulate_delta(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn run() -> MazeResult<()> {
    let config = MazeConfig::from_args(std::env::args())?;
    let atlas = AtlasImage::load_or_placeholder(&config.atlas_path);
    let shader = ShaderSource::resolve(config.shader_path.as_deref())?;
    let scene = MazeScene::load(config)?;

    let event_loop = EventLoop::new().map_err(|e| MazeError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = MazeWalkerApp::new(scene, atlas, shader);
    event_loop
        .run_app(&mut app)
        .map_err(|e| MazeError::EventLoop(e.to_string()))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("===========================================");
    info!("   Maze Walker");
    info!("===========================================");
    info!("Controls: Click to capture mouse, WASD Move, E/Q Up/Down, Space Log Cell, ESC Exit");

    if let Err(e) = run() {
        error!("[MazeWalker] {e}");
        std::process::exit(1);
    }
}
