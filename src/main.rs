//! glitchgrid - a grid that breathes with noise and glitches to the beat
//!
//! Paint cells while paused, press play, then click a painted region to send
//! a glitch wave through it.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glitchgrid::audio::AudioSystem;
use glitchgrid::cli::Args;
use glitchgrid::controls::{ControlEvent, ControlPanel};
use glitchgrid::params::*;
use glitchgrid::render::{Blend, Canvas, RenderSystem, Surface};
use glitchgrid::{logging, ClickOutcome, Error, FrameOrchestrator, Result};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    grid_canvas: Canvas,
    frame_canvas: Canvas,

    // Simulation and audio
    orchestrator: FrameOrchestrator,
    panel: ControlPanel,
    audio: Option<AudioSystem>,

    // Configuration
    render_config: RenderConfig,
    audio_config: AudioConfig,
    audio_enabled: bool,

    // Recording state
    recording: Option<RecordingConfig>,
    frame_count: usize,

    // Pointer state in frame pixels
    cursor: Option<Vec2>,
    pointer_down: bool,

    start_time: Instant,
    failed: bool,
}

impl App {
    fn new(args: &Args, recording: Option<RecordingConfig>) -> Self {
        let render_config = args.render_config();
        let (width, height) = render_config.window_size();
        let canvas = (render_config.canvas_width, render_config.canvas_height);

        let mut orchestrator = FrameOrchestrator::new(
            args.grid_params(),
            args.glitch_params(),
            BeatParams::default(),
            canvas,
            args.seed as u64,
        );
        let panel = ControlPanel::new(
            &args.control_defaults(),
            canvas.1 as f32,
            width as f32,
            render_config.control_strip_px as f32,
        );
        orchestrator.set_speed(panel.speed.value());
        orchestrator.set_strength(panel.strength.value());

        Self {
            window: None,
            render_system: None,
            grid_canvas: Canvas::new(canvas.0, canvas.1),
            frame_canvas: Canvas::new(width, height),
            orchestrator,
            panel,
            audio: None,
            audio_config: args.audio_config(),
            audio_enabled: !args.no_audio,
            render_config,
            recording,
            frame_count: 0,
            cursor: None,
            pointer_down: false,
            start_time: Instant::now(),
            failed: false,
        }
    }

    /// Create the window, GPU presenter and audio device
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.render_config.window_size();
        let window_attributes = Window::default_attributes()
            .with_title(self.panel.title())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| Error::Render(format!("failed to create window: {}", e)))?,
        );

        let render_system =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), (width, height)))?;

        if self.audio_enabled {
            match AudioSystem::new(&self.audio_config, self.recording.as_ref()) {
                Ok(audio) => self.audio = Some(audio),
                Err(e) => log::warn!("{}; continuing without audio", e),
            }
        } else {
            log::info!("Audio disabled");
        }

        if let Some(ref config) = self.recording {
            log::info!(
                "Recording {:.1}s ({} frames at {} fps) to {}/",
                config.duration_secs,
                config.total_frames(),
                config.fps,
                config.output_dir
            );
        }

        log::info!(
            "Running: {}x{} grid. Space play/pause, C clear, arrows adjust, Esc quit",
            self.orchestrator.grid().cols(),
            self.orchestrator.grid().rows()
        );

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.start_time = Instant::now();
        Ok(())
    }

    /// Milliseconds since start; a fixed step per frame while recording
    fn now_ms(&self) -> f64 {
        match self.recording {
            Some(ref config) => self.frame_count as f64 * config.frame_ms(),
            None => self.start_time.elapsed().as_secs_f64() * 1000.0,
        }
    }

    fn toggle_play(&mut self) {
        let playing = self.orchestrator.toggle_play();
        self.panel.set_playing(playing);
        if let Some(ref audio) = self.audio {
            audio.set_playing(playing);
        }
        log::info!("{}", if playing { "Playing" } else { "Paused" });
        self.refresh_title();
    }

    /// Push slider values into the simulation
    fn sync_sliders(&mut self) {
        self.orchestrator.set_speed(self.panel.speed.value());
        self.orchestrator.set_strength(self.panel.strength.value());
        self.refresh_title();
    }

    fn refresh_title(&self) {
        if let Some(ref window) = self.window {
            window.set_title(&self.panel.title());
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => self.shutdown(event_loop),
            KeyCode::Space => self.toggle_play(),
            KeyCode::KeyC => self.orchestrator.clear(),
            KeyCode::ArrowUp => {
                self.panel.speed.nudge(1);
                self.sync_sliders();
            }
            KeyCode::ArrowDown => {
                self.panel.speed.nudge(-1);
                self.sync_sliders();
            }
            KeyCode::ArrowRight => {
                self.panel.strength.nudge(1);
                self.sync_sliders();
            }
            KeyCode::ArrowLeft => {
                self.panel.strength.nudge(-1);
                self.sync_sliders();
            }
            _ => {}
        }
    }

    fn handle_press(&mut self) {
        let Some(point) = self.cursor else {
            return;
        };

        if self.panel.contains(point) {
            match self.panel.press(point) {
                Some(ControlEvent::PlayPauseClicked) => self.toggle_play(),
                Some(ControlEvent::ClearClicked) => self.orchestrator.clear(),
                Some(ControlEvent::SliderChanged) => self.sync_sliders(),
                None => {}
            }
            return;
        }

        let now = self.now_ms();
        if let Some(ClickOutcome::Glitched(_)) =
            self.orchestrator.click(point.x as f64, point.y as f64, now)
        {
            if let Some(ref audio) = self.audio {
                audio.trigger_glitch();
            }
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(ref audio) = self.audio {
            audio.finish_recording();
        }
        event_loop.exit();
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_system.is_none() {
            return;
        }

        let now = self.now_ms();
        self.orchestrator.pump_timers(now);
        let level = self.audio.as_ref().map_or(0.0, |audio| audio.level() as f64);
        self.orchestrator.frame(now, level, &mut self.grid_canvas);

        self.frame_canvas.draw_image(self.grid_canvas.image(), 0, 0, Blend::Replace);
        self.panel.draw(&mut self.frame_canvas);

        if let Some(ref mut render_system) = self.render_system {
            match render_system.present(self.frame_canvas.image()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_system.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    self.failed = true;
                    self.shutdown(event_loop);
                    return;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        self.capture_frame(event_loop);
    }

    /// Save the frame and stop after the last one (recording mode only)
    fn capture_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref config) = self.recording else {
            return;
        };
        let path = config.frame_path(self.frame_count);
        let total = config.total_frames();

        if let Err(e) = self.frame_canvas.save(&path) {
            log::warn!("Failed to save {}: {}", path, e);
        }

        self.frame_count += 1;
        if self.frame_count % 60 == 0 {
            log::info!("Recorded {}/{} frames", self.frame_count, total);
        }
        if self.frame_count >= total {
            log::info!("Recording complete");
            self.shutdown(event_loop);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Spread steps may land between frames
        let now = self.now_ms();
        self.orchestrator.pump_timers(now);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.failed = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(ref mut render_system) = self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat,
                        ..
                    },
                ..
            } => {
                // Holding an arrow keeps stepping; other keys fire once
                let is_arrow = matches!(
                    key,
                    KeyCode::ArrowUp | KeyCode::ArrowDown | KeyCode::ArrowLeft | KeyCode::ArrowRight
                );
                if !repeat || is_arrow {
                    self.handle_key(event_loop, key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self
                    .render_system
                    .as_ref()
                    .and_then(|rs| rs.window_to_frame(position.x, position.y))
                    .map(|(x, y)| Vec2::new(x as f32, y as f32));

                if self.pointer_down {
                    if let Some(point) = self.cursor {
                        if self.panel.drag(point).is_some() {
                            self.sync_sliders();
                        }
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.pointer_down = true;
                    self.handle_press();
                }
                ElementState::Released => {
                    self.pointer_down = false;
                    self.panel.release();
                }
            },
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    logging::init_logger();
    let args = Args::parse();

    let recording = match args.create_recording_config() {
        Ok(recording) => recording,
        Err(e) => {
            log::error!("Failed to prepare recording directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(&args, recording);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };

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
