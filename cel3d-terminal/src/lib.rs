/// Terminal cel-shaded viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use cel3d_core::{transform::ROTATE_STEP, Camera, OrbitingLight, ViewState};

pub mod config;
pub mod logging;
pub mod renderer;
pub mod scene;

pub use config::AppConfig;
pub use renderer::CelRenderer;
pub use scene::{SceneKind, SceneLibrary};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: AppConfig,
    scenes: SceneLibrary,
    scene: SceneKind,
    view: ViewState,
    light: OrbitingLight,
    camera: Camera,
    renderer: CelRenderer,
    running: bool,
    last_step: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, width as usize, height as usize))
    }

    /// Build the viewer for a viewport of `width` x `height` cells
    pub fn with_size(config: AppConfig, width: usize, height: usize) -> Self {
        let now = Instant::now();
        Self {
            scenes: SceneLibrary::new(config.mesh_path.clone(), config.loader),
            scene: config.start_scene,
            view: ViewState::default(),
            light: OrbitingLight::default(),
            camera: Camera::new(width as u32, height as u32, CELL_ASPECT),
            renderer: CelRenderer::new(width, height, config.outline_width),
            running: true,
            last_step: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            config,
        }
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn light(&self) -> &OrbitingLight {
        &self.light
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn renderer(&self) -> &CelRenderer {
        &self.renderer
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(self.config.frame_millis());
        info!(
            "viewer started at {}x{} on scene {}",
            self.renderer.width(),
            self.renderer.height(),
            self.scene.label()
        );

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            let dt = (frame_start - self.last_step).as_secs_f32();
            self.last_step = frame_start;
            self.update(dt);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => self.resize(width as usize, height as usize),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up => self.view.rotate_pitch(-ROTATE_STEP),
            KeyCode::Down => self.view.rotate_pitch(ROTATE_STEP),
            KeyCode::Left => self.view.rotate_yaw(-ROTATE_STEP),
            KeyCode::Right => self.view.rotate_yaw(ROTATE_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.view.zoom_in(),
            KeyCode::Char('-') => self.view.zoom_out(),
            _ => {
                self.view.reset();
                self.scene = self.scene.next();
                debug!("switched to scene {}", self.scene.label());
            }
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        debug!("resize to {}x{}", width, height);
        self.camera = Camera::new(width as u32, height as u32, CELL_ASPECT);
        self.renderer.resize(width, height);
    }

    /// Advance the animation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.light.step(dt);
    }

    /// Rasterize the current scene into the renderer's cell buffer
    pub fn compose(&mut self) {
        let view = self.view.view_matrix();

        self.renderer.clear();
        self.renderer.render_light(&self.light, &view, &self.camera);
        for object in self.scenes.objects(self.scene) {
            self.renderer
                .render_mesh(&object.mesh, &object.model, &view, &self.camera, &self.light);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.compose();

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let mut status = format!(
            "cel3d | {} | FPS: {:.1} | Arrows=Rotate +/-=Zoom Q=Quit, other keys: next scene",
            self.scene.label(),
            self.fps
        );
        if self.scene == SceneKind::Mesh {
            status.push_str(&format!(" | {}", self.scenes.mesh_path().display()));
        }
        let status: String = status.chars().take(self.renderer.width()).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(renderer::BACKGROUND),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
