/// Terminal viewer for OFF meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use offview_core::{
    BoundingSphere, Camera, Mesh, MeshError, ProjectionMode, RotationState, Transform,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Rows kept free for the status line
const STATUS_ROWS: u16 = 1;

const CONTROLS: &str = "WASD/Arrows=Rotate E/R=Roll P=Projection Space=Spin Q=Quit";

/// Viewer settings, normally filled in from the command line
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub target_fps: u32,
    /// Radians per key press
    pub rotation_step: f32,
    /// Idle rotation applied every frame
    pub spin: bool,
    pub projection: ProjectionMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            rotation_step: 0.1,
            spin: true,
            projection: ProjectionMode::Perspective,
        }
    }
}

/// Recenter `mesh` on its centroid and return the sphere it was measured with
/// together with the scale that fits it into the unit sphere
pub fn prepare_mesh(mesh: &mut Mesh) -> Result<(BoundingSphere, f32), MeshError> {
    let sphere = mesh.recenter()?;
    Ok((sphere, Transform::fit_unit_sphere(&sphere)))
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    scale: f32,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    config: ViewerConfig,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Takes ownership of the mesh and recenters it for display
    pub fn new(mut mesh: Mesh, config: ViewerConfig) -> io::Result<Self> {
        let (_, scale) = prepare_mesh(&mut mesh)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(STATUS_ROWS).max(1);

        let mut camera = Camera::new(width as u32, height as u32);
        camera.mode = config.projection;

        Ok(Self {
            mesh,
            scale,
            rotation: RotationState::new(0.3, 0.3, 0.0),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            config,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            terminal::disable_raw_mode()?;
            return Err(e);
        }

        let result = self.main_loop();

        // Restore the terminal even if the loop failed
        let cleanup = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        terminal::disable_raw_mode()?;

        result.and(cleanup)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let fps = u64::from(self.config.target_fps.max(1));
        let target_frame_time = Duration::from_millis(1000 / fps);

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.update();
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

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        let step = self.config.rotation_step;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(step, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-step, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -step, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, step, 0.0),
            KeyCode::Char('e') => self.rotation.rotate(0.0, 0.0, step),
            KeyCode::Char('r') => self.rotation.rotate(0.0, 0.0, -step),
            KeyCode::Char('p') => self.camera.toggle_mode(),
            KeyCode::Char(' ') => self.config.spin = !self.config.spin,
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let height = height.saturating_sub(STATUS_ROWS).max(1);
        self.renderer = AsciiRenderer::new(width as usize, height as usize);
        self.camera.aspect = f32::from(width.max(1)) / f32::from(height);
    }

    fn update(&mut self) {
        if self.config.spin {
            self.rotation.rotate(0.01, 0.015, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Transform::model_matrix(&self.rotation, self.scale);

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &model, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        let mode = match self.camera.mode {
            ProjectionMode::Perspective => "persp",
            ProjectionMode::Orthographic => "ortho",
        };
        let status = format!(
            "offview | {} verts {} faces | {} | FPS: {:.1} | {}",
            self.mesh.vertex_count(),
            self.mesh.face_count(),
            mode,
            self.fps,
            CONTROLS
        );
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(truncate(&status, self.renderer.width())),
            ResetColor
        )?;

        stdout.flush()
    }
}

fn truncate(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offview_core::parse_off;

    #[test]
    fn test_prepare_mesh_recenters_and_scales() {
        let mut mesh = parse_off("OFF\n2 0 0\n2 0 0\n6 0 0\n").unwrap();
        let (sphere, scale) = prepare_mesh(&mut mesh).unwrap();

        assert_eq!(sphere.center.x, 4.0);
        assert_eq!(sphere.radius, 2.0);
        assert_eq!(scale, 0.5);
        assert_eq!(mesh.vertices()[0].x, -2.0);
        assert_eq!(mesh.vertices()[1].x, 2.0);
    }

    #[test]
    fn test_prepare_empty_mesh() {
        let mut mesh = Mesh::new();
        assert_eq!(prepare_mesh(&mut mesh), Err(MeshError::EmptyMesh));
    }

    #[test]
    fn test_truncate_status() {
        assert_eq!(truncate("offview", 3), "off");
        assert_eq!(truncate("offview", 30), "offview");
    }

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.target_fps, 30);
        assert!(config.spin);
        assert_eq!(config.projection, ProjectionMode::Perspective);
    }
}
