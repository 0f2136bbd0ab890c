//! Terminal front end for the 3x3x3 puzzle
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cube3d_core::{Mesh, Scene, SceneSettings};
use std::io::{self, stdout, Write};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

pub mod cli;
pub mod input;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// Lines printed before the terminal switches to the puzzle view
pub const CONTROLS: &str = "\
Controls:
  1-3  turn front / middle / back (roll)
  4-6  turn top / middle / bottom (pitch)
  7-9  turn left / middle / right (yaw)
  `    switch turn direction
  WASD move, R up, F down, mouse to look around
  Esc  reset the camera
  q    quit";

/// Undo the screen setup done by [`TerminalApp::run`]
fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    )
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    renderer: AsciiRenderer,
    running: bool,
    target_frame_time: Duration,
    last_update: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: &Mesh, settings: SceneSettings, target_frame_time: Duration) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Keep the last row for the status line.
        let renderer = AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize);
        let settings = SceneSettings {
            aspect: renderer.aspect(),
            ..settings
        };

        Ok(Self {
            scene: Scene::new(settings, mesh),
            renderer,
            running: true,
            target_frame_time,
            last_update: Instant::now(),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup; raw mode is restored even if the screen reset fails.
        let raw_mode = terminal::disable_raw_mode();
        let screen = leave_screen(&mut stdout());

        result.and(raw_mode).and(screen)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize(width, height) = event {
            log::debug!("terminal resized to {width}x{height}");
            self.renderer
                .resize(width as usize, height.saturating_sub(1) as usize);
            self.scene.camera.set_aspect(self.renderer.aspect());
            return;
        }
        if let Some(command) = input::command_for_event(&event) {
            log::trace!("{command:?}");
            if self.scene.apply(command) == ControlFlow::Break(()) {
                self.running = false;
            }
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let frame_time = now - self.last_update;
        self.last_update = now;
        self.scene.update(frame_time);
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        self.renderer.render_cubes(&self.scene.cubes, &self.scene.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Status line
        let engine = &self.scene.engine;
        let turning = match engine.active() {
            Some(active) => format!("turning {} {}", active.slice, active.direction),
            None => "idle".to_string(),
        };
        let status: String = format!(
            "Cube3D | FPS: {:.1} | next turn: {} | {} | 1-9=Turn `=Direction Esc=Reset Q=Quit",
            self.fps,
            engine.direction(),
            turning
        )
        .chars()
        .take(self.renderer.width())
        .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, self.renderer.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
