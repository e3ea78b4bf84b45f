/// Terminal host for the objview software renderer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use objview_core::{
    render_frame, FrameStats, Movement, Orientation, RenderMode, RenderOptions, World,
};
use std::io::{self, stdout, Write};
use std::mem;
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TerminalCanvas;

/// Degrees turned per mouse cell
const MOUSE_SENSITIVITY: f64 = 0.5;
/// Pointer offset applied for one arrow key press
const ARROW_STEP: f64 = 10.0;
/// Rows reserved below the picture for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for terminal mesh viewing
pub struct TerminalApp {
    world: World,
    orientation: Orientation,
    options: RenderOptions,
    canvas: TerminalCanvas,
    running: bool,
    dirty: bool,
    last_pointer: Option<(u16, u16)>,
    last_stats: FrameStats,
    last_frame_time: Duration,
}

impl TerminalApp {
    pub fn new(world: World) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let canvas = TerminalCanvas::new(columns, rows.saturating_sub(STATUS_ROWS));

        Ok(Self {
            orientation: Orientation::from_front(&world.camera.front),
            world: world.with_window(canvas.window()),
            options: RenderOptions::default(),
            canvas,
            running: true,
            dirty: true,
            last_pointer: None,
            last_stats: FrameStats::default(),
            last_frame_time: Duration::ZERO,
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

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            // Redraw only after something changed
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            if event::poll(Duration::from_millis(100))? {
                self.handle_event(event::read()?);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.canvas.resize(columns, rows.saturating_sub(STATUS_ROWS));
                let window = self.canvas.window();
                self.update_world(|world| world.with_window(window));
                log::info!("resized to {}x{}", columns, rows);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, .. }: KeyEvent) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') => self.step(Movement::Forward),
            KeyCode::Char('s') => self.step(Movement::Backward),
            KeyCode::Char('a') => self.step(Movement::Left),
            KeyCode::Char('d') => self.step(Movement::Right),
            KeyCode::Left => self.turn(-ARROW_STEP, 0.0),
            KeyCode::Right => self.turn(ARROW_STEP, 0.0),
            KeyCode::Up => self.turn(0.0, ARROW_STEP),
            KeyCode::Down => self.turn(0.0, -ARROW_STEP),
            KeyCode::Char('f') => {
                self.options.mode = self.options.mode.toggled();
                self.dirty = true;
            }
            KeyCode::Char('b') => {
                self.options.culling = self.options.culling.next();
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let pointer = (mouse.column, mouse.row);
                if let Some((column, row)) = self.last_pointer {
                    let dx = pointer.0 as f64 - column as f64;
                    // screen rows grow downwards, pitch grows upwards
                    let dy = row as f64 - pointer.1 as f64;
                    self.turn(dx, dy);
                }
                self.last_pointer = Some(pointer);
            }
            _ => {}
        }
    }

    fn step(&mut self, movement: Movement) {
        let camera = self.world.camera.moved(movement);
        self.update_world(|world| world.with_camera(camera));
    }

    fn turn(&mut self, dx: f64, dy: f64) {
        self.orientation = self.orientation.turned(dx, dy, MOUSE_SENSITIVITY);
        let camera = self.world.camera.looking(&self.orientation);
        self.update_world(|world| world.with_camera(camera));
    }

    /// Move the world through `update`, leaving the meshes in place
    fn update_world(&mut self, update: impl FnOnce(World) -> World) {
        self.world = update(mem::take(&mut self.world));
        self.dirty = true;
    }

    fn render(&mut self) -> io::Result<()> {
        let frame_start = Instant::now();

        // Clear canvas
        self.canvas.clear();

        // Render world
        self.last_stats = render_frame(&self.world, &self.options, &mut self.canvas);
        self.last_frame_time = frame_start.elapsed();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw status line
        let camera = &self.world.camera;
        let mode = match self.options.mode {
            RenderMode::Filled => "filled",
            RenderMode::Wireframe => "wireframe",
        };
        queue!(
            stdout,
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "objview | cam {:.1} {:.1} {:.1} | {} faces, {} culled | {} | {:?} | {:.1} ms | WASD move, arrows/mouse look, F fill, B cull, Q quit",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                self.last_stats.faces_drawn,
                self.last_stats.faces_rejected(),
                mode,
                self.options.culling,
                self.last_frame_time.as_secs_f64() * 1000.0,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
