//! Terminal front end: raw mode, input, and the frame loop.

use crate::cli::Settings;
use crate::clock::{Accumulator, FrameClock};
use crate::config::{MAX_FRAME_DT, StepMode};
use crate::error::AppError;
use crate::simulation::Simulation;
use crate::surface::Canvas;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use fastrand::Rng;
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::Duration;
use tracing::{info, warn};

/// Puts the terminal back the way we found it, even on error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if let Err(e) = execute!(out, Show, LeaveAlternateScreen, DisableMouseCapture) {
            warn!(error = %e, "failed to restore terminal screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "failed to disable raw mode");
        }
    }
}

fn is_exit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Cell under a mouse press, whichever button.
fn click_cell(event: &Event) -> Option<(u16, u16)> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            column,
            row,
            ..
        }) => Some((*column, *row)),
        _ => None,
    }
}

/// What the event pump asks the frame loop to do.
enum Input {
    Continue,
    Quit,
}

struct App {
    settings: Settings,
    sim: Simulation,
    canvas: Canvas,
    clock: FrameClock,
    accumulator: Option<Accumulator>,
}

impl App {
    fn new(settings: Settings, cols: u16, rows: u16) -> Self {
        let rng = settings.seed.map_or_else(Rng::new, Rng::with_seed);
        let canvas = Self::canvas(&settings, cols, rows);
        let accumulator = match settings.step {
            StepMode::Variable => None,
            StepMode::Fixed(step) => Some(Accumulator::new(step, 3)),
        };
        Self {
            sim: Simulation::new(settings.sim.clone(), rng),
            clock: FrameClock::new(settings.target_fps, MAX_FRAME_DT),
            canvas,
            accumulator,
            settings,
        }
    }

    fn canvas(settings: &Settings, cols: u16, rows: u16) -> Canvas {
        Canvas::new(
            cols as usize,
            rows as usize,
            settings.sim.screen_width,
            settings.sim.screen_height,
            settings.background,
        )
    }

    fn handle_event(&mut self, event: &Event, out: &mut BufWriter<Stdout>) -> io::Result<Input> {
        match event {
            Event::Key(key) if is_exit(key) => return Ok(Input::Quit),
            Event::Resize(cols, rows) => {
                info!(cols, rows, "terminal resized");
                self.canvas = Self::canvas(&self.settings, *cols, *rows);
                execute!(out, Clear(ClearType::All))?;
            }
            _ => {
                if let Some((column, row)) = click_cell(event) {
                    let at = self.canvas.to_world(column, row);
                    self.sim.spawn(at);
                }
            }
        }
        Ok(Input::Continue)
    }

    fn frame(&mut self, out: &mut BufWriter<Stdout>) -> Result<(), AppError> {
        let dt = self.clock.tick();

        match self.accumulator.as_mut() {
            None => self.sim.update(dt)?,
            Some(acc) => {
                let step = acc.step();
                for _ in 0..acc.advance(dt) {
                    self.sim.update(step)?;
                }
            }
        }

        self.canvas.clear();
        self.sim.render(&mut self.canvas);
        self.sim.prune();

        let fps = self
            .settings
            .show_fps
            .then(|| format!("{}", self.clock.fps() as u32));
        self.canvas.present(out, fps.as_deref())?;
        Ok(())
    }
}

pub fn run(settings: Settings) -> Result<(), AppError> {
    let mut out = BufWriter::with_capacity(1024 * 64, stdout());
    let _guard = TerminalGuard::enter(&mut out)?;

    let (cols, rows) = terminal::size()?;
    info!(cols, rows, fps = settings.target_fps, step = ?settings.step, "starting");
    let mut app = App::new(settings, cols, rows);

    'frames: loop {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Input::Quit = app.handle_event(&event, &mut out)? {
                break 'frames;
            }
        }
        app.frame(&mut out)?;
    }

    info!(
        fireworks = app.sim.fireworks().len(),
        particles = app.sim.particle_count(),
        traces = app.sim.trace_count(),
        "exiting"
    );
    Ok(())
}
