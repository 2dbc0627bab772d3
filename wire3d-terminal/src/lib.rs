/// Terminal front end: a character-cell surface and a key-driven viewer loop
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info, warn};
use std::io::{self, stdout, Write};
use wire3d_core::{AppState, Command, Movement, Rotation};

pub mod renderer;

pub use renderer::CellSurface;

/// What a terminal event asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Maps a key to a camera command.
///
/// Arrows move sideways and along the view axis, `i`/`k` move up and down,
/// `a`/`d` yaw and `w`/`s` pitch.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::Move(Movement::Left),
        KeyCode::Right => Command::Move(Movement::Right),
        KeyCode::Up => Command::Move(Movement::Forward),
        KeyCode::Down => Command::Move(Movement::Backward),
        KeyCode::Char('i') => Command::Move(Movement::Up),
        KeyCode::Char('k') => Command::Move(Movement::Down),
        KeyCode::Char('a') => Command::Rotate(Rotation::YawLeft),
        KeyCode::Char('d') => Command::Rotate(Rotation::YawRight),
        KeyCode::Char('w') => Command::Rotate(Rotation::PitchUp),
        KeyCode::Char('s') => Command::Rotate(Rotation::PitchDown),
        _ => return None,
    };
    Some(command)
}

/// Decodes a terminal event. The bottom row is kept for the HUD.
pub fn input_for_event(event: &Event) -> Option<Input> {
    match *event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            code => command_for_key(code).map(Input::Command),
        },
        Event::Resize(columns, rows) => {
            let (width, height) = canvas_size(columns, rows);
            Some(Input::Command(Command::Resize { width, height }))
        }
        _ => None,
    }
}

/// Canvas cells for a terminal of the given size: one row is kept for the
/// HUD and neither side drops below one cell, matching
/// [`DisplaySettings::resize`](wire3d_core::DisplaySettings::resize).
pub fn canvas_size(columns: u16, rows: u16) -> (u32, u32) {
    (
        u32::from(columns.max(1)),
        u32::from(rows.saturating_sub(1).max(1)),
    )
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    state: AppState,
    surface: CellSurface,
    running: bool,
    last_error: Option<String>,
}

impl TerminalApp {
    /// Sizes the canvas to the current terminal, overriding the display
    /// dimensions in `state`.
    pub fn new(state: AppState) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_terminal_size(state, columns, rows))
    }

    /// Like [`TerminalApp::new`] for a terminal of `columns` x `rows` cells.
    pub fn with_terminal_size(mut state: AppState, columns: u16, rows: u16) -> Self {
        let (width, height) = canvas_size(columns, rows);
        state.apply(Command::Resize { width, height });

        Self {
            surface: CellSurface::new(state.display.width as usize, state.display.height as usize),
            state,
            running: true,
            last_error: None,
        }
    }

    pub fn surface(&self) -> &CellSurface {
        &self.surface
    }

    pub fn state(&self) -> &AppState {
        &self.state
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
        info!("viewer started at {}x{}", self.surface.width(), self.surface.height());
        // Frames only change on input, so block on events
        while self.running {
            self.render()?;
            let event = event::read()?;
            self.handle_event(&event);
        }
        Ok(())
    }

    /// Applies one terminal event to the viewer.
    pub fn handle_event(&mut self, event: &Event) {
        match input_for_event(event) {
            Some(Input::Quit) => self.running = false,
            Some(Input::Command(command)) => {
                self.state.apply(command);
                if let Command::Resize { .. } = command {
                    let display = self.state.display;
                    debug!("terminal resized to {}x{}", display.width, display.height);
                    self.surface
                        .resize(display.width as usize, display.height as usize);
                }
            }
            None => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        match self.state.render(&mut self.surface) {
            Ok(_) => self.last_error = None,
            Err(e) => {
                warn!("showing an empty frame: {e}");
                self.last_error = Some(e.to_string());
            }
        }

        let mut stdout = stdout();
        self.surface.draw(&mut stdout)?;

        // HUD
        let (columns, _) = terminal::size()?;
        let hud: String = self.hud_line().chars().take(usize::from(columns)).collect();
        let color = if self.last_error.is_some() {
            Color::Red
        } else {
            Color::Yellow
        };
        queue!(
            stdout,
            cursor::MoveTo(0, self.surface.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(color),
            Print(hud),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    /// Camera position, orientation rows and the last frame error.
    pub fn hud_line(&self) -> String {
        let p = self.state.camera.position;
        let o = self.state.camera.orientation;
        let rows = (0..3)
            .map(|r| format!("[{:.2} {:.2} {:.2}]", o[(r, 0)], o[(r, 1)], o[(r, 2)]))
            .collect::<Vec<_>>()
            .join(" ");
        let mut hud = format!("pos ({:.1}, {:.1}, {:.1}) | rot {rows}", p.x, p.y, p.z);
        match &self.last_error {
            Some(e) => hud.push_str(&format!(" | error: {e}")),
            None => hud.push_str(" | arrows/i/k move, a/d/w/s turn, q quit"),
        }
        hud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            command_for_key(KeyCode::Up),
            Some(Command::Move(Movement::Forward))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('k')),
            Some(Command::Move(Movement::Down))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('d')),
            Some(Command::Rotate(Rotation::YawRight))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('s')),
            Some(Command::Rotate(Rotation::PitchDown))
        );
        assert_eq!(command_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(input_for_event(&key(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(input_for_event(&key(KeyCode::Esc)), Some(Input::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input_for_event(&ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(input_for_event(&release), None);
    }

    #[test]
    fn test_tiny_terminal_keeps_surface_and_display_in_step() {
        assert_eq!(canvas_size(0, 1), (1, 1));

        let mut app = TerminalApp::with_terminal_size(AppState::default(), 40, 1);
        assert_eq!(app.surface().height(), 1);
        assert_eq!(app.state().display.height, 1);

        app.handle_event(&Event::Resize(0, 0));
        assert_eq!(app.surface().width(), 1);
        assert_eq!(app.surface().height(), 1);
        assert_eq!(app.state().display.width, 1);
        assert_eq!(app.state().display.height, 1);

        app.handle_event(&Event::Resize(120, 41));
        assert_eq!(app.surface().width(), 120);
        assert_eq!(app.surface().height(), 40);
        assert_eq!(app.state().display.height, 40);
    }

    #[test]
    fn test_resize_reserves_hud_row() {
        assert_eq!(
            input_for_event(&Event::Resize(100, 30)),
            Some(Input::Command(Command::Resize {
                width: 100,
                height: 29
            }))
        );
    }
}
