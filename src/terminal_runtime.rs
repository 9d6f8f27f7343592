use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::warn;

use crate::config::{Board, WINDOW_TITLE};
use crate::game::Game;
use crate::renderer::{self, board_fits, required_size};

/// The game's screen: a raw-mode alternate screen drawn through ratatui.
///
/// Dropping it hands the terminal back in its original mode.
pub struct Display {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    board: Board,
}

impl Display {
    /// Takes over the terminal for a session on `board`.
    ///
    /// A terminal smaller than the board is accepted; frames show a resize
    /// notice until it grows.
    pub fn open(board: Board) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE.trim()))
        {
            restore_terminal();
            return Err(error);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(error) => {
                restore_terminal();
                return Err(error);
            }
        };

        let display = Self { terminal, board };
        if !display.fits()? {
            let (width, height) = required_size(board);
            warn!(width, height, "terminal smaller than the board");
        }

        Ok(display)
    }

    /// Whether the whole board is visible at the current terminal size.
    pub fn fits(&self) -> io::Result<bool> {
        let size = self.terminal.size()?;
        Ok(board_fits(
            Rect::new(0, 0, size.width, size.height),
            self.board,
        ))
    }

    /// Draws one frame of `game`.
    pub fn show(&mut self, game: &Game) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, game))
            .map(|_| ())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Restores the terminal before the default panic report is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
