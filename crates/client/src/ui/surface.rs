//! Terminal surface: draws the rendered view using crossterm.

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use thiserror::Error;

use crate::state::{GameView, StatusColor};

use super::render::{render_lines, STATUS_LINE};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}

/// Draws the table onto stdout.
///
/// Full-redraw on every event. The view is small enough that diffing would
/// buy nothing.
pub struct TerminalSurface {
    out: io::Stdout,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    /// Clear the screen and draw the whole view.
    pub fn draw(&mut self, view: &GameView) -> Result<(), SurfaceError> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        for (index, line) in render_lines(view).iter().enumerate() {
            if index == STATUS_LINE {
                if let Some(color) = view.status_color() {
                    execute!(
                        self.out,
                        SetForegroundColor(terminal_color(color)),
                        Print(line),
                        ResetColor,
                        Print("\r\n")
                    )?;
                    continue;
                }
            }
            execute!(self.out, Print(line), Print("\r\n"))?;
        }

        self.out.flush()?;
        Ok(())
    }

    /// Print an attention line below the view, in red.
    ///
    /// Blocks until the message is on screen; event handling resumes after.
    pub fn alert(&mut self, message: &str) -> Result<(), SurfaceError> {
        execute!(
            self.out,
            SetForegroundColor(Color::Red),
            Print(format!("!! {message}\r\n")),
            ResetColor
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn terminal_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Red => Color::Red,
        StatusColor::Yellow => Color::Yellow,
        StatusColor::Gray => Color::Grey,
    }
}
