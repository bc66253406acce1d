//! Terminal front end using crossterm
//!
//! Draws a `MemoryHost` (colored text, caret, suggestion list) and reads
//! keys. The host's screen units are pixel-like: each terminal cell is
//! `CELL_WIDTH` x `CELL_HEIGHT` units.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::host::Host;
use crate::memory::MemoryHost;
use crate::syntax::Color;

/// Host units per terminal column
pub const CELL_WIDTH: i32 = 8;
/// Host units per terminal row
pub const CELL_HEIGHT: i32 = 16;

/// Number of suggestions drawn at once
const POPUP_ROWS: usize = 5;

/// Map a palette color onto the terminal's colors
pub fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Yellow => style::Color::Yellow,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Magenta => style::Color::Magenta,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::Cyan,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::Grey => style::Color::Grey,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::White => style::Color::White,
    }
}

/// Row of the first suggestion for a popup anchored at `y`
///
/// Rounds up so that a small vertical offset lands below the caret row.
fn anchor_row(y: i32) -> u16 {
    ((y.max(0) + CELL_HEIGHT - 1) / CELL_HEIGHT) as u16
}

/// Write every line of `host` with its colors, without entering raw mode
pub fn write_highlighted<W: Write>(out: &mut W, host: &MemoryHost) -> Result<()> {
    for (index, line) in host.lines().iter().enumerate() {
        let colors = host.line_colors(index);
        let mut current = None;
        for (ch, color) in line.chars().zip(colors) {
            if current != Some(color) {
                queue!(out, SetForegroundColor(term_color(color)))?;
                current = Some(color);
            }
            queue!(out, Print(ch))?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

/// Terminal wrapper for the interactive editor
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(Self { cols, rows })
    }

    /// Redraw buffer, suggestions, status line, and caret
    pub fn draw(&mut self, host: &MemoryHost, status: &str) -> Result<()> {
        let mut out = io::stdout();
        queue!(out, cursor::Hide, terminal::Clear(ClearType::All))?;

        let text_rows = self.rows.saturating_sub(1) as usize;
        for (row, line) in host.lines().iter().take(text_rows).enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            let colors = host.line_colors(row);
            for (ch, color) in line.chars().zip(colors).take(self.cols as usize) {
                queue!(out, SetForegroundColor(term_color(color)), Print(ch))?;
            }
        }
        queue!(out, ResetColor)?;

        if let Some(popup) = host.popup() {
            let col = (popup.anchor.x.max(0) / CELL_WIDTH) as u16;
            let top = anchor_row(popup.anchor.y);
            let first = popup.selected.saturating_sub(POPUP_ROWS - 1);
            for (i, candidate) in popup.candidates.iter().enumerate().skip(first).take(POPUP_ROWS) {
                let row = top + (i - first) as u16;
                if row as usize >= text_rows {
                    break;
                }
                queue!(out, cursor::MoveTo(col, row), SetAttribute(Attribute::Reverse))?;
                if i == popup.selected {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                queue!(out, Print(format!(" {} ", candidate)), SetAttribute(Attribute::Reset))?;
            }
        }

        queue!(
            out,
            cursor::MoveTo(0, self.rows.saturating_sub(1)),
            SetAttribute(Attribute::Dim),
            Print(status),
            SetAttribute(Attribute::Reset)
        )?;

        let caret = host.caret_position();
        queue!(
            out,
            cursor::MoveTo((caret.x / CELL_WIDTH) as u16, (caret.y / CELL_HEIGHT) as u16),
            cursor::Show
        )?;
        out.flush()?;
        Ok(())
    }

    /// Read a key event (blocking)
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(key_event),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                }
                _ => {}
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
