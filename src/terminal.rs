use crate::canvas::Canvas;
use crate::colors::{glyphs, ColorTable};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

/// A single cell in the terminal buffer
#[derive(Clone)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Enter the alternate screen in raw mode
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;

        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Pick up a terminal resize, reallocating the buffer
    pub fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = size()?;
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
        }
        Ok(())
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Copy a generated canvas into the buffer at `(x, y)`, coloured from `colors`
    pub fn draw_canvas(&mut self, canvas: &Canvas, colors: &ColorTable, x: i32, y: i32) {
        for (row_y, row) in canvas.rows().iter().enumerate() {
            for (col_x, &ch) in row.iter().enumerate() {
                if ch == glyphs::BACKGROUND {
                    continue;
                }
                let fg = Color::from(colors.color_or_default(ch));
                let bold = glyphs::CANOPY_DENSE.contains(&ch);
                self.set(x + col_x as i32, y + row_y as i32, ch, Some(fg), bold);
            }
        }
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        queue_rows(&mut out, &self.buffer)?;
        out.flush()
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some(key_event.code));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Queue `rows` from the top-left corner. Colour and weight escapes are only
/// emitted when they change between printed glyphs; blanks keep the current pen.
pub fn queue_rows<W: Write>(out: &mut W, rows: &[Vec<Cell>]) -> io::Result<()> {
    let mut fg: Option<Color> = None;
    let mut bold = false;

    for (y, row) in rows.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        for cell in row {
            if cell.ch != glyphs::BACKGROUND {
                if cell.bold != bold {
                    let weight = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(out, SetAttribute(weight))?;
                    bold = cell.bold;
                }
                if cell.fg != fg {
                    queue!(out, SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
                    fg = cell.fg;
                }
            }
            queue!(out, Print(cell.ch))?;
        }
    }

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}

/// Write a canvas with 24-bit ANSI colours (for print mode)
pub fn write_ansi<W: Write>(out: &mut W, canvas: &Canvas, colors: &ColorTable) -> io::Result<()> {
    for row in canvas.rows() {
        for &ch in row {
            if ch == glyphs::BACKGROUND {
                write!(out, " ")?;
                continue;
            }

            let c = colors.color_or_default(ch);
            if glyphs::CANOPY_DENSE.contains(&ch) {
                write!(out, "\x1b[1m")?;
            }
            write!(out, "\x1b[38;2;{};{};{}m{}\x1b[0m", c.r, c.g, c.b, ch)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the plain-text export followed by a newline
pub fn write_plain<W: Write>(out: &mut W, canvas: &Canvas) -> io::Result<()> {
    writeln!(out, "{}", canvas.to_text())
}
