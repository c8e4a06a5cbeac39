use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

pub const GROW_HELP: &str = "\
BONSAI
─────────────────
r/Space  Grow a new tree
s        Save as text
q/Esc    Quit
?        Close help";

/// Box geometry for a help text: (left, top, inner width, box width, box height)
fn overlay_geometry(width: u16, height: u16, help_text: &str) -> (usize, usize, usize, usize, usize) {
    let inner = help_text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = inner + 4;
    let box_height = help_text.lines().count() + 2;
    let left = (width as usize).saturating_sub(box_width) / 2;
    let top = (height as usize).saturating_sub(box_height) / 2;
    (left, top, inner, box_width, box_height)
}

/// Show a modal help overlay on top of the current frame.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_overlay(width, height, help_text)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore the frame underneath from the back buffer.
    term.render()?;
    Ok(false)
}

fn draw_overlay(width: u16, height: u16, help_text: &str) -> io::Result<()> {
    let (left, top, inner, box_width, box_height) = overlay_geometry(width, height, help_text);
    let horizontal = "─".repeat(box_width - 2);
    let mut out = stdout();

    queue!(out, SetForegroundColor(Color::White))?;
    queue!(out, MoveTo(left as u16, top as u16), Print(format!("┌{}┐", horizontal)))?;

    for (i, line) in help_text.lines().enumerate() {
        let y = (top + 1 + i) as u16;
        let padding = inner.saturating_sub(line.chars().count());
        queue!(
            out,
            MoveTo(left as u16, y),
            SetForegroundColor(Color::White),
            Print('│'),
            SetForegroundColor(Color::Grey),
            Print(format!(" {}{} ", line, " ".repeat(padding))),
            SetForegroundColor(Color::White),
            Print('│')
        )?;
    }

    let bottom = (top + box_height - 1) as u16;
    queue!(out, MoveTo(left as u16, bottom), Print(format!("└{}┘", horizontal)))?;
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}
