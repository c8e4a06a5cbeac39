use crate::bonsai::{generate_with_timeout, Bonsai, DEFAULT_TIMEOUT};
use crate::colors::ColorTable;
use crate::config::GrowConfig;
use crate::error::Result;
use crate::export;
use crate::help::{show_help_modal, GROW_HELP};
use crate::settings::Settings;
use crate::terminal::{self, Terminal};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::io::{self, Write};
use std::path::PathBuf;

/// Canvas used when neither flags, settings nor the terminal give a size
const FALLBACK_SIZE: (usize, usize) = (90, 35);

fn fresh_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) // Fallback seed for misconfigured system clocks
}

/// Flags first, then settings, then the given terminal size, then the fallback.
fn resolve_size(config: &GrowConfig, settings: &Settings, term_size: Option<(usize, usize)>) -> (usize, usize) {
    let (term_w, term_h) = term_size.unwrap_or(FALLBACK_SIZE);
    let width = config.width.or(settings.grow.width).unwrap_or(term_w);
    let height = config.height.or(settings.grow.height).unwrap_or(term_h);
    (width, height)
}

/// Run the bonsai generator
pub fn run(config: GrowConfig) -> Result<()> {
    let settings = Settings::load();
    let seed = config.seed.unwrap_or_else(fresh_seed);

    if config.print {
        run_print_mode(&config, &settings, seed)
    } else {
        run_interactive(&config, &settings, seed)
    }
}

fn grow(config: &GrowConfig, settings: &Settings, width: usize, height: usize, seed: u64) -> Result<Bonsai> {
    let style = config.style.or(settings.grow.style);
    generate_with_timeout(width, height, seed, style, DEFAULT_TIMEOUT)
}

fn save(settings: &Settings, bonsai: &Bonsai, requested: Option<PathBuf>) -> Result<PathBuf> {
    let path = export::resolve_save_path(requested, settings.export.directory.as_deref(), chrono::Local::now());
    export::save_text(&bonsai.canvas, &path)?;
    Ok(path)
}

fn run_print_mode(config: &GrowConfig, settings: &Settings, seed: u64) -> Result<()> {
    let term_size = crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (w as usize, (h as usize).saturating_sub(1)));
    let (width, height) = resolve_size(config, settings, term_size);

    let bonsai = grow(config, settings, width, height, seed)?;
    tracing::debug!(seed, style = %bonsai.style, "printing bonsai");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.color {
        terminal::write_ansi(&mut out, &bonsai.canvas, bonsai.colors)?;
    } else {
        terminal::write_plain(&mut out, &bonsai.canvas)?;
    }
    out.flush()?;

    if let Some(requested) = config.save.clone() {
        let path = save(settings, &bonsai, requested)?;
        eprintln!("Saved to {}", path.display());
    }

    Ok(())
}

fn draw_frame(term: &mut Terminal, bonsai: &Bonsai, seed: u64, status: &str) -> io::Result<()> {
    term.clear();
    term.draw_canvas(&bonsai.canvas, bonsai.colors, 0, 0);

    let (_, height) = term.size();
    let line = format!(" seed {}  style {}  {}  ? help", seed, bonsai.style, status);
    term.set_str(0, height as i32 - 1, &line, Some(Color::DarkGrey), false);

    term.clear_screen()?;
    term.render()
}

fn run_interactive(config: &GrowConfig, settings: &Settings, initial_seed: u64) -> Result<()> {
    let mut seed = initial_seed;
    let mut term = Terminal::new()?;

    loop {
        term.refresh_size()?;
        let (tw, th) = term.size();
        // Leave the last row for the status line.
        let (width, height) = resolve_size(config, settings, Some((tw as usize, (th as usize).saturating_sub(1))));

        let bonsai = grow(config, settings, width, height, seed)?;
        draw_frame(&mut term, &bonsai, seed, "")?;

        loop {
            let Some(code) = term.wait_key(100)? else {
                continue;
            };
            match code {
                KeyCode::Char('?') => {
                    if show_help_modal(&mut term, GROW_HELP)? {
                        return Ok(());
                    }
                }
                KeyCode::Char('s') => {
                    let status = match save(settings, &bonsai, None) {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(e) => format!("save failed: {}", e),
                    };
                    draw_frame(&mut term, &bonsai, seed, &status)?;
                }
                KeyCode::Char('r') | KeyCode::Char(' ') => {
                    seed = fresh_seed().wrapping_add(seed.wrapping_mul(31));
                    break;
                }
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ => {}
            }
        }
    }
}

/// Print the glyph -> colour table
pub fn print_palette<W: Write>(out: &mut W, colors: &ColorTable, color: bool) -> io::Result<()> {
    for (glyph, rgb) in colors.iter() {
        let shown = if glyph == ' ' { "' '".to_string() } else { glyph.to_string() };
        if color {
            writeln!(
                out,
                "{:>3}  {}  \x1b[48;2;{};{};{}m    \x1b[0m",
                shown,
                rgb.hex(),
                rgb.r,
                rgb.g,
                rgb.b
            )?;
        } else {
            writeln!(out, "{:>3}  {}", shown, rgb.hex())?;
        }
    }
    Ok(())
}
