//! Fixed-size character grid the generation stages draw into.

use crate::colors::glyphs;
use std::collections::BTreeSet;

/// Row-major `height x width` grid of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    /// Create a canvas filled with the background glyph.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![glyphs::BACKGROUND; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Glyph at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Write a glyph. Out-of-range writes are dropped and return false.
    pub fn set(&mut self, x: i32, y: i32, ch: char) -> bool {
        if self.in_bounds(x, y) {
            self.cells[y as usize][x as usize] = ch;
            true
        } else {
            false
        }
    }

    /// Write only if the current glyph satisfies `can_replace`.
    pub fn set_if(&mut self, x: i32, y: i32, ch: char, can_replace: impl Fn(char) -> bool) -> bool {
        match self.get(x, y) {
            Some(current) if can_replace(current) => self.set(x, y, ch),
            _ => false,
        }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.cells
    }

    pub fn row_string(&self, y: usize) -> String {
        self.cells[y].iter().collect()
    }

    /// Distinct glyphs present on the canvas.
    pub fn glyphs(&self) -> BTreeSet<char> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Plain-text export: rows top to bottom joined by `\n`, no trailing newline.
    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_blank() {
        let canvas = Canvas::new(5, 3);
        assert_eq!(canvas.rows().len(), 3);
        assert!(canvas.rows().iter().all(|r| r.len() == 5));
        assert_eq!(canvas.glyphs().into_iter().collect::<Vec<_>>(), vec![' ']);
    }

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4);
        assert!(!canvas.set(-1, 0, 'x'));
        assert!(!canvas.set(0, 4, 'x'));
        assert!(canvas.set(3, 3, 'x'));
        assert_eq!(canvas.get(3, 3), Some('x'));
        assert_eq!(canvas.get(4, 3), None);
    }

    #[test]
    fn set_if_respects_predicate() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set(0, 0, '#');
        assert!(!canvas.set_if(0, 0, 'y', glyphs::is_open));
        assert!(canvas.set_if(1, 0, 'y', glyphs::is_open));
        assert_eq!(canvas.row_string(0), "#y");
    }

    #[test]
    fn text_export_round_trips() {
        let mut canvas = Canvas::new(3, 2);
        canvas.set(1, 0, 'a');
        canvas.set(2, 1, 'b');
        let text = canvas.to_text();
        assert_eq!(text, " a \n  b");
        let rows: Vec<&str> = text.split('\n').collect();
        assert_eq!(rows, vec![canvas.row_string(0), canvas.row_string(1)]);
    }
}
