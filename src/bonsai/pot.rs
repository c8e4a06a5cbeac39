//! Pot geometry, the pot itself and the soil surface above it.

use crate::canvas::Canvas;
use crate::colors::glyphs;
use rand::Rng;

/// Chance that a soil cell uses the lighter glyph
const LIGHT_SOIL_PROBABILITY: f64 = 0.3;

/// Pot rectangle in grid coordinates, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pot {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Pot {
    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    /// Row holding the soil surface
    pub fn soil_row(&self) -> i32 {
        self.top - 1
    }
}

/// Pot sized from the canvas: 3/4 of the width, `max(4, height/10)` rows,
/// centred and resting on the last row.
pub fn build_pot(width: usize, height: usize) -> Pot {
    let width = width as i32;
    let height = height as i32;

    let pot_width = (width * 3 / 4).max(3);
    let pot_height = (height / 10).max(4);

    let left = (width - pot_width) / 2;
    let bottom = height - 1;

    Pot {
        left,
        right: left + pot_width - 1,
        top: bottom - pot_height + 1,
        bottom,
    }
}

/// Draw the pot body, feet (when there is a row free below it) and the soil row.
pub fn rasterize_pot<R: Rng + ?Sized>(canvas: &mut Canvas, pot: &Pot, rng: &mut R) {
    for y in pot.top..=pot.bottom {
        for x in pot.left..=pot.right {
            let on_left = x == pot.left;
            let on_right = x == pot.right;
            let on_top = y == pot.top;
            let on_bottom = y == pot.bottom;

            let ch = match (on_left || on_right, on_top, on_bottom) {
                (true, true, _) | (true, _, true) => glyphs::POT_CORNER,
                (false, true, _) => glyphs::POT_RIM,
                (false, _, true) => glyphs::POT_BASE,
                (true, false, false) if on_left => glyphs::POT_LEFT,
                (true, false, false) => glyphs::POT_RIGHT,
                _ => glyphs::POT_BODY,
            };
            canvas.set(x, y, ch);
        }
    }

    let foot_y = pot.bottom + 1;
    if foot_y < canvas.height() as i32 {
        let run = (pot.width() / 8).max(2);
        for i in 0..run {
            canvas.set(pot.left + 1 + i, foot_y, glyphs::POT_FOOT);
            canvas.set(pot.right - 1 - i, foot_y, glyphs::POT_FOOT);
        }
    }

    let soil_y = pot.soil_row();
    for x in pot.left..=pot.right {
        let ch = if rng.gen_bool(LIGHT_SOIL_PROBABILITY) {
            glyphs::SOIL_LIGHT
        } else {
            glyphs::SOIL_DARK
        };
        canvas.set(x, soil_y, ch);
    }
}
