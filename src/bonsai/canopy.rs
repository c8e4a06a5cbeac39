//! Foliage canopies: stippled mushroom caps over every branch tip and the apex.

use super::branch::Branch;
use super::trunk::TrunkWaypoint;
use crate::canvas::Canvas;
use crate::colors::glyphs;
use rand::Rng;

const MIN_WIDTH: f64 = 12.0;
const MIN_HEIGHT: f64 = 8.0;
/// How much of the horizontal radius is lost from top to bottom
const TAPER: f64 = 0.6;
/// The radius never shrinks below this share of the base radius
const MIN_RADIUS_SHARE: f64 = 0.3;

/// Elliptical leaf cap, wide on top and narrowing toward the bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafCanopy {
    pub center_x: i32,
    pub center_y: i32,
    pub width: i32,
    pub height: i32,
    /// Stipple density in (0, 1]
    pub density: f64,
}

impl LeafCanopy {
    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Horizontal radius at `height_progress` (0 = top row, 1 = bottom row).
    pub fn effective_radius(&self, height_progress: f64) -> f64 {
        let base = self.half_width();
        (base * (1.0 - height_progress * TAPER)).max(base * MIN_RADIUS_SHARE)
    }

    /// Normalized elliptical distance of offset `(dx, dy)` from the centre,
    /// together with its height progress. Inside the cap when the distance is <= 1.
    pub fn distance(&self, dx: i32, dy: i32) -> (f64, f64) {
        let half_h = self.half_height();
        let height_progress = ((dy as f64 + half_h) / self.height as f64).clamp(0.0, 1.0);
        let rx = self.effective_radius(height_progress);
        let nx = dx as f64 / rx;
        let ny = dy as f64 / half_h;
        ((nx * nx + ny * ny).sqrt(), height_progress)
    }
}

fn sized_canopy<R: Rng + ?Sized>(x: i32, y: i32, span: f64, rng: &mut R) -> LeafCanopy {
    let width = (span * rng.gen_range(1.0..=2.0)).max(MIN_WIDTH);
    let height = (width * rng.gen_range(0.6..=1.2)).max(MIN_HEIGHT);
    let density = rng.gen_range(0.70..=0.95);

    let width = width.round() as i32;
    let height = height.round() as i32;
    LeafCanopy {
        center_x: x,
        center_y: y - height / 2,
        width,
        height,
        density,
    }
}

/// Cap sized from the branch length, sitting on the branch tip.
pub fn build_branch_canopy<R: Rng + ?Sized>(branch: &Branch, rng: &mut R) -> LeafCanopy {
    sized_canopy(branch.end_x, branch.end_y, branch.length as f64, rng)
}

/// Cap sized from a fifth of the trunk length, sitting on the apex.
pub fn build_apex_canopy<R: Rng + ?Sized>(apex: &TrunkWaypoint, trunk_length: i32, rng: &mut R) -> LeafCanopy {
    sized_canopy(apex.x, apex.y, trunk_length as f64 / 5.0, rng)
}

/// Palette tier by vertical position: dense on top, light underneath.
fn canopy_tier(height_progress: f64) -> &'static [char; 4] {
    if height_progress < 1.0 / 3.0 {
        &glyphs::CANOPY_DENSE
    } else if height_progress < 2.0 / 3.0 {
        &glyphs::CANOPY_MEDIUM
    } else {
        &glyphs::CANOPY_LIGHT
    }
}

/// Stipple the cap into background cells only.
pub fn rasterize_canopy<R: Rng + ?Sized>(canvas: &mut Canvas, canopy: &LeafCanopy, rng: &mut R) {
    let reach_x = canopy.half_width().ceil() as i32;
    let reach_y = canopy.half_height().ceil() as i32;

    for dy in -reach_y..=reach_y {
        for dx in -reach_x..=reach_x {
            let (distance, height_progress) = canopy.distance(dx, dy);
            if distance > 1.0 {
                continue;
            }

            let chance = (canopy.density * (1.2 - distance) * (1.1 - height_progress * 0.25)).clamp(0.0, 1.0);
            if !rng.gen_bool(chance) {
                continue;
            }

            let tier = canopy_tier(height_progress);
            let ch = tier[rng.gen_range(0..tier.len())];
            canvas.set_if(canopy.center_x + dx, canopy.center_y + dy, ch, |c| c == glyphs::BACKGROUND);
        }
    }
}
