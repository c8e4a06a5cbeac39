//! Trunk synthesis: an S-curve of tapering waypoints from the soil to the apex.

use super::pot::Pot;
use super::raster::{lerp, stamp_disk, walk_segment};
use crate::canvas::Canvas;
use crate::colors::glyphs;
use crate::config::Style;
use rand::Rng;
use std::f64::consts::PI;

/// Waypoints keep this many columns from either canvas edge
pub const EDGE_MARGIN: i32 = 10;
/// Trunk is at least this share of the canvas height
const MIN_LENGTH_SHARE: f64 = 0.4;
const MIN_WAYPOINTS: usize = 15;
const MIN_THICKNESS: f64 = 2.0;
/// Thickness lost between base and apex, as a share of the base
const TAPER: f64 = 0.75;
/// Wave amplitude lost between base and apex
const DAMPING: f64 = 0.3;

/// A control point along the trunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkWaypoint {
    pub x: i32,
    pub y: i32,
    pub thickness: f64,
    /// 0 at the base, 1 at the apex
    pub progress: f64,
}

/// The synthesized trunk: waypoints from base to apex plus the length they span.
#[derive(Debug, Clone, PartialEq)]
pub struct Trunk {
    pub waypoints: Vec<TrunkWaypoint>,
    pub length: i32,
}

impl Trunk {
    pub fn base(&self) -> &TrunkWaypoint {
        &self.waypoints[0]
    }

    pub fn apex(&self) -> &TrunkWaypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }
}

/// Target trunk length: 40% of the canvas plus the style offset, never taller
/// than the space above the base row.
fn trunk_length(canvas_height: usize, base_y: i32, offset: i32) -> i32 {
    let floor = (canvas_height as f64 * MIN_LENGTH_SHARE).ceil() as i32;
    (floor + offset).min(base_y).max(1)
}

/// Synthesize the trunk waypoints for a pot on a `canvas_width x canvas_height` canvas.
pub fn build_trunk_waypoints<R: Rng + ?Sized>(
    pot: &Pot,
    canvas_width: usize,
    canvas_height: usize,
    style: Style,
    rng: &mut R,
) -> Trunk {
    let params = style.params();

    let base_x = pot.center_x();
    let base_y = pot.soil_row();

    let offset = rng.gen_range(params.length_offset);
    let length = trunk_length(canvas_height, base_y, offset);
    let base_thickness = rng.gen_range(params.base_thickness) as f64;
    let amplitude = rng.gen_range(params.amplitude);
    let frequency = rng.gen_range(params.frequency);
    let phase = rng.gen_range(0.0..2.0 * PI);
    let count = MIN_WAYPOINTS + rng.gen_range(0..=9);

    let wave = |p: f64| (p * PI * frequency + phase).sin() * amplitude * (1.0 - p * DAMPING);
    // Pin the curve to the pot centre at the base and let the anchor fade out.
    let anchor = wave(0.0);

    let min_x = EDGE_MARGIN;
    let max_x = (canvas_width as i32 - EDGE_MARGIN).max(min_x);

    let waypoints = (0..count)
        .map(|i| {
            let progress = i as f64 / (count - 1) as f64;
            let shift = wave(progress) - anchor * (1.0 - progress);
            TrunkWaypoint {
                x: (base_x + shift.round() as i32).clamp(min_x, max_x),
                y: base_y - (progress * length as f64).round() as i32,
                thickness: (base_thickness * (1.0 - progress * TAPER)).max(MIN_THICKNESS),
                progress,
            }
        })
        .collect();

    Trunk { waypoints, length }
}

/// Texture band for a trunk cell. The ring ratio is nudged by a sine of the
/// horizontal offset and the trunk progress so the bands never form clean circles.
fn trunk_glyph(dx: i32, ratio: f64, progress: f64) -> char {
    let bands = glyphs::TRUNK_BANDS;
    let wobble = (dx as f64 * 0.9 + progress * 7.0).sin() * 0.08;
    let ratio = (ratio + wobble).clamp(0.0, 0.999);
    bands[(ratio * bands.len() as f64) as usize]
}

/// Stamp the trunk along every waypoint pair. The trunk paints over open
/// cells and its own earlier stamps, never over the pot.
pub fn rasterize_trunk(canvas: &mut Canvas, trunk: &Trunk) {
    let can_replace = |c: char| glyphs::is_open(c) || glyphs::is_trunk(c);

    for pair in trunk.waypoints.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        walk_segment(a.x, a.y, b.x, b.y, |x, y, t| {
            let radius = lerp(a.thickness, b.thickness, t) / 2.0;
            let progress = lerp(a.progress, b.progress, t);
            stamp_disk(canvas, x, y, radius, can_replace, |dx, _, ratio| {
                trunk_glyph(dx, ratio, progress)
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonsai::pot::build_pot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn trunk_for(seed: u64, style: Style) -> (Pot, Trunk) {
        let mut rng = StdRng::seed_from_u64(seed);
        let pot = build_pot(90, 35);
        let trunk = build_trunk_waypoints(&pot, 90, 35, style, &mut rng);
        (pot, trunk)
    }

    #[test]
    fn waypoints_run_from_base_to_apex() {
        for seed in 0..20 {
            let (pot, trunk) = trunk_for(seed, Style::Default);
            let n = trunk.waypoints.len();
            assert!((15..=24).contains(&n));
            assert_eq!(trunk.base().x, pot.center_x());
            assert_eq!(trunk.base().y, pot.top - 1);
            assert_eq!(trunk.base().progress, 0.0);
            assert_eq!(trunk.apex().progress, 1.0);
            assert!(trunk.apex().y < pot.top);
            assert!(trunk.apex().y >= 0);
        }
    }

    #[test]
    fn waypoints_are_monotone_and_clamped() {
        for style in Style::ALL {
            for seed in 0..10 {
                let (_, trunk) = trunk_for(seed, style);
                for w in trunk.waypoints.windows(2) {
                    assert!(w[1].y <= w[0].y);
                    assert!(w[1].thickness <= w[0].thickness);
                }
                for wp in &trunk.waypoints {
                    assert!(wp.x >= EDGE_MARGIN && wp.x <= 90 - EDGE_MARGIN);
                    assert!(wp.thickness >= MIN_THICKNESS);
                }
            }
        }
    }

    #[test]
    fn length_is_at_least_forty_percent() {
        for style in Style::ALL {
            let (_, trunk) = trunk_for(5, style);
            assert!(trunk.length >= 14, "{} -> {}", style, trunk.length);
        }
    }

    #[test]
    fn style_offset_lengthens_trunk() {
        assert_eq!(trunk_length(100, 90, 0), 40);
        assert_eq!(trunk_length(100, 90, 8), 48);
        // Capped by the rows above the soil.
        assert_eq!(trunk_length(100, 42, 8), 42);

        let lengths: std::collections::HashSet<i32> = (0..40)
            .map(|seed| trunk_for(seed, Style::Wild).1.length)
            .collect();
        assert!(lengths.len() > 1, "wild trunks never vary: {:?}", lengths);
    }

    #[test]
    fn glyph_bands_go_core_to_edge() {
        assert_eq!(trunk_glyph(0, 0.0, 0.0), glyphs::TRUNK_BANDS[0]);
        assert_eq!(trunk_glyph(0, 1.0, 0.0), glyphs::TRUNK_BANDS[6]);
    }

    #[test]
    fn rasterized_trunk_spares_pot() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut canvas = Canvas::new(90, 35);
        let pot = build_pot(90, 35);
        crate::bonsai::pot::rasterize_pot(&mut canvas, &pot, &mut rng);
        let trunk = build_trunk_waypoints(&pot, 90, 35, Style::Mature, &mut rng);
        rasterize_trunk(&mut canvas, &trunk);

        assert_eq!(canvas.get(pot.left, pot.top), Some(glyphs::POT_CORNER));
        assert_eq!(canvas.get(pot.center_x(), pot.top), Some(glyphs::POT_RIM));
        let apex = trunk.apex();
        assert!(glyphs::is_trunk(canvas.get(apex.x, apex.y).unwrap()));
        let base = trunk.base();
        assert!(glyphs::is_trunk(canvas.get(base.x, base.y).unwrap()));
    }
}
