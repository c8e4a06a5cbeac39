//! Short surface roots fanning out from the trunk base.

use super::trunk::TrunkWaypoint;
use crate::canvas::Canvas;
use crate::colors::glyphs;
use rand::Rng;
use std::f64::consts::PI;

const DROP_PROBABILITY: f64 = 0.3;
const ANGLE_JITTER: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    /// 1 = thin, 2 = thick
    pub thickness: u8,
}

impl Root {
    pub fn is_thick(&self) -> bool {
        self.thickness > 1
    }
}

/// 4-6 roots spread over the half circle below the base, starting at the
/// edge of the trunk's cross-section.
pub fn build_roots<R: Rng + ?Sized>(base: &TrunkWaypoint, rng: &mut R) -> Vec<Root> {
    let count = rng.gen_range(4..=6);
    let trunk_radius = base.thickness / 2.0;

    (0..count)
        .map(|i| {
            // 0 points left, PI points right, PI/2 straight down
            let angle = PI * (i as f64 + 0.5) / count as f64 + rng.gen_range(-ANGLE_JITTER..=ANGLE_JITTER);
            let length = rng.gen_range(3..=7) as f64;
            let (dir_x, dir_y) = (-angle.cos(), angle.sin().max(0.0));

            let start_x = base.x + (dir_x * trunk_radius).round() as i32;
            let start_y = base.y;
            Root {
                start_x,
                start_y,
                end_x: start_x + (dir_x * length).round() as i32,
                end_y: start_y + (dir_y * length * 0.5).round() as i32,
                thickness: if rng.gen_bool(0.5) { 2 } else { 1 },
            }
        })
        .collect()
}

/// Walk each root sideways, sometimes dropping a row, never climbing.
/// Only background and soil cells are painted.
pub fn rasterize_roots<R: Rng + ?Sized>(canvas: &mut Canvas, roots: &[Root], rng: &mut R) {
    for root in roots {
        let ch = if root.is_thick() { glyphs::ROOT_THICK } else { glyphs::ROOT_THIN };
        let step = (root.end_x - root.start_x).signum();
        let (mut x, mut y) = (root.start_x, root.start_y);

        loop {
            canvas.set_if(x, y, ch, glyphs::is_open);
            if x == root.end_x {
                break;
            }
            x += step;
            if y < root.end_y && rng.gen_bool(DROP_PROBABILITY) {
                y += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base() -> TrunkWaypoint {
        TrunkWaypoint { x: 40, y: 20, thickness: 8.0, progress: 0.0 }
    }

    #[test]
    fn root_count_and_length() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roots = build_roots(&base(), &mut rng);
            assert!((4..=6).contains(&roots.len()));
            for r in &roots {
                assert!(r.end_y >= r.start_y);
                assert!((r.end_x - r.start_x).abs() <= 7);
                assert!(r.thickness == 1 || r.thickness == 2);
            }
        }
    }

    #[test]
    fn roots_fan_both_ways() {
        let mut rng = StdRng::seed_from_u64(4);
        let roots = build_roots(&base(), &mut rng);
        assert!(roots.iter().any(|r| r.end_x < 40));
        assert!(roots.iter().any(|r| r.end_x > 40));
    }

    #[test]
    fn roots_never_overwrite_solid_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut canvas = Canvas::new(80, 30);
        for x in 0..80 {
            canvas.set(x, 20, glyphs::SOIL_DARK);
            canvas.set(x, 21, glyphs::POT_RIM);
        }
        canvas.set(40, 20, glyphs::TRUNK_BANDS[0]);
        let roots = build_roots(&base(), &mut rng);
        rasterize_roots(&mut canvas, &roots, &mut rng);

        assert_eq!(canvas.get(40, 20), Some(glyphs::TRUNK_BANDS[0]));
        assert!(canvas.row_string(21).chars().all(|c| c == glyphs::POT_RIM));
        let row = canvas.row_string(20);
        assert!(row.contains(glyphs::ROOT_THICK) || row.contains(glyphs::ROOT_THIN));
    }
}
