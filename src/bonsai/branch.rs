//! Branches: wavy tapering limbs that leave the upper trunk to either side.

use super::raster::{lerp, stamp_disk, walk_segment};
use super::trunk::{Trunk, TrunkWaypoint};
use crate::canvas::Canvas;
use crate::colors::glyphs;
use rand::Rng;
use std::f64::consts::PI;

/// Attachment window along the trunk
pub const MIN_ATTACH: f64 = 0.25;
pub const MAX_ATTACH: f64 = 0.9;
const ATTACH_SPAN: f64 = 0.65;
const ATTACH_JITTER: f64 = 0.05;
const SIDE_PROBABILITY: f64 = 0.7;
const MIN_LENGTH: f64 = 20.0;
const MIN_SEGMENTS: usize = 12;
/// Progress after which the tip starts bending upward
const LIFT_START: f64 = 0.6;
/// Tip lift at full progress, as a share of the branch length
const LIFT_SHARE: f64 = 0.2;
/// Columns kept free at the canvas edge
const EDGE_PAD: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub is_left: bool,
    /// Horizontal reach in columns
    pub length: i32,
    pub start_thickness: f64,
    pub end_thickness: f64,
    /// Which attachment point this branch grows from
    pub attach_index: usize,
    /// Trunk progress at the attachment waypoint
    pub attach_progress: f64,
    pub wave_points: Vec<WavePoint>,
}

impl Branch {
    pub fn direction(&self) -> i32 {
        if self.is_left {
            -1
        } else {
            1
        }
    }

    pub fn thickness_at(&self, progress: f64) -> f64 {
        lerp(self.start_thickness, self.end_thickness, progress.clamp(0.0, 1.0))
    }
}

/// Trunk waypoint nearest to `target`, restricted to the attachment window.
fn attachment_waypoint(trunk: &Trunk, target: f64) -> &TrunkWaypoint {
    let in_window = |wp: &&TrunkWaypoint| (MIN_ATTACH..=MAX_ATTACH).contains(&wp.progress);
    let distance = |wp: &TrunkWaypoint| (wp.progress - target).abs();

    trunk
        .waypoints
        .iter()
        .filter(in_window)
        .min_by(|a, b| distance(*a).total_cmp(&distance(*b)))
        .unwrap_or_else(|| {
            // Only reachable with fewer than three waypoints.
            trunk
                .waypoints
                .iter()
                .min_by(|a, b| distance(*a).total_cmp(&distance(*b)))
                .unwrap_or(trunk.apex())
        })
}

/// Pick 1-4 attachment points on the upper trunk and grow a left and/or right
/// branch from each.
pub fn build_branches<R: Rng + ?Sized>(trunk: &Trunk, canvas_width: usize, rng: &mut R) -> Vec<Branch> {
    let count = 1 + rng.gen_range(0..=3);
    let mut branches = Vec::with_capacity(count * 2);

    for i in 0..count {
        let target = (MIN_ATTACH + i as f64 * (ATTACH_SPAN / count as f64)
            + rng.gen_range(-ATTACH_JITTER..=ATTACH_JITTER))
        .clamp(MIN_ATTACH, MAX_ATTACH);
        let anchor = *attachment_waypoint(trunk, target);

        let mut left = rng.gen_bool(SIDE_PROBABILITY);
        let mut right = rng.gen_bool(SIDE_PROBABILITY);
        if !left && !right {
            if rng.gen_bool(0.5) {
                left = true;
            } else {
                right = true;
            }
        }

        for is_left in [true, false] {
            if (is_left && left) || (!is_left && right) {
                branches.push(build_branch(&anchor, i, is_left, trunk.length, canvas_width, rng));
            }
        }
    }

    branches
}

fn build_branch<R: Rng + ?Sized>(
    anchor: &TrunkWaypoint,
    attach_index: usize,
    is_left: bool,
    trunk_length: i32,
    canvas_width: usize,
    rng: &mut R,
) -> Branch {
    let trunk_length = trunk_length as f64;
    let direction = if is_left { -1.0 } else { 1.0 };

    let room = if is_left {
        anchor.x - EDGE_PAD
    } else {
        canvas_width as i32 - 1 - EDGE_PAD - anchor.x
    };
    let wanted = (trunk_length * 2.0 / 3.0 + rng.gen_range(0.0..=trunk_length / 3.0)).max(MIN_LENGTH);
    let length = (wanted.round() as i32).min(room).max(1);

    let start_thickness = anchor.thickness;
    let end_thickness = (start_thickness / 4.0).max(1.0);

    let segments = MIN_SEGMENTS + rng.gen_range(0..=4);
    let amplitude = rng.gen_range(4.0..=8.0);
    let frequency = rng.gen_range(1.0..=1.8);

    // The sway runs along the branch; it may never fold the limb back past the trunk.
    let (min_x, max_x) = if is_left {
        (0, anchor.x)
    } else {
        (anchor.x, canvas_width as i32 - 1)
    };
    let wave_points: Vec<WavePoint> = (0..=segments)
        .map(|k| {
            let p = k as f64 / segments as f64;
            let reach = direction * (length as f64 * p + (p * PI * frequency).sin() * amplitude);
            let lift = if p > LIFT_START {
                ((p - LIFT_START) / (1.0 - LIFT_START)).powi(2) * length as f64 * LIFT_SHARE
            } else {
                0.0
            };
            WavePoint {
                x: (anchor.x + reach.round() as i32).clamp(min_x, max_x),
                y: (anchor.y - lift.round() as i32).clamp(0, anchor.y),
            }
        })
        .collect();

    let tip = wave_points[wave_points.len() - 1];
    Branch {
        start_x: anchor.x,
        start_y: anchor.y,
        end_x: tip.x,
        end_y: tip.y,
        is_left,
        length,
        start_thickness,
        end_thickness,
        attach_index,
        attach_progress: anchor.progress,
        wave_points,
    }
}

/// Glyph for a branch cell: heavy and medium limbs texture by ring, twigs by slope.
fn branch_glyph(thickness: f64, ratio: f64, slope: (i32, i32)) -> char {
    let tier = if thickness >= 6.0 {
        glyphs::BRANCH_THICK
    } else if thickness >= 3.0 {
        glyphs::BRANCH_MEDIUM
    } else {
        return match slope {
            (dx, dy) if dy == 0 || dx == 0 => glyphs::BRANCH_THIN[2],
            (dx, dy) if dx.signum() != dy.signum() => glyphs::BRANCH_THIN[0],
            _ => glyphs::BRANCH_THIN[1],
        };
    };
    tier[((ratio * tier.len() as f64) as usize).min(tier.len() - 1)]
}

/// Stamp a branch along its wave points. Only open cells are painted, so the
/// trunk and earlier branches stay intact.
pub fn rasterize_branch(canvas: &mut Canvas, branch: &Branch) {
    let segments = (branch.wave_points.len() - 1).max(1) as f64;

    for (k, pair) in branch.wave_points.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let slope = (b.x - a.x, b.y - a.y);
        let (p0, p1) = (k as f64 / segments, (k + 1) as f64 / segments);

        walk_segment(a.x, a.y, b.x, b.y, |x, y, t| {
            let thickness = branch.thickness_at(lerp(p0, p1, t));
            stamp_disk(canvas, x, y, thickness / 2.0, glyphs::is_open, |_, _, ratio| {
                branch_glyph(thickness, ratio, slope)
            });
        });
    }
}
