//! Thick-line rasterization shared by the trunk and branch builders.

use crate::canvas::Canvas;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Grid cells on the line from `(x0, y0)` to `(x1, y1)`, both ends included.
pub fn line_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);
    let mut points = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Walk a segment, calling `visit(x, y, t)` with `t` the step fraction in `[0, 1]`.
pub fn walk_segment(x0: i32, y0: i32, x1: i32, y1: i32, mut visit: impl FnMut(i32, i32, f64)) {
    let points = line_points(x0, y0, x1, y1);
    let last = (points.len() - 1).max(1) as f64;
    for (i, (x, y)) in points.into_iter().enumerate() {
        visit(x, y, i as f64 / last);
    }
}

/// Stamp a filled disk centred on `(cx, cy)`.
///
/// `glyph(dx, dy, ratio)` picks the glyph for each covered cell, where `ratio`
/// is distance from the centre over the radius. Cells are only written when
/// `can_replace` accepts the glyph already there. Radii below half a cell
/// still cover the centre cell.
pub fn stamp_disk(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    radius: f64,
    can_replace: impl Fn(char) -> bool,
    mut glyph: impl FnMut(i32, i32, f64) -> char,
) {
    let radius = radius.max(0.5);
    let reach = radius.ceil() as i32;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if dist > radius {
                continue;
            }
            let ratio = (dist / radius).min(1.0);
            canvas.set_if(cx + dx, cy + dy, glyph(dx, dy, ratio), &can_replace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_includes_endpoints() {
        let pts = line_points(0, 0, 5, 2);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(5, 2)));
        assert_eq!(pts.len(), 6);
    }

    #[test]
    fn line_is_connected() {
        let pts = line_points(3, 10, -4, 1);
        for w in pts.windows(2) {
            assert!((w[0].0 - w[1].0).abs() <= 1);
            assert!((w[0].1 - w[1].1).abs() <= 1);
        }
    }

    #[test]
    fn degenerate_segment_visits_once() {
        let mut visits = Vec::new();
        walk_segment(2, 2, 2, 2, |x, y, t| visits.push((x, y, t)));
        assert_eq!(visits, vec![(2, 2, 0.0)]);
    }

    #[test]
    fn walk_fractions_span_unit_interval() {
        let mut ts = Vec::new();
        walk_segment(0, 0, 0, 4, |_, _, t| ts.push(t));
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn disk_respects_radius_and_predicate() {
        let mut canvas = Canvas::new(9, 9);
        canvas.set(4, 2, 'x');
        stamp_disk(&mut canvas, 4, 4, 2.0, |c| c == ' ', |_, _, _| 'o');
        assert_eq!(canvas.get(4, 4), Some('o'));
        assert_eq!(canvas.get(6, 4), Some('o'));
        assert_eq!(canvas.get(6, 6), Some(' '));
        assert_eq!(canvas.get(4, 2), Some('x'));
    }

    #[test]
    fn disk_clips_at_edges() {
        let mut canvas = Canvas::new(3, 3);
        stamp_disk(&mut canvas, 0, 0, 3.0, |_| true, |_, _, _| 'o');
        assert_eq!(canvas.get(0, 0), Some('o'));
    }
}
