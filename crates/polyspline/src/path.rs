//! SVG path-fragment builders.
//!
//! Every function is a pure emitter: numeric arguments are rounded to four
//! fractional digits to bound string length and avoid float noise, and the
//! output is an append-only fragment following the SVG path mini-language.
//! An empty string means "nothing to draw"; consumers must tolerate it.

use crate::geom::{Bounds, Point, cos_deg, point, sin_deg};
use crate::measure::PathOracle;

/// Points closer than this to the previously emitted point are skipped by
/// [`polyline`]. Trades fidelity for path-string size on dense point arrays.
pub const MIN_POLYLINE_STEP: f64 = 0.5;

/// Rounds like JS `Math.round(v * 10000) / 10000` (ties half-up, including
/// for negatives) and prints the fixed-point result with trailing zeros
/// trimmed.
pub(crate) fn fmt_coord_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.00005 {
        out.push('0');
        return;
    }

    let scaled = v * 10000.0;
    let k = (scaled + 0.5).floor() as i64;
    if k == 0 {
        out.push('0');
        return;
    }
    append_fixed_4dp_trimmed(out, k);
}

fn append_fixed_4dp_trimmed(out: &mut String, k: i64) {
    use std::fmt::Write as _;

    let neg = k.is_negative();
    let abs = k.unsigned_abs();
    let int_part = abs / 10000;
    let frac = abs % 10000;

    if neg {
        out.push('-');
    }
    let _ = write!(out, "{int_part}");

    if frac == 0 {
        return;
    }

    let mut frac_str = [b'0'; 4];
    frac_str[0] = b'0' + ((frac / 1000) as u8);
    frac_str[1] = b'0' + (((frac / 100) % 10) as u8);
    frac_str[2] = b'0' + (((frac / 10) % 10) as u8);
    frac_str[3] = b'0' + ((frac % 10) as u8);

    let mut end = 4usize;
    while end > 0 && frac_str[end - 1] == b'0' {
        end -= 1;
    }

    out.push('.');
    for &b in &frac_str[..end] {
        out.push(b as char);
    }
}

fn emit_pair(out: &mut String, x: f64, y: f64) {
    fmt_coord_into(out, x);
    out.push(',');
    fmt_coord_into(out, y);
}

pub fn move_to(p: Point) -> String {
    let mut out = String::from(" M");
    emit_pair(&mut out, p.x, p.y);
    out.push(' ');
    out
}

pub fn line_to(p: Point) -> String {
    let mut out = String::from(" L");
    emit_pair(&mut out, p.x, p.y);
    out.push(' ');
    out
}

/// `Q` command: the control point precedes the end point, matching SVG order.
pub fn quadratic_curve_to(p: Point, control: Point) -> String {
    let mut out = String::from(" Q");
    emit_pair(&mut out, control.x, control.y);
    out.push(' ');
    emit_pair(&mut out, p.x, p.y);
    out.push(' ');
    out
}

/// `C` command: both control points precede the end point, matching SVG order.
pub fn cubic_curve_to(p: Point, control_a: Point, control_b: Point) -> String {
    let mut out = String::from(" C");
    emit_pair(&mut out, control_a.x, control_a.y);
    out.push(' ');
    emit_pair(&mut out, control_b.x, control_b.y);
    out.push(' ');
    emit_pair(&mut out, p.x, p.y);
    out.push(' ');
    out
}

pub fn close_path() -> String {
    String::from(" Z")
}

/// Circular arc starting at `start_angle` (degrees) on a circle of `radius`
/// centered at the current local origin, sweeping `arc_sweep` degrees.
pub fn arc_to(start_angle: f64, arc_sweep: f64, radius: f64) -> String {
    arc_to_elliptical(start_angle, arc_sweep, radius, radius)
}

/// Elliptical variant of [`arc_to`]. Emits chained relative `a` segments of
/// at most 180 degrees each (SVG arc commands cannot sweep >=180 reliably).
///
/// Sweeps smaller than 0.5 degrees on radii above 3000px degrade to a
/// straight line: near-zero relative-arc deltas at that scale produce visual
/// artifacts, so this heuristic is deliberate and must stay.
pub fn arc_to_elliptical(start_angle: f64, arc_sweep: f64, rx: f64, ry: f64) -> String {
    if arc_sweep == 0.0 {
        return String::new();
    }

    let end_angle = start_angle + arc_sweep;
    if arc_sweep.abs() < 0.5 && rx > 3000.0 {
        return line_to(point(rx * cos_deg(end_angle), ry * sin_deg(end_angle)));
    }

    let seg_count = (arc_sweep.abs() / 180.0).ceil().max(1.0) as usize;
    let sweep_flag = if arc_sweep >= 0.0 { '1' } else { '0' };
    let step = arc_sweep / seg_count as f64;

    let mut prev = point(rx * cos_deg(start_angle), ry * sin_deg(start_angle));
    let mut out = String::new();
    for i in 0..seg_count {
        let angle = start_angle + step * (i as f64 + 1.0);
        let end = point(rx * cos_deg(angle), ry * sin_deg(angle));
        out.push_str(" a");
        fmt_coord_into(&mut out, rx);
        out.push(',');
        fmt_coord_into(&mut out, ry);
        out.push_str(",0,0,");
        out.push(sweep_flag);
        out.push(',');
        emit_pair(&mut out, end.x - prev.x, end.y - prev.y);
        prev = end;
    }
    out
}

/// Absolute `A` command to `p`. Returns an empty string for a zero `rx`,
/// which would be invalid SVG.
pub fn arc_to_point(
    p: Point,
    rx: f64,
    ry: f64,
    sweep_flag: bool,
    large_arc_flag: bool,
    rotation: f64,
) -> String {
    if rx == 0.0 {
        return String::new();
    }
    use std::fmt::Write as _;

    let mut out = String::from(" A");
    fmt_coord_into(&mut out, rx);
    out.push(',');
    fmt_coord_into(&mut out, ry);
    out.push(',');
    fmt_coord_into(&mut out, rotation);
    let _ = write!(
        out,
        ",{},{},",
        if large_arc_flag { 1 } else { 0 },
        if sweep_flag { 1 } else { 0 }
    );
    emit_pair(&mut out, p.x, p.y);
    out.push(' ');
    out
}

/// A closed "donut slice" (annulus sector) centered at the local origin, with
/// optional rounded corners on the outer and inner rims.
///
/// `inner_radius == 0` produces a filled pie slice; `|arc_sweep| == 360`
/// produces a full ring (corner radii are forced to zero in that case).
pub fn arc(
    start_angle: f64,
    arc_sweep: f64,
    radius: f64,
    inner_radius: f64,
    radius_y: f64,
    corner_radius: f64,
    inner_corner_radius: f64,
) -> String {
    if arc_sweep == 0.0 {
        return String::new();
    }
    if radius <= 0.0 && inner_radius <= 0.0 {
        return String::new();
    }

    let (radius, inner_radius) = if radius < inner_radius {
        (inner_radius, radius)
    } else {
        (radius, inner_radius)
    };
    let inner_radius = inner_radius.max(0.0);

    let sweep = arc_sweep.clamp(-360.0, 360.0);
    let full_ring = sweep.abs() >= 360.0;

    let ratio_y = if radius != 0.0 { radius_y / radius } else { 1.0 };
    let inner_radius_y = inner_radius * ratio_y;

    if full_ring {
        // One self-closing path: outer rim forward, radial edge across,
        // inner rim reverse-wound. The hole relies on the default nonzero
        // fill rule seeing opposite winding. Corner radii do not apply.
        let end_angle = start_angle + sweep;
        let mut out = move_to(point(
            radius * cos_deg(start_angle),
            radius_y * sin_deg(start_angle),
        ));
        out.push_str(&arc_to_elliptical(start_angle, sweep, radius, radius_y));
        out.push_str(&line_to(point(
            inner_radius * cos_deg(end_angle),
            inner_radius_y * sin_deg(end_angle),
        )));
        if inner_radius > 0.0 {
            out.push_str(&arc_to_elliptical(
                end_angle,
                -sweep,
                inner_radius,
                inner_radius_y,
            ));
        }
        out.push_str(&close_path());
        return out;
    }

    let sgn = sweep.signum();
    let end_angle = start_angle + sweep;

    // Chord-angle approximation for the corner offsets. This is the
    // documented approximation the visual output depends on, not exact
    // rounded-corner geometry.
    let cr_sin = sin_deg(sweep.abs().min(45.0) / 2.0);
    let corner_radius = corner_radius
        .clamp(0.0, ((radius - inner_radius) / 2.0).max(0.0))
        .min(radius * cr_sin);
    let inner_corner_radius = inner_corner_radius
        .clamp(0.0, ((radius - inner_radius) / 2.0).max(0.0))
        .min(inner_radius * cr_sin);

    let cr_angle = if radius > 0.0 && corner_radius > 0.0 {
        ((corner_radius / radius / 2.0).clamp(-1.0, 1.0).asin()).to_degrees() * 2.0
    } else {
        0.0
    };
    let inner_cr_angle = if inner_radius > 0.0 && inner_corner_radius > 0.0 {
        ((inner_corner_radius / inner_radius / 2.0)
            .clamp(-1.0, 1.0)
            .asin())
        .to_degrees()
            * 2.0
    } else {
        0.0
    };

    let corner_radius_y = corner_radius * ratio_y;
    let inner_corner_radius_y = inner_corner_radius * ratio_y;

    let outer_pt = |angle: f64, r: f64, r_y: f64| point(r * cos_deg(angle), r_y * sin_deg(angle));

    // Start-edge points: inner corner start, outer pre-corner, outer rim.
    let a0 = outer_pt(
        start_angle,
        inner_radius + inner_corner_radius,
        inner_radius_y + inner_corner_radius_y,
    );
    let b0 = outer_pt(
        start_angle,
        radius - corner_radius,
        radius_y - corner_radius_y,
    );
    let b1 = outer_pt(start_angle + cr_angle * sgn, radius, radius_y);

    // End-edge points, mirrored.
    let c0 = outer_pt(end_angle, radius - corner_radius, radius_y - corner_radius_y);
    let d0 = outer_pt(
        end_angle,
        inner_radius + inner_corner_radius,
        inner_radius_y + inner_corner_radius_y,
    );
    let d1 = outer_pt(end_angle - inner_cr_angle * sgn, inner_radius, inner_radius_y);

    let corner_sweep = sgn >= 0.0;
    let mut out = String::new();
    out.push_str(&move_to(a0));
    out.push_str(&line_to(b0));
    out.push_str(&arc_to_point(
        b1,
        corner_radius,
        corner_radius_y,
        corner_sweep,
        false,
        0.0,
    ));
    out.push_str(&arc_to_elliptical(
        start_angle + cr_angle * sgn,
        sweep - 2.0 * cr_angle * sgn,
        radius,
        radius_y,
    ));
    out.push_str(&arc_to_point(
        c0,
        corner_radius,
        corner_radius_y,
        corner_sweep,
        false,
        0.0,
    ));
    out.push_str(&line_to(d0));
    if inner_radius > 0.0 {
        out.push_str(&arc_to_point(
            d1,
            inner_corner_radius,
            inner_corner_radius_y,
            corner_sweep,
            false,
            0.0,
        ));
        out.push_str(&arc_to_elliptical(
            end_angle - inner_cr_angle * sgn,
            -(sweep - 2.0 * inner_cr_angle * sgn),
            inner_radius,
            inner_radius_y,
        ));
        out.push_str(&arc_to_point(
            a0,
            inner_corner_radius,
            inner_corner_radius_y,
            corner_sweep,
            false,
            0.0,
        ));
    }
    out.push_str(&close_path());
    out
}

/// Circular slice shorthand: no ellipse stretch, no rounded corners.
pub fn arc_slice(start_angle: f64, arc_sweep: f64, radius: f64, inner_radius: f64) -> String {
    arc(
        start_angle,
        arc_sweep,
        radius,
        inner_radius,
        radius,
        0.0,
        0.0,
    )
}

pub fn rectangle(width: f64, height: f64, x: f64, y: f64) -> String {
    let mut out = String::new();
    out.push_str(&move_to(point(x, y)));
    out.push_str(&line_to(point(x + width, y)));
    out.push_str(&line_to(point(x + width, y + height)));
    out.push_str(&line_to(point(x, y + height)));
    out.push_str(&close_path());
    out
}

/// Rectangle from bounds, in either winding order. Counter-clockwise winding
/// is needed for fill-rule correctness when the rectangle acts as a hole.
pub fn rect_to_path(bounds: &Bounds, counter_clockwise: bool) -> String {
    let mut out = String::new();
    out.push_str(&move_to(point(bounds.min_x, bounds.min_y)));
    if counter_clockwise {
        out.push_str(&line_to(point(bounds.min_x, bounds.max_y)));
        out.push_str(&line_to(point(bounds.max_x, bounds.max_y)));
        out.push_str(&line_to(point(bounds.max_x, bounds.min_y)));
    } else {
        out.push_str(&line_to(point(bounds.max_x, bounds.min_y)));
        out.push_str(&line_to(point(bounds.max_x, bounds.max_y)));
        out.push_str(&line_to(point(bounds.min_x, bounds.max_y)));
    }
    out.push_str(&close_path());
    out
}

/// Line chain that skips points closer than [`MIN_POLYLINE_STEP`] pixels to
/// the last emitted point.
pub fn polyline(points: &[Point]) -> String {
    polyline_with_step(points, MIN_POLYLINE_STEP)
}

pub fn polyline_with_step(points: &[Point], min_step: f64) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut out = move_to(*first);
    let mut last = *first;
    for p in &points[1..] {
        if last.distance_to(p) < min_step {
            continue;
        }
        out.push_str(&line_to(*p));
        last = *p;
    }
    out
}

/// Plain `move_to` + `line_to` chain; no point skipping.
pub fn points_to_path(points: &[Point]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut out = move_to(*first);
    for p in &points[1..] {
        out.push_str(&line_to(*p));
    }
    out
}

/// Samples `count` evenly-length-spaced points along an existing path by
/// delegating to the measurement oracle. Returns `None` when the oracle
/// cannot measure the path; callers must handle absence.
pub fn path_to_points(d: &str, count: usize, oracle: &dyn PathOracle) -> Option<Vec<Point>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let metrics = oracle.measure(d)?;
    let total = metrics.total_length();
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let t = if count > 1 {
            i as f64 / (count - 1) as f64
        } else {
            0.0
        };
        out.push(metrics.point_at_length(t * total));
    }
    Some(out)
}

/// Points tracing an Archimedean-like spiral outward from `inner_radius`.
///
/// The angular step self-adjusts so consecutive points are separated by
/// approximately `angular_step` pixels of arc length; the radius grows
/// `radius_step` pixels per full turn. The degenerate very first point is
/// dropped.
pub fn spiral_points(
    cx: f64,
    cy: f64,
    outer_radius: f64,
    outer_radius_y: f64,
    inner_radius: f64,
    angular_step: f64,
    radius_step: f64,
    start_angle: f64,
    end_angle: f64,
) -> Vec<Point> {
    let mut points = Vec::new();
    if angular_step <= 0.0 || radius_step <= 0.0 {
        return points;
    }

    let ratio_y = if outer_radius != 0.0 {
        outer_radius_y / outer_radius
    } else {
        1.0
    };
    let angle_limit = end_angle + (outer_radius - inner_radius) / radius_step * 360.0;

    let mut r = inner_radius + 0.01;
    let mut angle = start_angle;
    while r < outer_radius + radius_step {
        let mut step_size = angular_step;
        if step_size / 2.0 > r {
            step_size = 2.0 * r;
        }
        angle += (2.0 * (step_size / 2.0 / r).asin()).to_degrees();
        if angle > angle_limit {
            break;
        }
        points.push(point(
            cx + r * cos_deg(angle),
            cy + r * ratio_y * sin_deg(angle),
        ));
        r = inner_radius + (angle - start_angle) / 360.0 * radius_step;
    }

    // The first sample sits almost on top of the spiral origin.
    if !points.is_empty() {
        points.remove(0);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt_coord(v: f64) -> String {
        let mut s = String::new();
        fmt_coord_into(&mut s, v);
        s
    }

    #[test]
    fn fmt_coord_rounds_to_four_decimals() {
        assert_eq!(fmt_coord(f64::NAN), "0");
        assert_eq!(fmt_coord(f64::INFINITY), "0");
        assert_eq!(fmt_coord(0.00004), "0");
        assert_eq!(fmt_coord(-0.00004), "0");
        assert_eq!(fmt_coord(1.234567), "1.2346");
        assert_eq!(fmt_coord(-1.23455), "-1.2345");
        assert_eq!(fmt_coord(1.0), "1");
        assert_eq!(fmt_coord(12.5000), "12.5");
    }

    #[test]
    fn move_and_line_fragments_round_trip_spacing() {
        assert_eq!(move_to(point(0.0, 0.0)), " M0,0 ");
        assert_eq!(line_to(point(100.0, 0.0)), " L100,0 ");
        assert_eq!(close_path(), " Z");
    }

    #[test]
    fn curve_fragments_put_controls_before_endpoint() {
        let q = quadratic_curve_to(point(10.0, 0.0), point(5.0, 5.0));
        assert_eq!(q, " Q5,5 10,0 ");
        let c = cubic_curve_to(point(10.0, 0.0), point(2.0, 3.0), point(8.0, 3.0));
        assert_eq!(c, " C2,3 8,3 10,0 ");
    }

    #[test]
    fn arc_to_zero_sweep_is_empty() {
        assert_eq!(arc_to(30.0, 0.0, 100.0), "");
    }

    #[test]
    fn arc_to_point_zero_radius_is_empty() {
        assert_eq!(arc_to_point(point(1.0, 1.0), 0.0, 10.0, true, false, 0.0), "");
    }

    #[test]
    fn arc_to_splits_sweeps_larger_than_half_turn() {
        let d = arc_to(0.0, 270.0, 50.0);
        assert_eq!(d.matches(" a").count(), 2);
        let d = arc_to(0.0, -90.0, 50.0);
        assert_eq!(d.matches(" a").count(), 1);
        assert!(d.contains(",0,0,0,"));
    }

    #[test]
    fn rect_winding_orders_mirror_each_other() {
        let b = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 10.0,
            max_y: 5.0,
        };
        assert_eq!(rect_to_path(&b, false), " M0,0  L10,0  L10,5  L0,5  Z");
        assert_eq!(rect_to_path(&b, true), " M0,0  L0,5  L10,5  L10,0  Z");
    }

    #[test]
    fn tiny_sweep_on_huge_radius_degrades_to_line() {
        let d = arc_to(10.0, 0.2, 5000.0);
        assert!(d.starts_with(" L"));
        assert!(!d.contains('a'));
    }
}
