//! Spline interpolation strategies.
//!
//! Each strategy turns an ordered point sequence into an SVG path string.
//! All of them are pure functions of their configuration and input: repeated
//! calls with the same arguments produce identical output.

use crate::geom::{Point, point, round_to};
use crate::path::{close_path, cubic_curve_to, line_to, move_to, polyline};
use serde::{Deserialize, Serialize};

/// Interpolation strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SmoothMethod {
    /// Catmull-Rom with per-axis tension. Tension 1.0 degenerates to
    /// straight segments; lower tension increases curvature.
    Tension {
        #[serde(rename = "tensionX", default = "default_tension")]
        tension_x: f64,
        #[serde(rename = "tensionY", default = "default_tension")]
        tension_y: f64,
    },
    /// Monotone cubic with x as the independent variable; never overshoots
    /// between monotonic samples.
    MonotoneX {
        #[serde(default)]
        closed: bool,
    },
    /// Transposed variant of [`SmoothMethod::MonotoneX`].
    MonotoneY {
        #[serde(default)]
        closed: bool,
    },
    /// B-spline basis blend; approximates rather than interpolates the
    /// input points.
    Basis {
        #[serde(default)]
        closed: bool,
    },
    /// Chord-length-parametrized Catmull-Rom; `alpha` 0.5 is centripetal.
    CatmullRom {
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
}

fn default_tension() -> f64 {
    1.0
}

fn default_alpha() -> f64 {
    0.5
}

impl Default for SmoothMethod {
    fn default() -> Self {
        SmoothMethod::Tension {
            tension_x: 1.0,
            tension_y: 1.0,
        }
    }
}

impl SmoothMethod {
    pub fn smooth(&self, points: &[Point]) -> String {
        match *self {
            SmoothMethod::Tension {
                tension_x,
                tension_y,
            } => tension(points, tension_x, tension_y),
            SmoothMethod::MonotoneX { closed } => monotone(points, false, closed),
            SmoothMethod::MonotoneY { closed } => monotone(points, true, closed),
            SmoothMethod::Basis { closed } => basis(points, closed),
            SmoothMethod::CatmullRom { alpha } => catmull_rom(points, alpha),
        }
    }
}

/// Drops consecutive points that coincide after rounding to 3 decimals.
fn dedup_rounded(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(last) = out.last() {
            if round_to(last.x, 3) == round_to(p.x, 3) && round_to(last.y, 3) == round_to(p.y, 3) {
                continue;
            }
        }
        out.push(*p);
    }
    out
}

/// Catmull-Rom with tension, using the cardinal control-point construction
/// `k = (1 - tension) / 6` per axis.
///
/// A closed curve is detected automatically by comparing the first and last
/// point after rounding to 3 decimals; closed curves wrap neighbor lookups
/// to the opposite end for a seamless loop, open curves clamp.
pub fn tension(points: &[Point], tension_x: f64, tension_y: f64) -> String {
    let pts = dedup_rounded(points);
    if pts.len() < 3 || (tension_x >= 1.0 && tension_y >= 1.0) {
        return polyline(&pts);
    }

    let n = pts.len();
    let first = pts[0];
    let last = pts[n - 1];
    let closed = round_to(first.x, 3) == round_to(last.x, 3)
        && round_to(first.y, 3) == round_to(last.y, 3);

    let kx = (1.0 - tension_x) / 6.0;
    let ky = (1.0 - tension_y) / 6.0;

    let mut out = move_to(first);
    for i in 0..n - 1 {
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p0 = if i == 0 {
            if closed { pts[n - 2] } else { pts[0] }
        } else {
            pts[i - 1]
        };
        let p3 = if i == n - 2 {
            if closed { pts[1] } else { pts[n - 1] }
        } else {
            pts[i + 2]
        };

        let control_a = point(p1.x + (p2.x - p0.x) * kx, p1.y + (p2.y - p0.y) * ky);
        let control_b = point(p2.x - (p3.x - p1.x) * kx, p2.y - (p3.y - p1.y) * ky);
        out.push_str(&cubic_curve_to(p2, control_a, control_b));
    }
    out
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Fritsch-Carlson three-point tangent: harmonic-mean-like combination of
/// the adjacent secant slopes, zeroed when their signs cancel so local
/// extrema never overshoot.
fn slope3(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let denom0 = if h0 != 0.0 {
        h0
    } else if h1 < 0.0 {
        -0.0
    } else {
        0.0
    };
    let denom1 = if h1 != 0.0 {
        h1
    } else if h0 < 0.0 {
        -0.0
    } else {
        0.0
    };
    let s0 = (p1.y - p0.y) / denom0;
    let s1 = (p2.y - p1.y) / denom1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let v = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if v.is_finite() { v } else { 0.0 }
}

/// Endpoint tangent from the one-sided secant and the neighboring tangent.
fn slope2(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

/// Monotone cubic Hermite interpolation. `swap_xy` transposes coordinates so
/// the same algorithm can treat either axis as the independent variable.
pub fn monotone(points: &[Point], swap_xy: bool, closed: bool) -> String {
    // Work in the monotone coordinate system; swap back at emit time.
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        let q = if swap_xy { point(p.y, p.x) } else { *p };
        if let Some(last) = pts.last() {
            if last.x == q.x && last.y == q.y {
                continue;
            }
        }
        pts.push(q);
    }

    let emit = |p: Point| {
        if swap_xy { point(p.y, p.x) } else { p }
    };

    let n = pts.len();
    if n == 0 {
        return String::new();
    }
    let mut out = move_to(emit(pts[0]));
    if n == 1 {
        return out;
    }
    if n == 2 {
        out.push_str(&line_to(emit(pts[1])));
        if closed {
            out.push_str(&close_path());
        }
        return out;
    }

    let mut tangents = vec![0.0f64; n];
    for i in 1..n - 1 {
        tangents[i] = slope3(pts[i - 1], pts[i], pts[i + 1]);
    }
    tangents[0] = slope2(pts[0], pts[1], tangents[1]);
    tangents[n - 1] = slope2(pts[n - 2], pts[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let p0 = pts[i];
        let p1 = pts[i + 1];
        let dx = (p1.x - p0.x) / 3.0;
        let control_a = point(p0.x + dx, p0.y + dx * tangents[i]);
        let control_b = point(p1.x - dx, p1.y - dx * tangents[i + 1]);
        out.push_str(&cubic_curve_to(emit(p1), emit(control_a), emit(control_b)));
    }
    if closed {
        out.push_str(&close_path());
    }
    out
}

fn basis_blend(a: Point, b: Point, c: Point) -> Point {
    point((a.x + 4.0 * b.x + c.x) / 6.0, (a.y + 4.0 * b.y + c.y) / 6.0)
}

fn basis_segment(out: &mut String, a: Point, b: Point, c: Point) {
    let control_a = point((2.0 * a.x + b.x) / 3.0, (2.0 * a.y + b.y) / 3.0);
    let control_b = point((a.x + 2.0 * b.x) / 3.0, (a.y + 2.0 * b.y) / 3.0);
    out.push_str(&cubic_curve_to(basis_blend(a, b, c), control_a, control_b));
}

/// B-spline basis smoothing: every on-curve point is the 1/6, 4/6, 1/6 blend
/// of three consecutive control points. The curve approximates rather than
/// passes through the input. Closed curves wrap using modular indexing.
pub fn basis(points: &[Point], closed: bool) -> String {
    let n = points.len();
    if n == 0 {
        return String::new();
    }
    if n == 1 {
        return move_to(points[0]);
    }
    if n == 2 {
        let mut out = move_to(points[0]);
        out.push_str(&line_to(points[1]));
        if closed {
            out.push_str(&close_path());
        }
        return out;
    }

    if closed {
        let at = |i: usize| points[i % n];
        let mut out = move_to(basis_blend(at(0), at(1), at(2)));
        for k in 1..=n {
            basis_segment(&mut out, at(k), at(k + 1), at(k + 2));
        }
        out.push_str(&close_path());
        return out;
    }

    let p0 = points[0];
    let p1 = points[1];
    let mut out = move_to(p0);
    // Lead-in to where the basis domain starts.
    out.push_str(&line_to(point(
        (5.0 * p0.x + p1.x) / 6.0,
        (5.0 * p0.y + p1.y) / 6.0,
    )));
    for k in 2..n {
        basis_segment(&mut out, points[k - 2], points[k - 1], points[k]);
    }
    // Tail-out: repeat the last point, then land on it.
    basis_segment(&mut out, points[n - 2], points[n - 1], points[n - 1]);
    out.push_str(&line_to(points[n - 1]));
    out
}

const CATMULL_ROM_EPSILON: f64 = 1e-12;

/// Generalized Catmull-Rom with chord-length parametrization. `alpha` is the
/// exponent on segment length (0.5 centripetal) and reduces cusps and loops
/// on unevenly spaced points.
pub fn catmull_rom(points: &[Point], alpha: f64) -> String {
    let n = points.len();
    if n == 0 {
        return String::new();
    }
    let mut out = move_to(points[0]);
    if n == 1 {
        return out;
    }
    if n == 2 {
        out.push_str(&line_to(points[1]));
        return out;
    }

    let chord = |a: Point, b: Point| {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        (dx * dx + dy * dy).powf(alpha)
    };

    for i in 0..n - 1 {
        let p1 = points[i];
        let p2 = points[i + 1];
        // Missing neighbors collapse to zero-length chords, which the
        // epsilon guards below turn into plain endpoint controls.
        let p0 = if i > 0 { points[i - 1] } else { p1 };
        let p3 = if i + 2 < n { points[i + 2] } else { p2 };

        let l01_2a = chord(p0, p1);
        let l12_2a = chord(p1, p2);
        let l23_2a = chord(p2, p3);
        let l01_a = l01_2a.sqrt();
        let l12_a = l12_2a.sqrt();
        let l23_a = l23_2a.sqrt();

        let mut c1 = p1;
        let mut c2 = p2;

        if l01_a > CATMULL_ROM_EPSILON {
            let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
            let m = 3.0 * l01_a * (l01_a + l12_a);
            if m != 0.0 && m.is_finite() {
                c1 = point(
                    (p1.x * a - p0.x * l12_2a + p2.x * l01_2a) / m,
                    (p1.y * a - p0.y * l12_2a + p2.y * l01_2a) / m,
                );
            }
        }
        if l23_a > CATMULL_ROM_EPSILON {
            let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
            let m = 3.0 * l23_a * (l23_a + l12_a);
            if m != 0.0 && m.is_finite() {
                c2 = point(
                    (p2.x * b + p1.x * l23_2a - p3.x * l12_2a) / m,
                    (p2.y * b + p1.y * l23_2a - p3.y * l12_2a) / m,
                );
            }
        }

        out.push_str(&cubic_curve_to(p2, c1, c2));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_drops_near_coincident_neighbors() {
        let pts = [
            point(0.0, 0.0),
            point(0.0001, 0.0),
            point(10.0, 0.0),
            point(10.0, 0.0),
        ];
        assert_eq!(dedup_rounded(&pts).len(), 2);
    }

    #[test]
    fn slope3_cancels_at_local_extrema() {
        // Increasing then decreasing: the tangent at the peak must be zero.
        let t = slope3(point(0.0, 0.0), point(1.0, 5.0), point(2.0, 0.0));
        assert_eq!(t, 0.0);
    }
}
