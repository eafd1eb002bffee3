//! Path-length measurement.
//!
//! The DOM offers `getTotalLength`/`getPointAtLength` on rendered path
//! elements; headless code has no such element, so measurement is an
//! explicit, injectable capability instead of a hidden global. Components
//! that need to measure a path take a [`PathOracle`]; hosts that cannot
//! measure inject [`NullOracle`] and callers see `None`.

use crate::geom::{Point, point};
use svgtypes::{PathParser, PathSegment};

/// Measurement capability over an SVG path string.
pub trait PathOracle {
    /// `None` means the capability is unavailable or the path cannot be
    /// measured; this is a caller-must-check contract, not an error.
    fn measure(&self, d: &str) -> Option<PathMetrics>;
}

/// Flattened polyline of a path with cumulative arc length per vertex.
///
/// Subpath jumps (`M` after the first) contribute zero length, matching DOM
/// measurement semantics.
#[derive(Debug, Clone)]
pub struct PathMetrics {
    points: Vec<Point>,
    cumulative: Vec<f64>,
}

impl PathMetrics {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at distance `d` along the path, clamped to the path extent.
    pub fn point_at_length(&self, d: f64) -> Point {
        let Some(first) = self.points.first() else {
            return Point::default();
        };
        let d = d.clamp(0.0, self.total_length());
        let i = self.cumulative.partition_point(|&c| c < d);
        if i == 0 {
            return *first;
        }
        if i >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let seg = self.cumulative[i] - self.cumulative[i - 1];
        if seg <= 0.0 {
            return self.points[i];
        }
        let t = (d - self.cumulative[i - 1]) / seg;
        let a = self.points[i - 1];
        let b = self.points[i];
        point(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Default oracle: parses the path mini-language and flattens curve segments
/// to straight runs within `tolerance` pixels of the true curve.
#[derive(Debug, Clone, Copy)]
pub struct FlattenOracle {
    pub tolerance: f64,
}

impl Default for FlattenOracle {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl PathOracle for FlattenOracle {
    fn measure(&self, d: &str) -> Option<PathMetrics> {
        let mut flat = Flattener::new(self.tolerance);
        let mut cur = Point::default();
        let mut subpath_start = Point::default();
        let mut prev_cubic_ctrl: Option<Point> = None;
        let mut prev_quad_ctrl: Option<Point> = None;

        for seg in PathParser::from(d) {
            // Malformed path data: degrade to "cannot measure".
            let seg = seg.ok()?;
            let mut next_cubic_ctrl = None;
            let mut next_quad_ctrl = None;
            match seg {
                PathSegment::MoveTo { abs, x, y } => {
                    let p = resolve(cur, abs, x, y);
                    flat.jump_to(p);
                    cur = p;
                    subpath_start = p;
                }
                PathSegment::LineTo { abs, x, y } => {
                    let p = resolve(cur, abs, x, y);
                    flat.line_to(p);
                    cur = p;
                }
                PathSegment::HorizontalLineTo { abs, x } => {
                    let p = if abs {
                        point(x, cur.y)
                    } else {
                        point(cur.x + x, cur.y)
                    };
                    flat.line_to(p);
                    cur = p;
                }
                PathSegment::VerticalLineTo { abs, y } => {
                    let p = if abs {
                        point(cur.x, y)
                    } else {
                        point(cur.x, cur.y + y)
                    };
                    flat.line_to(p);
                    cur = p;
                }
                PathSegment::CurveTo {
                    abs,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let c1 = resolve(cur, abs, x1, y1);
                    let c2 = resolve(cur, abs, x2, y2);
                    let p = resolve(cur, abs, x, y);
                    flat.cubic_to(cur, c1, c2, p);
                    next_cubic_ctrl = Some(c2);
                    cur = p;
                }
                PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                    let c1 = reflect(cur, prev_cubic_ctrl);
                    let c2 = resolve(cur, abs, x2, y2);
                    let p = resolve(cur, abs, x, y);
                    flat.cubic_to(cur, c1, c2, p);
                    next_cubic_ctrl = Some(c2);
                    cur = p;
                }
                PathSegment::Quadratic { abs, x1, y1, x, y } => {
                    let q = resolve(cur, abs, x1, y1);
                    let p = resolve(cur, abs, x, y);
                    flat.quadratic_to(cur, q, p);
                    next_quad_ctrl = Some(q);
                    cur = p;
                }
                PathSegment::SmoothQuadratic { abs, x, y } => {
                    let q = reflect(cur, prev_quad_ctrl);
                    let p = resolve(cur, abs, x, y);
                    flat.quadratic_to(cur, q, p);
                    next_quad_ctrl = Some(q);
                    cur = p;
                }
                PathSegment::EllipticalArc {
                    abs,
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    let p = resolve(cur, abs, x, y);
                    flat.arc_to(cur, rx, ry, x_axis_rotation, large_arc, sweep, p);
                    cur = p;
                }
                PathSegment::ClosePath { .. } => {
                    flat.line_to(subpath_start);
                    cur = subpath_start;
                }
            }
            prev_cubic_ctrl = next_cubic_ctrl;
            prev_quad_ctrl = next_quad_ctrl;
        }

        flat.finish()
    }
}

/// Oracle for hosts without measurement support; always `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl PathOracle for NullOracle {
    fn measure(&self, _d: &str) -> Option<PathMetrics> {
        None
    }
}

fn resolve(cur: Point, abs: bool, x: f64, y: f64) -> Point {
    if abs {
        point(x, y)
    } else {
        point(cur.x + x, cur.y + y)
    }
}

fn reflect(cur: Point, prev_ctrl: Option<Point>) -> Point {
    match prev_ctrl {
        Some(c) => point(2.0 * cur.x - c.x, 2.0 * cur.y - c.y),
        None => cur,
    }
}

const MAX_SPLIT_DEPTH: u32 = 16;

struct Flattener {
    tolerance: f64,
    points: Vec<Point>,
    cumulative: Vec<f64>,
}

impl Flattener {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(1e-3),
            points: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Subpath start: zero-length jump.
    fn jump_to(&mut self, p: Point) {
        let at = self.cumulative.last().copied().unwrap_or(0.0);
        self.points.push(p);
        self.cumulative.push(at);
    }

    fn line_to(&mut self, p: Point) {
        let Some(last) = self.points.last().copied() else {
            self.jump_to(p);
            return;
        };
        let d = last.distance_to(&p);
        if d <= 1e-12 {
            return;
        }
        let at = self.cumulative.last().copied().unwrap_or(0.0);
        self.points.push(p);
        self.cumulative.push(at + d);
    }

    fn cubic_to(&mut self, p0: Point, c1: Point, c2: Point, p3: Point) {
        self.split_cubic(p0, c1, c2, p3, 0);
    }

    fn split_cubic(&mut self, p0: Point, c1: Point, c2: Point, p3: Point, depth: u32) {
        if depth >= MAX_SPLIT_DEPTH || self.cubic_is_flat(&p0, &c1, &c2, &p3) {
            self.line_to(p3);
            return;
        }
        let mid = |a: Point, b: Point| point((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let ab = mid(p0, c1);
        let bc = mid(c1, c2);
        let cd = mid(c2, p3);
        let abc = mid(ab, bc);
        let bcd = mid(bc, cd);
        let abcd = mid(abc, bcd);
        self.split_cubic(p0, ab, abc, abcd, depth + 1);
        self.split_cubic(abcd, bcd, cd, p3, depth + 1);
    }

    fn cubic_is_flat(&self, p0: &Point, c1: &Point, c2: &Point, p3: &Point) -> bool {
        point_line_distance(c1, p0, p3) <= self.tolerance
            && point_line_distance(c2, p0, p3) <= self.tolerance
    }

    fn quadratic_to(&mut self, p0: Point, q: Point, p2: Point) {
        // Exact degree elevation to a cubic.
        let c1 = point(p0.x + 2.0 / 3.0 * (q.x - p0.x), p0.y + 2.0 / 3.0 * (q.y - p0.y));
        let c2 = point(p2.x + 2.0 / 3.0 * (q.x - p2.x), p2.y + 2.0 / 3.0 * (q.y - p2.y));
        self.cubic_to(p0, c1, c2, p2);
    }

    /// Endpoint-to-center conversion per SVG spec F.6.5, then sampling at an
    /// angle step that keeps the sagitta within tolerance.
    #[allow(clippy::too_many_arguments)]
    fn arc_to(
        &mut self,
        p0: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        p1: Point,
    ) {
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if rx <= 0.0 || ry <= 0.0 || (p0.x == p1.x && p0.y == p1.y) {
            self.line_to(p1);
            return;
        }

        let phi = x_axis_rotation.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let dx2 = (p0.x - p1.x) / 2.0;
        let dy2 = (p0.y - p1.y) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        // Scale up out-of-range radii.
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
        let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
        if den <= 0.0 {
            self.line_to(p1);
            return;
        }
        let sign = if large_arc != sweep { 1.0 } else { -1.0 };
        let coef = sign * (num / den).sqrt();
        let cxp = coef * rx * y1p / ry;
        let cyp = -coef * ry * x1p / rx;

        let cx = cos_phi * cxp - sin_phi * cyp + (p0.x + p1.x) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (p0.y + p1.y) / 2.0;

        let angle_of = |ux: f64, uy: f64| uy.atan2(ux);
        let theta1 = angle_of((x1p - cxp) / rx, (y1p - cyp) / ry);
        let theta2 = angle_of((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let mut dtheta = theta2 - theta1;
        if !sweep && dtheta > 0.0 {
            dtheta -= std::f64::consts::TAU;
        } else if sweep && dtheta < 0.0 {
            dtheta += std::f64::consts::TAU;
        }

        let rmax = rx.max(ry);
        let max_step = if self.tolerance < rmax {
            (2.0 * (1.0 - self.tolerance / rmax).acos()).max(1e-2)
        } else {
            std::f64::consts::FRAC_PI_2
        };
        let steps = (dtheta.abs() / max_step).ceil().max(1.0) as usize;
        for i in 1..=steps {
            let t = theta1 + dtheta * (i as f64 / steps as f64);
            let (sin_t, cos_t) = t.sin_cos();
            let x = cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi;
            let y = cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi;
            self.line_to(point(x, y));
        }
        // Land exactly on the endpoint regardless of accumulated float error.
        self.line_to(p1);
    }

    fn finish(self) -> Option<PathMetrics> {
        if self.points.is_empty() {
            return None;
        }
        Some(PathMetrics {
            points: self.points,
            cumulative: self.cumulative,
        })
    }
}

fn point_line_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let len = a.distance_to(b);
    if len <= 1e-12 {
        return p.distance_to(a);
    }
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / len
}
