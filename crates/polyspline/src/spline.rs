//! The backbone curve: an ordered set of control-point segments, smoothed
//! into a path and densely sampled so geometric queries (length, nearest
//! point, position to point) run against a flat table.

use crate::geom::{OrientedPoint, Point, cos_deg, sin_deg};
use crate::measure::{FlattenOracle, PathOracle};
use crate::smooth::SmoothMethod;

/// Approximate pixel spacing of the sampled-point table. One-pixel spacing
/// keeps position lookups sub-pixel for typical chart sizes.
pub const DEFAULT_SAMPLE_STEP: f64 = 1.0;

/// A smoothed multi-segment curve with a precomputed arc-length sample table.
///
/// Derived state (path, samples, length) is rebuilt synchronously by every
/// mutator; callers that mutate repeatedly are responsible for batching.
#[derive(Debug, Clone)]
pub struct Polyspline {
    segments: Vec<Vec<Point>>,
    method: SmoothMethod,
    sample_step: f64,
    path: String,
    samples: Vec<OrientedPoint>,
    cumulative: Vec<f64>,
    distance: f64,
}

impl Polyspline {
    pub fn new(segments: Vec<Vec<Point>>, method: SmoothMethod) -> Self {
        Self::with_sample_step(segments, method, DEFAULT_SAMPLE_STEP)
    }

    pub fn with_sample_step(
        segments: Vec<Vec<Point>>,
        method: SmoothMethod,
        sample_step: f64,
    ) -> Self {
        let mut spline = Self {
            segments,
            method,
            sample_step: sample_step.max(0.05),
            path: String::new(),
            samples: Vec::new(),
            cumulative: Vec::new(),
            distance: 0.0,
        };
        spline.rebuild();
        spline
    }

    pub fn segments(&self) -> &[Vec<Point>] {
        &self.segments
    }

    pub fn set_segments(&mut self, segments: Vec<Vec<Point>>) {
        self.segments = segments;
        self.rebuild();
    }

    pub fn method(&self) -> SmoothMethod {
        self.method
    }

    pub fn set_method(&mut self, method: SmoothMethod) {
        self.method = method;
        self.rebuild();
    }

    /// Concatenated smoothed path of all segments; empty when there is
    /// nothing to draw.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Total curve length in pixels; zero for degenerate input.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The dense sample table backing length and position queries.
    pub fn all_points(&self) -> &[OrientedPoint] {
        &self.samples
    }

    fn rebuild(&mut self) {
        self.path.clear();
        self.samples.clear();
        self.cumulative.clear();
        self.distance = 0.0;

        let oracle = FlattenOracle::default();
        for segment in &self.segments {
            if segment.len() < 2 {
                continue;
            }
            let d = self.method.smooth(segment);
            if d.is_empty() {
                continue;
            }
            let Some(metrics) = oracle.measure(&d) else {
                continue;
            };
            let len = metrics.total_length();
            if len <= 0.0 {
                continue;
            }
            self.path.push_str(&d);

            let count = (len / self.sample_step).ceil().max(1.0) as usize;
            let base = self.distance;
            let start = self.samples.len();
            for i in 0..=count {
                let at = len * i as f64 / count as f64;
                let p = metrics.point_at_length(at);
                self.samples.push(OrientedPoint::new(p.x, p.y, 0.0));
                self.cumulative.push(base + at);
            }
            self.distance = base + len;

            // Tangent per sample: direction of travel to the next sample
            // in the same segment; the segment's last sample inherits.
            let end = self.samples.len();
            for i in start..end {
                if i + 1 < end {
                    let a = self.samples[i];
                    let b = self.samples[i + 1];
                    let (dx, dy) = (b.x - a.x, b.y - a.y);
                    self.samples[i].angle = if dx.abs() > 1e-12 || dy.abs() > 1e-12 {
                        dy.atan2(dx).to_degrees()
                    } else if i > start {
                        self.samples[i - 1].angle
                    } else {
                        0.0
                    };
                } else if i > start {
                    self.samples[i].angle = self.samples[i - 1].angle;
                }
            }
        }
    }

    /// Maps a 0..1 relative position to a point and tangent angle.
    ///
    /// With `extrapolate`, positions outside `[0, 1]` extend linearly from
    /// the nearest curve end; otherwise they clamp. An empty spline yields
    /// the origin at angle 0 (documented degenerate default, not an error).
    pub fn position_to_point(&self, position: f64, extrapolate: bool) -> OrientedPoint {
        let n = self.samples.len();
        if n == 0 {
            return OrientedPoint::default();
        }
        if n == 1 || self.distance <= 0.0 {
            return self.samples[0];
        }

        let pos = if extrapolate {
            position
        } else {
            position.clamp(0.0, 1.0)
        };
        let target = pos * self.distance;

        if target < 0.0 {
            let first = self.samples[0];
            return OrientedPoint::new(
                first.x + cos_deg(first.angle) * target,
                first.y + sin_deg(first.angle) * target,
                first.angle,
            );
        }
        if target > self.distance {
            let last = self.samples[n - 1];
            let over = target - self.distance;
            return OrientedPoint::new(
                last.x + cos_deg(last.angle) * over,
                last.y + sin_deg(last.angle) * over,
                last.angle,
            );
        }

        let i = self.cumulative.partition_point(|&c| c < target);
        if i == 0 {
            return self.samples[0];
        }
        let i = i.min(n - 1);
        let seg = self.cumulative[i] - self.cumulative[i - 1];
        if seg <= 0.0 {
            return self.samples[i];
        }
        let t = (target - self.cumulative[i - 1]) / seg;
        let a = self.samples[i - 1];
        let b = self.samples[i];
        OrientedPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, a.angle)
    }

    pub fn position_to_angle(&self, position: f64) -> f64 {
        self.position_to_point(position, true).angle
    }

    /// Nearest sample to a pixel coordinate by Euclidean distance.
    /// Deterministic: ties resolve to the lowest index. `None` for an empty
    /// spline.
    pub fn closest_point_index(&self, p: &Point) -> Option<usize> {
        if self.samples.is_empty() {
            return None;
        }
        let mut best = 0usize;
        let mut best_d = f64::INFINITY;
        for (i, s) in self.samples.iter().enumerate() {
            let dx = s.x - p.x;
            let dy = s.y - p.y;
            let d = dx * dx + dy * dy;
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        Some(best)
    }

    /// Relative position (0..1) of a sample index along the curve.
    pub fn position_at_index(&self, index: usize) -> f64 {
        if self.distance <= 0.0 || index >= self.cumulative.len() {
            return 0.0;
        }
        self.cumulative[index] / self.distance
    }
}

impl Default for Polyspline {
    fn default() -> Self {
        Self::new(Vec::new(), SmoothMethod::default())
    }
}
