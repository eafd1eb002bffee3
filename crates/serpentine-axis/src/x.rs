//! Category-axis renderer: owns the backbone polyline and maps axis
//! positions onto the smoothed curve.

use std::cell::{Cell, Ref, RefCell};

use polyspline::geom::{self, Bounds, Transform};
use polyspline::path::{close_path, line_to, points_to_path};
use polyspline::{OrientedPoint, Point, Polyspline, SmoothMethod, point};

use crate::config::AxisXConfig;
use crate::target::{BulletLike, PathSink, PlacedSink};
use crate::y::AxisRendererCurveY;

/// Arc-length spacing, in pixels, between consecutive samples when a path
/// is traced along the backbone (grid fills, value-axis grid curves).
pub const DEFAULT_PRECISION_STEP: f64 = 10.0;

/// The rectangle the fitted backbone is scaled and centered into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerBox {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ContainerBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: 0.0,
        }
    }

    pub fn content_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    pub fn content_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    pub fn center(&self) -> Point {
        point(self.width / 2.0, self.height / 2.0)
    }
}

/// Renders a category axis along an arbitrary user-supplied curve.
///
/// The renderer keeps the user's control points untouched and derives a
/// fitted copy (scaled and centered into the container) whenever geometry
/// is queried. The smoothed, resampled backbone is cached and rebuilt
/// lazily on first query after a mutation.
#[derive(Debug)]
pub struct AxisRendererCurveX {
    points: Vec<Point>,
    start: f64,
    end: f64,
    precision_step: f64,
    auto_scale: bool,
    auto_center: bool,
    smoothing: SmoothMethod,
    container: ContainerBox,
    spline: RefCell<Polyspline>,
    dirty: Cell<bool>,
}

impl AxisRendererCurveX {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            start: 0.0,
            end: 1.0,
            precision_step: DEFAULT_PRECISION_STEP,
            auto_scale: true,
            auto_center: true,
            smoothing: SmoothMethod::default(),
            container: ContainerBox::default(),
            spline: RefCell::new(Polyspline::default()),
            dirty: Cell::new(true),
        }
    }

    pub fn from_config(config: &AxisXConfig) -> Self {
        let mut renderer = Self::new(config.points.clone());
        renderer.start = config.start;
        renderer.end = config.end;
        renderer.precision_step = config.precision_step;
        renderer.auto_scale = config.auto_scale;
        renderer.auto_center = config.auto_center;
        renderer.smoothing = config.smoothing;
        renderer
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.dirty.set(true);
    }

    pub fn smoothing(&self) -> SmoothMethod {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: SmoothMethod) {
        self.smoothing = smoothing;
        self.dirty.set(true);
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Sets the visible position window. Does not invalidate the backbone:
    /// the window only affects position normalization.
    pub fn set_range(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    pub fn precision_step(&self) -> f64 {
        self.precision_step
    }

    pub fn set_precision_step(&mut self, step: f64) {
        self.precision_step = step.max(0.01);
    }

    pub fn set_auto_scale(&mut self, auto_scale: bool) {
        self.auto_scale = auto_scale;
        self.dirty.set(true);
    }

    pub fn set_auto_center(&mut self, auto_center: bool) {
        self.auto_center = auto_center;
        self.dirty.set(true);
    }

    pub fn container(&self) -> ContainerBox {
        self.container
    }

    /// Adopts new container dimensions and rebuilds the fitted backbone
    /// immediately so a resize storm settles into one consistent state.
    pub fn handle_size_change(&mut self, container: ContainerBox) {
        self.container = container;
        self.dirty.set(true);
        self.ensure_spline();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Rebuilds the cached backbone if any input changed since the last
    /// query. Queries call this on entry, so callers only need it when
    /// they want to control rebuild timing themselves.
    pub fn ensure_spline(&self) {
        if !self.dirty.get() {
            return;
        }
        let fitted = self.fitted_points();
        let mut spline = self.spline.borrow_mut();
        spline.set_method(self.smoothing);
        spline.set_segments(vec![fitted]);
        self.dirty.set(false);
    }

    fn spline(&self) -> Ref<'_, Polyspline> {
        self.ensure_spline();
        self.spline.borrow()
    }

    /// The user points scaled and centered into the container, per the
    /// `auto_scale` / `auto_center` flags. Scaling is uniform and measured
    /// against the bounds of the smoothed curve, not the raw control
    /// points, so overshooting splines still fit. Deriving from the
    /// original points each time keeps repeated fits idempotent.
    pub fn fitted_points(&self) -> Vec<Point> {
        if self.points.len() < 2 || (!self.auto_scale && !self.auto_center) {
            return self.points.clone();
        }
        let reference = Polyspline::new(vec![self.points.clone()], self.smoothing);
        let mut bounds: Option<Bounds> = None;
        for sample in reference.all_points() {
            let p = sample.point();
            match bounds.as_mut() {
                Some(b) => b.extend(&p),
                None => bounds = Bounds::from_points([&p]),
            }
        }
        // a degenerate spline falls back to the raw control points
        let bounds = match bounds.or_else(|| Bounds::from_points(&self.points)) {
            Some(b) => b,
            None => return self.points.clone(),
        };

        let content_w = self.container.content_width();
        let content_h = self.container.content_height();
        let mut scale = 1.0;
        if self.auto_scale && content_w > 0.0 && content_h > 0.0 {
            let sx = if bounds.width() > 0.0 {
                content_w / bounds.width()
            } else {
                f64::INFINITY
            };
            let sy = if bounds.height() > 0.0 {
                content_h / bounds.height()
            } else {
                f64::INFINITY
            };
            let s = sx.min(sy);
            if s.is_finite() && s > 0.0 {
                scale = s;
            }
        }

        let mut transform = Transform::scale(scale, scale);
        if self.auto_center && (self.container.width > 0.0 || self.container.height > 0.0) {
            let curve_center = bounds.center();
            let target = self.container.center();
            transform = transform.then_translate(geom::vector(
                target.x - curve_center.x * scale,
                target.y - curve_center.y * scale,
            ));
        }

        self.points
            .iter()
            .map(|p| geom::transform_point(&transform, *p))
            .collect()
    }

    /// Arc length of the fitted backbone in pixels.
    pub fn axis_length(&self) -> f64 {
        self.spline().distance()
    }

    /// SVG path of the fitted backbone, for the axis line itself.
    pub fn backbone_path(&self) -> String {
        self.spline().path().to_string()
    }

    fn relative_position(&self, position: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            0.0
        } else {
            (position - self.start) / span
        }
    }

    /// Resolves an axis position to a point on the backbone with the local
    /// travel angle. Positions outside the window extrapolate linearly
    /// along the end tangents.
    pub fn position_to_point(&self, position: f64) -> OrientedPoint {
        self.spline()
            .position_to_point(self.relative_position(position), true)
    }

    /// Chart-space point for a (category, value) pair: the backbone point
    /// pushed out along the curve normal by the value-axis radius.
    pub fn position_to_point_with_radius(
        &self,
        position: f64,
        value_position: f64,
        value_axis: &AxisRendererCurveY,
    ) -> OrientedPoint {
        let on_curve = self.position_to_point(position);
        let radius = value_axis.position_to_coordinate(value_position);
        let p = on_curve.radial_offset(radius);
        OrientedPoint::new(p.x, p.y, on_curve.angle)
    }

    /// Travel angle at an axis position. Positions before the window start
    /// are pinned to the curve start; positions past the end extrapolate.
    pub fn position_to_angle(&self, position: f64) -> f64 {
        let rel = self.relative_position(position).max(0.0);
        self.spline().position_to_point(rel, true).angle
    }

    /// Grid line at `position`: a straight segment perpendicular to the
    /// backbone spanning the value axis from inner to outer radius.
    pub fn get_grid_path(&self, position: f64, value_axis: Option<&AxisRendererCurveY>) -> String {
        let Some(value_axis) = value_axis else {
            return String::new();
        };
        if self.points.len() < 2
            || value_axis.axis_length() == 0.0
            || position < self.start
            || position > self.end
        {
            return String::new();
        }
        let on_curve = self.position_to_point(position);
        let a = on_curve.radial_offset(value_axis.inner_radius());
        let b = on_curve.radial_offset(value_axis.radius());
        points_to_path(&[a, b])
    }

    /// Filled band between two axis positions, spanning the full value
    /// axis. The band edges follow the curve, traced at `precision_step`
    /// resolution; requests fully outside the window yield an empty path.
    pub fn get_position_range_path(
        &self,
        start_position: f64,
        end_position: f64,
        value_axis: Option<&AxisRendererCurveY>,
    ) -> String {
        let Some(value_axis) = value_axis else {
            return String::new();
        };
        if self.points.len() < 2 {
            return String::new();
        }
        let (lo, hi) = if start_position <= end_position {
            (start_position, end_position)
        } else {
            (end_position, start_position)
        };
        let from = lo.max(self.start);
        let to = hi.min(self.end);
        let span = self.end - self.start;
        let axis_length = self.axis_length();
        if !(to > from) || span <= 0.0 || axis_length <= 0.0 {
            return String::new();
        }

        let count = ((axis_length / self.precision_step) * ((to - from) / span))
            .ceil()
            .max(1.0) as usize;
        let inner = value_axis.inner_radius();
        let outer = value_axis.radius();
        let mut outer_edge = Vec::with_capacity(count + 1);
        let mut inner_edge = Vec::with_capacity(count + 1);
        for i in 0..=count {
            let position = from + (to - from) * i as f64 / count as f64;
            let on_curve = self.position_to_point(position);
            outer_edge.push(on_curve.radial_offset(outer));
            inner_edge.push(on_curve.radial_offset(inner));
        }

        let mut out = points_to_path(&outer_edge);
        for p in inner_edge.iter().rev() {
            out.push_str(&line_to(*p));
        }
        out.push_str(&close_path());
        out
    }

    /// Maps a chart-space coordinate back to the nearest axis position.
    /// The inverse of [`position_to_point`](Self::position_to_point) up to
    /// sample resolution.
    pub fn coordinate_to_position(&self, x: f64, y: f64) -> f64 {
        let spline = self.spline();
        match spline.closest_point_index(&point(x, y)) {
            Some(index) => self.start + spline.position_at_index(index) * (self.end - self.start),
            None => 0.0,
        }
    }

    pub fn update_grid_sink(
        &self,
        sink: &mut dyn PathSink,
        position: f64,
        value_axis: Option<&AxisRendererCurveY>,
    ) {
        let d = self.get_grid_path(position, value_axis);
        if !d.is_empty() {
            sink.set_path(&d);
        }
    }

    /// Ticks sit on the backbone, rotated perpendicular to travel.
    pub fn update_tick_sink(&self, sink: &mut dyn PlacedSink, position: f64) {
        if self.points.len() < 2 {
            return;
        }
        let p = self.position_to_point(position);
        sink.set_placement(p.x, p.y, p.angle + 90.0);
    }

    /// Labels follow the travel angle so text reads along the curve.
    pub fn update_label_sink(&self, sink: &mut dyn PlacedSink, position: f64) {
        if self.points.len() < 2 {
            return;
        }
        let p = self.position_to_point(position);
        sink.set_placement(p.x, p.y, p.angle);
    }

    /// Bullets are placed within their cell per the bullet's own location
    /// hint.
    pub fn update_bullet_sink(
        &self,
        sink: &mut dyn PlacedSink,
        bullet: &dyn BulletLike,
        cell_start_position: f64,
        cell_end_position: f64,
    ) {
        if self.points.len() < 2 {
            return;
        }
        let position =
            cell_start_position + (cell_end_position - cell_start_position) * bullet.location_hint();
        let p = self.position_to_point(position);
        sink.set_placement(p.x, p.y, p.angle);
    }
}

impl Default for AxisRendererCurveX {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
