//! Value-axis renderer: maps value positions to radial offsets measured
//! perpendicular to the category backbone.

use polyspline::path::{close_path, line_to, points_to_path};
use polyspline::{OrientedPoint, Point, point};

use crate::config::AxisYConfig;
use crate::target::PlacedSink;
use crate::x::AxisRendererCurveX;

/// Renders a value axis as a radial band around a curved category axis.
///
/// `inner_radius` and `radius` are signed offsets from the backbone:
/// positive values sit on the left-hand side of the travel direction
/// (above a left-to-right backbone in SVG's y-down space), negative
/// values on the right. The renderer holds no reference to its
/// category partner; operations that trace along the backbone take it as
/// an argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRendererCurveY {
    radius: f64,
    inner_radius: f64,
    axis_location: f64,
    start: f64,
    end: f64,
}

impl Default for AxisRendererCurveY {
    fn default() -> Self {
        Self {
            radius: 0.0,
            inner_radius: 0.0,
            axis_location: 0.0,
            start: 0.0,
            end: 1.0,
        }
    }
}

impl AxisRendererCurveY {
    pub fn new(radius: f64, inner_radius: f64) -> Self {
        Self {
            radius,
            inner_radius,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AxisYConfig) -> Self {
        Self {
            radius: config.radius,
            inner_radius: config.inner_radius,
            axis_location: config.axis_location,
            start: config.start,
            end: config.end,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn set_inner_radius(&mut self, inner_radius: f64) {
        self.inner_radius = inner_radius;
    }

    /// Category-axis position the axis line is anchored at.
    pub fn axis_location(&self) -> f64 {
        self.axis_location
    }

    pub fn set_axis_location(&mut self, axis_location: f64) {
        self.axis_location = axis_location;
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    /// Length of the axis in pixels, independent of radius signs.
    pub fn axis_length(&self) -> f64 {
        (self.radius - self.inner_radius).abs()
    }

    fn relative_position(&self, position: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            0.0
        } else {
            (position - self.start) / span
        }
    }

    /// Signed radial offset for a value position. Positions map linearly
    /// from `inner_radius` at `start` to `radius` at `end`.
    pub fn position_to_coordinate(&self, position: f64) -> f64 {
        self.inner_radius + (self.radius - self.inner_radius) * self.relative_position(position)
    }

    /// Axis-local point for a position: x is always 0 because the axis is
    /// a pure radial scale until paired with a category backbone.
    pub fn position_to_point(&self, position: f64) -> Point {
        point(0.0, self.position_to_coordinate(position))
    }

    /// Chart-space placement of a value position, anchored at the axis
    /// location on the category backbone.
    pub fn axis_point(
        &self,
        position: f64,
        category_axis: &AxisRendererCurveX,
    ) -> OrientedPoint {
        let anchor = category_axis.position_to_point(self.axis_location);
        let p = anchor.radial_offset(self.position_to_coordinate(position));
        OrientedPoint::new(p.x, p.y, anchor.angle)
    }

    /// Grid line at `position`: a curve parallel to the backbone at the
    /// corresponding radius, spanning the category axis window.
    pub fn get_grid_path(
        &self,
        position: f64,
        category_axis: Option<&AxisRendererCurveX>,
    ) -> String {
        let Some(category_axis) = category_axis else {
            return String::new();
        };
        if position < self.start || position > self.end {
            return String::new();
        }
        let radius = self.position_to_coordinate(position);
        match self.trace_parallel(category_axis, radius) {
            Some(points) => points_to_path(&points),
            None => String::new(),
        }
    }

    /// Filled band between two value positions: the parallel curve at the
    /// end radius traced forward, the one at the start radius traced back,
    /// closed.
    pub fn get_position_range_path(
        &self,
        start_position: f64,
        end_position: f64,
        category_axis: Option<&AxisRendererCurveX>,
    ) -> String {
        let Some(category_axis) = category_axis else {
            return String::new();
        };
        let (lo, hi) = if start_position <= end_position {
            (start_position, end_position)
        } else {
            (end_position, start_position)
        };
        let from = lo.max(self.start);
        let to = hi.min(self.end);
        if !(to > from) {
            return String::new();
        }
        let near = self.position_to_coordinate(from);
        let far = self.position_to_coordinate(to);
        let (Some(far_edge), Some(near_edge)) = (
            self.trace_parallel(category_axis, far),
            self.trace_parallel(category_axis, near),
        ) else {
            return String::new();
        };

        let mut out = points_to_path(&far_edge);
        for p in near_edge.iter().rev() {
            out.push_str(&line_to(*p));
        }
        out.push_str(&close_path());
        out
    }

    /// The axis line itself: a straight radial segment at the anchor
    /// location, from `inner_radius` to `radius`.
    pub fn get_axis_line_path(&self, category_axis: Option<&AxisRendererCurveX>) -> String {
        let Some(category_axis) = category_axis else {
            return String::new();
        };
        if category_axis.points().len() < 2 || self.axis_length() == 0.0 {
            return String::new();
        }
        let anchor = category_axis.position_to_point(self.axis_location);
        points_to_path(&[
            anchor.radial_offset(self.inner_radius),
            anchor.radial_offset(self.radius),
        ])
    }

    /// Ticks and labels are placed at the anchor, offset by the position's
    /// radius, rotated with the backbone's local angle.
    pub fn update_tick_sink(
        &self,
        sink: &mut dyn PlacedSink,
        position: f64,
        category_axis: Option<&AxisRendererCurveX>,
    ) {
        let Some(category_axis) = category_axis else {
            return;
        };
        if category_axis.points().len() < 2 {
            return;
        }
        let p = self.axis_point(position, category_axis);
        sink.set_placement(p.x, p.y, p.angle);
    }

    pub fn update_label_sink(
        &self,
        sink: &mut dyn PlacedSink,
        position: f64,
        category_axis: Option<&AxisRendererCurveX>,
    ) {
        self.update_tick_sink(sink, position, category_axis);
    }

    /// Samples the backbone across the category window and offsets each
    /// sample by `radius` along the local normal.
    fn trace_parallel(
        &self,
        category_axis: &AxisRendererCurveX,
        radius: f64,
    ) -> Option<Vec<Point>> {
        if category_axis.points().len() < 2 {
            return None;
        }
        let axis_length = category_axis.axis_length();
        if axis_length <= 0.0 {
            return None;
        }
        let count = (axis_length / category_axis.precision_step())
            .ceil()
            .max(1.0) as usize;
        let start = category_axis.start();
        let end = category_axis.end();
        let mut points = Vec::with_capacity(count + 1);
        for i in 0..=count {
            let position = start + (end - start) * i as f64 / count as f64;
            points.push(category_axis.position_to_point(position).radial_offset(radius));
        }
        Some(points)
    }
}
