#![forbid(unsafe_code)]

//! Axis renderers for charts whose category axis follows an arbitrary
//! curve instead of a straight line.
//!
//! [`AxisRendererCurveX`] owns the backbone polyline and projects axis
//! positions onto the smoothed curve; [`AxisRendererCurveY`] maps value
//! positions to radial offsets measured perpendicular to that curve. The
//! two renderers are deliberately independent: operations that need both
//! take the partner as an explicit argument, and [`CurveAxes`] bundles a
//! pair for callers that want a one-stop surface.

pub mod config;
pub mod target;
pub mod x;
pub mod y;

pub use config::{AxisXConfig, AxisYConfig};
pub use target::{BulletLike, PathSink, PlacedSink};
pub use x::{AxisRendererCurveX, ContainerBox};
pub use y::AxisRendererCurveY;

use polyspline::OrientedPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid axis config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AxisError>;

/// A paired category/value renderer set.
///
/// Either side may be absent; operations that need the missing partner
/// return a neutral result (empty path, origin point) instead of failing.
#[derive(Debug, Default)]
pub struct CurveAxes {
    pub x: Option<AxisRendererCurveX>,
    pub y: Option<AxisRendererCurveY>,
}

impl CurveAxes {
    pub fn new(x: AxisRendererCurveX, y: AxisRendererCurveY) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Resolves a (category, value) position pair to a chart-space point.
    pub fn position_to_point(&self, x_position: f64, y_position: f64) -> OrientedPoint {
        match (&self.x, &self.y) {
            (Some(x), Some(y)) => x.position_to_point_with_radius(x_position, y_position, y),
            (Some(x), None) => x.position_to_point(x_position),
            _ => OrientedPoint::default(),
        }
    }

    /// Grid line for the category axis at `position`.
    pub fn x_grid_path(&self, position: f64) -> String {
        match &self.x {
            Some(x) => x.get_grid_path(position, self.y.as_ref()),
            None => String::new(),
        }
    }

    /// Grid line for the value axis at `position`: a curve parallel to the
    /// backbone at the corresponding radius.
    pub fn y_grid_path(&self, position: f64) -> String {
        match &self.y {
            Some(y) => y.get_grid_path(position, self.x.as_ref()),
            None => String::new(),
        }
    }

    /// Maps a chart-space coordinate back to a category-axis position.
    pub fn coordinate_to_position(&self, x: f64, y: f64) -> f64 {
        match &self.x {
            Some(renderer) => renderer.coordinate_to_position(x, y),
            None => 0.0,
        }
    }
}
