#![forbid(unsafe_code)]

//! Curved-path geometry primitives for SVG charting.
//!
//! The building blocks stack leaf-first: [`path`] emits SVG path fragments,
//! [`smooth`] interpolates point sequences into smooth paths, [`measure`]
//! turns a path string back into measurable geometry, and [`spline`] combines
//! all three into a queryable backbone curve.
//!
//! Everything degrades instead of failing: degenerate input (too few points,
//! zero radii, zero-length curves) produces empty path strings and documented
//! default points, never a panic.

pub mod geom;
pub mod measure;
pub mod path;
pub mod smooth;
pub mod spline;

pub use geom::{Bounds, OrientedPoint, Point, point};
pub use measure::{FlattenOracle, NullOracle, PathMetrics, PathOracle};
pub use smooth::SmoothMethod;
pub use spline::Polyspline;
