//! Output seams between renderers and whatever draws the chart.
//!
//! The renderers never touch a scene graph directly; they push geometry
//! into these traits and the embedding decides what to do with it.

/// Receives an SVG path string for elements drawn as paths (grid lines,
/// fills, axis lines).
pub trait PathSink {
    fn set_path(&mut self, d: &str);
}

/// Receives a resolved placement for point-like elements (ticks, labels,
/// bullets). `rotation` is in degrees, clockwise, 0 pointing right.
pub trait PlacedSink {
    fn set_placement(&mut self, x: f64, y: f64, rotation: f64);
}

/// A data item rendered at a position along an axis cell.
pub trait BulletLike {
    /// Fractional position within the cell, 0 at the cell start, 1 at the
    /// cell end.
    fn location_hint(&self) -> f64 {
        0.5
    }
}
