use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Transform = euclid::Transform2D<f64, Unit, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn transform_point(t: &Transform, p: Point) -> Point {
    let q = t.transform_point(euclid::point2(p.x, p.y));
    point(q.x, q.y)
}

/// A position in pixel space. Pure value type, freely copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

impl Point {
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point on a curve carrying the tangent direction of travel at that
/// sample, in degrees. The angle is the direction of travel, not the azimuth
/// from the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientedPoint {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl OrientedPoint {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self { x, y, angle }
    }

    pub fn point(&self) -> Point {
        point(self.x, self.y)
    }

    /// Offsets perpendicular to the direction of travel. For a left-to-right
    /// horizontal tangent a positive radius moves up (negative screen y).
    pub fn radial_offset(&self, radius: f64) -> Point {
        point(
            self.x + radius * sin_deg(self.angle),
            self.y - radius * cos_deg(self.angle),
        )
    }
}

pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub fn round_to(v: f64, decimals: u32) -> f64 {
    let m = 10f64.powi(decimals as i32);
    (v * m).round() / m
}

/// Axis-aligned bounding box accumulated from sampled points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: &Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        point(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_offset_is_perpendicular_to_travel() {
        // Horizontal left-to-right travel: positive radius moves up.
        let op = OrientedPoint::new(10.0, 20.0, 0.0);
        let p = op.radial_offset(5.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 15.0).abs() < 1e-9);

        // Downward travel (90 deg): positive radius moves right.
        let op = OrientedPoint::new(0.0, 0.0, 90.0);
        let p = op.radial_offset(5.0);
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn bounds_from_points_tracks_extents() {
        let pts = [point(-3.0, 2.0), point(5.0, -1.0), point(0.0, 7.0)];
        let b = Bounds::from_points(&pts).unwrap();
        assert_eq!(b.min_x, -3.0);
        assert_eq!(b.max_x, 5.0);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 7.0);
        assert_eq!(b.center(), point(1.0, 3.0));
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn round_to_rounds_to_requested_decimals() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-1.23456, 3), -1.235);
        assert_eq!(round_to(1.5, 0), 2.0);
    }
}
