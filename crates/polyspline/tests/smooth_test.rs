use polyspline::measure::FlattenOracle;
use polyspline::path::polyline;
use polyspline::smooth::{basis, catmull_rom, monotone, tension};
use polyspline::{PathOracle, Point, SmoothMethod, point};

fn wave() -> Vec<Point> {
    vec![
        point(0.0, 0.0),
        point(50.0, 80.0),
        point(100.0, 20.0),
        point(150.0, 100.0),
    ]
}

#[test]
fn full_tension_degenerates_to_polyline() {
    let pts = wave();
    assert_eq!(tension(&pts, 1.0, 1.0), polyline(&pts));
    assert_eq!(tension(&pts, 1.2, 1.5), polyline(&pts));
}

#[test]
fn short_input_degenerates_to_polyline() {
    let pts = [point(0.0, 0.0), point(10.0, 10.0)];
    assert_eq!(tension(&pts, 0.5, 0.5), polyline(&pts));
}

#[test]
fn tension_emits_cubic_segments() {
    let d = tension(&wave(), 0.7, 0.7);
    assert!(d.starts_with(" M"));
    assert_eq!(d.matches(" C").count(), 3);
}

#[test]
fn tension_closed_loop_wraps_neighbors() {
    let mut pts = wave();
    pts.push(pts[0]);
    let d = tension(&pts, 0.7, 0.7);
    // every edge of the loop becomes a curve, including the closing one
    assert_eq!(d.matches(" C").count(), 4);
}

#[test]
fn monotone_does_not_overshoot_monotonic_data() {
    let pts = [point(0.0, 0.0), point(50.0, 10.0), point(100.0, 100.0)];
    let d = monotone(&pts, false, false);
    let metrics = FlattenOracle::default().measure(&d).unwrap();
    for p in metrics.points() {
        assert!(p.y >= -1e-6 && p.y <= 100.0 + 1e-6, "overshoot at y={}", p.y);
        assert!(p.x >= -1e-6 && p.x <= 100.0 + 1e-6);
    }
}

#[test]
fn monotone_y_transposes() {
    let pts = [point(0.0, 0.0), point(10.0, 50.0), point(100.0, 100.0)];
    let d = monotone(&pts, true, false);
    let metrics = FlattenOracle::default().measure(&d).unwrap();
    for p in metrics.points() {
        assert!(p.x >= -1e-6 && p.x <= 100.0 + 1e-6);
    }
}

#[test]
fn basis_open_curve_starts_at_first_point() {
    let d = basis(&wave(), false);
    assert!(d.starts_with(" M0,0 "));
    // approximating spline still ends at the last input point
    assert!(d.contains(" L150,100 "));
}

#[test]
fn basis_closed_curve_closes_path() {
    let d = basis(&wave(), true);
    assert!(d.trim_end().ends_with('Z'));
}

#[test]
fn catmull_rom_handles_duplicate_points() {
    let pts = [
        point(0.0, 0.0),
        point(0.0, 0.0),
        point(50.0, 80.0),
        point(100.0, 20.0),
    ];
    let d = catmull_rom(&pts, 0.5);
    assert!(!d.contains("NaN"));
    assert!(d.starts_with(" M"));
}

#[test]
fn method_dispatch_matches_free_functions() {
    let pts = wave();
    let method = SmoothMethod::CatmullRom { alpha: 0.5 };
    assert_eq!(method.smooth(&pts), catmull_rom(&pts, 0.5));
    let method = SmoothMethod::MonotoneX { closed: false };
    assert_eq!(method.smooth(&pts), monotone(&pts, false, false));
}
