use polyspline::measure::FlattenOracle;
use polyspline::path::{
    arc, arc_slice, arc_to, path_to_points, points_to_path, polyline_with_step, rectangle,
};
use polyspline::{NullOracle, PathOracle, point};

#[test]
fn rectangle_emits_closed_corner_sequence() {
    assert_eq!(
        rectangle(100.0, 50.0, 0.0, 0.0),
        " M0,0  L100,0  L100,50  L0,50  Z"
    );
}

#[test]
fn rectangle_honors_origin_offset() {
    assert_eq!(
        rectangle(10.0, 10.0, 5.0, -5.0),
        " M5,-5  L15,-5  L15,5  L5,5  Z"
    );
}

#[test]
fn polyline_skips_points_within_min_step() {
    let pts = [point(0.0, 0.0), point(0.1, 0.0), point(10.0, 0.0)];
    assert_eq!(polyline_with_step(&pts, 0.5), " M0,0  L10,0 ");
}

#[test]
fn polyline_of_empty_input_is_empty() {
    assert_eq!(polyline_with_step(&[], 0.5), "");
}

#[test]
fn arc_with_zero_sweep_is_empty() {
    assert_eq!(arc(0.0, 0.0, 50.0, 0.0, 50.0, 0.0, 0.0), "");
    assert_eq!(arc_to(10.0, 0.0, 50.0), "");
}

#[test]
fn arc_slice_closes_and_uses_relative_arcs() {
    let d = arc_slice(0.0, 90.0, 50.0, 20.0);
    assert!(d.starts_with(" M"));
    assert!(d.contains(" a"));
    assert!(d.trim_end().ends_with('Z'));
}

#[test]
fn full_ring_is_a_single_closed_path() {
    // corner radii are ignored at a full sweep
    let d = arc(0.0, 360.0, 50.0, 20.0, 50.0, 5.0, 5.0);
    assert_eq!(d.matches(" M").count(), 1);
    assert_eq!(d.matches('Z').count(), 1);
    assert!(!d.contains(" A"));
    // outer rim forward plus inner rim reverse-wound, two segments each
    assert_eq!(d.matches(" a").count(), 4);

    // outer circumference + inner circumference + the two radial edges
    let len = FlattenOracle::default().measure(&d).unwrap().total_length();
    let expected = std::f64::consts::TAU * 50.0 + std::f64::consts::TAU * 20.0 + 60.0;
    assert!((len - expected).abs() / expected < 0.015, "length {len}");
}

#[test]
fn full_circle_without_inner_radius_is_a_closed_disk() {
    let d = arc(90.0, 360.0, 50.0, 0.0, 50.0, 0.0, 0.0);
    assert_eq!(d.matches(" M").count(), 1);
    assert_eq!(d.matches('Z').count(), 1);
    let len = FlattenOracle::default().measure(&d).unwrap().total_length();
    // circumference plus the line to the center and the closing edge back
    let expected = std::f64::consts::TAU * 50.0 + 100.0;
    assert!((len - expected).abs() / expected < 0.015, "length {len}");
}

#[test]
fn swapped_radii_are_reordered() {
    // inner > outer must behave as if the radii were passed the right way
    let a = arc(0.0, 90.0, 20.0, 50.0, 20.0, 0.0, 0.0);
    let b = arc(0.0, 90.0, 50.0, 20.0, 50.0, 0.0, 0.0);
    assert_eq!(a, b);
}

#[test]
fn corner_radius_adds_corner_arcs() {
    let plain = arc(0.0, 90.0, 50.0, 20.0, 50.0, 0.0, 0.0);
    let rounded = arc(0.0, 90.0, 50.0, 20.0, 50.0, 5.0, 5.0);
    assert!(rounded.matches(" A").count() > plain.matches(" A").count());
}

#[test]
fn arc_grid_always_yields_measurable_paths() {
    let oracle = FlattenOracle::default();
    for sweep in [10.0, 90.0, 180.0, 270.0, 360.0] {
        for inner in [0.0, 15.0] {
            let d = arc(0.0, sweep, 50.0, inner, 50.0, 0.0, 0.0);
            assert!(d.starts_with(" M"), "sweep {sweep} inner {inner}: {d}");
            let pts = path_to_points(&d, 8, &oracle)
                .unwrap_or_else(|| panic!("unmeasurable arc: sweep {sweep} inner {inner}"));
            assert!(!pts.is_empty());
            for p in &pts {
                assert!(p.x.is_finite() && p.y.is_finite());
            }
        }
    }
}

#[test]
fn path_to_points_resamples_evenly() {
    let oracle = FlattenOracle::default();
    let d = points_to_path(&[point(0.0, 0.0), point(100.0, 0.0)]);
    let pts = path_to_points(&d, 5, &oracle).unwrap();
    assert_eq!(pts.len(), 5);
    for (i, p) in pts.iter().enumerate() {
        assert!((p.x - 25.0 * i as f64).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }
}

#[test]
fn path_to_points_without_oracle_support_is_none() {
    let d = points_to_path(&[point(0.0, 0.0), point(100.0, 0.0)]);
    assert!(path_to_points(&d, 5, &NullOracle).is_none());
}
