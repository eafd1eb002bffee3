use polyspline::path::spiral_points;

#[test]
fn spiral_radii_grow_monotonically() {
    let pts = spiral_points(0.0, 0.0, 100.0, 100.0, 10.0, 10.0, 20.0, 0.0, 0.0);
    assert!(pts.len() > 10);

    let mut prev_r = 0.0;
    for p in &pts {
        let r = (p.x * p.x + p.y * p.y).sqrt();
        assert!(r > prev_r, "radius must grow strictly: {r} after {prev_r}");
        prev_r = r;
    }

    let first_r = (pts[0].x * pts[0].x + pts[0].y * pts[0].y).sqrt();
    assert!(first_r > 10.0);
    assert!(prev_r < 121.0);
}

#[test]
fn spiral_points_are_step_spaced() {
    let pts = spiral_points(0.0, 0.0, 100.0, 100.0, 10.0, 10.0, 20.0, 0.0, 0.0);
    for pair in pts.windows(2) {
        let d = pair[0].distance_to(&pair[1]);
        assert!(
            (9.0..=11.0).contains(&d),
            "consecutive spacing {d} outside 10 +/- 10%"
        );
    }
}

#[test]
fn spiral_center_offset_shifts_all_points() {
    let at_origin = spiral_points(0.0, 0.0, 50.0, 50.0, 5.0, 10.0, 20.0, 0.0, 0.0);
    let shifted = spiral_points(30.0, -40.0, 50.0, 50.0, 5.0, 10.0, 20.0, 0.0, 0.0);
    assert_eq!(at_origin.len(), shifted.len());
    for (a, b) in at_origin.iter().zip(&shifted) {
        assert!((b.x - a.x - 30.0).abs() < 1e-9);
        assert!((b.y - a.y + 40.0).abs() < 1e-9);
    }
}

#[test]
fn spiral_squashes_vertically_with_radius_y() {
    let round = spiral_points(0.0, 0.0, 100.0, 100.0, 10.0, 10.0, 20.0, 0.0, 0.0);
    let squashed = spiral_points(0.0, 0.0, 100.0, 50.0, 10.0, 10.0, 20.0, 0.0, 0.0);
    assert_eq!(round.len(), squashed.len());
    for (a, b) in round.iter().zip(&squashed) {
        assert!((b.x - a.x).abs() < 1e-9);
        assert!((b.y - a.y / 2.0).abs() < 1e-9);
    }
}

#[test]
fn degenerate_step_produces_no_points() {
    assert!(spiral_points(0.0, 0.0, 100.0, 100.0, 10.0, 0.0, 20.0, 0.0, 0.0).is_empty());
    assert!(spiral_points(0.0, 0.0, 100.0, 100.0, 10.0, 10.0, 0.0, 0.0, 0.0).is_empty());
}
