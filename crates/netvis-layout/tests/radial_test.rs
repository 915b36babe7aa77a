use netvis_layout::{Point, RadialOptions, radial_positions};
use std::f64::consts::PI;

#[test]
fn positions_are_evenly_spaced_on_the_circle() {
    let center = Point::new(40.0, -25.0);
    for n in [1usize, 2, 3, 5, 8, 13] {
        for radius in [1.0, 100.0, 333.5] {
            let out = radial_positions(center, n, &RadialOptions { radius }).unwrap();
            assert_eq!(out.len(), n);
            let step = 2.0 * PI / n as f64;
            for (k, p) in out.iter().enumerate() {
                let angle = k as f64 * step;
                assert_eq!(p.x, center.x + radius * angle.cos());
                assert_eq!(p.y, center.y + radius * angle.sin());
                assert!((p.distance_to(&center) - radius).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn first_position_sits_on_the_positive_x_axis() {
    let out = radial_positions(Point::new(0.0, 0.0), 4, &RadialOptions::default()).unwrap();
    assert_eq!(out[0], Point::new(100.0, 0.0));
}
