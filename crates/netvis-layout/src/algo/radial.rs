use crate::error::{Error, Result};
use crate::geom::Point;

#[derive(Debug, Clone, Copy)]
pub struct RadialOptions {
    /// Distance from the center to every placed node.
    pub radius: f64,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self { radius: 100.0 }
    }
}

/// Evenly spaced positions on a circle around `center`, starting at angle 0 and going
/// counter-clockwise in math orientation (clockwise on a y-down screen).
///
/// Position `k` of `count` is `center + radius * (cos(2πk/count), sin(2πk/count))`.
pub fn radial_positions(center: Point, count: usize, opts: &RadialOptions) -> Result<Vec<Point>> {
    if !(opts.radius.is_finite() && opts.radius > 0.0) {
        return Err(Error::invalid(format!(
            "radius must be positive and finite, got {}",
            opts.radius
        )));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let step = 2.0 * std::f64::consts::PI / count as f64;
    Ok((0..count)
        .map(|k| {
            let angle = k as f64 * step;
            Point::new(
                center.x + opts.radius * angle.cos(),
                center.y + opts.radius * angle.sin(),
            )
        })
        .collect())
}
