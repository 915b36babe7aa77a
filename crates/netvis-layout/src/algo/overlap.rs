//! Iterative pairwise overlap resolution.
//!
//! Every pass visits all unordered pairs and snaps a pair that is too close (or too far apart)
//! back onto the violated threshold by moving both nodes the same amount along the line joining
//! them. Passes repeat until one makes no adjustment or the time budget runs out.

use crate::error::{Error, Result};
use crate::geom::PositionRecord;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OverlapOptions {
    pub min_distance: f64,
    pub max_distance: f64,
    /// Wall-clock budget, checked after every pass.
    pub timeout: Duration,
    /// Slack applied to both thresholds before a pair counts as violating. `0.0` compares
    /// distances exactly.
    pub tolerance: f64,
    /// Optional pass cap. Hitting it ends resolution the same way the timeout does.
    pub max_passes: Option<usize>,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self {
            min_distance: 200.0,
            max_distance: 1000.0,
            timeout: Duration::from_millis(5000),
            tolerance: 0.0,
            max_passes: None,
        }
    }
}

impl OverlapOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(Error::invalid(format!(
                "min_distance must be positive and finite, got {}",
                self.min_distance
            )));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(Error::invalid(format!(
                "max_distance must be positive and finite, got {}",
                self.max_distance
            )));
        }
        if self.min_distance > self.max_distance {
            return Err(Error::invalid(format!(
                "min_distance ({}) exceeds max_distance ({})",
                self.min_distance, self.max_distance
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::invalid("timeout must be non-zero"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::invalid(format!(
                "tolerance must be non-negative and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_passes == Some(0) {
            return Err(Error::invalid("max_passes must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The last pass made no adjustment.
    Converged,
    /// The budget ran out while pairs were still being adjusted; the layout may still contain
    /// violating pairs.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub passes: usize,
    /// Pair corrections summed over all passes.
    pub adjustments: usize,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }
}

/// Moves `nodes` until every pair is between `min_distance` and `max_distance` apart, or the
/// budget is spent.
///
/// Running out of budget is not an error: a warning is logged and the partial layout is kept.
/// The only error is rejected options.
///
/// Each pass is O(n²) in the number of nodes and there is no spatial index, so this is meant for
/// the handful of nodes around an expanded neighborhood, not for whole graphs.
pub fn resolve_overlaps(nodes: &mut [PositionRecord], opts: &OverlapOptions) -> Result<Resolution> {
    opts.validate()?;

    let mut res = Resolution {
        passes: 0,
        adjustments: 0,
        outcome: Outcome::Converged,
    };
    if nodes.len() < 2 {
        return Ok(res);
    }

    let start = Instant::now();
    loop {
        let adjusted = relax_pass(nodes, opts);
        res.passes += 1;
        res.adjustments += adjusted;
        if adjusted == 0 {
            break;
        }

        let elapsed = start.elapsed();
        let out_of_passes = opts.max_passes.is_some_and(|max| res.passes >= max);
        if elapsed >= opts.timeout || out_of_passes {
            res.outcome = Outcome::TimedOut;
            tracing::warn!(
                passes = res.passes,
                adjustments = res.adjustments,
                elapsed_ms = elapsed.as_millis() as u64,
                "time limit reached before resolving all overlaps and separations"
            );
            break;
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        passes = res.passes,
        adjustments = res.adjustments,
        converged = res.converged(),
        "overlap resolution finished"
    );
    Ok(res)
}

fn relax_pass(nodes: &mut [PositionRecord], opts: &OverlapOptions) -> usize {
    let lo = opts.min_distance - opts.tolerance;
    let hi = opts.max_distance + opts.tolerance;

    let mut adjusted = 0;
    for i in 0..nodes.len() {
        let (head, tail) = nodes.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if separate_pair(a, b, opts.min_distance, opts.max_distance, lo, hi) {
                adjusted += 1;
            }
        }
    }
    adjusted
}

/// Snaps one pair back onto the violated threshold. Returns whether anything moved.
///
/// `lo`/`hi` are the thresholds with tolerance applied; the correction always targets the exact
/// `min`/`max`.
fn separate_pair(
    a: &mut PositionRecord,
    b: &mut PositionRecord,
    min: f64,
    max: f64,
    lo: f64,
    hi: f64,
) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let distance = (dx * dx + dy * dy).sqrt();

    // Positive moves `a` towards `b`.
    let shift = if distance < lo {
        -(min - distance) / 2.0
    } else if distance > hi {
        (distance - max) / 2.0
    } else {
        return false;
    };

    let (cos, sin) = direction(dx, dy, distance);
    a.x += shift * cos;
    a.y += shift * sin;
    b.x -= shift * cos;
    b.y -= shift * sin;
    true
}

/// Unit direction from the first node of a pair to the second. Coincident nodes separate along
/// +x.
fn direction(dx: f64, dy: f64, distance: f64) -> (f64, f64) {
    if distance == 0.0 {
        return (1.0, 0.0);
    }
    let angle = dy.atan2(dx);
    (angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::{OverlapOptions, direction, relax_pass, separate_pair};
    use crate::geom::PositionRecord;
    use std::time::Duration;

    #[test]
    fn coincident_pair_splits_along_positive_x() {
        assert_eq!(direction(0.0, 0.0, 0.0), (1.0, 0.0));
        assert_eq!(direction(-0.0, -0.0, 0.0), (1.0, 0.0));

        let mut a = PositionRecord::new("a", 3.0, 4.0);
        let mut b = PositionRecord::new("b", 3.0, 4.0);
        assert!(separate_pair(&mut a, &mut b, 200.0, 1000.0, 200.0, 1000.0));
        assert_eq!((a.x, a.y), (-97.0, 4.0));
        assert_eq!((b.x, b.y), (103.0, 4.0));
    }

    #[test]
    fn pair_displacements_are_equal_and_opposite() {
        for (a0, b0) in [((3.0, 4.0), (50.0, -20.0)), ((0.0, 0.0), (900.0, 1200.0))] {
            let mut a = PositionRecord::new("a", a0.0, a0.1);
            let mut b = PositionRecord::new("b", b0.0, b0.1);
            assert!(separate_pair(&mut a, &mut b, 200.0, 1000.0, 200.0, 1000.0));

            let da = (a.x - a0.0, a.y - a0.1);
            let db = (b.x - b0.0, b.y - b0.1);
            assert!((da.0.hypot(da.1) - db.0.hypot(db.1)).abs() < 1e-9);
            assert!((da.0 + db.0).abs() < 1e-9 && (da.1 + db.1).abs() < 1e-9);
        }
    }

    #[test]
    fn tolerance_widens_the_accepted_band() {
        let mut a = PositionRecord::new("a", 0.0, 0.0);
        let mut b = PositionRecord::new("b", 199.5, 0.0);
        assert!(!separate_pair(&mut a, &mut b, 200.0, 1000.0, 199.0, 1001.0));
        assert_eq!(b.x, 199.5);
    }

    #[test]
    fn a_pass_counts_every_corrected_pair() {
        let opts = OverlapOptions::default();
        let mut nodes = vec![
            PositionRecord::new("a", 0.0, 0.0),
            PositionRecord::new("b", 5.0, 0.0),
            PositionRecord::new("c", 5000.0, 0.0),
        ];
        assert!(relax_pass(&mut nodes, &opts) >= 2);
    }

    #[test]
    fn options_are_validated() {
        let ok = OverlapOptions::default();
        assert!(ok.validate().is_ok());

        let cases = [
            OverlapOptions {
                min_distance: 0.0,
                ..ok.clone()
            },
            OverlapOptions {
                max_distance: f64::NAN,
                ..ok.clone()
            },
            OverlapOptions {
                min_distance: 500.0,
                max_distance: 100.0,
                ..ok.clone()
            },
            OverlapOptions {
                timeout: Duration::ZERO,
                ..ok.clone()
            },
            OverlapOptions {
                tolerance: -1.0,
                ..ok.clone()
            },
            OverlapOptions {
                max_passes: Some(0),
                ..ok.clone()
            },
        ];
        for opts in cases {
            assert!(opts.validate().is_err(), "accepted {opts:?}");
        }
    }
}
