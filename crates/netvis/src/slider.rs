//! The edge-value slider: a minimum-weight threshold that takes light edges out of the view.

use crate::error::Result;
use netvis_graphlib::{EdgeRecord, VisGraph};
use rustc_hash::FxHashSet;

/// Step sizes tried in order when laying out slider ticks. Past the last one the step grows
/// tenfold until the ticks fit.
const TICK_STEPS: [f64; 7] = [1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0];
const MAX_TICKS: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterChange {
    pub removed: usize,
    pub restored: usize,
}

/// Removes edges whose value falls below a threshold and keeps them aside so a lower threshold
/// can bring them back. Edges without a value are never filtered.
#[derive(Debug, Clone, Default)]
pub struct EdgeValueFilter {
    cache: Vec<EdgeRecord>,
}

impl EdgeValueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges currently held out of the store.
    pub fn cached(&self) -> &[EdgeRecord] {
        &self.cache
    }

    pub fn apply(&mut self, graph: &mut VisGraph, threshold: f64) -> Result<FilterChange> {
        let below: Vec<String> = graph
            .edges()
            .filter(|e| e.value.is_some_and(|v| v < threshold))
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        let removed = graph.remove_edges(below.iter().map(String::as_str));
        let mut change = FilterChange {
            removed: removed.len(),
            restored: 0,
        };
        self.cache.extend(removed);

        // Newest first. An edge stays cached while an endpoint is missing or its id is taken,
        // including by a newer cached copy restored in this same call.
        let mut restore: Vec<EdgeRecord> = Vec::new();
        let mut claimed: FxHashSet<String> = FxHashSet::default();
        for i in (0..self.cache.len()).rev() {
            let e = &self.cache[i];
            let passes = e.value.is_some_and(|v| v >= threshold);
            let attachable = graph.node(&e.from).is_some()
                && graph.node(&e.to).is_some()
                && graph.edge(&e.id).is_none()
                && !claimed.contains(&e.id);
            if passes && attachable {
                claimed.insert(e.id.clone());
                restore.push(self.cache.remove(i));
            }
        }
        change.restored = restore.len();
        graph.add_edges(restore)?;

        tracing::debug!(
            threshold,
            removed = change.removed,
            restored = change.restored,
            cached = self.cache.len(),
            "edge value filter applied"
        );
        Ok(change)
    }

    /// Smallest and largest edge value over stored and cached edges.
    pub fn value_range(&self, graph: &VisGraph) -> Option<(f64, f64)> {
        graph
            .edges()
            .iter()
            .chain(self.cache.iter())
            .filter_map(|e| e.value)
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderScale {
    pub step: f64,
    pub ticks: Vec<f64>,
}

/// Tick marks for a slider over `[min, max]`: the first step size that needs at most ten ticks,
/// starting at the step multiple at or below `min`. Ticks below `min` are clamped up to it.
pub fn slider_scale(min: f64, max: f64) -> SliderScale {
    let delta = max - min;
    let fits = |s: f64| (delta / s).ceil() <= MAX_TICKS;
    let step = match TICK_STEPS.iter().copied().find(|s| fits(*s)) {
        Some(step) => step,
        None => {
            let mut step = TICK_STEPS[TICK_STEPS.len() - 1];
            while !fits(step) && step.is_finite() {
                step *= 10.0;
            }
            step
        }
    };

    let mut ticks = Vec::new();
    if min.is_finite() && max.is_finite() && min <= max && step.is_finite() {
        let mut i = (min / step).floor() * step;
        while i <= max && ticks.len() <= MAX_TICKS as usize {
            ticks.push(i.max(min));
            let next = i + step;
            if next <= i {
                break;
            }
            i = next;
        }
    }
    SliderScale { step, ticks }
}

/// Initial slider position: the query parameter, else the persisted value, else `fallback`,
/// capped at `max`. Candidates are read like `parseInt` (leading integer, surrounding junk
/// ignored); a missing, unparseable, or zero candidate falls through to the next one.
pub fn initial_threshold(
    query: Option<&str>,
    stored: Option<&str>,
    fallback: f64,
    max: f64,
) -> f64 {
    let value = [query, stored]
        .into_iter()
        .flatten()
        .filter_map(parse_leading_int)
        .find(|v| *v != 0)
        .map(|v| v as f64)
        .unwrap_or(fallback);
    value.min(max)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}
