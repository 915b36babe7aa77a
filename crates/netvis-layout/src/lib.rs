#![forbid(unsafe_code)]

//! Headless placement helpers for interactive network views.
//!
//! Nothing here owns node storage: callers hand in positions, get positions back, and persist
//! them into their own store.

pub mod algo;
pub mod error;
pub mod geom;

pub use algo::overlap::{Outcome, OverlapOptions, Resolution, resolve_overlaps};
pub use algo::radial::{RadialOptions, radial_positions};
pub use error::{Error, Result};
pub use geom::{Point, PositionRecord};
