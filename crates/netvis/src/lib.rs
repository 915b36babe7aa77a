#![forbid(unsafe_code)]

//! View operations for an interactive node-link page.
//!
//! Every operation takes the store ([`VisGraph`]) and, where it needs rendering or physics, the
//! host ([`NetworkHost`]) explicitly. The host stands in for the browser-side network widget; a
//! [`HeadlessHost`] is provided for tests and command-line use.

pub mod config;
pub mod error;
pub mod focus;
pub mod host;
pub mod slider;
pub mod view;

pub use config::ViewConfig;
pub use error::{Error, Result};
pub use focus::{FocusCanceller, FocusOutcome, SubgraphFocus, show_subgraph};
pub use host::{
    HeadlessHost, NetworkHost, PhysicsOptions, RepulsionOptions, Stabilized, StabilizedNotifier,
    stabilization,
};
pub use slider::{EdgeValueFilter, FilterChange, SliderScale, initial_threshold, slider_scale};
pub use view::{
    Expansion, distribute_radially, expand_node, resolve_graph_overlaps, set_physics_enabled,
};

pub use netvis_graphlib::{
    EdgePatch, EdgeRecord, GraphData, NodePatch, NodeRecord, Removed, VisGraph,
};
pub use netvis_layout::{Outcome, OverlapOptions, Resolution};
