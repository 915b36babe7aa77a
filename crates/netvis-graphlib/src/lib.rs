#![forbid(unsafe_code)]

//! Node/edge storage for interactive network views.
//!
//! Baseline: the vis-network `DataSet` model (records keyed by id, batched partial updates, a
//! per-record `hidden` flag) plus the network's neighborhood queries.

pub mod dataset;
pub mod error;
pub mod graph;
pub mod record;

pub use dataset::DataSet;
pub use error::{Error, Result};
pub use graph::{GraphData, Removed, VisGraph};
pub use record::{EdgePatch, EdgeRecord, NodePatch, NodeRecord, Patch, Record, RecordKind};
