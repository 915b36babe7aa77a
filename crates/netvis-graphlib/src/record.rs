//! Node and edge records as stored in a [`DataSet`](crate::DataSet).
//!
//! Field names serialize the way the visualization library spells them (`from`/`to`, `hidden`),
//! so graph files produced for the browser can be loaded unchanged.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A record that can live in a [`DataSet`](crate::DataSet).
pub trait Record: Clone {
    /// Partial update applied by [`DataSet::update`](crate::DataSet::update).
    type Patch: Patch;

    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn apply(&mut self, patch: &Self::Patch);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Edge,
}

impl RecordKind {
    pub(crate) fn unknown(self, id: &str) -> Error {
        let id = id.to_string();
        match self {
            RecordKind::Node => Error::UnknownNode { id },
            RecordKind::Edge => Error::UnknownEdge { id },
        }
    }

    pub(crate) fn duplicate(self, id: &str) -> Error {
        let id = id.to_string();
        match self {
            RecordKind::Node => Error::DuplicateNode { id },
            RecordKind::Edge => Error::DuplicateEdge { id },
        }
    }
}

/// Partial update for a [`Record`]; only fields that are `Some` are written.
pub trait Patch {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub hidden: bool,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            x: 0.0,
            y: 0.0,
            hidden: false,
        }
    }

    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::new(id)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Record for NodeRecord {
    type Patch = NodePatch;
    const KIND: RecordKind = RecordKind::Node;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &NodePatch) {
        if let Some(label) = &patch.label {
            self.label = Some(label.clone());
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub id: String,
    pub label: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub hidden: Option<bool>,
}

impl NodePatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}

impl Patch for NodePatch {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Edge weight; the searchbox page uses it as a citation count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub hidden: bool,
}

impl EdgeRecord {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            value: None,
            hidden: false,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

impl Record for EdgeRecord {
    type Patch = EdgePatch;
    const KIND: RecordKind = RecordKind::Edge;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &EdgePatch) {
        if let Some(value) = patch.value {
            self.value = Some(value);
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePatch {
    pub id: String,
    pub value: Option<f64>,
    pub hidden: Option<bool>,
}

impl EdgePatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}

impl Patch for EdgePatch {
    fn id(&self) -> &str {
        &self.id
    }
}
