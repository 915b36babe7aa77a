//! The rendering/physics side of a network view.
//!
//! The page talks to a vis-network instance for three things: toggling the physics simulation,
//! redrawing, and hearing once about the next `stabilized` event. [`NetworkHost`] is that surface;
//! the stabilized callback becomes a one-shot future.

use futures::channel::oneshot;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pub trait NetworkHost {
    fn set_physics(&mut self, physics: &PhysicsOptions);

    fn redraw(&mut self);

    /// Subscribes to the next stabilization event only.
    fn once_stabilized(&mut self) -> Stabilized;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepulsionOptions {
    pub node_distance: f64,
    pub central_gravity: f64,
}

impl Default for RepulsionOptions {
    fn default() -> Self {
        Self {
            node_distance: 500.0,
            central_gravity: 0.1,
        }
    }
}

/// Physics settings handed to the host. Serializes to the widget's option shape, e.g.
/// `{"enabled":true,"solver":"repulsion","repulsion":{"nodeDistance":500.0,"centralGravity":0.1}}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsOptions {
    pub enabled: bool,
    pub repulsion: Option<RepulsionOptions>,
}

impl PhysicsOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            repulsion: None,
        }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            repulsion: None,
        }
    }

    pub fn repulsion(opts: RepulsionOptions) -> Self {
        Self {
            enabled: true,
            repulsion: Some(opts),
        }
    }
}

impl Serialize for PhysicsOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("enabled", &self.enabled)?;
        if let Some(repulsion) = &self.repulsion {
            map.serialize_entry("solver", "repulsion")?;
            map.serialize_entry("repulsion", repulsion)?;
        }
        map.end()
    }
}

/// Creates a linked notifier/future pair for one stabilization event.
pub fn stabilization() -> (StabilizedNotifier, Stabilized) {
    let (tx, rx) = oneshot::channel();
    (StabilizedNotifier(tx), Stabilized(rx))
}

#[derive(Debug)]
pub struct StabilizedNotifier(oneshot::Sender<()>);

impl StabilizedNotifier {
    pub fn notify(self) {
        // The subscriber may already be gone; nothing to do then.
        let _ = self.0.send(());
    }
}

/// Resolves when the host reports stabilization, or with `Err(Canceled)` once the notifier is
/// dropped without firing (the view was torn down).
#[derive(Debug)]
pub struct Stabilized(oneshot::Receiver<()>);

impl Future for Stabilized {
    type Output = std::result::Result<(), oneshot::Canceled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

/// A host with no renderer and no simulation. It records what it is asked to do and reports
/// stabilization only when told to.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    physics: Vec<PhysicsOptions>,
    redraws: usize,
    pending: Vec<StabilizedNotifier>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current physics settings, if any were ever set.
    pub fn physics(&self) -> Option<&PhysicsOptions> {
        self.physics.last()
    }

    pub fn physics_history(&self) -> &[PhysicsOptions] {
        &self.physics
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Fires every pending stabilization subscription; returns how many there were.
    pub fn stabilize(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let n = pending.len();
        for notifier in pending {
            notifier.notify();
        }
        n
    }

    /// Drops pending subscriptions without firing them.
    pub fn tear_down(&mut self) {
        self.pending.clear();
    }
}

impl NetworkHost for HeadlessHost {
    fn set_physics(&mut self, physics: &PhysicsOptions) {
        tracing::debug!(enabled = physics.enabled, "physics updated");
        self.physics.push(*physics);
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }

    fn once_stabilized(&mut self) -> Stabilized {
        let (notifier, stabilized) = stabilization();
        self.pending.push(notifier);
        stabilized
    }
}
