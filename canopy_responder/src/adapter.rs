// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree adapter: the only thing the pipeline knows about the UI tree.
//!
//! The element tree itself (shape, reconciliation, mutation) lives outside
//! this subsystem. Propagation needs exactly three capabilities (mapping a
//! native node to the nearest UI instance and back, and walking one step
//! toward the root) plus a disabled-control query used by the bubble-phase
//! rule for interaction events.

use core::fmt;
use core::hash::Hash;

use smallvec::SmallVec;

/// Ancestor-walk capability over a host element tree.
///
/// Injected once before the first dispatch. The pipeline consumes the
/// tree's own invariants (acyclic parent chains) rather than enforcing
/// them.
pub trait TreeAdapter {
    /// The UI-instance key: a copyable identifier into the element tree.
    type Instance: Copy + Eq + Hash + fmt::Debug + 'static;
    /// The native node handle supplied by the host per event.
    type Node: Copy + Eq + Hash + fmt::Debug + 'static;

    /// Returns the UI instance nearest the given native node, if any part
    /// of the tree owns it.
    fn instance_from_node(&self, node: Self::Node) -> Option<Self::Instance>;

    /// Returns the native node an instance renders to, if mounted.
    fn node_from_instance(&self, instance: Self::Instance) -> Option<Self::Node>;

    /// Returns the parent instance, or `None` at the root.
    fn parent(&self, instance: Self::Instance) -> Option<Self::Instance>;

    /// Returns `true` for administratively disabled instances (e.g. a
    /// disabled form control). Disabled instances do not receive
    /// bubble-phase dispatch for interaction events, though they still
    /// receive capture.
    fn is_disabled(&self, instance: Self::Instance) -> bool {
        let _ = instance;
        false
    }
}

/// Collects the strict ancestor path from `from` (inclusive) to the root.
///
/// The result is in target→root order; reverse-iterate for the capture
/// direction.
#[must_use]
pub fn path_to_root<A: TreeAdapter>(tree: &A, from: A::Instance) -> SmallVec<[A::Instance; 8]> {
    let mut path = SmallVec::new();
    let mut current = Some(from);
    while let Some(instance) = current {
        path.push(instance);
        current = tree.parent(instance);
    }
    path
}

/// Returns `true` if `instance` lies in the subtree rooted at `root`
/// (including `root` itself), determined by the parent walk.
#[must_use]
pub fn is_in_subtree<A: TreeAdapter>(tree: &A, root: A::Instance, instance: A::Instance) -> bool {
    let mut current = Some(instance);
    while let Some(step) = current {
        if step == root {
            return true;
        }
        current = tree.parent(step);
    }
    false
}
