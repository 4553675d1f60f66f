// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatch loop: the single entry point fed by the host environment.
//!
//! One [`EventPipeline`] is constructed at startup and owns every piece of
//! pipeline state: the plugin registry, the injected tree adapter, the
//! listener bank, and the per-shape event pools. It runs single-threaded
//! and to completion per native event; stateful plugin correctness depends
//! on that model, and the pools exploit it instead of locking.
//!
//! Batch release is guaranteed by a drop guard: even when a listener
//! panics, every non-persistent event extracted for the current native
//! event returns to its pool, so pools never leak or carry stale data into
//! the next dispatch. Acquired events are owned by the batch, never by
//! the pool, so a nested dispatch triggered from a listener cannot
//! recycle an in-flight instance.

use alloc::vec::Vec;

use canopy_plugins::Extraction;
use canopy_responder::{ListenerBank, TreeAdapter, is_in_subtree, run_chain};
use canopy_synthetic::{EventPool, NativeEvent, NativeKind, SyntheticEvent};

use crate::registry::PluginRegistry;

/// The assembled event pipeline.
#[derive(Debug)]
pub struct EventPipeline<A: TreeAdapter> {
    registry: PluginRegistry<A>,
    tree: Option<A>,
    listeners: ListenerBank<A::Instance, A::Node>,
    pool: EventPool<A::Instance, A::Node>,
}

impl<A: TreeAdapter> Default for EventPipeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TreeAdapter> EventPipeline<A> {
    /// Creates a pipeline awaiting startup injection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: PluginRegistry::new(),
            tree: None,
            listeners: ListenerBank::new(),
            pool: EventPool::new(),
        }
    }

    /// Read access to the plugin registry.
    #[must_use]
    pub fn registry(&self) -> &PluginRegistry<A> {
        &self.registry
    }

    /// Mutable access to the registry for startup injection.
    pub fn registry_mut(&mut self) -> &mut PluginRegistry<A> {
        &mut self.registry
    }

    /// Injects the tree adapter. Required before the first dispatch.
    ///
    /// # Panics
    ///
    /// Panics if an adapter was already injected.
    pub fn inject_tree(&mut self, tree: A) {
        assert!(
            self.tree.is_none(),
            "tree adapter may only be injected once"
        );
        self.tree = Some(tree);
    }

    /// Returns the injected tree adapter, if any.
    #[must_use]
    pub fn tree(&self) -> Option<&A> {
        self.tree.as_ref()
    }

    /// Read access to the listener bank.
    #[must_use]
    pub fn listeners(&self) -> &ListenerBank<A::Instance, A::Node> {
        &self.listeners
    }

    /// Mutable access to the listener bank for registration.
    pub fn listeners_mut(&mut self) -> &mut ListenerBank<A::Instance, A::Node> {
        &mut self.listeners
    }

    /// Read access to the event pools (introspection and tests).
    #[must_use]
    pub fn pool(&self) -> &EventPool<A::Instance, A::Node> {
        &self.pool
    }

    /// Feeds one native event through the pipeline.
    ///
    /// Every plugin's extraction runs in the fixed startup order; each
    /// collected event's chain is executed capture → bubble, honoring
    /// propagation stops; finally the batch is released. Listener panics
    /// propagate to the caller, but the batch release still runs.
    ///
    /// Returns the events a listener persisted during this batch; their
    /// lifetime is the caller's to manage from here on.
    ///
    /// # Panics
    ///
    /// Panics if no tree adapter was injected.
    pub fn dispatch(
        &mut self,
        kind: NativeKind,
        native: NativeEvent,
        native_target: Option<A::Node>,
    ) -> Vec<SyntheticEvent<A::Instance, A::Node>> {
        let Some(tree) = self.tree.as_ref() else {
            panic!("dispatch called before a tree adapter was injected");
        };
        let target = native_target.and_then(|node| tree.instance_from_node(node));

        let mut batch = Vec::new();
        let mut cx = Extraction {
            pool: &mut self.pool,
            tree,
            listeners: &self.listeners,
        };
        for plugin in self.registry.plugins_mut() {
            if let Some(event) = plugin.extract(kind, target, &native, native_target, &mut cx) {
                batch.push(event);
            }
        }
        drop(cx);

        let mut guard = BatchGuard {
            pool: &mut self.pool,
            events: batch,
        };
        guard.run();
        guard.finish()
    }

    /// Returns `true` if any registration variant of `logical_name` has a
    /// listener whose owning instance lies in the subtree of `scope_root`
    /// (or anywhere, with no scope). A performance short-circuit for
    /// plugins and hosts, not a correctness requirement.
    #[must_use]
    pub fn has_any_listener_for_dependencies(
        &self,
        logical_name: &str,
        scope_root: Option<A::Instance>,
    ) -> bool {
        let Some(config) = self.registry.config_for(logical_name) else {
            return false;
        };
        match (scope_root, self.tree.as_ref()) {
            (Some(root), Some(tree)) => config.registration.names().any(|name| {
                self.listeners
                    .instances_with(name)
                    .any(|instance| is_in_subtree(tree, root, instance))
            }),
            (Some(_), None) => false,
            (None, _) => config
                .registration
                .names()
                .any(|name| self.listeners.any_for_name(name)),
        }
    }

    /// Clears and rebuilds every piece of pipeline state.
    ///
    /// Exists for tests; production pipelines are configured once and
    /// never torn down.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.tree = None;
        self.listeners = ListenerBank::new();
        self.pool = EventPool::new();
    }
}

/// Scoped-acquisition guard: the batch owns its events, and whatever is
/// still unreleased when the guard drops (including on a listener panic)
/// goes back to the pool. Persisted events surrendered during an unwind
/// are dropped rather than pooled, which keeps the free lists clean.
struct BatchGuard<'a, K, N> {
    pool: &'a mut EventPool<K, N>,
    events: Vec<SyntheticEvent<K, N>>,
}

impl<K: Copy, N> BatchGuard<'_, K, N> {
    fn run(&mut self) {
        for event in &mut self.events {
            run_chain(event);
        }
    }

    fn finish(mut self) -> Vec<SyntheticEvent<K, N>> {
        let mut persisted = Vec::new();
        for event in core::mem::take(&mut self.events) {
            if let Some(kept) = self.pool.release(event) {
                persisted.push(kept);
            }
        }
        persisted
    }
}

impl<K, N> Drop for BatchGuard<'_, K, N> {
    fn drop(&mut self) {
        for event in self.events.drain(..) {
            let _ = self.pool.release(event);
        }
    }
}
