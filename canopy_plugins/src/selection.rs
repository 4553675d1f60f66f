// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful selection-tracking plugin.
//!
//! Native platforms report selection changes unevenly: some emit a
//! dedicated notification, some only key and pointer events around it.
//! This plugin reconstructs one logical `select` event from five native
//! kinds by remembering, across calls:
//!
//! - the currently focused text-editable node and its UI instance,
//! - the last observed selection snapshot,
//! - whether the pointer is currently pressed (a drag-select in progress
//!   suppresses emission until release, matching native semantics).
//!
//! What counts as "the selection changed" is host-defined: the
//! [`SelectionProbe`] supplies snapshots of an associated type compared by
//! structural equality, so a platform can use a caret range, an
//! anchor/focus node pair, or anything else with a meaningful `==`.
//!
//! State transitions happen only inside [`EventPlugin::extract`]; there is
//! no other entry point, which is what keeps the plugin safe under the
//! single-threaded run-to-completion model.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use canopy_responder::{TreeAdapter, accumulate_two_phase};
use canopy_synthetic::{DispatchConfig, EventShape, NativeEvent, NativeKind, SyntheticEvent};

use crate::{EventPlugin, Extraction, kinds};

/// Every native kind that can trigger extraction of the `select` logical
/// event.
pub const SELECT_DEPENDENCIES: &[NativeKind] = &[
    kinds::FOCUS_IN,
    kinds::FOCUS_OUT,
    kinds::POINTER_DOWN,
    kinds::POINTER_UP,
    kinds::CONTEXT_MENU,
    kinds::SELECTION_CHANGE,
    kinds::KEY_DOWN,
    kinds::KEY_UP,
];

/// Host capabilities the selection plugin depends on.
///
/// The associated snapshot type is the pluggable comparison strategy: the
/// plugin only ever clones snapshots and compares them for equality, so a
/// host picks whatever structural shape its platform selection API
/// supports. Returning `None` from [`SelectionProbe::snapshot`] means "no
/// selection to speak of", which never emits an event.
pub trait SelectionProbe<N> {
    /// A structural snapshot of the current selection.
    type Snapshot: Clone + PartialEq;

    /// Whether the node accepts text editing (and therefore selection
    /// tracking).
    fn is_text_editable(&self, node: N) -> bool;

    /// The platform element currently holding focus, if any.
    fn active_node(&self) -> Option<N>;

    /// A fresh snapshot of the current selection within `node`.
    fn snapshot(&self, node: N) -> Option<Self::Snapshot>;

    /// Whether the platform emits a native selection-changed notification.
    /// Legacy engines that do not are still covered by the key and pointer
    /// paths.
    fn supports_selection_events(&self) -> bool {
        true
    }
}

/// A caret-range selection snapshot, for hosts with linear text selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CaretSnapshot {
    /// Selection start offset.
    pub start: u32,
    /// Selection end offset.
    pub end: u32,
}

/// An anchor/focus selection snapshot, for hosts with node-based selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnchorFocusSnapshot<N> {
    /// The node and offset where the selection was started.
    pub anchor: (N, u32),
    /// The node and offset where the selection currently ends.
    pub focus: (N, u32),
}

/// The stateful cross-event selection plugin.
pub struct SelectionPlugin<A: TreeAdapter, P: SelectionProbe<A::Node>> {
    probe: P,
    config: Rc<DispatchConfig>,
    focused_node: Option<A::Node>,
    focused_instance: Option<A::Instance>,
    last_snapshot: Option<P::Snapshot>,
    pointer_down: bool,
}

impl<A: TreeAdapter, P: SelectionProbe<A::Node>> fmt::Debug for SelectionPlugin<A, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionPlugin")
            .field("focused_node", &self.focused_node)
            .field("focused_instance", &self.focused_instance)
            .field("pointer_down", &self.pointer_down)
            .finish_non_exhaustive()
    }
}

impl<A: TreeAdapter, P: SelectionProbe<A::Node>> SelectionPlugin<A, P> {
    /// Creates the plugin over a host probe.
    #[must_use]
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            config: Rc::new(DispatchConfig::phased("select", SELECT_DEPENDENCIES, true)),
            focused_node: None,
            focused_instance: None,
            last_snapshot: None,
            pointer_down: false,
        }
    }

    /// Attempts emission: no event while the pointer is pressed, without a
    /// focused node, when platform focus moved elsewhere, when there is no
    /// selection, or when the snapshot is structurally unchanged.
    fn try_emit(
        &mut self,
        native: &NativeEvent,
        cx: &mut Extraction<'_, A>,
    ) -> Option<SyntheticEvent<A::Instance, A::Node>> {
        if self.pointer_down {
            return None;
        }
        let focused_node = self.focused_node?;
        if self.probe.active_node() != Some(focused_node) {
            return None;
        }

        let snapshot = self.probe.snapshot(focused_node)?;
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return None;
        }
        self.last_snapshot = Some(snapshot);

        let mut event = cx.pool.acquire(
            self.config.clone(),
            EventShape::Base,
            self.focused_instance,
            native.clone(),
            Some(focused_node),
        );
        accumulate_two_phase(&mut event, cx.tree, cx.listeners);
        Some(event)
    }
}

impl<A: TreeAdapter, P: SelectionProbe<A::Node>> EventPlugin<A> for SelectionPlugin<A, P> {
    fn event_types(&self) -> Vec<Rc<DispatchConfig>> {
        vec![self.config.clone()]
    }

    fn extract(
        &mut self,
        kind: NativeKind,
        target: Option<A::Instance>,
        native: &NativeEvent,
        native_target: Option<A::Node>,
        cx: &mut Extraction<'_, A>,
    ) -> Option<SyntheticEvent<A::Instance, A::Node>> {
        // Nobody listens for `select` anywhere: skip the work, including
        // the state transitions it would feed.
        if !cx.any_listener_for(&self.config) {
            return None;
        }

        if kind == kinds::FOCUS_IN {
            if let Some(node) = native_target
                && self.probe.is_text_editable(node)
            {
                self.focused_node = Some(node);
                self.focused_instance = target;
                // Force the next check to treat any selection as changed.
                self.last_snapshot = None;
            }
            None
        } else if kind == kinds::FOCUS_OUT {
            self.focused_node = None;
            self.focused_instance = None;
            self.last_snapshot = None;
            None
        } else if kind == kinds::POINTER_DOWN {
            self.pointer_down = true;
            None
        } else if kind == kinds::POINTER_UP || kind == kinds::CONTEXT_MENU {
            self.pointer_down = false;
            self.try_emit(native, cx)
        } else if kind == kinds::SELECTION_CHANGE {
            if self.probe.supports_selection_events() {
                self.try_emit(native, cx)
            } else {
                None
            }
        } else if kind == kinds::KEY_DOWN || kind == kinds::KEY_UP {
            self.try_emit(native, cx)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use canopy_responder::ListenerBank;
    use canopy_synthetic::EventPool;
    use hashbrown::{HashMap, HashSet};

    use super::*;

    /// Parent-map tree: 1 → 2.
    struct MapTree {
        parents: HashMap<u32, u32>,
    }

    impl TreeAdapter for MapTree {
        type Instance = u32;
        type Node = u32;

        fn instance_from_node(&self, node: u32) -> Option<u32> {
            Some(node)
        }

        fn node_from_instance(&self, instance: u32) -> Option<u32> {
            Some(instance)
        }

        fn parent(&self, instance: u32) -> Option<u32> {
            self.parents.get(&instance).copied()
        }
    }

    #[derive(Default)]
    struct ProbeState {
        editable: HashSet<u32>,
        active: Option<u32>,
        selection: Option<CaretSnapshot>,
        supports_selection_events: bool,
    }

    #[derive(Clone)]
    struct TestProbe(Rc<RefCell<ProbeState>>);

    impl SelectionProbe<u32> for TestProbe {
        type Snapshot = CaretSnapshot;

        fn is_text_editable(&self, node: u32) -> bool {
            self.0.borrow().editable.contains(&node)
        }

        fn active_node(&self) -> Option<u32> {
            self.0.borrow().active
        }

        fn snapshot(&self, _node: u32) -> Option<CaretSnapshot> {
            self.0.borrow().selection
        }

        fn supports_selection_events(&self) -> bool {
            self.0.borrow().supports_selection_events
        }
    }

    struct Fixture {
        tree: MapTree,
        pool: EventPool<u32, u32>,
        bank: ListenerBank<u32, u32>,
        probe: TestProbe,
        plugin: SelectionPlugin<MapTree, TestProbe>,
    }

    impl Fixture {
        /// Node 2 is an editable, focused-capable field with an `onSelect`
        /// listener; the platform supports selection-change events.
        fn new() -> Self {
            let mut parents = HashMap::new();
            parents.insert(2, 1);
            let probe = TestProbe(Rc::new(RefCell::new(ProbeState {
                editable: [2].into_iter().collect(),
                supports_selection_events: true,
                ..ProbeState::default()
            })));
            let mut bank = ListenerBank::new();
            bank.on(2, "onSelect", |_| {});
            Self {
                tree: MapTree { parents },
                pool: EventPool::new(),
                bank,
                probe: probe.clone(),
                plugin: SelectionPlugin::new(probe),
            }
        }

        fn send(&mut self, kind: NativeKind, node: u32) -> Option<SyntheticEvent<u32, u32>> {
            let mut cx = Extraction {
                pool: &mut self.pool,
                tree: &self.tree,
                listeners: &self.bank,
            };
            self.plugin
                .extract(kind, Some(node), &NativeEvent::new(), Some(node), &mut cx)
        }

        fn focus_field(&mut self) {
            self.probe.0.borrow_mut().active = Some(2);
            assert!(self.send(kinds::FOCUS_IN, 2).is_none());
        }

        fn set_selection(&mut self, start: u32, end: u32) {
            self.probe.0.borrow_mut().selection = Some(CaretSnapshot { start, end });
        }
    }

    #[test]
    fn click_without_selection_change_emits_nothing() {
        let mut fixture = Fixture::new();
        fixture.focus_field();

        assert!(fixture.send(kinds::POINTER_DOWN, 2).is_none());
        assert!(fixture.send(kinds::POINTER_UP, 2).is_none());
    }

    #[test]
    fn selection_change_during_a_press_emits_once_at_release() {
        let mut fixture = Fixture::new();
        fixture.focus_field();

        assert!(fixture.send(kinds::POINTER_DOWN, 2).is_none());
        fixture.set_selection(2, 5);
        // Drag-select in progress: the notification itself stays silent.
        assert!(fixture.send(kinds::SELECTION_CHANGE, 2).is_none());

        let event = fixture
            .send(kinds::POINTER_UP, 2)
            .expect("release emits the select event");
        assert_eq!(event.logical_name(), "select");
        assert_eq!(event.target(), Some(2));

        // Exactly one: an unchanged selection stays silent afterwards.
        assert!(fixture.send(kinds::POINTER_UP, 2).is_none());
        assert!(fixture.send(kinds::SELECTION_CHANGE, 2).is_none());
    }

    #[test]
    fn focus_out_mid_press_cancels_emission() {
        let mut fixture = Fixture::new();
        fixture.focus_field();

        assert!(fixture.send(kinds::POINTER_DOWN, 2).is_none());
        fixture.set_selection(1, 4);
        assert!(fixture.send(kinds::FOCUS_OUT, 2).is_none());

        assert!(fixture.send(kinds::POINTER_UP, 2).is_none());
    }

    #[test]
    fn selection_change_notification_emits_outside_a_press() {
        let mut fixture = Fixture::new();
        fixture.focus_field();

        fixture.set_selection(0, 3);
        let event = fixture
            .send(kinds::SELECTION_CHANGE, 2)
            .expect("notification emits");
        assert_eq!(event.logical_name(), "select");

        // Structural equality: an identical fresh snapshot is unchanged.
        assert!(fixture.send(kinds::SELECTION_CHANGE, 2).is_none());

        fixture.set_selection(0, 4);
        assert!(fixture.send(kinds::KEY_UP, 2).is_some());
    }

    #[test]
    fn legacy_engines_fall_back_to_key_events() {
        let mut fixture = Fixture::new();
        fixture.probe.0.borrow_mut().supports_selection_events = false;
        fixture.focus_field();

        fixture.set_selection(0, 2);
        assert!(fixture.send(kinds::SELECTION_CHANGE, 2).is_none());
        assert!(fixture.send(kinds::KEY_UP, 2).is_some());
    }

    #[test]
    fn non_editable_targets_are_not_tracked() {
        let mut fixture = Fixture::new();
        fixture.probe.0.borrow_mut().active = Some(1);
        assert!(fixture.send(kinds::FOCUS_IN, 1).is_none());

        fixture.set_selection(0, 2);
        assert!(fixture.send(kinds::KEY_UP, 1).is_none());
    }

    #[test]
    fn platform_focus_moving_elsewhere_suppresses_emission() {
        let mut fixture = Fixture::new();
        fixture.focus_field();

        fixture.set_selection(0, 2);
        fixture.probe.0.borrow_mut().active = Some(1);
        assert!(fixture.send(kinds::KEY_UP, 2).is_none());
    }

    #[test]
    fn no_listener_anywhere_short_circuits_even_state() {
        let mut fixture = Fixture::new();
        fixture.bank.remove(2, "onSelect");
        fixture.probe.0.borrow_mut().active = Some(2);

        // Focus is not even recorded while nobody listens.
        assert!(fixture.send(kinds::FOCUS_IN, 2).is_none());
        fixture.bank.on(2, "onSelect", |_| {});
        fixture.set_selection(0, 2);
        assert!(fixture.send(kinds::KEY_UP, 2).is_none());
    }

    #[test]
    fn refocus_treats_any_selection_as_changed() {
        let mut fixture = Fixture::new();
        fixture.focus_field();
        fixture.set_selection(0, 2);
        assert!(fixture.send(kinds::KEY_UP, 2).is_some());

        // Blur and refocus with the same platform selection: the cleared
        // snapshot forces re-emission.
        assert!(fixture.send(kinds::FOCUS_OUT, 2).is_none());
        fixture.focus_field();
        assert!(fixture.send(kinds::KEY_UP, 2).is_some());
    }
}
