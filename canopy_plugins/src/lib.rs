// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_plugins --heading-base-level=0

//! Canopy Plugins: the extraction units of the event pipeline.
//!
//! ## Overview
//!
//! An extraction plugin inspects one incoming native event and optionally
//! produces a synthetic event. The dispatch loop feeds *every* registered
//! plugin *every* native event, in the order fixed at startup, and collects
//! whatever they return.
//!
//! Two plugin varieties ship here:
//!
//! - [`ClassifierPlugin`](crate::classifier::ClassifierPlugin): stateless. A
//!   declarative table maps native kinds to logical events split into
//!   interactive and non-interactive classes, and a pure kind → shape table
//!   selects the event family. It also owns the platform-quirk filters:
//!   right-button clicks and zero-char-code key presses are discarded, and
//!   unrecognized kinds fall back to the generic base shape.
//! - [`SelectionPlugin`](crate::selection::SelectionPlugin): stateful. It
//!   remembers facts across several unrelated native events (the focused
//!   editable node, the last selection snapshot, whether the pointer is
//!   down) and synthesizes one logical `select` event only when the
//!   selection actually changed.
//!
//! Every stateful plugin follows the selection plugin's shape: private,
//! single-threaded mutable state; a pure decision given state plus the new
//! native event; transitions only as a side effect of
//! [`EventPlugin::extract`], never elsewhere.
//!
//! ## Diagnostics
//!
//! The kernels carry no logging crate; diagnostic reporting goes through
//! the [`DiagnosticSink`] callback trait, and the unknown-kind path only
//! fires in debug builds. Unknown kinds are never an error.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use canopy_responder::{ListenerBank, TreeAdapter};
use canopy_synthetic::{DispatchConfig, EventPool, NativeEvent, NativeKind, SyntheticEvent};

pub mod classifier;
pub mod kinds;
pub mod selection;

pub use classifier::ClassifierPlugin;
pub use selection::{AnchorFocusSnapshot, CaretSnapshot, SelectionPlugin, SelectionProbe};

/// A callback sink for diagnostic reports.
///
/// Hosts that want visibility into likely framework bugs (a native kind
/// reaching the classifier without a shape mapping) install one of these;
/// the default is silence. Reports are advisory and never block dispatch.
pub trait DiagnosticSink {
    /// An event kind fell back to the base shape and is not in the
    /// known-exhaustive allow-list. Only invoked in debug builds.
    fn unknown_native_kind(&mut self, kind: NativeKind);
}

/// Everything a plugin may touch while extracting: the event pool, the
/// tree's ancestor walk, and the listener bank for presence checks and
/// propagation accumulation.
pub struct Extraction<'a, A: TreeAdapter> {
    /// Per-shape free lists to acquire synthetic events from.
    pub pool: &'a mut EventPool<A::Instance, A::Node>,
    /// The injected tree adapter.
    pub tree: &'a A,
    /// The listener bank consulted by accumulation and presence checks.
    pub listeners: &'a ListenerBank<A::Instance, A::Node>,
}

impl<A: TreeAdapter> fmt::Debug for Extraction<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extraction").finish_non_exhaustive()
    }
}

impl<A: TreeAdapter> Extraction<'_, A> {
    /// Returns `true` if any listener exists anywhere for any registration
    /// variant of `config`'s logical event. A performance short-circuit,
    /// not a correctness requirement.
    #[must_use]
    pub fn any_listener_for(&self, config: &DispatchConfig) -> bool {
        config
            .registration
            .names()
            .any(|name| self.listeners.any_for_name(name))
    }
}

/// The shared capability contract of every extraction plugin.
pub trait EventPlugin<A: TreeAdapter> {
    /// The dispatch configurations of every logical event this plugin can
    /// produce. Logical names must be globally unique across plugins; the
    /// registry enforces this fatally at injection.
    fn event_types(&self) -> Vec<Rc<DispatchConfig>>;

    /// Inspects one native event and optionally produces a synthetic event
    /// with its propagation chain already accumulated.
    ///
    /// `target` is the UI instance nearest the physical target (already
    /// resolved by the dispatch loop), `native` the raw payload, and
    /// `native_target` the raw platform node.
    fn extract(
        &mut self,
        kind: NativeKind,
        target: Option<A::Instance>,
        native: &NativeEvent,
        native_target: Option<A::Node>,
        cx: &mut Extraction<'_, A>,
    ) -> Option<SyntheticEvent<A::Instance, A::Node>>;

    /// Optional: whether `kind` is user-intent-bearing, if this plugin
    /// knows. Used by hosts for input-priority scheduling.
    fn interactive_kind(&self, kind: NativeKind) -> Option<bool> {
        let _ = kind;
        None
    }
}
