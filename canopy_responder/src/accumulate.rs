// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation accumulation: turn an event's target into a listener chain.
//!
//! Accumulation walks the ancestor path once and records which handlers
//! will run, in which order, without invoking any of them. The chain is
//! attached to the event; [`crate::dispatcher::run_chain`] executes it.

use canopy_synthetic::{DispatchChain, DispatchEntry, Phase, Registration, SyntheticEvent};

use crate::adapter::{TreeAdapter, path_to_root};
use crate::listeners::ListenerBank;

/// Accumulates the two-phase chain for a phased event.
///
/// Capture entries are emitted in root→target order, then bubble entries in
/// target→root order. A node without a handler under the relevant
/// registration name contributes nothing. Administratively disabled nodes
/// are skipped in the bubble phase when the event is interactive: a
/// disabled control does not react to interaction, but ancestors observing
/// the capture phase still see it pass by.
///
/// Events whose config is direct (or missing) accumulate nothing; the
/// mismatch is reported via `debug_assert!` in debug builds.
pub fn accumulate_two_phase<A: TreeAdapter>(
    event: &mut SyntheticEvent<A::Instance, A::Node>,
    tree: &A,
    bank: &ListenerBank<A::Instance, A::Node>,
) {
    let Some(config) = event.config().cloned() else {
        debug_assert!(false, "accumulation on a released event");
        return;
    };
    let Registration::Phased { bubbled, captured } = &config.registration else {
        debug_assert!(false, "two-phase accumulation on a direct config");
        return;
    };
    let Some(target) = event.target() else {
        return;
    };

    let path = path_to_root(tree, target);
    let mut chain = DispatchChain::new();

    for &instance in path.iter().rev() {
        if let Some(listener) = bank.get(instance, captured) {
            chain.push(DispatchEntry {
                listener: listener.clone(),
                instance,
                phase: Phase::Capture,
            });
        }
    }

    for &instance in path.iter() {
        if config.is_interactive && tree.is_disabled(instance) {
            continue;
        }
        if let Some(listener) = bank.get(instance, bubbled) {
            chain.push(DispatchEntry {
                listener: listener.clone(),
                instance,
                phase: Phase::Bubble,
            });
        }
    }

    event.attach_chain(chain);
}

/// Accumulates the single phase-less pass for a direct event.
///
/// Entries cover the same ancestor path with no capture/bubble
/// distinction and no ordering guarantee beyond determinism.
pub fn accumulate_direct<A: TreeAdapter>(
    event: &mut SyntheticEvent<A::Instance, A::Node>,
    tree: &A,
    bank: &ListenerBank<A::Instance, A::Node>,
) {
    let Some(config) = event.config().cloned() else {
        debug_assert!(false, "accumulation on a released event");
        return;
    };
    let Registration::Direct(name) = &config.registration else {
        debug_assert!(false, "direct accumulation on a phased config");
        return;
    };
    let Some(target) = event.target() else {
        return;
    };

    let mut chain = DispatchChain::new();
    for &instance in path_to_root(tree, target).iter() {
        if let Some(listener) = bank.get(instance, name) {
            chain.push(DispatchEntry {
                listener: listener.clone(),
                instance,
                phase: Phase::Direct,
            });
        }
    }

    event.attach_chain(chain);
}
