// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_responder --heading-base-level=0

//! Canopy Responder: deterministic propagation over a hierarchical element tree.
//!
//! ## Overview
//!
//! This crate does not know what the UI tree looks like. It consumes an
//! ancestor-walk capability, the [`TreeAdapter`](crate::adapter::TreeAdapter)
//! trait, and a [`ListenerBank`](crate::listeners::ListenerBank) holding
//! handlers keyed by `(instance, registration name)`, and turns a synthetic
//! event's target into an ordered listener-invocation chain:
//!
//! - [`accumulate_two_phase`](crate::accumulate::accumulate_two_phase) walks
//!   from the target to the root and emits capture entries in root→target
//!   order followed by bubble entries in target→root order.
//! - [`accumulate_direct`](crate::accumulate::accumulate_direct) emits a
//!   single phase-less pass over the same path for non-bubbling events.
//!
//! Accumulation never invokes a handler; the chain is attached to the event
//! and executed later by [`run_chain`](crate::dispatcher::run_chain), which
//! honors [`stop_propagation`](canopy_synthetic::SyntheticEvent::stop_propagation)
//! between entries. Because capture and bubble live in one ordered sequence,
//! a stop raised during capture suppresses the bubble phase as well.
//!
//! ## Registration names
//!
//! Handlers are looked up by exactly the names
//! [`Registration`](canopy_synthetic::Registration) derives: logical `x` →
//! `onX` (bubble) and `onXCapture` (capture); direct events use `onX` alone.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod accumulate;
pub mod adapter;
pub mod dispatcher;
pub mod listeners;

pub use accumulate::{accumulate_direct, accumulate_two_phase};
pub use adapter::{TreeAdapter, is_in_subtree, path_to_root};
pub use dispatcher::run_chain;
pub use listeners::ListenerBank;
