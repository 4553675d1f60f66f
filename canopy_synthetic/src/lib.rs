// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_synthetic --heading-base-level=0

//! Canopy Synthetic: the pooled synthetic event model.
//!
//! ## Overview
//!
//! Native platform input arrives as an opaque [`NativeKind`](crate::config::NativeKind)
//! plus an owned property bag, [`NativeEvent`](crate::native::NativeEvent). This crate
//! turns that raw material into a uniform, typed [`SyntheticEvent`](crate::event::SyntheticEvent):
//! an [`EventShape`](crate::shape::EventShape) tag selects one of a fixed set of
//! event families (mouse, keyboard, focus, touch, drag, wheel, clipboard, UI,
//! animation, transition, composition, or the generic base), and each family
//! declares a `const` table of [`FieldSpec`](crate::shape::FieldSpec) descriptors:
//! name, default kind, and a derivation rule from the native payload. There is
//! no inheritance chain; a shape *is* its descriptor table.
//!
//! ## Pooling
//!
//! Synthetic events are recycled through [`EventPool`](crate::pool::EventPool),
//! one free list per shape. [`EventPool::acquire`] pops a free instance (or
//! allocates), resets the base fields, and populates every extension field
//! from the shape's descriptor table. [`EventPool::release`] resets a
//! non-persistent instance to its declared defaults and returns it to the
//! free list, so the next acquire of the same shape never observes stale
//! data. A listener may call [`SyntheticEvent::persist`] to remove an
//! instance from the return path permanently; persistent instances are never
//! pooled again and stay valid after the dispatch that produced them.
//!
//! Pooling here is guarded by a single-threaded, run-to-completion execution
//! model: acquired events are moved *out* of the pool, so a re-entrant
//! dispatch cannot recycle an instance that is still mid-flight.
//!
//! ## Minimal example
//!
//! ```
//! extern crate alloc;
//! use alloc::rc::Rc;
//! use canopy_synthetic::{DispatchConfig, EventPool, EventShape, NativeEvent, NativeKind};
//!
//! const CLICK: NativeKind = NativeKind::new("click");
//!
//! let config = Rc::new(DispatchConfig::phased("click", &[CLICK], true));
//! let mut pool: EventPool<u32, u32> = EventPool::new();
//!
//! let native = NativeEvent::new().with("button", 0_i64);
//! let mut event = pool.acquire(config, EventShape::Mouse, Some(7), native, Some(70));
//!
//! assert_eq!(event.logical_name(), "click");
//! assert_eq!(event.field("button").as_int(), Some(0));
//!
//! event.stop_propagation();
//! assert!(event.propagation_stopped());
//!
//! // Not persisted: the instance is reset and recycled.
//! assert!(pool.release(event).is_none());
//! assert_eq!(pool.free_count(EventShape::Mouse), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod event;
pub mod native;
pub mod pool;
pub mod shape;

pub use config::{DispatchConfig, NativeKind, Registration};
pub use event::{DispatchChain, DispatchEntry, EventFlags, Listener, Phase, SyntheticEvent};
pub use native::{FieldKind, FieldValue, NativeEvent};
pub use pool::EventPool;
pub use shape::{Derive, EventShape, FieldSpec};
