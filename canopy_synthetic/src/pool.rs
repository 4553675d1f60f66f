// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-shape free lists for synthetic event instances.
//!
//! The pool keeps one free list per [`EventShape`], stored as a fixed array
//! indexed by the shape tag. Acquired instances are moved *out* of the pool
//! for the duration of their dispatch batch, which is what makes nested
//! dispatches safe: a free list can never hand out an instance that is
//! still mid-flight, and a batch's release step only ever touches the
//! events that batch collected.
//!
//! The pool itself is not thread-safe and does not need to be: the whole
//! pipeline runs single-threaded and to completion per native event.

use alloc::rc::Rc;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::config::DispatchConfig;
use crate::event::{EventFlags, SyntheticEvent};
use crate::native::NativeEvent;
use crate::shape::EventShape;

/// Per-shape free lists of recycled [`SyntheticEvent`] instances.
#[derive(Debug)]
pub struct EventPool<K, N> {
    free: [Vec<SyntheticEvent<K, N>>; EventShape::COUNT],
}

impl<K, N> Default for EventPool<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, N> EventPool<K, N> {
    /// Creates a pool with every free list empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            free: core::array::from_fn(|_| Vec::new()),
        }
    }

    /// Pops a free instance of `shape` (or allocates one) and populates it.
    ///
    /// Base fields are reset, every extension field is derived from
    /// `native` per the shape's descriptor table, and the instance is
    /// marked live. The native payload moves into the event and stays
    /// there until release.
    pub fn acquire(
        &mut self,
        config: Rc<DispatchConfig>,
        shape: EventShape,
        target: Option<K>,
        native: NativeEvent,
        native_target: Option<N>,
    ) -> SyntheticEvent<K, N> {
        let mut event = self.free[shape.index()]
            .pop()
            .unwrap_or_else(|| blank(shape));
        debug_assert_eq!(event.shape, shape, "free list holds a foreign shape");

        event.config = Some(config);
        event.target = target;
        event.current_target = None;
        event.native_target = native_target;
        event.flags = EventFlags::POOLED;
        event.fields.clear();
        for spec in shape.fields() {
            event.fields.push((spec.name, spec.resolve(&native)));
        }
        event.native = native;
        event.chain.clear();
        event
    }

    /// Releases an instance at the end of its dispatch batch.
    ///
    /// Non-persistent instances have every field reset to its declared
    /// default or sentinel (the native payload and listener chain are
    /// cleared) and return to their shape's free list; `None` is returned.
    /// Persistent instances are never pooled: they are handed back to the
    /// caller, whose ownership governs their lifetime from then on.
    pub fn release(&mut self, mut event: SyntheticEvent<K, N>) -> Option<SyntheticEvent<K, N>> {
        if event.is_persistent() {
            return Some(event);
        }

        event.config = None;
        event.target = None;
        event.current_target = None;
        event.native.clear();
        event.native_target = None;
        event.flags = EventFlags::empty();
        event.chain.clear();
        event.fields.clear();
        for spec in event.shape.fields() {
            event.fields.push((spec.name, spec.kind.default_value()));
        }

        self.free[event.shape.index()].push(event);
        None
    }

    /// Returns the number of free instances of `shape`.
    #[must_use]
    pub fn free_count(&self, shape: EventShape) -> usize {
        self.free[shape.index()].len()
    }
}

fn blank<K, N>(shape: EventShape) -> SyntheticEvent<K, N> {
    SyntheticEvent {
        config: None,
        shape,
        target: None,
        current_target: None,
        native: NativeEvent::default(),
        native_target: None,
        flags: EventFlags::empty(),
        fields: SmallVec::new(),
        chain: SmallVec::new(),
    }
}
