// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synthetic event object and its dispatch chain.
//!
//! A [`SyntheticEvent`] is the uniform, typed representation every listener
//! sees, regardless of which platform quirk produced it. It is generic over
//! the UI-instance key `K` and the native node handle `N`, so any element
//! tree with copyable IDs can host the pipeline.
//!
//! Events are pooled (see [`crate::pool::EventPool`]); a non-persistent
//! instance's values are valid only between its construction and the end of
//! the dispatch batch that produced it. Listeners that need an event beyond
//! the batch call [`SyntheticEvent::persist`], which removes the instance
//! from the pool's return path permanently.

use alloc::rc::Rc;
use core::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::config::DispatchConfig;
use crate::native::{FieldValue, NativeEvent};
use crate::shape::EventShape;

bitflags! {
    /// Status flags of a synthetic event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct EventFlags: u8 {
        /// The instance is live: between acquire and release.
        const POOLED = 1 << 0;
        /// The instance has been removed from the pool's return path.
        const PERSISTENT = 1 << 1;
        /// A listener stopped propagation; remaining chain entries are skipped.
        const PROPAGATION_STOPPED = 1 << 2;
        /// A listener prevented the default action (advisory only).
        const DEFAULT_PREVENTED = 1 << 3;
    }
}

/// The propagation phase of a single chain entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Root→target delivery, before bubbling.
    Capture,
    /// Target→root delivery.
    Bubble,
    /// Phase-less delivery for non-bubbling logical events.
    Direct,
}

/// A listener callback registered on a UI instance.
pub type Listener<K, N> = Rc<dyn Fn(&mut SyntheticEvent<K, N>)>;

/// One accumulated listener invocation: handler, owning instance, phase.
pub struct DispatchEntry<K, N> {
    /// The handler to invoke.
    pub listener: Listener<K, N>,
    /// The UI instance the handler is registered on.
    pub instance: K,
    /// The phase this entry belongs to.
    pub phase: Phase,
}

impl<K: fmt::Debug, N> fmt::Debug for DispatchEntry<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("instance", &self.instance)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// The ordered listener-invocation chain attached to an event.
///
/// For phased events the chain holds capture entries in root→target order
/// followed by bubble entries in target→root order, so aborting the walk on
/// a stop flag suppresses both the rest of the current phase and any
/// opposite phase still to come.
pub type DispatchChain<K, N> = SmallVec<[DispatchEntry<K, N>; 4]>;

/// A pooled, typed event synthesized from one native platform event.
pub struct SyntheticEvent<K, N> {
    pub(crate) config: Option<Rc<DispatchConfig>>,
    pub(crate) shape: EventShape,
    pub(crate) target: Option<K>,
    pub(crate) current_target: Option<K>,
    pub(crate) native: NativeEvent,
    pub(crate) native_target: Option<N>,
    pub(crate) flags: EventFlags,
    pub(crate) fields: SmallVec<[(&'static str, FieldValue); 8]>,
    pub(crate) chain: DispatchChain<K, N>,
}

impl<K: fmt::Debug, N: fmt::Debug> fmt::Debug for SyntheticEvent<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticEvent")
            .field("type", &self.logical_name())
            .field("shape", &self.shape)
            .field("target", &self.target)
            .field("flags", &self.flags)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<K, N> SyntheticEvent<K, N> {
    /// Returns the dispatch configuration of the logical event, or `None`
    /// on a released instance.
    #[must_use]
    pub fn config(&self) -> Option<&Rc<DispatchConfig>> {
        self.config.as_ref()
    }

    /// Returns the logical event name, or the empty sentinel on a released
    /// instance.
    #[must_use]
    pub fn logical_name(&self) -> &'static str {
        self.config.as_ref().map_or("", |c| c.logical_name)
    }

    /// Returns the event-family shape tag.
    #[must_use]
    pub fn shape(&self) -> EventShape {
        self.shape
    }

    /// Returns the raw native payload this event was synthesized from.
    ///
    /// Cleared at release; valid only during the dispatch batch unless the
    /// event was persisted.
    #[must_use]
    pub fn native(&self) -> &NativeEvent {
        &self.native
    }

    /// Returns an extension field by name.
    ///
    /// Returns the [`FieldValue::Null`] sentinel for unknown names and,
    /// as a guarded usage-error path, for released non-persistent
    /// instances (reported via `debug_assert!` in debug builds).
    #[must_use]
    pub fn field(&self, name: &str) -> &FieldValue {
        debug_assert!(
            self.is_live(),
            "field access on a released synthetic event"
        );
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(&FieldValue::Null, |(_, v)| v)
    }

    /// Attaches an ad-hoc derived value, or overwrites a declared field.
    ///
    /// Handlers may use this to stash computed values for later phases of
    /// the same dispatch.
    pub fn set_field(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        debug_assert!(
            self.is_live(),
            "field mutation on a released synthetic event"
        );
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Stops propagation: remaining chain entries in the current phase are
    /// skipped, and a stop during capture also suppresses the bubble phase.
    pub fn stop_propagation(&mut self) {
        self.flags.insert(EventFlags::PROPAGATION_STOPPED);
    }

    /// Returns `true` once a listener has stopped propagation.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }

    /// Marks the default action as prevented. Advisory: the pipeline itself
    /// takes no action, a consuming layer may.
    pub fn prevent_default(&mut self) {
        self.flags.insert(EventFlags::DEFAULT_PREVENTED);
    }

    /// Returns `true` once a listener has prevented the default action.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Removes this instance from its pool's return path permanently,
    /// extending its validity beyond the current dispatch batch.
    ///
    /// Idempotent: calling it twice has the same effect as calling it once.
    pub fn persist(&mut self) {
        self.flags.insert(EventFlags::PERSISTENT);
    }

    /// Returns `true` if the event has been persisted.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.flags.contains(EventFlags::PERSISTENT)
    }

    /// Returns `true` between acquire and release (or indefinitely once
    /// persisted).
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.flags.contains(EventFlags::POOLED)
    }

    /// Returns the current status flags.
    #[must_use]
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Attaches the accumulated listener chain. Called by the propagation
    /// accumulator; building the chain never invokes a handler.
    pub fn attach_chain(&mut self, chain: DispatchChain<K, N>) {
        self.chain = chain;
    }

    /// Takes the accumulated chain for execution, leaving it empty.
    #[must_use]
    pub fn take_chain(&mut self) -> DispatchChain<K, N> {
        core::mem::take(&mut self.chain)
    }

    /// Returns the number of accumulated chain entries.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    /// Sets the instance whose handler is currently being invoked.
    pub fn set_current_target(&mut self, instance: Option<K>) {
        self.current_target = instance;
    }
}

impl<K: Copy, N> SyntheticEvent<K, N> {
    /// Returns the UI instance nearest the physical target.
    #[must_use]
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Returns the instance whose handler is currently being invoked, if
    /// the event is mid-propagation.
    #[must_use]
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }
}

impl<K, N: Copy> SyntheticEvent<K, N> {
    /// Returns the raw native target handle.
    #[must_use]
    pub fn native_target(&self) -> Option<N> {
        self.native_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DispatchConfig, NativeKind};
    use crate::pool::EventPool;

    const CLICK: NativeKind = NativeKind::new("click");

    fn click_event() -> SyntheticEvent<u32, u32> {
        let config = Rc::new(DispatchConfig::phased("click", &[CLICK], true));
        let mut pool = EventPool::new();
        pool.acquire(
            config,
            EventShape::Mouse,
            Some(1),
            NativeEvent::new().with("button", 0_i64),
            Some(10),
        )
    }

    #[test]
    fn flags_start_clear_and_toggle() {
        let mut event = click_event();
        assert!(!event.propagation_stopped());
        assert!(!event.default_prevented());
        assert!(!event.is_persistent());
        assert!(event.is_live());

        event.stop_propagation();
        event.prevent_default();
        assert!(event.propagation_stopped());
        assert!(event.default_prevented());
    }

    #[test]
    fn persist_is_idempotent() {
        let mut event = click_event();
        event.persist();
        let flags_once = event.flags();
        event.persist();
        assert_eq!(event.flags(), flags_once);
        assert!(event.is_persistent());
    }

    #[test]
    fn ad_hoc_fields_overwrite_and_append() {
        let mut event = click_event();
        assert_eq!(event.field("button").as_int(), Some(0));

        event.set_field("button", 1_i64);
        assert_eq!(event.field("button").as_int(), Some(1));

        event.set_field("derived", 2.5);
        assert_eq!(event.field("derived").as_num(), Some(2.5));
    }

    #[test]
    fn unknown_fields_read_as_the_null_sentinel() {
        let event = click_event();
        assert!(event.field("nonexistent").is_null());
    }
}
