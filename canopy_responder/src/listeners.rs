// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The listener bank: handlers keyed by instance and registration name.
//!
//! The host framework registers listeners here under the derived
//! registration names (`onClick`, `onClickCapture`, …). The propagation
//! accumulator probes the bank by exactly those names; nothing else in the
//! pipeline interprets them.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use canopy_synthetic::{Listener, SyntheticEvent};

/// Listeners registered on UI instances, keyed by registration name.
pub struct ListenerBank<K, N>
where
    K: Copy + Eq + Hash,
{
    by_instance: HashMap<K, HashMap<String, Listener<K, N>>>,
}

impl<K, N> Default for ListenerBank<K, N>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, N> fmt::Debug for ListenerBank<K, N>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBank")
            .field("instances", &self.by_instance.len())
            .finish_non_exhaustive()
    }
}

impl<K, N> ListenerBank<K, N>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_instance: HashMap::new(),
        }
    }

    /// Registers `listener` on `instance` under `registration_name`,
    /// replacing any previous listener under the same name.
    pub fn put(
        &mut self,
        instance: K,
        registration_name: impl Into<String>,
        listener: Listener<K, N>,
    ) {
        self.by_instance
            .entry(instance)
            .or_default()
            .insert(registration_name.into(), listener);
    }

    /// Convenience wrapper around [`ListenerBank::put`] for plain closures.
    pub fn on(
        &mut self,
        instance: K,
        registration_name: impl Into<String>,
        listener: impl Fn(&mut SyntheticEvent<K, N>) + 'static,
    ) {
        self.put(instance, registration_name, Rc::new(listener));
    }

    /// Returns the listener registered on `instance` under
    /// `registration_name`, if any.
    #[must_use]
    pub fn get(&self, instance: K, registration_name: &str) -> Option<&Listener<K, N>> {
        self.by_instance.get(&instance)?.get(registration_name)
    }

    /// Removes and returns a single registration.
    pub fn remove(&mut self, instance: K, registration_name: &str) -> Option<Listener<K, N>> {
        let listeners = self.by_instance.get_mut(&instance)?;
        let removed = listeners.remove(registration_name);
        if listeners.is_empty() {
            self.by_instance.remove(&instance);
        }
        removed
    }

    /// Removes every registration on `instance` (e.g. when it unmounts).
    pub fn remove_all(&mut self, instance: K) {
        self.by_instance.remove(&instance);
    }

    /// Returns `true` if any instance has a listener under
    /// `registration_name`.
    #[must_use]
    pub fn any_for_name(&self, registration_name: &str) -> bool {
        self.by_instance
            .values()
            .any(|listeners| listeners.contains_key(registration_name))
    }

    /// Iterates over the instances holding a listener under
    /// `registration_name`.
    pub fn instances_with<'a>(
        &'a self,
        registration_name: &'a str,
    ) -> impl Iterator<Item = K> + 'a {
        self.by_instance
            .iter()
            .filter(move |(_, listeners)| listeners.contains_key(registration_name))
            .map(|(instance, _)| *instance)
    }

    /// Returns `true` if the bank holds no listeners at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_instance.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn put_get_replace_remove() {
        let mut bank: ListenerBank<u32, u32> = ListenerBank::new();
        assert!(bank.is_empty());

        bank.on(1, "onClick", |_| {});
        assert!(bank.get(1, "onClick").is_some());
        assert!(bank.get(1, "onClickCapture").is_none());
        assert!(bank.get(2, "onClick").is_none());

        // Replacement under the same name.
        bank.on(1, "onClick", |_| {});
        assert!(bank.get(1, "onClick").is_some());

        assert!(bank.remove(1, "onClick").is_some());
        assert!(bank.get(1, "onClick").is_none());
        assert!(bank.is_empty());
    }

    #[test]
    fn remove_all_clears_an_instance() {
        let mut bank: ListenerBank<u32, u32> = ListenerBank::new();
        bank.on(1, "onClick", |_| {});
        bank.on(1, "onClickCapture", |_| {});
        bank.on(2, "onClick", |_| {});

        bank.remove_all(1);
        assert!(bank.get(1, "onClick").is_none());
        assert!(bank.get(1, "onClickCapture").is_none());
        assert!(bank.get(2, "onClick").is_some());
    }

    #[test]
    fn presence_queries() {
        let mut bank: ListenerBank<u32, u32> = ListenerBank::new();
        bank.on(5, "onSelect", |_| {});
        bank.on(9, "onSelect", |_| {});

        assert!(bank.any_for_name("onSelect"));
        assert!(!bank.any_for_name("onSelectCapture"));

        let mut holders: Vec<u32> = bank.instances_with("onSelect").collect();
        holders.sort_unstable();
        assert_eq!(holders, [5, 9]);
    }
}
