// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plugin registry: injected once at startup, immutable thereafter.
//!
//! The registry fixes two process-wide facts: the order plugins run in, and
//! the mapping from logical event names to their dispatch configurations.
//! Both are append-only for the process lifetime; there is no
//! unregistration. Misuse (a second order injection, a plugin missing
//! from the order, a logical-name collision between plugins) is a fatal
//! startup error, and injection validates the whole batch before touching
//! any state so a panic leaves no partial registry behind.
//!
//! Tests that need a clean slate rebuild through the explicit
//! [`PluginRegistry::reset`]; production code never calls it.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use canopy_plugins::EventPlugin;
use canopy_responder::TreeAdapter;
use canopy_synthetic::{DispatchConfig, NativeKind};

use alloc::rc::Rc;

/// The global plugin table and logical-name → config registry.
pub struct PluginRegistry<A: TreeAdapter> {
    order: Option<Vec<&'static str>>,
    /// Plugins with their order position, kept sorted by that position.
    plugins: Vec<(usize, &'static str, Box<dyn EventPlugin<A>>)>,
    configs: HashMap<&'static str, Rc<DispatchConfig>>,
}

impl<A: TreeAdapter> fmt::Debug for PluginRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("order", &self.order)
            .field("plugins", &self.plugins.len())
            .field("logical_events", &self.configs.len())
            .finish_non_exhaustive()
    }
}

impl<A: TreeAdapter> Default for PluginRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TreeAdapter> PluginRegistry<A> {
    /// Creates an empty registry awaiting injection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: None,
            plugins: Vec::new(),
            configs: HashMap::new(),
        }
    }

    /// Fixes the plugin execution order for the process lifetime.
    ///
    /// # Panics
    ///
    /// Panics if an order has already been injected.
    pub fn inject_plugin_order(&mut self, names: &[&'static str]) {
        assert!(
            self.order.is_none(),
            "plugin order may only be injected once"
        );
        self.order = Some(names.into());
    }

    /// Registers plugin modules and merges their logical events into the
    /// global config table.
    ///
    /// Plugins run in the injected order regardless of the order of
    /// injection calls. The whole batch is validated before any state
    /// changes, so a failed injection leaves the registry as it was.
    ///
    /// # Panics
    ///
    /// Panics if no order was injected, if a plugin is not named in the
    /// order, if a plugin name is registered twice, or if two plugins
    /// claim the same logical event name.
    pub fn inject_plugins(&mut self, plugins: Vec<(&'static str, Box<dyn EventPlugin<A>>)>) {
        let Some(order) = self.order.as_ref() else {
            panic!("plugins injected before a plugin order");
        };

        // Validate the batch completely before committing anything.
        let mut batch = Vec::with_capacity(plugins.len());
        let mut batch_names: Vec<&'static str> = Vec::new();
        for (name, plugin) in plugins {
            let Some(position) = order.iter().position(|ordered| *ordered == name) else {
                panic!("plugin `{name}` is not named in the injected plugin order");
            };
            assert!(
                !self.plugins.iter().any(|(_, existing, _)| *existing == name)
                    && !batch.iter().any(|(_, existing, _)| *existing == name),
                "plugin `{name}` is already registered"
            );

            for config in plugin.event_types() {
                let logical = config.logical_name;
                assert!(
                    !self.configs.contains_key(logical) && !batch_names.contains(&logical),
                    "logical event `{logical}` is claimed by more than one plugin"
                );
                batch_names.push(logical);
            }
            batch.push((position, name, plugin));
        }

        for (position, name, plugin) in batch {
            for config in plugin.event_types() {
                self.configs.insert(config.logical_name, config);
            }
            let at = self
                .plugins
                .partition_point(|(existing, _, _)| *existing < position);
            self.plugins.insert(at, (position, name, plugin));
        }
    }

    /// Looks up the dispatch configuration of a logical event.
    #[must_use]
    pub fn config_for(&self, logical_name: &str) -> Option<&Rc<DispatchConfig>> {
        self.configs.get(logical_name)
    }

    /// Returns the native event kinds that can trigger extraction of a
    /// logical event.
    #[must_use]
    pub fn native_dependencies_for(&self, logical_name: &str) -> Option<&[NativeKind]> {
        self.configs
            .get(logical_name)
            .map(|config| config.dependencies.as_slice())
    }

    /// Asks the plugins, in order, whether `kind` is user-intent-bearing.
    /// The first opinion wins.
    #[must_use]
    pub fn is_interactive_kind(&self, kind: NativeKind) -> Option<bool> {
        self.plugins
            .iter()
            .find_map(|(_, _, plugin)| plugin.interactive_kind(kind))
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Returns the number of registered logical events.
    #[must_use]
    pub fn logical_event_count(&self) -> usize {
        self.configs.len()
    }

    /// Iterates over the registered plugins in execution order.
    pub(crate) fn plugins_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn EventPlugin<A>>> + '_ {
        self.plugins.iter_mut().map(|(_, _, plugin)| plugin)
    }

    /// Clears the registry back to its pre-injection state.
    ///
    /// Exists for tests that rebuild the pipeline between cases; there is
    /// no production unregistration path.
    pub fn reset(&mut self) {
        self.order = None;
        self.plugins.clear();
        self.configs.clear();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use canopy_plugins::Extraction;
    use canopy_synthetic::{NativeEvent, SyntheticEvent};

    use super::*;

    struct NullTree;

    impl TreeAdapter for NullTree {
        type Instance = u32;
        type Node = u32;

        fn instance_from_node(&self, node: u32) -> Option<u32> {
            Some(node)
        }

        fn node_from_instance(&self, instance: u32) -> Option<u32> {
            Some(instance)
        }

        fn parent(&self, _instance: u32) -> Option<u32> {
            None
        }
    }

    /// A plugin declaring fixed logical events and extracting nothing.
    struct DeclaringPlugin {
        configs: Vec<Rc<DispatchConfig>>,
    }

    impl DeclaringPlugin {
        fn new(names: &[&'static str]) -> Self {
            Self {
                configs: names
                    .iter()
                    .map(|&name| Rc::new(DispatchConfig::phased(name, &[], true)))
                    .collect(),
            }
        }
    }

    impl EventPlugin<NullTree> for DeclaringPlugin {
        fn event_types(&self) -> Vec<Rc<DispatchConfig>> {
            self.configs.clone()
        }

        fn extract(
            &mut self,
            _kind: NativeKind,
            _target: Option<u32>,
            _native: &NativeEvent,
            _native_target: Option<u32>,
            _cx: &mut Extraction<'_, NullTree>,
        ) -> Option<SyntheticEvent<u32, u32>> {
            None
        }
    }

    #[test]
    fn merges_event_types_and_answers_lookups() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first", "second"]);
        registry.inject_plugins(vec![
            ("first", Box::new(DeclaringPlugin::new(&["click"]))),
            ("second", Box::new(DeclaringPlugin::new(&["select"]))),
        ]);

        assert_eq!(registry.plugin_count(), 2);
        assert_eq!(registry.logical_event_count(), 2);
        assert!(registry.config_for("click").is_some());
        assert!(registry.config_for("missing").is_none());
        assert_eq!(registry.native_dependencies_for("select"), Some(&[][..]));
    }

    #[test]
    fn injection_call_order_does_not_affect_execution_order() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first", "second", "third"]);
        registry.inject_plugins(vec![(
            "third",
            Box::new(DeclaringPlugin::new(&["c"])) as Box<dyn EventPlugin<NullTree>>,
        )]);
        registry.inject_plugins(vec![
            (
                "second",
                Box::new(DeclaringPlugin::new(&["b"])) as Box<dyn EventPlugin<NullTree>>,
            ),
            (
                "first",
                Box::new(DeclaringPlugin::new(&["a"])) as Box<dyn EventPlugin<NullTree>>,
            ),
        ]);

        let positions: Vec<usize> = registry.plugins.iter().map(|(p, _, _)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "may only be injected once")]
    fn order_injection_is_once_only() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first"]);
        registry.inject_plugin_order(&["first"]);
    }

    #[test]
    #[should_panic(expected = "not named in the injected plugin order")]
    fn unnamed_plugins_are_rejected() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first"]);
        registry.inject_plugins(vec![(
            "rogue",
            Box::new(DeclaringPlugin::new(&["x"])) as Box<dyn EventPlugin<NullTree>>,
        )]);
    }

    #[test]
    #[should_panic(expected = "before a plugin order")]
    fn plugins_require_an_order_first() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugins(vec![(
            "first",
            Box::new(DeclaringPlugin::new(&["x"])) as Box<dyn EventPlugin<NullTree>>,
        )]);
    }

    #[test]
    #[should_panic(expected = "claimed by more than one plugin")]
    fn duplicate_logical_names_are_fatal() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first", "second"]);
        registry.inject_plugins(vec![
            (
                "first",
                Box::new(DeclaringPlugin::new(&["click"])) as Box<dyn EventPlugin<NullTree>>,
            ),
            (
                "second",
                Box::new(DeclaringPlugin::new(&["click"])) as Box<dyn EventPlugin<NullTree>>,
            ),
        ]);
    }

    #[test]
    fn failed_injection_leaves_no_partial_state() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first", "second"]);
        registry.inject_plugins(vec![(
            "first",
            Box::new(DeclaringPlugin::new(&["click"])) as Box<dyn EventPlugin<NullTree>>,
        )]);

        // A colliding batch must not register its non-colliding parts.
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.inject_plugins(vec![(
                "second",
                Box::new(DeclaringPlugin::new(&["select", "click"]))
                    as Box<dyn EventPlugin<NullTree>>,
            )]);
        }));
        assert!(result.is_err());
        assert_eq!(registry.plugin_count(), 1);
        assert_eq!(registry.logical_event_count(), 1);
        assert!(registry.config_for("select").is_none());
    }

    #[test]
    fn reset_returns_to_the_pre_injection_state() {
        let mut registry: PluginRegistry<NullTree> = PluginRegistry::new();
        registry.inject_plugin_order(&["first"]);
        registry.inject_plugins(vec![(
            "first",
            Box::new(DeclaringPlugin::new(&["click"])) as Box<dyn EventPlugin<NullTree>>,
        )]);

        registry.reset();
        assert_eq!(registry.plugin_count(), 0);
        assert!(registry.config_for("click").is_none());

        // A fresh order can be injected after a reset.
        registry.inject_plugin_order(&["first"]);
        registry.inject_plugins(vec![(
            "first",
            Box::new(DeclaringPlugin::new(&["click"])) as Box<dyn EventPlugin<NullTree>>,
        )]);
        assert_eq!(registry.plugin_count(), 1);
    }
}
