// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_pipeline --heading-base-level=0

//! Canopy Pipeline: plugin registry, startup injection, and the dispatch loop.
//!
//! ## Overview
//!
//! This crate is the hub the host environment talks to. At startup the host
//! injects, exactly once, the plugin order, the plugin modules, and a tree
//! adapter; misuse of any injection is a fatal error because the process
//! must never run with an inconsistent registry. From then on every native
//! event enters through [`EventPipeline::dispatch`], which:
//!
//! 1. resolves the UI instance nearest the native target,
//! 2. runs every plugin's extraction in the fixed startup order, collecting
//!    zero or more synthetic events (order preserved),
//! 3. runs each event's accumulated capture → bubble chain, honoring
//!    propagation stops,
//! 4. releases every non-persistent event of the batch back to its pool,
//!    guaranteed even if a listener panics, and returns the persisted ones
//!    to the caller.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_pipeline::EventPipeline;
//! use canopy_plugins::{ClassifierPlugin, kinds};
//! use canopy_responder::TreeAdapter;
//! use canopy_synthetic::NativeEvent;
//! # struct OneNode;
//! # impl TreeAdapter for OneNode {
//! #     type Instance = u32;
//! #     type Node = u32;
//! #     fn instance_from_node(&self, node: u32) -> Option<u32> { Some(node) }
//! #     fn node_from_instance(&self, instance: u32) -> Option<u32> { Some(instance) }
//! #     fn parent(&self, _instance: u32) -> Option<u32> { None }
//! # }
//!
//! let mut pipeline: EventPipeline<OneNode> = EventPipeline::new();
//! pipeline.registry_mut().inject_plugin_order(&["classifier"]);
//! pipeline
//!     .registry_mut()
//!     .inject_plugins(vec![("classifier", Box::new(ClassifierPlugin::new()))]);
//! pipeline.inject_tree(OneNode);
//!
//! pipeline.listeners_mut().on(7, "onClick", |event| {
//!     assert_eq!(event.current_target(), Some(7));
//! });
//!
//! let persisted = pipeline.dispatch(kinds::CLICK, NativeEvent::new(), Some(7));
//! assert!(persisted.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod pipeline;
pub mod registry;

pub use pipeline::EventPipeline;
pub use registry::PluginRegistry;
