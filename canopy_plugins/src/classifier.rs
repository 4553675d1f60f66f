// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateless classifier plugin.
//!
//! One declarative table maps native kinds to logical events, split into
//! two priority classes: *interactive* kinds carry user intent (click, key,
//! focus, submit, …) and *non-interactive* kinds are ambient (scroll,
//! pointer movement, progress, …). A second pure table maps each kind to
//! its event-family shape. Both tables are consulted per native event; the
//! plugin keeps no other state.
//!
//! ## Platform-quirk filters
//!
//! - A key-character event whose decoded character code is zero is
//!   discarded: some platforms emit spurious key-press events for function
//!   keys.
//! - A click-family event whose originating button code is the secondary
//!   button is discarded: some platforms synthesize a click on right-click.
//! - A kind with no shape mapping falls back to [`EventShape::Base`] rather
//!   than failing; in debug builds a kind that is also missing from the
//!   known base-shape allow-list is reported to the diagnostic sink as a
//!   likely framework bug. This is never fatal.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use canopy_responder::{TreeAdapter, accumulate_two_phase};
use canopy_synthetic::{
    DispatchConfig, EventShape, NativeEvent, NativeKind, SyntheticEvent, shape::decoded_char_code,
};

use crate::{DiagnosticSink, EventPlugin, Extraction, kinds};

/// Native kinds that carry user intent, with their logical event names.
pub const INTERACTIVE_EVENTS: &[(NativeKind, &str)] = &[
    (kinds::CLICK, "click"),
    (kinds::DOUBLE_CLICK, "doubleClick"),
    (kinds::CONTEXT_MENU, "contextMenu"),
    (kinds::POINTER_DOWN, "pointerDown"),
    (kinds::POINTER_UP, "pointerUp"),
    (kinds::KEY_DOWN, "keyDown"),
    (kinds::KEY_PRESS, "keyPress"),
    (kinds::KEY_UP, "keyUp"),
    (kinds::FOCUS_IN, "focus"),
    (kinds::FOCUS_OUT, "blur"),
    (kinds::TOUCH_START, "touchStart"),
    (kinds::TOUCH_END, "touchEnd"),
    (kinds::TOUCH_CANCEL, "touchCancel"),
    (kinds::DRAG_START, "dragStart"),
    (kinds::DRAG_END, "dragEnd"),
    (kinds::DROP, "drop"),
    (kinds::SUBMIT, "submit"),
    (kinds::RESET, "reset"),
    (kinds::CHANGE, "change"),
    (kinds::INPUT, "input"),
    (kinds::INVALID, "invalid"),
    (kinds::COPY, "copy"),
    (kinds::CUT, "cut"),
    (kinds::PASTE, "paste"),
];

/// Ambient native kinds, with their logical event names.
pub const NON_INTERACTIVE_EVENTS: &[(NativeKind, &str)] = &[
    (kinds::POINTER_MOVE, "pointerMove"),
    (kinds::POINTER_OVER, "pointerOver"),
    (kinds::POINTER_OUT, "pointerOut"),
    (kinds::WHEEL, "wheel"),
    (kinds::SCROLL, "scroll"),
    (kinds::DRAG_ENTER, "dragEnter"),
    (kinds::DRAG_LEAVE, "dragLeave"),
    (kinds::DRAG_OVER, "dragOver"),
    (kinds::TOUCH_MOVE, "touchMove"),
    (kinds::ANIMATION_START, "animationStart"),
    (kinds::ANIMATION_END, "animationEnd"),
    (kinds::ANIMATION_ITERATION, "animationIteration"),
    (kinds::TRANSITION_END, "transitionEnd"),
    (kinds::COMPOSITION_START, "compositionStart"),
    (kinds::COMPOSITION_UPDATE, "compositionUpdate"),
    (kinds::COMPOSITION_END, "compositionEnd"),
    (kinds::LOAD, "load"),
    (kinds::ERROR, "error"),
    (kinds::ABORT, "abort"),
    (kinds::PROGRESS, "progress"),
    (kinds::TOGGLE, "toggle"),
];

/// The pure kind → shape table.
const SHAPE_TABLE: &[(EventShape, &[NativeKind])] = &[
    (
        EventShape::Mouse,
        &[
            kinds::CLICK,
            kinds::DOUBLE_CLICK,
            kinds::CONTEXT_MENU,
            kinds::POINTER_DOWN,
            kinds::POINTER_UP,
            kinds::POINTER_MOVE,
            kinds::POINTER_OVER,
            kinds::POINTER_OUT,
        ],
    ),
    (
        EventShape::Keyboard,
        &[kinds::KEY_DOWN, kinds::KEY_PRESS, kinds::KEY_UP],
    ),
    (EventShape::Focus, &[kinds::FOCUS_IN, kinds::FOCUS_OUT]),
    (
        EventShape::Touch,
        &[
            kinds::TOUCH_START,
            kinds::TOUCH_END,
            kinds::TOUCH_MOVE,
            kinds::TOUCH_CANCEL,
        ],
    ),
    (
        EventShape::Drag,
        &[
            kinds::DRAG_START,
            kinds::DRAG_END,
            kinds::DRAG_ENTER,
            kinds::DRAG_LEAVE,
            kinds::DRAG_OVER,
            kinds::DROP,
        ],
    ),
    (EventShape::Wheel, &[kinds::WHEEL]),
    (EventShape::Ui, &[kinds::SCROLL]),
    (
        EventShape::Animation,
        &[
            kinds::ANIMATION_START,
            kinds::ANIMATION_END,
            kinds::ANIMATION_ITERATION,
        ],
    ),
    (EventShape::Transition, &[kinds::TRANSITION_END]),
    (
        EventShape::Composition,
        &[
            kinds::COMPOSITION_START,
            kinds::COMPOSITION_UPDATE,
            kinds::COMPOSITION_END,
        ],
    ),
    (EventShape::Clipboard, &[kinds::COPY, kinds::CUT, kinds::PASTE]),
];

/// Kinds that intentionally use the base shape; a fallback outside this
/// list is reported as a likely framework bug in debug builds.
const BASE_SHAPE_KINDS: &[NativeKind] = &[
    kinds::SUBMIT,
    kinds::RESET,
    kinds::CHANGE,
    kinds::INPUT,
    kinds::INVALID,
    kinds::LOAD,
    kinds::ERROR,
    kinds::ABORT,
    kinds::PROGRESS,
    kinds::TOGGLE,
];

/// The stateless multi-event classifier plugin.
pub struct ClassifierPlugin {
    declared: Vec<Rc<DispatchConfig>>,
    configs: HashMap<NativeKind, Rc<DispatchConfig>>,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl fmt::Debug for ClassifierPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierPlugin")
            .field("kinds", &self.configs.len())
            .finish_non_exhaustive()
    }
}

impl Default for ClassifierPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierPlugin {
    /// Creates the classifier over the standard kind tables.
    #[must_use]
    pub fn new() -> Self {
        Self::from_tables(INTERACTIVE_EVENTS, NON_INTERACTIVE_EVENTS)
    }

    /// Creates a classifier over custom declarative tables.
    ///
    /// Each entry produces one phased logical event whose sole native
    /// dependency is its own kind. Hosts with extra platform vocabulary
    /// can extend the standard tables this way.
    #[must_use]
    pub fn from_tables(
        interactive: &[(NativeKind, &'static str)],
        non_interactive: &[(NativeKind, &'static str)],
    ) -> Self {
        let mut declared = Vec::with_capacity(interactive.len() + non_interactive.len());
        let mut configs = HashMap::with_capacity(declared.capacity());
        let classes = [(interactive, true), (non_interactive, false)];
        for (table, is_interactive) in classes {
            for &(kind, logical_name) in table {
                let config = Rc::new(DispatchConfig::phased(
                    logical_name,
                    &[kind],
                    is_interactive,
                ));
                declared.push(config.clone());
                configs.insert(kind, config);
            }
        }
        Self {
            declared,
            configs,
            diagnostics: None,
        }
    }

    /// Installs a diagnostic sink for the unknown-kind report.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Resolves the event-family shape for `kind`, falling back to the
    /// base shape and reporting unexpected fallbacks in debug builds.
    fn select_shape(&mut self, kind: NativeKind) -> EventShape {
        for (shape, table) in SHAPE_TABLE {
            if table.contains(&kind) {
                return *shape;
            }
        }
        if cfg!(debug_assertions)
            && !BASE_SHAPE_KINDS.contains(&kind)
            && let Some(sink) = self.diagnostics.as_mut()
        {
            sink.unknown_native_kind(kind);
        }
        EventShape::Base
    }
}

impl<A: TreeAdapter> EventPlugin<A> for ClassifierPlugin {
    fn event_types(&self) -> Vec<Rc<DispatchConfig>> {
        self.declared.clone()
    }

    fn extract(
        &mut self,
        kind: NativeKind,
        target: Option<A::Instance>,
        native: &NativeEvent,
        native_target: Option<A::Node>,
        cx: &mut Extraction<'_, A>,
    ) -> Option<SyntheticEvent<A::Instance, A::Node>> {
        let config = self.configs.get(&kind)?.clone();

        // Some platforms synthesize a primary click for the secondary button.
        if kind == kinds::CLICK && native.int("button") == Some(2) {
            return None;
        }
        // Spurious function-key presses decode to a zero character code.
        if kind == kinds::KEY_PRESS && decoded_char_code(native) == 0 {
            return None;
        }

        let shape = self.select_shape(kind);
        let mut event = cx
            .pool
            .acquire(config, shape, target, native.clone(), native_target);
        accumulate_two_phase(&mut event, cx.tree, cx.listeners);
        Some(event)
    }

    fn interactive_kind(&self, kind: NativeKind) -> Option<bool> {
        self.configs.get(&kind).map(|config| config.is_interactive)
    }
}
