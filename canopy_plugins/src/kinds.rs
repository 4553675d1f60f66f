// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The native-kind vocabulary the shipped plugins understand.
//!
//! Hosts are free to feed any [`NativeKind`] into the pipeline; these
//! constants are merely the names the default classifier tables and the
//! selection plugin react to. The text follows pointer-events terminology
//! (`pointer-down`, not `mouse-down`) since hosts normalize device input
//! before it reaches the pipeline.

use canopy_synthetic::NativeKind;

/// Primary-button press.
pub const POINTER_DOWN: NativeKind = NativeKind::new("pointer-down");
/// Primary-button release.
pub const POINTER_UP: NativeKind = NativeKind::new("pointer-up");
/// Pointer movement.
pub const POINTER_MOVE: NativeKind = NativeKind::new("pointer-move");
/// Pointer entered a node.
pub const POINTER_OVER: NativeKind = NativeKind::new("pointer-over");
/// Pointer left a node.
pub const POINTER_OUT: NativeKind = NativeKind::new("pointer-out");
/// A completed primary click.
pub const CLICK: NativeKind = NativeKind::new("click");
/// A completed double click.
pub const DOUBLE_CLICK: NativeKind = NativeKind::new("double-click");
/// Secondary-button menu request.
pub const CONTEXT_MENU: NativeKind = NativeKind::new("context-menu");
/// Wheel rotation.
pub const WHEEL: NativeKind = NativeKind::new("wheel");

/// Key pressed.
pub const KEY_DOWN: NativeKind = NativeKind::new("key-down");
/// Character-producing key event.
pub const KEY_PRESS: NativeKind = NativeKind::new("key-press");
/// Key released.
pub const KEY_UP: NativeKind = NativeKind::new("key-up");

/// An element gained focus.
pub const FOCUS_IN: NativeKind = NativeKind::new("focus-in");
/// An element lost focus.
pub const FOCUS_OUT: NativeKind = NativeKind::new("focus-out");

/// Touch contact started.
pub const TOUCH_START: NativeKind = NativeKind::new("touch-start");
/// Touch contact ended.
pub const TOUCH_END: NativeKind = NativeKind::new("touch-end");
/// Touch contact moved.
pub const TOUCH_MOVE: NativeKind = NativeKind::new("touch-move");
/// Touch sequence aborted by the platform.
pub const TOUCH_CANCEL: NativeKind = NativeKind::new("touch-cancel");

/// Drag operation started.
pub const DRAG_START: NativeKind = NativeKind::new("drag-start");
/// Drag operation finished.
pub const DRAG_END: NativeKind = NativeKind::new("drag-end");
/// Dragged payload entered a node.
pub const DRAG_ENTER: NativeKind = NativeKind::new("drag-enter");
/// Dragged payload left a node.
pub const DRAG_LEAVE: NativeKind = NativeKind::new("drag-leave");
/// Dragged payload hovering over a node.
pub const DRAG_OVER: NativeKind = NativeKind::new("drag-over");
/// Dragged payload dropped.
pub const DROP: NativeKind = NativeKind::new("drop");

/// IME composition started.
pub const COMPOSITION_START: NativeKind = NativeKind::new("composition-start");
/// IME composition text changed.
pub const COMPOSITION_UPDATE: NativeKind = NativeKind::new("composition-update");
/// IME composition committed.
pub const COMPOSITION_END: NativeKind = NativeKind::new("composition-end");

/// Copy to clipboard.
pub const COPY: NativeKind = NativeKind::new("copy");
/// Cut to clipboard.
pub const CUT: NativeKind = NativeKind::new("cut");
/// Paste from clipboard.
pub const PASTE: NativeKind = NativeKind::new("paste");

/// CSS animation started.
pub const ANIMATION_START: NativeKind = NativeKind::new("animation-start");
/// CSS animation finished.
pub const ANIMATION_END: NativeKind = NativeKind::new("animation-end");
/// CSS animation looped.
pub const ANIMATION_ITERATION: NativeKind = NativeKind::new("animation-iteration");
/// CSS transition finished.
pub const TRANSITION_END: NativeKind = NativeKind::new("transition-end");

/// Scroll position changed.
pub const SCROLL: NativeKind = NativeKind::new("scroll");

/// Form submission requested.
pub const SUBMIT: NativeKind = NativeKind::new("submit");
/// Form reset requested.
pub const RESET: NativeKind = NativeKind::new("reset");
/// Committed value change.
pub const CHANGE: NativeKind = NativeKind::new("change");
/// Uncommitted text input.
pub const INPUT: NativeKind = NativeKind::new("input");
/// Constraint validation failed.
pub const INVALID: NativeKind = NativeKind::new("invalid");
/// Resource finished loading.
pub const LOAD: NativeKind = NativeKind::new("load");
/// Resource failed to load.
pub const ERROR: NativeKind = NativeKind::new("error");
/// Resource load aborted.
pub const ABORT: NativeKind = NativeKind::new("abort");
/// Resource load progress.
pub const PROGRESS: NativeKind = NativeKind::new("progress");
/// Disclosure widget toggled.
pub const TOGGLE: NativeKind = NativeKind::new("toggle");

/// The platform's document-wide selection changed. Consumed by the
/// selection plugin only; legacy engines may not emit it.
pub const SELECTION_CHANGE: NativeKind = NativeKind::new("selection-change");
