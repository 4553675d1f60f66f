// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch configuration: logical events, registration names, and native dependencies.
//!
//! A *logical* event (`click`, `select`, …) is what listeners subscribe to.
//! Each logical event carries one [`DispatchConfig`] describing how it
//! propagates and which native event categories can trigger its extraction.
//!
//! Registration names follow a load-bearing convention: a phased logical
//! event `x` registers its bubble listener under `onX` and its capture
//! listener under `onXCapture`; a direct (non-bubbling) logical event
//! registers under `onX` with no capture counterpart. The propagation
//! accumulator looks handlers up by exactly these derived names, so they are
//! computed once at config construction rather than per dispatch.

use alloc::string::String;
use alloc::vec::Vec;

/// An opaque identifier for a platform event category (e.g. `pointer-down`).
///
/// Kinds are supplied by the host environment, one per native event. They
/// are compared by name; the pipeline attaches no meaning to the text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeKind(&'static str);

impl NativeKind {
    /// Creates a kind from its host-environment name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the host-environment name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

/// How listeners for a logical event are registered and delivered.
///
/// Exactly one of the two modes applies to a logical event, which is why
/// this is an enum rather than a pair of optional fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Two-phase delivery: capture (root→target) then bubble (target→root).
    Phased {
        /// Registration name of the bubble-phase listener (`onX`).
        bubbled: String,
        /// Registration name of the capture-phase listener (`onXCapture`).
        captured: String,
    },
    /// Single-phase delivery with no capture/bubble distinction.
    Direct(String),
}

impl Registration {
    /// Derives phased registration names from a logical event name.
    #[must_use]
    pub fn phased(logical_name: &str) -> Self {
        let bubbled = listener_name(logical_name);
        let mut captured = String::with_capacity(bubbled.len() + 7);
        captured.push_str(&bubbled);
        captured.push_str("Capture");
        Self::Phased { bubbled, captured }
    }

    /// Derives the direct registration name from a logical event name.
    #[must_use]
    pub fn direct(logical_name: &str) -> Self {
        Self::Direct(listener_name(logical_name))
    }

    /// Returns `true` for two-phase registrations.
    #[must_use]
    pub fn is_phased(&self) -> bool {
        matches!(self, Self::Phased { .. })
    }

    /// Returns the bubble-phase registration name, if phased.
    #[must_use]
    pub fn bubbled(&self) -> Option<&str> {
        match self {
            Self::Phased { bubbled, .. } => Some(bubbled),
            Self::Direct(_) => None,
        }
    }

    /// Returns the capture-phase registration name, if phased.
    #[must_use]
    pub fn captured(&self) -> Option<&str> {
        match self {
            Self::Phased { captured, .. } => Some(captured),
            Self::Direct(_) => None,
        }
    }

    /// Returns the direct registration name, if direct.
    #[must_use]
    pub fn direct_name(&self) -> Option<&str> {
        match self {
            Self::Phased { .. } => None,
            Self::Direct(name) => Some(name),
        }
    }

    /// Iterates over every registration name of this mode.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Self::Phased { bubbled, captured } => (bubbled.as_str(), Some(captured.as_str())),
            Self::Direct(name) => (name.as_str(), None),
        };
        core::iter::once(first).chain(second)
    }
}

/// Derives a listener registration name: logical `x` → `onX`.
fn listener_name(logical_name: &str) -> String {
    let mut out = String::with_capacity(logical_name.len() + 2);
    out.push_str("on");
    let mut chars = logical_name.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    out
}

/// Per-logical-event dispatch metadata.
///
/// Constructed once at plugin-registration time and shared immutably for the
/// process lifetime (the pipeline hands them around as `Rc<DispatchConfig>`;
/// the single-threaded run-to-completion model makes `Rc` sufficient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// The logical event name listeners subscribe to (e.g. `click`).
    pub logical_name: &'static str,
    /// Propagation mode and the derived registration names.
    pub registration: Registration,
    /// Every native event kind that can trigger extraction of this logical
    /// event. Consulted by listener-presence checks.
    pub dependencies: Vec<NativeKind>,
    /// Whether this logical event is user-intent-bearing (click, key, …) as
    /// opposed to ambient (scroll, mouse move, …).
    pub is_interactive: bool,
}

impl DispatchConfig {
    /// Creates a two-phase config for `logical_name`.
    #[must_use]
    pub fn phased(
        logical_name: &'static str,
        dependencies: &[NativeKind],
        is_interactive: bool,
    ) -> Self {
        Self {
            logical_name,
            registration: Registration::phased(logical_name),
            dependencies: dependencies.into(),
            is_interactive,
        }
    }

    /// Creates a direct (non-bubbling) config for `logical_name`.
    #[must_use]
    pub fn direct(
        logical_name: &'static str,
        dependencies: &[NativeKind],
        is_interactive: bool,
    ) -> Self {
        Self {
            logical_name,
            registration: Registration::direct(logical_name),
            dependencies: dependencies.into(),
            is_interactive,
        }
    }

    /// Returns `true` if `kind` is one of this config's native dependencies.
    #[must_use]
    pub fn depends_on(&self, kind: NativeKind) -> bool {
        self.dependencies.contains(&kind)
    }
}
