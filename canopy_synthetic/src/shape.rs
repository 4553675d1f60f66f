// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-family shapes as declarative field-descriptor tables.
//!
//! Each [`EventShape`] tag selects a `const` table of [`FieldSpec`]s: the
//! fixed, ordered list of extension fields that family carries, with a
//! default kind and a derivation rule from the native payload. There is no
//! inheritance between families; the selector is an exhaustive `match` on
//! the tag enum, so a missing arm is a compile error rather than a silent
//! fallback.
//!
//! A shape's field list is *merged* in source: families repeat the base
//! fields they carry instead of inheriting them.

use crate::native::{FieldKind, FieldValue, NativeEvent};

/// The fixed set of event families.
///
/// Anything a classifier does not recognize falls back to [`EventShape::Base`];
/// the tag also indexes the per-shape free lists in the event pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventShape {
    /// The generic base shape, used for unrecognized or payload-less events.
    Base,
    /// UI events such as scroll.
    Ui,
    /// Mouse/pointer button and movement events.
    Mouse,
    /// Keyboard events.
    Keyboard,
    /// Focus transitions.
    Focus,
    /// Touch events.
    Touch,
    /// Drag-and-drop events (pointer field set).
    Drag,
    /// Wheel events (pointer field set plus deltas).
    Wheel,
    /// Clipboard events.
    Clipboard,
    /// CSS animation events.
    Animation,
    /// CSS transition events.
    Transition,
    /// IME composition events.
    Composition,
}

impl EventShape {
    /// The number of shapes, for per-shape storage.
    pub const COUNT: usize = 12;

    /// Every shape, in tag order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Base,
        Self::Ui,
        Self::Mouse,
        Self::Keyboard,
        Self::Focus,
        Self::Touch,
        Self::Drag,
        Self::Wheel,
        Self::Clipboard,
        Self::Animation,
        Self::Transition,
        Self::Composition,
    ];

    /// Returns the dense index of this shape.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the family's extension-field descriptor table.
    #[must_use]
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Base => BASE_FIELDS,
            Self::Ui => UI_FIELDS,
            // Drag events carry the pointer field set; the shapes stay
            // distinct so their free lists never mix.
            Self::Mouse | Self::Drag => MOUSE_FIELDS,
            Self::Keyboard => KEYBOARD_FIELDS,
            Self::Focus => FOCUS_FIELDS,
            Self::Touch => TOUCH_FIELDS,
            Self::Wheel => WHEEL_FIELDS,
            Self::Clipboard => CLIPBOARD_FIELDS,
            Self::Animation => ANIMATION_FIELDS,
            Self::Transition => TRANSITION_FIELDS,
            Self::Composition => COMPOSITION_FIELDS,
        }
    }
}

/// How an extension field obtains its value from the native payload.
#[derive(Copy, Clone, Debug)]
pub enum Derive {
    /// Copy the same-named native property, coerced to the field's kind;
    /// absent or mistyped properties yield the kind's default.
    Property,
    /// Compute the value with a normalization function.
    With(fn(&NativeEvent) -> FieldValue),
}

/// One extension-field descriptor: name, value kind, derivation rule.
#[derive(Copy, Clone, Debug)]
pub struct FieldSpec {
    /// The field name listeners read.
    pub name: &'static str,
    /// The value kind, which also supplies the pool-reset default.
    pub kind: FieldKind,
    /// How the value is derived at acquire time.
    pub derive: Derive,
}

impl FieldSpec {
    /// A field copied from the same-named native property.
    #[must_use]
    pub const fn property(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            derive: Derive::Property,
        }
    }

    /// A field computed by a normalization function.
    #[must_use]
    pub const fn derived(
        name: &'static str,
        kind: FieldKind,
        with: fn(&NativeEvent) -> FieldValue,
    ) -> Self {
        Self {
            name,
            kind,
            derive: Derive::With(with),
        }
    }

    /// Resolves this field's value from a native payload.
    #[must_use]
    pub fn resolve(&self, native: &NativeEvent) -> FieldValue {
        match self.derive {
            Derive::Property => match self.kind {
                FieldKind::Null => FieldValue::Null,
                FieldKind::Bool => native
                    .flag(self.name)
                    .map_or_else(|| self.kind.default_value(), FieldValue::Bool),
                FieldKind::Int => native
                    .int(self.name)
                    .map_or_else(|| self.kind.default_value(), FieldValue::Int),
                FieldKind::Num => native
                    .num(self.name)
                    .map_or_else(|| self.kind.default_value(), FieldValue::Num),
                FieldKind::Str => native
                    .text(self.name)
                    .map_or_else(|| self.kind.default_value(), FieldValue::from),
                FieldKind::Point => native
                    .point(self.name)
                    .map_or_else(|| self.kind.default_value(), FieldValue::Point),
            },
            Derive::With(with) => with(native),
        }
    }
}

/// Normalized character code for key-character events.
///
/// Platforms disagree on where the printable code lives: some report Enter
/// through `keyCode` only, and Ctrl+Enter arrives as a line feed on others.
/// Codes below 32 (other than carriage return) are function keys and decode
/// to 0.
#[must_use]
pub fn decoded_char_code(native: &NativeEvent) -> i64 {
    let key_code = native.int("keyCode").unwrap_or(0);
    let mut char_code = native.int("charCode").unwrap_or(0);
    if char_code == 0 && key_code == 13 {
        char_code = 13;
    }
    if char_code == 10 {
        char_code = 13;
    }
    if char_code >= 32 || char_code == 13 {
        char_code
    } else {
        0
    }
}

fn char_code_field(native: &NativeEvent) -> FieldValue {
    FieldValue::Int(decoded_char_code(native))
}

const BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
];

const UI_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("detail", FieldKind::Int),
];

const MOUSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("detail", FieldKind::Int),
    FieldSpec::property("client", FieldKind::Point),
    FieldSpec::property("screen", FieldKind::Point),
    FieldSpec::property("button", FieldKind::Int),
    FieldSpec::property("buttons", FieldKind::Int),
    FieldSpec::property("altKey", FieldKind::Bool),
    FieldSpec::property("ctrlKey", FieldKind::Bool),
    FieldSpec::property("metaKey", FieldKind::Bool),
    FieldSpec::property("shiftKey", FieldKind::Bool),
];

const KEYBOARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("key", FieldKind::Str),
    FieldSpec::property("code", FieldKind::Str),
    FieldSpec::property("keyCode", FieldKind::Int),
    FieldSpec::derived("charCode", FieldKind::Int, char_code_field),
    FieldSpec::property("repeat", FieldKind::Bool),
    FieldSpec::property("altKey", FieldKind::Bool),
    FieldSpec::property("ctrlKey", FieldKind::Bool),
    FieldSpec::property("metaKey", FieldKind::Bool),
    FieldSpec::property("shiftKey", FieldKind::Bool),
];

const FOCUS_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
];

const TOUCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("altKey", FieldKind::Bool),
    FieldSpec::property("ctrlKey", FieldKind::Bool),
    FieldSpec::property("metaKey", FieldKind::Bool),
    FieldSpec::property("shiftKey", FieldKind::Bool),
];

const WHEEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("client", FieldKind::Point),
    FieldSpec::property("button", FieldKind::Int),
    FieldSpec::property("buttons", FieldKind::Int),
    FieldSpec::property("delta", FieldKind::Point),
    FieldSpec::property("deltaZ", FieldKind::Num),
    FieldSpec::property("deltaMode", FieldKind::Int),
    FieldSpec::property("altKey", FieldKind::Bool),
    FieldSpec::property("ctrlKey", FieldKind::Bool),
    FieldSpec::property("metaKey", FieldKind::Bool),
    FieldSpec::property("shiftKey", FieldKind::Bool),
];

const CLIPBOARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("clipboardData", FieldKind::Str),
];

const ANIMATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("animationName", FieldKind::Str),
    FieldSpec::property("elapsedTime", FieldKind::Num),
    FieldSpec::property("pseudoElement", FieldKind::Str),
];

const TRANSITION_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("propertyName", FieldKind::Str),
    FieldSpec::property("elapsedTime", FieldKind::Num),
    FieldSpec::property("pseudoElement", FieldKind::Str),
];

const COMPOSITION_FIELDS: &[FieldSpec] = &[
    FieldSpec::property("timeStamp", FieldKind::Num),
    FieldSpec::property("isTrusted", FieldKind::Bool),
    FieldSpec::property("data", FieldKind::Str),
];

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn indexes_are_dense_and_stable() {
        for (i, shape) in EventShape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
        }
    }

    #[test]
    fn every_shape_declares_fields() {
        for shape in EventShape::ALL {
            assert!(!shape.fields().is_empty());
        }
    }

    #[test]
    fn drag_shares_the_pointer_field_set() {
        assert_eq!(
            EventShape::Drag.fields().len(),
            EventShape::Mouse.fields().len()
        );
    }

    #[test]
    fn property_fields_resolve_and_default() {
        let native = NativeEvent::new()
            .with("button", 1_i64)
            .with("client", Point::new(4.0, 5.0));

        let button = FieldSpec::property("button", FieldKind::Int);
        assert_eq!(button.resolve(&native), FieldValue::Int(1));

        let client = FieldSpec::property("client", FieldKind::Point);
        assert_eq!(
            client.resolve(&native),
            FieldValue::Point(Point::new(4.0, 5.0))
        );

        // Absent property: the kind's default.
        let alt = FieldSpec::property("altKey", FieldKind::Bool);
        assert_eq!(alt.resolve(&native), FieldValue::Bool(false));

        // Mistyped property: also the kind's default.
        let mistyped = FieldSpec::property("button", FieldKind::Str);
        assert_eq!(mistyped.resolve(&native), FieldValue::Str("".into()));
    }

    #[test]
    fn int_properties_widen_into_num_fields() {
        let native = NativeEvent::new().with("timeStamp", 7_i64);
        let stamp = FieldSpec::property("timeStamp", FieldKind::Num);
        assert_eq!(stamp.resolve(&native), FieldValue::Num(7.0));
    }

    #[test]
    fn char_code_decoding_normalizes_enter() {
        // Enter reported through keyCode only.
        let native = NativeEvent::new().with("keyCode", 13_i64);
        assert_eq!(decoded_char_code(&native), 13);

        // Ctrl+Enter arriving as a line feed.
        let native = NativeEvent::new().with("charCode", 10_i64);
        assert_eq!(decoded_char_code(&native), 13);

        // Printable character.
        let native = NativeEvent::new().with("charCode", 97_i64);
        assert_eq!(decoded_char_code(&native), 97);
    }

    #[test]
    fn char_code_decoding_discards_function_keys() {
        // Below 32 and not carriage return: decodes to zero.
        let native = NativeEvent::new().with("charCode", 27_i64).with("keyCode", 27_i64);
        assert_eq!(decoded_char_code(&native), 0);

        let native = NativeEvent::new();
        assert_eq!(decoded_char_code(&native), 0);
    }

    #[test]
    fn derived_fields_run_their_function() {
        let spec = FieldSpec::derived("charCode", FieldKind::Int, char_code_field);
        let native = NativeEvent::new().with("charCode", 65_i64);
        assert_eq!(spec.resolve(&native), FieldValue::Int(65));
    }
}
