// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raw native event payload: an owned, ordered property bag.
//!
//! The host environment fills a [`NativeEvent`] with whatever properties the
//! platform exposed (`button`, `charCode`, `client`, …) and hands it to the
//! dispatch entry point. Event-shape descriptor tables then derive typed
//! extension fields from it. The bag is owned by the synthetic event only
//! for the duration of the dispatch; pool release clears it, so values read
//! from a released, non-persistent event are gone by design.

use alloc::string::String;

use kurbo::Point;
use smallvec::SmallVec;

/// The type tag of a [`FieldValue`], used to pick reset defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The absent/sentinel value.
    Null,
    /// A boolean flag.
    Bool,
    /// A signed integer (button codes, key codes, counters).
    Int,
    /// A floating point number (timestamps, deltas).
    Num,
    /// A string (key names, animation names).
    Str,
    /// A 2D point (pointer coordinates).
    Point,
}

impl FieldKind {
    /// Returns the default value instances of this kind reset to.
    #[must_use]
    pub fn default_value(self) -> FieldValue {
        match self {
            Self::Null => FieldValue::Null,
            Self::Bool => FieldValue::Bool(false),
            Self::Int => FieldValue::Int(0),
            Self::Num => FieldValue::Num(0.0),
            Self::Str => FieldValue::Str(String::new()),
            Self::Point => FieldValue::Point(Point::ORIGIN),
        }
    }
}

/// A dynamically typed property value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldValue {
    /// The absent/sentinel value.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Num(f64),
    /// A string.
    Str(String),
    /// A 2D point.
    Point(Point),
}

impl FieldValue {
    /// Returns the type tag of this value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Null => FieldKind::Null,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Num(_) => FieldKind::Num,
            Self::Str(_) => FieldKind::Str,
            Self::Point(_) => FieldKind::Point,
        }
    }

    /// Returns `true` for the [`FieldValue::Null`] sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric payload, widening integers.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the point payload, if any.
    #[must_use]
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Point> for FieldValue {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

/// An owned bag of named native properties, in insertion order.
///
/// Most platform events carry only a handful of properties, so the bag is an
/// inline vector scanned linearly; no hashing is imposed on the hot path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NativeEvent {
    props: SmallVec<[(&'static str, FieldValue); 8]>,
}

impl NativeEvent {
    /// Creates an empty native event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property insertion.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a property, replacing an existing value of the same name.
    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(slot) = self.props.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.props.push((name, value));
        }
    }

    /// Returns a property value, or `None` if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.props.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Returns a boolean property.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Returns an integer property.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    /// Returns a numeric property, widening integers.
    #[must_use]
    pub fn num(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_num)
    }

    /// Returns a string property.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Returns a point property.
    #[must_use]
    pub fn point(&self, name: &str) -> Option<Point> {
        self.get(name).and_then(FieldValue::as_point)
    }

    /// Returns `true` if no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Removes every property.
    pub fn clear(&mut self) {
        self.props.clear();
    }
}
