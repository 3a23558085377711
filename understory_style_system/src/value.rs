// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw prop values and resolved scalar values.
//!
//! A prop is either a single [`Value`] or a [`ResponsiveValue`] keyed by
//! breakpoint name. Absence is expressed by the props lookup returning
//! `None`, so every branch over a [`PropValue`] is exhaustive.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;
use core::hash::{Hash, Hasher};

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

/// Insertion-ordered map used for props, tables and style objects.
pub(crate) type OrderedMap<K, V> = IndexMap<K, V, DefaultHashBuilder>;

/// A scalar value, either raw (as written on a prop) or resolved.
///
/// Numbers compare and hash by bit pattern so that a `Value` can key the
/// theme cache.
#[derive(Clone, Debug)]
pub enum Value {
    /// A string such as `"primary"`, `"1rem"` or `"sm lg"`.
    Str(Rc<str>),
    /// A number.
    Num(f64),
    /// A boolean. Only `true` takes part in resolution, as the `default`
    /// variant.
    Bool(bool),
}

impl Value {
    /// Returns `true` if this value is looked up against theme scales.
    ///
    /// Strings, numbers and `true` are candidates; `false` is not.
    #[must_use]
    #[inline]
    pub fn is_candidate(&self) -> bool {
        !matches!(self, Self::Bool(false))
    }

    /// Returns the string slice if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Num`].
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The name used to look this value up in a variant table.
    ///
    /// `true` maps to `"default"`.
    #[must_use]
    pub fn variant_key(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(&**s),
            Self::Bool(true) => Cow::Borrowed("default"),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Str(s) => s.hash(state),
            Self::Num(n) => n.to_bits().hash(state),
            Self::Bool(b) => b.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A per-breakpoint value map, e.g. `{ xs: "1rem", lg: "2rem" }`.
///
/// Entries keep their insertion order. Values are scalars only, so
/// responsive values cannot nest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponsiveValue {
    entries: OrderedMap<Rc<str>, Value>,
}

impl ResponsiveValue {
    /// Creates an empty responsive value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for a breakpoint, returning `self` for chaining.
    ///
    /// Re-setting a breakpoint replaces its value and keeps its position.
    #[must_use]
    pub fn at(mut self, breakpoint: impl Into<Rc<str>>, value: impl Into<Value>) -> Self {
        self.entries.insert(breakpoint.into(), value.into());
        self
    }

    /// Returns the value for a breakpoint, if set.
    #[must_use]
    pub fn get(&self, breakpoint: &str) -> Option<&Value> {
        self.entries.get(breakpoint)
    }

    /// Returns the number of breakpoints set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no breakpoint is set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(breakpoint, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }
}

impl<K, V> FromIterator<(K, V)> for ResponsiveValue
where
    K: Into<Rc<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The value of one prop on a props bag.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A single value applied at every breakpoint.
    Scalar(Value),
    /// Values keyed by breakpoint name.
    Responsive(ResponsiveValue),
}

macro_rules! scalar_prop_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_prop_value!(Value, &str, String, Rc<str>, f64, i32, u32, bool);

impl From<ResponsiveValue> for PropValue {
    fn from(value: ResponsiveValue) -> Self {
        Self::Responsive(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use hashbrown::HashSet;

    #[test]
    fn only_false_is_not_a_candidate() {
        assert!(Value::from("primary").is_candidate());
        assert!(Value::from(2).is_candidate());
        assert!(Value::from(true).is_candidate());
        assert!(!Value::from(false).is_candidate());
    }

    #[test]
    fn variant_key_maps_true_to_default() {
        assert_eq!(Value::from(true).variant_key(), "default");
        assert_eq!(Value::from("lg").variant_key(), "lg");
        assert_eq!(Value::from(4).variant_key(), "4");
        assert_eq!(Value::from(0.5).variant_key(), "0.5");
    }

    #[test]
    fn numbers_key_by_bits() {
        let mut set = HashSet::new();
        set.insert(Value::from(1.0));
        assert!(set.contains(&Value::from(1)));
        assert!(!set.contains(&Value::from("1")));
    }

    #[test]
    fn responsive_value_keeps_insertion_order() {
        let value = ResponsiveValue::new().at("lg", "2rem").at("xs", "1rem");
        let keys: Vec<_> = value.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["lg", "xs"]);
        assert_eq!(value.get("xs"), Some(&Value::from("1rem")));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn prop_value_from_scalars() {
        assert_eq!(
            PropValue::from("red"),
            PropValue::Scalar(Value::Str("red".into()))
        );
        let responsive: ResponsiveValue = [("sm", 1)].into_iter().collect();
        assert!(matches!(
            PropValue::from(responsive),
            PropValue::Responsive(_)
        ));
    }
}
