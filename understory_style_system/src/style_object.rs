// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved style objects.
//!
//! A [`StyleObject`] maps CSS declaration names, pseudo selectors and media
//! queries to either a scalar [`Value`] or a nested [`StyleObject`]. Keys
//! keep their insertion order; replacing a key keeps its position.

use alloc::rc::Rc;
use alloc::string::String;

use crate::value::{OrderedMap, Value};

/// A value inside a [`StyleObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// A declaration value, e.g. `"4px"`.
    Value(Value),
    /// A nested block, keyed by a media query or selector.
    Nested(StyleObject),
}

impl StyleValue {
    /// Returns the scalar value, if this is not a nested block.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    /// Returns the nested block, if any.
    #[must_use]
    pub fn as_nested(&self) -> Option<&StyleObject> {
        match self {
            Self::Nested(style) => Some(style),
            Self::Value(_) => None,
        }
    }
}

macro_rules! scalar_style_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

scalar_style_value!(Value, &str, String, Rc<str>, f64, i32, u32, bool);

impl From<StyleObject> for StyleValue {
    fn from(style: StyleObject) -> Self {
        Self::Nested(style)
    }
}

/// An insertion-ordered mapping of declarations and nested blocks.
///
/// # Example
///
/// ```rust
/// use understory_style_system::StyleObject;
///
/// let mut style = StyleObject::new()
///     .with("color", "red")
///     .with("&:hover", StyleObject::new().with("color", "blue"));
///
/// style.merge(StyleObject::new().with("&:hover", StyleObject::new().with("opacity", 0.5)));
///
/// let hover = style.nested("&:hover").unwrap();
/// assert_eq!(hover.keys().collect::<Vec<_>>(), ["color", "opacity"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleObject {
    entries: OrderedMap<Rc<str>, StyleValue>,
}

impl StyleObject {
    /// Creates an empty style object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<Rc<str>>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the previous value for the key.
    ///
    /// A replaced key keeps its position; a new key is appended.
    pub fn insert(
        &mut self,
        key: impl Into<Rc<str>>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes an entry, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.entries.shift_remove(key)
    }

    /// Returns the entry for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// Returns the scalar value for a key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(StyleValue::as_value)
    }

    /// Returns the nested block for a key.
    #[must_use]
    pub fn nested(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(StyleValue::as_nested)
    }

    pub(crate) fn nested_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self.entries.get_mut(key) {
            Some(StyleValue::Nested(style)) => Some(style),
            _ => None,
        }
    }

    /// Returns the number of top-level entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the top-level keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(|k| &**k)
    }

    /// Iterates the top-level entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> + '_ {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Deep-merges `other` into `self`.
    ///
    /// When both sides hold a nested block under the same key the blocks
    /// are merged recursively; otherwise the entry from `other` wins.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            match value {
                StyleValue::Nested(incoming) => match self.entries.get_mut(&key) {
                    Some(StyleValue::Nested(existing)) => existing.merge(incoming),
                    _ => {
                        self.entries.insert(key, StyleValue::Nested(incoming));
                    }
                },
                value => {
                    self.entries.insert(key, value);
                }
            }
        }
    }

    /// Shallow-assigns `other` into `self`: every entry of `other`
    /// replaces the entry under the same key.
    pub fn assign(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl<K, V> FromIterator<(K, V)> for StyleObject
where
    K: Into<Rc<str>>,
    V: Into<StyleValue>,
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

impl IntoIterator for StyleObject {
    type Item = (Rc<str>, StyleValue);
    type IntoIter = indexmap::map::IntoIter<Rc<str>, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn merge_recurses_into_nested_blocks() {
        let mut base = StyleObject::new()
            .with("color", "red")
            .with("&:hover", StyleObject::new().with("color", "blue"));
        base.merge(
            StyleObject::new()
                .with("margin", "4px")
                .with("&:hover", StyleObject::new().with("opacity", 0.5)),
        );

        assert_eq!(base.keys().collect::<Vec<_>>(), ["color", "&:hover", "margin"]);
        let hover = base.nested("&:hover").unwrap();
        assert_eq!(hover.value("color"), Some(&Value::from("blue")));
        assert_eq!(hover.value("opacity"), Some(&Value::from(0.5)));
    }

    #[test]
    fn merge_scalar_replaces_in_place() {
        let mut base = StyleObject::new().with("color", "red").with("margin", 1);
        base.merge(StyleObject::new().with("color", "green"));

        assert_eq!(base.keys().collect::<Vec<_>>(), ["color", "margin"]);
        assert_eq!(base.value("color"), Some(&Value::from("green")));
    }

    #[test]
    fn assign_replaces_nested_blocks_wholesale() {
        let mut bucket = StyleObject::new().with("&:hover", StyleObject::new().with("color", "red"));
        bucket.assign(StyleObject::new().with("&:hover", StyleObject::new().with("margin", 0)));

        let hover = bucket.nested("&:hover").unwrap();
        assert_eq!(hover.len(), 1);
        assert!(hover.value("color").is_none());
    }

    #[test]
    fn remove_keeps_order() {
        let mut style: StyleObject = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert!(style.remove("b").is_some());
        assert_eq!(style.keys().collect::<Vec<_>>(), ["a", "c"]);
    }
}
