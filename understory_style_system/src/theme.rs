// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme data: breakpoints, scale tables and named transforms.
//!
//! This module provides [`Theme`], the external data source every style
//! generator resolves against, and [`ThemeBuilder`] to construct it.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::cache::{CacheStats, ThemeCache};
use crate::getter::{Transform, TransformCx};
use crate::value::{OrderedMap, Value};

/// Breakpoints used when a theme does not declare any.
pub const DEFAULT_BREAKPOINTS: [(&str, u32); 5] =
    [("xs", 0), ("sm", 576), ("md", 768), ("lg", 992), ("xl", 1200)];

/// A named minimum viewport width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    name: Rc<str>,
    min_width: u32,
}

impl Breakpoint {
    /// Creates a breakpoint.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>, min_width: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }

    /// The breakpoint name, e.g. `"md"`.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The minimum width in pixels.
    #[must_use]
    #[inline]
    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// The media query for this breakpoint, or `None` for a zero minimum.
    #[must_use]
    pub fn media_query(&self) -> Option<String> {
        (self.min_width != 0).then(|| format!("@media (min-width: {}px)", self.min_width))
    }

    /// Returns [`DEFAULT_BREAKPOINTS`] as owned breakpoints.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_BREAKPOINTS
            .iter()
            .map(|&(name, min_width)| Self::new(name, min_width))
            .collect()
    }
}

/// A scale or variant table: token name → value.
///
/// The optional `default` entry is what a prop value of `true` resolves to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantTable {
    entries: OrderedMap<Rc<str>, Value>,
}

impl VariantTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<Rc<str>>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Looks up a token.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }
}

impl<K, V> FromIterator<(K, V)> for VariantTable
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

/// Breakpoints, scale tables and transforms for style resolution.
///
/// Themes are immutable after creation. Use [`ThemeBuilder`] to construct
/// them.
///
/// # Memory Layout
///
/// Internally, `Theme` wraps an `Rc<ThemeData>`, making cloning cheap.
/// Clones share identity and therefore share one [`ThemeCache`]; a theme
/// built separately from the same tables gets its own cache.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{ThemeBuilder, Value, VariantTable};
///
/// let theme = ThemeBuilder::new()
///     .breakpoint("sm", 576)
///     .breakpoint("md", 768)
///     .scale("space", VariantTable::new().with("sm", "4px").with("lg", "8px"))
///     .build();
///
/// assert_eq!(theme.breakpoints().len(), 2);
/// assert_eq!(theme.scale("space").and_then(|s| s.get("lg")), Some(&Value::from("8px")));
/// ```
#[derive(Clone)]
pub struct Theme {
    inner: Rc<ThemeData>,
}

struct ThemeData {
    /// In declaration order; never empty.
    breakpoints: Vec<Breakpoint>,
    scales: HashMap<Rc<str>, VariantTable>,
    transformers: HashMap<Rc<str>, Transform>,
    cache: ThemeCache,
}

impl Theme {
    /// The breakpoints in declaration order.
    #[must_use]
    #[inline]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.inner.breakpoints
    }

    /// Looks up a scale table by name.
    #[must_use]
    pub fn scale(&self, name: &str) -> Option<&VariantTable> {
        self.inner.scales.get(name)
    }

    /// Looks up a named transform.
    #[must_use]
    pub fn transformer(&self, name: &str) -> Option<&Transform> {
        self.inner.transformers.get(name)
    }

    /// The cache owned by this theme.
    #[must_use]
    #[inline]
    pub fn cache(&self) -> &ThemeCache {
        &self.inner.cache
    }

    /// Shorthand for `self.cache().stats()`.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Returns `true` if both handles refer to the same theme instance.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Default for Theme {
    fn default() -> Self {
        ThemeBuilder::new().build()
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("breakpoints", &self.inner.breakpoints)
            .field("scales", &self.inner.scales)
            .field(
                "transformers",
                &self.inner.transformers.keys().collect::<Vec<_>>(),
            )
            .field("cache", &self.inner.cache)
            .finish()
    }
}

/// Builder for constructing [`Theme`] instances.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{ThemeBuilder, Value};
///
/// let theme = ThemeBuilder::new()
///     .transformer("px", |value, _cx| match value {
///         Value::Num(n) => Value::from(format!("{n}px")),
///         other => other,
///     })
///     .build();
///
/// assert!(theme.transformer("px").is_some());
/// // No breakpoints declared: the defaults apply.
/// assert_eq!(theme.breakpoints().len(), 5);
/// ```
#[derive(Default)]
pub struct ThemeBuilder {
    breakpoints: Vec<Breakpoint>,
    scales: HashMap<Rc<str>, VariantTable>,
    transformers: HashMap<Rc<str>, Transform>,
}

impl ThemeBuilder {
    /// Creates a new empty theme builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a breakpoint.
    ///
    /// Breakpoints keep their declaration order, which is also the order
    /// media queries appear in composed styles. Re-declaring a name
    /// replaces its width in place.
    #[must_use]
    pub fn breakpoint(mut self, name: impl Into<Rc<str>>, min_width: u32) -> Self {
        let breakpoint = Breakpoint::new(name, min_width);
        match self
            .breakpoints
            .iter_mut()
            .find(|b| b.name == breakpoint.name)
        {
            Some(existing) => existing.min_width = min_width,
            None => self.breakpoints.push(breakpoint),
        }
        self
    }

    /// Sets a scale table, replacing any table with the same name.
    #[must_use]
    pub fn scale(mut self, name: impl Into<Rc<str>>, table: VariantTable) -> Self {
        self.scales.insert(name.into(), table);
        self
    }

    /// Registers a named transform.
    ///
    /// A getter whose name matches uses this transform instead of its own.
    #[must_use]
    pub fn transformer<F>(mut self, name: impl Into<Rc<str>>, transform: F) -> Self
    where
        F: Fn(Value, &TransformCx<'_>) -> Value + 'static,
    {
        self.transformers.insert(name.into(), Rc::new(transform));
        self
    }

    /// Builds the theme.
    #[must_use]
    pub fn build(self) -> Theme {
        let breakpoints = if self.breakpoints.is_empty() {
            Breakpoint::defaults()
        } else {
            self.breakpoints
        };
        Theme {
            inner: Rc::new(ThemeData {
                breakpoints,
                scales: self.scales,
                transformers: self.transformers,
                cache: ThemeCache::default(),
            }),
        }
    }
}

impl fmt::Debug for ThemeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeBuilder")
            .field("breakpoints", &self.breakpoints)
            .field("scales", &self.scales)
            .field("transformers", &self.transformers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_query_skips_zero_minimum() {
        assert_eq!(Breakpoint::new("xs", 0).media_query(), None);
        assert_eq!(
            Breakpoint::new("md", 768).media_query().as_deref(),
            Some("@media (min-width: 768px)")
        );
    }

    #[test]
    fn theme_defaults_breakpoints() {
        let theme = Theme::default();
        let names: Vec<_> = theme.breakpoints().iter().map(Breakpoint::name).collect();
        assert_eq!(names, ["xs", "sm", "md", "lg", "xl"]);
    }

    #[test]
    fn breakpoints_keep_declaration_order() {
        let theme = ThemeBuilder::new()
            .breakpoint("lg", 992)
            .breakpoint("sm", 576)
            .breakpoint("lg", 1024)
            .build();

        let widths: Vec<_> = theme.breakpoints().iter().map(Breakpoint::min_width).collect();
        assert_eq!(widths, [1024, 576]);
    }

    #[test]
    fn scale_replace_value() {
        let theme = ThemeBuilder::new()
            .scale("colors", VariantTable::new().with("primary", "red"))
            .scale("colors", VariantTable::new().with("primary", "blue"))
            .build();

        assert_eq!(
            theme.scale("colors").and_then(|s| s.get("primary")),
            Some(&Value::from("blue"))
        );
        assert!(theme.scale("space").is_none());
    }

    #[test]
    fn theme_clone_shares_identity() {
        let theme = ThemeBuilder::new().build();
        let theme2 = theme.clone();
        let other = ThemeBuilder::new().build();

        assert!(Theme::ptr_eq(&theme, &theme2));
        assert!(!Theme::ptr_eq(&theme, &other));
        assert!(core::ptr::eq(theme.cache(), theme2.cache()));
    }
}
