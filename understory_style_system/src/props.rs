// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The props bag a generator resolves against.

use alloc::rc::Rc;

use crate::theme::Theme;
use crate::value::{OrderedMap, PropValue};

/// Read access to a component's props.
///
/// Generators only ever ask for the prop names they declare, so a host can
/// back this with whatever storage it already has.
pub trait Props {
    /// The theme to resolve against. Without one, resolution is uncached.
    fn theme(&self) -> Option<&Theme>;

    /// Looks up a prop by name.
    fn get(&self, name: &str) -> Option<&PropValue>;
}

/// A simple owned [`Props`] implementation.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{PropValue, Props, PropsBag, ResponsiveValue, Theme};
///
/// let props = PropsBag::new()
///     .with_theme(Theme::default())
///     .with("color", "primary")
///     .with("margin", ResponsiveValue::new().at("xs", 1).at("md", 2));
///
/// assert!(props.theme().is_some());
/// assert_eq!(props.get("color"), Some(&PropValue::from("primary")));
/// assert!(props.get("padding").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropsBag {
    theme: Option<Theme>,
    values: OrderedMap<Rc<str>, PropValue>,
}

impl PropsBag {
    /// Creates an empty props bag without a theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the theme, returning `self` for chaining.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Sets a prop, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<Rc<str>>, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets or replaces the theme.
    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme = theme;
    }

    /// Sets a prop, returning its previous value.
    pub fn set(
        &mut self,
        name: impl Into<Rc<str>>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Removes a prop, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.values.shift_remove(name)
    }

    /// Returns the number of props set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no props are set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Props for PropsBag {
    fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }
}
