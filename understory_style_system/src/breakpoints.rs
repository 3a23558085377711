// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint reduction for responsive values.
//!
//! [`reduce_breakpoints`] turns a [`ResponsiveValue`] into one style object:
//! values for a zero-width breakpoint are merged at the top level, every
//! other breakpoint lands in a `@media (min-width: …px)` block.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::cache::ThemeCache;
use crate::props::Props;
use crate::style_object::StyleObject;
use crate::theme::Breakpoint;
use crate::value::{ResponsiveValue, Value};

/// Breakpoint name → media query, in theme order.
#[derive(Debug)]
pub(crate) struct Medias {
    entries: Vec<(Rc<str>, Option<Rc<str>>)>,
}

impl Medias {
    pub(crate) fn new(breakpoints: &[Breakpoint]) -> Self {
        Self {
            entries: breakpoints
                .iter()
                .map(|b| (b.name().into(), b.media_query().map(Into::into)))
                .collect(),
        }
    }

    /// `None` for an unknown breakpoint, `Some(None)` for the base tier.
    pub(crate) fn get(&self, breakpoint: &str) -> Option<Option<&Rc<str>>> {
        self.entries
            .iter()
            .find(|(name, _)| &**name == breakpoint)
            .map(|(_, media)| media.as_ref())
    }

    /// The media queries in theme order, skipping the base tier.
    pub(crate) fn queries(&self) -> impl Iterator<Item = &Rc<str>> + '_ {
        self.entries.iter().filter_map(|(_, media)| media.as_ref())
    }
}

/// The media table for the props' theme, shared through `cache` if given.
pub(crate) fn theme_medias(props: &dyn Props, cache: Option<&ThemeCache>) -> Rc<Medias> {
    let build = || match props.theme() {
        Some(theme) => Medias::new(theme.breakpoints()),
        None => Medias::new(&Breakpoint::defaults()),
    };
    match cache {
        Some(cache) => cache.medias(build),
        None => Rc::new(build()),
    }
}

/// Reduces a responsive value into one style object.
///
/// `get_style` builds the declarations for one breakpoint value; `None`
/// skips that breakpoint. Entries are visited in the responsive value's
/// own order and the result keeps that encounter order. Base-tier styles
/// are deep-merged at the top level, while styles for the same media query
/// are shallow-assigned into its block. Breakpoints the theme does not
/// declare are ignored.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{
///     PropsBag, ResponsiveValue, StyleObject, ThemeBuilder, reduce_breakpoints,
/// };
///
/// let theme = ThemeBuilder::new().breakpoint("xs", 0).breakpoint("md", 768).build();
/// let props = PropsBag::new().with_theme(theme.clone());
/// let margin = ResponsiveValue::new().at("md", "2rem").at("xs", "1rem");
///
/// let style = reduce_breakpoints(
///     &props,
///     &margin,
///     |value| Some(StyleObject::new().with("margin", value.clone())),
///     Some(theme.cache()),
/// );
/// assert_eq!(style.keys().collect::<Vec<_>>(), ["@media (min-width: 768px)", "margin"]);
/// ```
pub fn reduce_breakpoints<F>(
    props: &dyn Props,
    values: &ResponsiveValue,
    mut get_style: F,
    cache: Option<&ThemeCache>,
) -> StyleObject
where
    F: FnMut(&Value) -> Option<StyleObject>,
{
    let medias = theme_medias(props, cache);
    let mut styles = StyleObject::new();
    for (breakpoint, value) in values.iter() {
        let Some(media) = medias.get(breakpoint) else {
            tracing::trace!(breakpoint, "ignoring value for undeclared breakpoint");
            continue;
        };
        let Some(style) = get_style(value) else {
            continue;
        };
        match media {
            None => styles.merge(style),
            Some(media) => match styles.nested_mut(media) {
                Some(bucket) => bucket.assign(style),
                None => {
                    styles.insert(media.clone(), style);
                }
            },
        }
    }
    styles
}
