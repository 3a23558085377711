// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building generators for themed props.
//!
//! This module provides [`style`], which turns a [`StyleOptions`]
//! description into a [`StyleGenerator`] with built-in pseudo-state props.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use smallvec::{SmallVec, smallvec};

use crate::breakpoints::reduce_breakpoints;
use crate::cache::ThemeCache;
use crate::generator::{PropName, StyleGenerator, compose};
use crate::getter::{ThemeGetter, Transform, TransformCx};
use crate::props::Props;
use crate::states::PSEUDO_STATES;
use crate::style_object::{StyleObject, StyleValue};
use crate::theme::Theme;
use crate::value::{PropValue, Value};

/// Describes a themed prop for [`style`].
///
/// Built styles are cached on the theme under the prop name, so two
/// options for the same prop must agree on their output; see
/// [`ThemeCache`].
///
/// # Example
///
/// ```rust
/// use understory_style_system::{PropsBag, StyleOptions, ThemeBuilder, Value, VariantTable};
///
/// let color = StyleOptions::new("color").key("colors").build();
///
/// let theme = ThemeBuilder::new()
///     .scale("colors", VariantTable::new().with("primary", "#07c"))
///     .build();
/// let props = PropsBag::new()
///     .with_theme(theme)
///     .with("color", "primary")
///     .with("hoverColor", "red");
///
/// let style = color.get_style(&props).unwrap();
/// assert_eq!(style.value("color"), Some(&Value::from("#07c")));
/// let hover = style.nested("&:hover").unwrap();
/// assert_eq!(hover.value("color"), Some(&Value::from("red")));
/// ```
#[derive(Clone, Default)]
pub struct StyleOptions {
    props: SmallVec<[PropName; 1]>,
    css_properties: Option<SmallVec<[PropName; 1]>>,
    key: Option<Rc<str>>,
    transform: Option<Transform>,
    theme_get: Option<ThemeGetter>,
}

impl StyleOptions {
    /// Describes a single prop. Its declaration defaults to the prop name.
    #[must_use]
    pub fn new(prop: impl Into<PropName>) -> Self {
        Self {
            props: smallvec![prop.into()],
            ..Self::default()
        }
    }

    /// Describes several props writing the same declarations, e.g. `m` and
    /// `margin`.
    ///
    /// Without explicit CSS properties, every prop writes all prop names.
    #[must_use]
    pub fn props<I, P>(props: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropName>,
    {
        Self {
            props: props.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Writes to a single CSS property instead of the prop name.
    #[must_use]
    pub fn css_property(mut self, property: impl Into<PropName>) -> Self {
        self.css_properties = Some(smallvec![property.into()]);
        self
    }

    /// Writes to several CSS properties, e.g. `marginLeft` and `marginRight`.
    #[must_use]
    pub fn css_properties<I, P>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropName>,
    {
        self.css_properties = Some(properties.into_iter().map(Into::into).collect());
        self
    }

    /// Resolves values against the named theme scale.
    #[must_use]
    pub fn key(mut self, key: impl Into<Rc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Applies a transform to every resolved value.
    #[must_use]
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value, &TransformCx<'_>) -> Value + 'static,
    {
        self.transform = Some(Rc::new(transform));
        self
    }

    /// Uses a ready-made getter; `key` and `transform` are then ignored.
    #[must_use]
    pub fn theme_get(mut self, getter: ThemeGetter) -> Self {
        self.theme_get = Some(getter);
        self
    }

    /// Shorthand for [`style`].
    #[must_use]
    pub fn build(self) -> StyleGenerator {
        style(self)
    }
}

impl fmt::Debug for StyleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleOptions")
            .field("props", &self.props)
            .field("css_properties", &self.css_properties)
            .field("key", &self.key)
            .field("has_transform", &self.transform.is_some())
            .field("theme_get", &self.theme_get)
            .finish()
    }
}

/// Builds a generator for a themed prop.
///
/// For a single prop, one generator is built per entry of
/// [`PSEUDO_STATES`](crate::PSEUDO_STATES) (reading e.g. `hoverColor` and
/// wrapping its output in `&:hover`), followed by one for the prop itself;
/// all are composed. For several props, each prop is built this way and the
/// results are composed.
#[must_use]
pub fn style(options: StyleOptions) -> StyleGenerator {
    let css_properties: Rc<[PropName]> = match &options.css_properties {
        Some(properties) => properties.iter().cloned().collect(),
        None => options.props.iter().cloned().collect(),
    };
    if let [prop] = options.props.as_slice() {
        return style_prop(prop, css_properties, &options);
    }
    compose(
        options
            .props
            .iter()
            .map(|prop| style_prop(prop, css_properties.clone(), &options)),
    )
}

fn style_prop(
    prop: &PropName,
    css_properties: Rc<[PropName]>,
    options: &StyleOptions,
) -> StyleGenerator {
    let theme_get = options.theme_get.clone().unwrap_or_else(|| {
        let mut builder = ThemeGetter::builder();
        if let Some(key) = &options.key {
            builder = builder.key(key.clone());
        }
        if let Some(transform) = &options.transform {
            builder = builder.shared_transform(transform.clone());
        }
        builder.build()
    });

    let mut generators: Vec<StyleGenerator> = PSEUDO_STATES
        .iter()
        .map(|state| {
            let state_prop: PropName = state.prop_name(prop).into();
            let get_style =
                style_factory(state_prop.clone(), css_properties.clone(), theme_get.clone());
            let selector = state.selector();
            StyleGenerator::new([state_prop], move |props| {
                let style = get_style(props)?;
                Some(StyleObject::new().with(selector, style))
            })
        })
        .collect();
    generators.push(StyleGenerator::new(
        [prop.clone()],
        style_factory(prop.clone(), css_properties, theme_get),
    ));
    compose(generators)
}

/// Builds the per-prop style function.
///
/// Styles are cached per theme and prop, keyed by the raw value alone, so
/// two breakpoints holding the same raw value share one entry.
fn style_factory(
    prop: PropName,
    css_properties: Rc<[PropName]>,
    theme_get: ThemeGetter,
) -> impl Fn(&dyn Props) -> Option<StyleObject> + 'static {
    move |props: &dyn Props| {
        let cache = props.theme().map(Theme::cache);
        let from_value = |raw: &Value| {
            style_from_value(&prop, &css_properties, raw, props, &theme_get, cache)
        };
        match props.get(&prop)? {
            PropValue::Scalar(raw) => from_value(raw),
            PropValue::Responsive(values) => {
                let styles = reduce_breakpoints(props, values, from_value, cache);
                (!styles.is_empty()).then_some(styles)
            }
        }
    }
}

fn style_from_value(
    prop: &PropName,
    css_properties: &[PropName],
    raw: &Value,
    props: &dyn Props,
    theme_get: &ThemeGetter,
    cache: Option<&ThemeCache>,
) -> Option<StyleObject> {
    if let Some(hit) = cache.and_then(|cache| cache.style(prop, raw)) {
        return Some(hit);
    }
    let value = theme_get.get(raw, props);
    if matches!(value, Value::Bool(_)) {
        return None;
    }
    let style: StyleObject = css_properties
        .iter()
        .map(|property| (property.clone(), StyleValue::Value(value.clone())))
        .collect();
    if let Some(cache) = cache {
        cache.store_style(prop, raw.clone(), style.clone());
    }
    Some(style)
}
