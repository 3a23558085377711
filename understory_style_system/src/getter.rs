// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme getters: resolve one raw value against the theme.
//!
//! A [`ThemeGetter`] turns a raw prop value such as `"primary"` into a final
//! value such as `"#0078D4"`. Resolution proceeds as follows:
//!
//! 1. The per-theme cache is consulted, keyed by getter and raw value.
//! 2. The variant table is the theme scale named by the getter's key,
//!    falling back to the getter's default variants.
//! 3. The raw value is looked up by name (`true` is `"default"`); a miss
//!    passes the raw value through.
//! 4. A theme transformer named like the getter, or else the getter's own
//!    transform, is applied.
//! 5. A composed getter, if any, resolves the result further.
//!
//! In shorthand mode a string is split on whitespace, each token goes
//! through steps 2–5 independently and the results are joined by a single
//! space. The final value is always cached under the exact raw value.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::props::Props;
use crate::theme::{Theme, VariantTable};
use crate::value::Value;

/// A value transform: `(resolved, context) -> final`.
pub type Transform = Rc<dyn Fn(Value, &TransformCx<'_>) -> Value>;

/// Context handed to a [`Transform`].
pub struct TransformCx<'a> {
    /// The raw value before the variant lookup.
    pub raw: &'a Value,
    /// The variant table that was consulted, if any.
    pub variants: Option<&'a VariantTable>,
    /// The props being resolved.
    pub props: &'a dyn Props,
}

impl fmt::Debug for TransformCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformCx")
            .field("raw", &self.raw)
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}

/// Process-unique identity of a getter, used as its cache namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct GetterId(u32);

impl GetterId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Resolves raw values against a theme scale.
///
/// Getters are immutable and cheap to clone; clones share one cache
/// namespace.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{PropsBag, ThemeBuilder, ThemeGetter, Value, VariantTable};
///
/// let theme = ThemeBuilder::new()
///     .scale("space", VariantTable::new().with("sm", "4px").with("lg", "8px"))
///     .build();
/// let props = PropsBag::new().with_theme(theme);
///
/// let space = ThemeGetter::builder().key("space").shorthand(true).build();
/// assert_eq!(space.get(&Value::from("sm lg"), &props), Value::from("4px 8px"));
/// assert_eq!(space.get(&Value::from("2rem"), &props), Value::from("2rem"));
/// ```
#[derive(Clone)]
pub struct ThemeGetter {
    inner: Rc<ThemeGetterData>,
}

struct ThemeGetterData {
    id: GetterId,
    name: Option<Rc<str>>,
    key: Option<Rc<str>>,
    transform: Option<Transform>,
    default_variants: Option<VariantTable>,
    compose: Option<ThemeGetter>,
    shorthand: bool,
}

impl ThemeGetter {
    /// Starts building a getter.
    #[must_use]
    pub fn builder() -> ThemeGetterBuilder {
        ThemeGetterBuilder::default()
    }

    /// The getter's name, used to find a theme transformer.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// The theme scale this getter reads.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.inner.key.as_deref()
    }

    /// Returns `true` if string values are split into tokens.
    #[must_use]
    pub fn is_shorthand(&self) -> bool {
        self.inner.shorthand
    }

    /// Resolves a raw value for the given props.
    ///
    /// `false` is returned unchanged and never cached.
    pub fn get(&self, raw: &Value, props: &dyn Props) -> Value {
        if !raw.is_candidate() {
            return raw.clone();
        }
        let cache = props.theme().map(Theme::cache);
        if let Some(hit) = cache.and_then(|cache| cache.value(self.inner.id, raw)) {
            return hit;
        }

        let resolved = match raw {
            Value::Str(s) if self.inner.shorthand => {
                let tokens: Vec<String> = s
                    .split_whitespace()
                    .map(|token| self.resolve(&Value::from(token), props).to_string())
                    .collect();
                Value::from(tokens.join(" "))
            }
            _ => self.resolve(raw, props),
        };

        if let Some(cache) = cache {
            cache.store_value(self.inner.id, raw.clone(), resolved.clone());
        }
        resolved
    }

    fn resolve(&self, raw: &Value, props: &dyn Props) -> Value {
        let theme = props.theme();
        let variants = self
            .inner
            .key
            .as_deref()
            .and_then(|key| theme.and_then(|theme| theme.scale(key)))
            .or(self.inner.default_variants.as_ref());

        let mut value = variants
            .and_then(|table| table.get(&raw.variant_key()))
            .cloned()
            .unwrap_or_else(|| raw.clone());

        let transform = self
            .inner
            .name
            .as_deref()
            .and_then(|name| theme.and_then(|theme| theme.transformer(name)))
            .or(self.inner.transform.as_ref());
        if let Some(transform) = transform {
            let cx = TransformCx {
                raw,
                variants,
                props,
            };
            value = transform(value, &cx);
        }

        match &self.inner.compose {
            Some(nested) => nested.get(&value, props),
            None => value,
        }
    }
}

impl fmt::Debug for ThemeGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeGetter")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("key", &self.inner.key)
            .field("has_transform", &self.inner.transform.is_some())
            .field("default_variants", &self.inner.default_variants)
            .field("compose", &self.inner.compose)
            .field("shorthand", &self.inner.shorthand)
            .finish()
    }
}

/// Builder for [`ThemeGetter`].
#[derive(Default)]
pub struct ThemeGetterBuilder {
    name: Option<Rc<str>>,
    key: Option<Rc<str>>,
    transform: Option<Transform>,
    default_variants: Option<VariantTable>,
    compose: Option<ThemeGetter>,
    shorthand: bool,
}

impl ThemeGetterBuilder {
    /// Names the getter so a theme can override its transform.
    #[must_use]
    pub fn name(mut self, name: impl Into<Rc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the theme scale to read.
    #[must_use]
    pub fn key(mut self, key: impl Into<Rc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the default transform.
    #[must_use]
    pub fn transform<F>(self, transform: F) -> Self
    where
        F: Fn(Value, &TransformCx<'_>) -> Value + 'static,
    {
        self.shared_transform(Rc::new(transform))
    }

    /// Sets the default transform from an existing shared [`Transform`].
    #[must_use]
    pub fn shared_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Sets the table used when the theme lacks the keyed scale.
    #[must_use]
    pub fn default_variants(mut self, variants: VariantTable) -> Self {
        self.default_variants = Some(variants);
        self
    }

    /// Feeds every result through another getter.
    #[must_use]
    pub fn compose(mut self, getter: ThemeGetter) -> Self {
        self.compose = Some(getter);
        self
    }

    /// Enables splitting string values on whitespace.
    #[must_use]
    pub fn shorthand(mut self, shorthand: bool) -> Self {
        self.shorthand = shorthand;
        self
    }

    /// Builds the getter, assigning it a fresh cache namespace.
    #[must_use]
    pub fn build(self) -> ThemeGetter {
        ThemeGetter {
            inner: Rc::new(ThemeGetterData {
                id: GetterId::next(),
                name: self.name,
                key: self.key,
                transform: self.transform,
                default_variants: self.default_variants,
                compose: self.compose,
                shorthand: self.shorthand,
            }),
        }
    }
}

impl fmt::Debug for ThemeGetterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeGetterBuilder")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("has_transform", &self.transform.is_some())
            .field("default_variants", &self.default_variants)
            .field("compose", &self.compose)
            .field("shorthand", &self.shorthand)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use crate::cache::CacheStats;
    use crate::props::PropsBag;
    use crate::theme::ThemeBuilder;

    fn space_theme() -> Theme {
        ThemeBuilder::new()
            .scale("space", VariantTable::new().with("sm", "4px").with("lg", "8px"))
            .build()
    }

    #[test]
    fn looks_up_scale_and_caches() {
        let theme = space_theme();
        let props = PropsBag::new().with_theme(theme.clone());
        let getter = ThemeGetter::builder().key("space").build();

        assert_eq!(getter.get(&Value::from("sm"), &props), Value::from("4px"));
        assert_eq!(theme.cache_stats().hits, 0);
        assert_eq!(getter.get(&Value::from("sm"), &props), Value::from("4px"));
        assert_eq!(theme.cache_stats().hits, 1);
    }

    #[test]
    fn unmapped_value_passes_through_and_is_cached() {
        let theme = space_theme();
        let props = PropsBag::new().with_theme(theme.clone());
        let getter = ThemeGetter::builder().key("space").build();

        assert_eq!(getter.get(&Value::from("3px"), &props), Value::from("3px"));
        assert_eq!(theme.cache().value_entries(), 1);
    }

    #[test]
    fn false_is_returned_untouched() {
        let theme = space_theme();
        let props = PropsBag::new().with_theme(theme.clone());
        let getter = ThemeGetter::builder().key("space").build();

        assert_eq!(getter.get(&Value::from(false), &props), Value::from(false));
        assert_eq!(theme.cache_stats(), CacheStats::default());
    }

    #[test]
    fn true_resolves_default_variant() {
        let getter = ThemeGetter::builder()
            .key("shadows")
            .default_variants(VariantTable::new().with("default", "0 1px 2px black"))
            .build();
        let props = PropsBag::new().with_theme(space_theme());

        assert_eq!(
            getter.get(&Value::from(true), &props),
            Value::from("0 1px 2px black")
        );
    }

    #[test]
    fn theme_scale_wins_over_default_variants() {
        let getter = ThemeGetter::builder()
            .key("space")
            .default_variants(VariantTable::new().with("sm", "2px"))
            .build();
        let props = PropsBag::new().with_theme(space_theme());

        assert_eq!(getter.get(&Value::from("sm"), &props), Value::from("4px"));
    }

    #[test]
    fn theme_transformer_overrides_default_transform() {
        let getter = ThemeGetter::builder()
            .name("px")
            .transform(|value, _| Value::from(format!("{value}px")))
            .build();

        let plain = PropsBag::new().with_theme(ThemeBuilder::new().build());
        assert_eq!(getter.get(&Value::from(2), &plain), Value::from("2px"));

        let themed = PropsBag::new().with_theme(
            ThemeBuilder::new()
                .transformer("px", |value, _| Value::from(format!("{value}rem")))
                .build(),
        );
        assert_eq!(getter.get(&Value::from(2), &themed), Value::from("2rem"));
    }

    #[test]
    fn transform_sees_raw_value_and_variants() {
        let getter = ThemeGetter::builder()
            .key("space")
            .transform(|value, cx| {
                assert_eq!(cx.raw, &Value::from("lg"));
                assert_eq!(cx.variants.map(VariantTable::len), Some(2));
                value
            })
            .build();
        let props = PropsBag::new().with_theme(space_theme());

        assert_eq!(getter.get(&Value::from("lg"), &props), Value::from("8px"));
    }

    #[test]
    fn composed_getter_resolves_further() {
        let theme = ThemeBuilder::new()
            .scale("colors", VariantTable::new().with("primary", "#07c"))
            .scale("borderColors", VariantTable::new().with("accent", "primary"))
            .build();
        let color = ThemeGetter::builder().key("colors").build();
        let border_color = ThemeGetter::builder()
            .key("borderColors")
            .compose(color)
            .build();
        let props = PropsBag::new().with_theme(theme);

        assert_eq!(
            border_color.get(&Value::from("accent"), &props),
            Value::from("#07c")
        );
    }

    #[test]
    fn resolves_without_theme_uncached() {
        let getter = ThemeGetter::builder()
            .default_variants(VariantTable::new().with("sm", "4px"))
            .shorthand(true)
            .build();
        let props = PropsBag::new();

        assert_eq!(getter.get(&Value::from("sm  sm"), &props), Value::from("4px 4px"));
        assert_eq!(getter.get(&Value::from("sm"), &props), Value::from("4px"));
    }

    #[test]
    fn numeric_values_look_up_by_text() {
        let getter = ThemeGetter::builder()
            .default_variants(VariantTable::new().with("2", "8px"))
            .build();
        let props = PropsBag::new();

        assert_eq!(getter.get(&Value::from(2), &props), Value::from("8px"));
    }
}
