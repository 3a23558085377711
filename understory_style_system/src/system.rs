// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An extensible set of generators handed to a component factory.

use core::iter;

use crate::generator::{PropName, StyleGenerator, compose};
use crate::props::Props;
use crate::style_object::StyleObject;

/// Wraps the generator a component binding layer resolves with.
///
/// [`StyleSystem::extend`] composes additional generators into a new
/// system; the original keeps its generator.
///
/// # Example
///
/// ```rust
/// use understory_style_system::{PropsBag, StyleOptions, StyleSystem};
///
/// let base = StyleSystem::new(StyleOptions::new("color").build());
/// let extended = base.extend([StyleOptions::new("opacity").build()]);
///
/// assert!(!base.reads_prop("opacity"));
/// assert!(extended.reads_prop("opacity"));
/// assert!(extended.reads_prop("hoverColor"));
///
/// let props = PropsBag::new().with("opacity", 0.5);
/// assert!(extended.get_style(&props).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct StyleSystem {
    generator: StyleGenerator,
}

impl StyleSystem {
    /// Wraps a generator.
    #[must_use]
    pub fn new(generator: StyleGenerator) -> Self {
        Self { generator }
    }

    /// The current generator.
    #[must_use]
    #[inline]
    pub fn generator(&self) -> &StyleGenerator {
        &self.generator
    }

    /// Returns a new system composing the current generator with
    /// `generators`.
    #[must_use]
    pub fn extend<I, G>(&self, generators: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Option<StyleGenerator>>,
    {
        let current = iter::once(Some(self.generator.clone()));
        Self::new(compose(current.chain(generators.into_iter().map(Into::into))))
    }

    /// The prop names the binding layer should treat as style props.
    #[must_use]
    pub fn props(&self) -> &[PropName] {
        self.generator.props()
    }

    /// Returns `true` if `name` is consumed by this system.
    #[must_use]
    pub fn reads_prop(&self, name: &str) -> bool {
        self.generator.reads_prop(name)
    }

    /// Resolves the style for one render.
    pub fn get_style(&self, props: &dyn Props) -> Option<StyleObject> {
        self.generator.get_style(props)
    }
}

impl From<StyleGenerator> for StyleSystem {
    fn from(generator: StyleGenerator) -> Self {
        Self::new(generator)
    }
}
