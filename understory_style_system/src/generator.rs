// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style generators and their composition.
//!
//! A [`StyleGenerator`] pairs a `props → style` function with the prop
//! names it reads. [`compose`] merges many generators into one that only
//! runs the generators whose props are present.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::breakpoints::theme_medias;
use crate::props::Props;
use crate::style_object::StyleObject;
use crate::theme::Theme;
use crate::value::OrderedMap;

/// A prop name as declared by a generator.
pub type PropName = Rc<str>;

type GetStyle = Box<dyn Fn(&dyn Props) -> Option<StyleObject>>;

/// A pure function from props to a style object, plus its metadata.
///
/// Generators are immutable once built and cheap to clone. Identity is by
/// reference; see [`StyleGenerator::ptr_eq`].
///
/// # Example
///
/// ```rust
/// use understory_style_system::{PropValue, PropsBag, StyleGenerator, StyleObject, compose};
///
/// let display = StyleGenerator::new(["display"], |props| match props.get("display")? {
///     PropValue::Scalar(value) => Some(StyleObject::new().with("display", value.clone())),
///     PropValue::Responsive(_) => None,
/// });
/// let combined = compose([display]);
///
/// let style = combined.get_style(&PropsBag::new().with("display", "flex")).unwrap();
/// assert_eq!(style.value("display").and_then(|v| v.as_str()), Some("flex"));
/// assert_eq!(&*combined.props()[0], "display");
/// ```
#[derive(Clone)]
pub struct StyleGenerator {
    inner: Rc<GeneratorData>,
}

struct GeneratorData {
    get_style: GetStyle,
    props: SmallVec<[PropName; 1]>,
    /// Present on compositions only; never contains a composition.
    generators: Option<Vec<StyleGenerator>>,
}

impl StyleGenerator {
    /// Creates a leaf generator reading `props`.
    ///
    /// `get_style` returns `None` when it has nothing to contribute.
    pub fn new<I, P, F>(props: I, get_style: F) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PropName>,
        F: Fn(&dyn Props) -> Option<StyleObject> + 'static,
    {
        Self {
            inner: Rc::new(GeneratorData {
                get_style: Box::new(get_style),
                props: props.into_iter().map(Into::into).collect(),
                generators: None,
            }),
        }
    }

    /// Runs the generator.
    pub fn get_style(&self, props: &dyn Props) -> Option<StyleObject> {
        (self.inner.get_style)(props)
    }

    /// The prop names this generator reads, in declaration order.
    ///
    /// For a composition this is the concatenation of its children's
    /// props and may contain duplicates.
    #[must_use]
    pub fn props(&self) -> &[PropName] {
        &self.inner.props
    }

    /// Returns `true` if this generator declares `name`.
    #[must_use]
    pub fn reads_prop(&self, name: &str) -> bool {
        self.inner.props.iter().any(|prop| &**prop == name)
    }

    /// The flattened children of a composition, or `None` for a leaf.
    #[must_use]
    pub fn generators(&self) -> Option<&[Self]> {
        self.inner.generators.as_deref()
    }

    /// Returns `true` if this generator was produced by [`compose`].
    #[must_use]
    pub fn is_composed(&self) -> bool {
        self.inner.generators.is_some()
    }

    /// Returns `true` if both handles refer to the same generator.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for StyleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleGenerator")
            .field("props", &self.inner.props)
            .field("generators", &self.inner.generators.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

/// Composes generators into one.
///
/// Compositions among the inputs contribute their children instead of
/// themselves, so the result never nests a composition. `None` inputs are
/// skipped with a warning.
///
/// Each prop name dispatches to exactly one generator: when several
/// declare the same prop, the last one wins. At run time every indexed prop
/// present on the props bag runs its generator once and the outputs are
/// deep-merged. Finally, media queries for the theme's breakpoints are moved
/// after all other keys, in breakpoint order.
///
/// The combined generator returns `None` when nothing was contributed.
pub fn compose<I, G>(generators: I) -> StyleGenerator
where
    I: IntoIterator<Item = G>,
    G: Into<Option<StyleGenerator>>,
{
    let mut flat = Vec::new();
    for generator in generators {
        let Some(generator) = generator.into() else {
            tracing::warn!("skipping undefined generator passed to `compose`");
            continue;
        };
        match generator.generators() {
            Some(children) => flat.extend_from_slice(children),
            None => flat.push(generator),
        }
    }

    let index = index_by_prop(&flat);
    let get_style = move |props: &dyn Props| {
        let mut styles = StyleObject::new();
        for (prop, generator) in &index {
            if props.get(prop).is_none() {
                continue;
            }
            if let Some(style) = generator.get_style(props) {
                styles.merge(style);
            }
        }
        (!styles.is_empty()).then(|| order_media_queries(styles, props))
    };

    StyleGenerator {
        inner: Rc::new(GeneratorData {
            get_style: Box::new(get_style),
            props: flat.iter().flat_map(|g| g.props().iter().cloned()).collect(),
            generators: Some(flat),
        }),
    }
}

/// Maps each prop to the last generator declaring it.
///
/// A replaced entry keeps the position of the first declaration.
fn index_by_prop(generators: &[StyleGenerator]) -> OrderedMap<PropName, StyleGenerator> {
    let mut index = OrderedMap::default();
    for generator in generators {
        for prop in generator.props() {
            index.insert(prop.clone(), generator.clone());
        }
    }
    index
}

/// Moves breakpoint media queries to the end, in theme breakpoint order.
fn order_media_queries(mut styles: StyleObject, props: &dyn Props) -> StyleObject {
    let medias = theme_medias(props, props.theme().map(Theme::cache));
    let blocks: Vec<_> = medias
        .queries()
        .filter_map(|media| styles.remove(media).map(|block| (media.clone(), block)))
        .collect();
    for (media, block) in blocks {
        styles.insert(media, block);
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropsBag;
    use crate::value::{PropValue, Value};

    fn leaf(prop: &'static str, declaration: &'static str) -> StyleGenerator {
        StyleGenerator::new([prop], move |props| match props.get(prop)? {
            PropValue::Scalar(value) => Some(StyleObject::new().with(declaration, value.clone())),
            PropValue::Responsive(_) => None,
        })
    }

    #[test]
    fn flattens_one_level() {
        let a = leaf("a", "a");
        let b = leaf("b", "b");
        let c = leaf("c", "c");
        let ab = compose([a.clone(), b.clone()]);
        let abc = compose([ab, c.clone()]);

        let children = abc.generators().unwrap();
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|g| !g.is_composed()));
        assert!(StyleGenerator::ptr_eq(&children[0], &a));
        assert!(StyleGenerator::ptr_eq(&children[2], &c));
        let props: Vec<&str> = abc.props().iter().map(|p| &**p).collect();
        assert_eq!(props, ["a", "b", "c"]);
    }

    #[test]
    fn props_are_concatenated_not_deduplicated() {
        let combined = compose([leaf("color", "color"), leaf("color", "fill")]);
        assert_eq!(combined.props().len(), 2);
        assert!(combined.reads_prop("color"));
        assert!(!combined.reads_prop("fill"));
    }

    #[test]
    fn last_generator_wins_prop_collision() {
        let first = compose([leaf("color", "color"), leaf("bg", "background")]);
        let second = leaf("color", "fill");
        let combined = compose([first, second]);

        let props = PropsBag::new().with("color", "red").with("bg", "blue");
        let style = combined.get_style(&props).unwrap();
        assert!(style.get("color").is_none());
        assert_eq!(style.value("fill"), Some(&Value::from("red")));
        assert_eq!(style.value("background"), Some(&Value::from("blue")));
    }

    #[test]
    fn none_generators_are_skipped() {
        let combined = compose([Some(leaf("a", "a")), None, Some(leaf("b", "b"))]);
        assert_eq!(combined.generators().map(<[_]>::len), Some(2));
    }

    #[test]
    fn absent_props_contribute_nothing() {
        let combined = compose([leaf("a", "a")]);
        assert!(combined.get_style(&PropsBag::new()).is_none());
    }

    #[test]
    fn media_queries_follow_flat_declarations() {
        let generator = StyleGenerator::new(["x"], |_| {
            Some(
                StyleObject::new()
                    .with("@media (min-width: 992px)", StyleObject::new().with("a", 1))
                    .with("color", "red")
                    .with("@media (min-width: 576px)", StyleObject::new().with("a", 2))
                    .with("&:hover", StyleObject::new().with("a", 3)),
            )
        });
        let combined = compose([generator]);

        let style = combined.get_style(&PropsBag::new().with("x", 1)).unwrap();
        assert_eq!(
            style.keys().collect::<Vec<_>>(),
            [
                "color",
                "&:hover",
                "@media (min-width: 576px)",
                "@media (min-width: 992px)"
            ]
        );
    }
}
