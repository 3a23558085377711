// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Style System: themed, responsive style generators.
//!
//! This crate turns declarative props on a component (`color="primary"`,
//! `padding={{ xs: 1, md: 2 }}`, `hoverColor="red"`) into a style object of
//! CSS declarations, media-query blocks and pseudo-selector blocks. It does
//! not render anything or decide which props a host element accepts; a
//! binding layer consumes the generators' prop names and style output.
//!
//! ## Core Concepts
//!
//! ### Themes
//!
//! A [`Theme`] supplies ordered [`Breakpoint`]s, named scale tables
//! ([`VariantTable`]) and named transforms. Each theme owns a
//! [`ThemeCache`], so resolution results are memoized per theme instance
//! and dropped with it.
//!
//! ### Getters
//!
//! A [`ThemeGetter`] resolves one raw value against a scale, with optional
//! shorthand splitting, transforms and delegation to another getter.
//!
//! ### Generators
//!
//! A [`StyleGenerator`] is a `props → style` function tagged with the prop
//! names it reads. [`style`] builds one for a themed prop, including a
//! derived prop for every [pseudo-state](PSEUDO_STATES); [`compose`] merges
//! many into one, dispatching each prop to a single generator and ordering
//! media queries by breakpoint.
//!
//! ```rust
//! use understory_style_system::{
//!     PropsBag, ResponsiveValue, StyleOptions, StyleSystem, ThemeBuilder, Value, VariantTable,
//!     compose,
//! };
//!
//! let theme = ThemeBuilder::new()
//!     .breakpoint("xs", 0)
//!     .breakpoint("md", 768)
//!     .scale("colors", VariantTable::new().with("primary", "#0078D4"))
//!     .scale("space", VariantTable::new().with("1", "4px").with("2", "8px"))
//!     .build();
//!
//! let system = StyleSystem::new(compose([
//!     StyleOptions::new("color").key("colors").build(),
//!     StyleOptions::new("padding").key("space").build(),
//! ]));
//!
//! let props = PropsBag::new()
//!     .with_theme(theme.clone())
//!     .with("color", "primary")
//!     .with("hoverColor", "red")
//!     .with("padding", ResponsiveValue::new().at("md", 2).at("xs", 1));
//!
//! let style = system.get_style(&props).unwrap();
//! assert_eq!(style.value("color"), Some(&Value::from("#0078D4")));
//! assert_eq!(style.value("padding"), Some(&Value::from("4px")));
//! assert_eq!(
//!     style.nested("&:hover").and_then(|s| s.value("color")),
//!     Some(&Value::from("red"))
//! );
//! let md = style.nested("@media (min-width: 768px)").unwrap();
//! assert_eq!(md.value("padding"), Some(&Value::from("8px")));
//! assert_eq!(style.keys().last(), Some("@media (min-width: 768px)"));
//!
//! // A second render with the same theme is served from its cache.
//! let hits = theme.cache_stats().hits;
//! system.get_style(&props);
//! assert!(theme.cache_stats().hits > hits);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `json` (default, implies `std`): [`ThemeBuilder::from_json`] and
//!   `ThemeError`.
//!
//! ## Threading
//!
//! Themes, getters and generators are reference counted with `Rc` and are
//! meant to be used from one thread.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Only the `json` feature needs
//! `std`.

#![no_std]

extern crate alloc;

mod breakpoints;
mod cache;
#[cfg(feature = "json")]
mod config;
mod generator;
mod getter;
mod props;
mod states;
mod style;
mod style_object;
mod system;
mod theme;
mod value;

pub use breakpoints::reduce_breakpoints;
pub use cache::{CacheStats, ThemeCache};
#[cfg(feature = "json")]
pub use config::ThemeError;
pub use generator::{PropName, StyleGenerator, compose};
pub use getter::{ThemeGetter, ThemeGetterBuilder, Transform, TransformCx};
pub use props::{Props, PropsBag};
pub use states::{PSEUDO_STATES, PseudoState};
pub use style::{StyleOptions, style};
pub use style_object::{StyleObject, StyleValue};
pub use system::StyleSystem;
pub use theme::{Breakpoint, DEFAULT_BREAKPOINTS, Theme, ThemeBuilder, VariantTable};
pub use value::{PropValue, ResponsiveValue, Value};
