// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme-scoped memoization.
//!
//! Every [`Theme`](crate::Theme) owns exactly one [`ThemeCache`]. Because the
//! cache lives inside the theme's shared data, it is keyed by theme
//! identity and dropped together with the last clone of the theme. Two
//! themes built separately never share entries, even when their tables
//! are identical.
//!
//! Borrows of the internal maps are never held while resolving, so a
//! resolver may re-enter the cache (for example through a composed
//! getter).

use alloc::rc::Rc;
use core::cell::{Cell, OnceCell, RefCell};
use core::fmt;

use hashbrown::HashMap;

use crate::breakpoints::Medias;
use crate::getter::GetterId;
use crate::style_object::StyleObject;
use crate::value::Value;

/// Hit and miss counters for a [`ThemeCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to be computed.
    pub misses: u64,
}

/// Per-theme storage for resolved values and built styles.
///
/// Namespaces are partitioned by prop name (raw value → style object) and
/// by getter (raw value → resolved value). The breakpoint media table is
/// stored once, since it is identical for every prop on a theme.
///
/// Style namespaces are keyed by prop name alone. Generators that declare
/// the same prop but write different CSS properties, or resolve against
/// different scales, read each other's entries when they render against
/// one theme. Give such generators distinct prop names, or render them
/// against separate themes.
#[derive(Default)]
pub struct ThemeCache {
    styles: RefCell<HashMap<Rc<str>, HashMap<Value, StyleObject>>>,
    values: RefCell<HashMap<GetterId, HashMap<Value, Value>>>,
    medias: OnceCell<Rc<Medias>>,
    stats: Cell<CacheStats>,
}

impl ThemeCache {
    /// Returns the hit and miss counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    /// Returns the number of cached styles for a prop.
    #[must_use]
    pub fn style_entries(&self, prop: &str) -> usize {
        self.styles.borrow().get(prop).map_or(0, HashMap::len)
    }

    /// Returns the number of cached values across all getters.
    #[must_use]
    pub fn value_entries(&self) -> usize {
        self.values.borrow().values().map(HashMap::len).sum()
    }

    pub(crate) fn style(&self, prop: &str, raw: &Value) -> Option<StyleObject> {
        let hit = self
            .styles
            .borrow()
            .get(prop)
            .and_then(|namespace| namespace.get(raw))
            .cloned();
        self.record(hit.is_some());
        hit
    }

    pub(crate) fn store_style(&self, prop: &Rc<str>, raw: Value, style: StyleObject) {
        self.styles
            .borrow_mut()
            .entry(prop.clone())
            .or_default()
            .insert(raw, style);
    }

    pub(crate) fn value(&self, getter: GetterId, raw: &Value) -> Option<Value> {
        let hit = self
            .values
            .borrow()
            .get(&getter)
            .and_then(|namespace| namespace.get(raw))
            .cloned();
        self.record(hit.is_some());
        hit
    }

    pub(crate) fn store_value(&self, getter: GetterId, raw: Value, value: Value) {
        self.values
            .borrow_mut()
            .entry(getter)
            .or_default()
            .insert(raw, value);
    }

    pub(crate) fn medias(&self, init: impl FnOnce() -> Medias) -> Rc<Medias> {
        self.medias.get_or_init(|| Rc::new(init())).clone()
    }

    fn record(&self, hit: bool) {
        let mut stats = self.stats.get();
        if hit {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        self.stats.set(stats);
    }
}

impl fmt::Debug for ThemeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeCache")
            .field("style_namespaces", &self.styles.borrow().len())
            .field("value_namespaces", &self.values.borrow().len())
            .field("stats", &self.stats.get())
            .finish_non_exhaustive()
    }
}
