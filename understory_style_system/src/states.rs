// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pseudo-states that every generated prop supports.
//!
//! For a base prop `color`, the state `hover` derives the prop
//! `hoverColor`, whose declarations are wrapped in `&:hover`.

use alloc::string::String;

/// An interaction or media condition with a fixed selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PseudoState {
    name: &'static str,
    selector: &'static str,
}

impl PseudoState {
    const fn new(name: &'static str, selector: &'static str) -> Self {
        Self { name, selector }
    }

    /// The prefix used in derived prop names, e.g. `"focusWithin"`.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// The selector or media query the declarations are wrapped in.
    #[must_use]
    #[inline]
    pub const fn selector(self) -> &'static str {
        self.selector
    }

    /// Derives the state-specific prop name for a base prop.
    ///
    /// ```rust
    /// use understory_style_system::PSEUDO_STATES;
    ///
    /// let hover = PSEUDO_STATES.iter().find(|s| s.name() == "hover").unwrap();
    /// assert_eq!(hover.prop_name("color"), "hoverColor");
    /// assert_eq!(hover.selector(), "&:hover");
    /// ```
    #[must_use]
    pub fn prop_name(self, base: &str) -> String {
        let mut chars = base.chars();
        let mut name = String::with_capacity(self.name.len() + base.len());
        name.push_str(self.name);
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
        name
    }
}

/// The supported pseudo-states, in the order their generators are built.
pub const PSEUDO_STATES: [PseudoState; 15] = [
    PseudoState::new("motionSafe", "@media (prefers-reduced-motion: no-preference)"),
    PseudoState::new("motionReduce", "@media (prefers-reduced-motion: reduce)"),
    PseudoState::new("first", "&:first-child"),
    PseudoState::new("last", "&:last-child"),
    PseudoState::new("odd", "&:odd"),
    PseudoState::new("even", "&:even"),
    PseudoState::new("visited", "&:visited"),
    PseudoState::new("checked", "&:checked"),
    PseudoState::new("focusWithin", "&:focus-within"),
    PseudoState::new("hover", "&:hover"),
    PseudoState::new("focus", "&:focus"),
    PseudoState::new("focusVisible", "&:focus-visible"),
    PseudoState::new("active", "&:active"),
    PseudoState::new("disabled", "&:disabled"),
    PseudoState::new("placeholder", "&::placeholder"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prop_names_capitalize_base() {
        let focus_within = PSEUDO_STATES[8];
        assert_eq!(focus_within.prop_name("backgroundColor"), "focusWithinBackgroundColor");
        assert_eq!(focus_within.prop_name(""), "focusWithin");
    }

    #[test]
    fn state_names_are_unique() {
        for (i, a) in PSEUDO_STATES.iter().enumerate() {
            for b in &PSEUDO_STATES[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
