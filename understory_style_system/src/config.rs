// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading themes from JSON configuration.
//!
//! ```json
//! {
//!   "breakpoints": { "xs": 0, "md": 768, "lg": 992 },
//!   "scales": {
//!     "colors": { "primary": "#0078D4" },
//!     "space": [0, "4px", "8px"]
//!   }
//! }
//! ```
//!
//! Breakpoints keep their declaration order and must be strictly
//! ascending. A scale is either an object or an array; array entries are
//! named by their index, so `"space": [0, "4px"]` maps `1` to `"4px"`.
//! Scale entries must be strings, numbers or booleans.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::Deserialize;
use thiserror::Error;

use crate::theme::{ThemeBuilder, VariantTable};
use crate::value::{OrderedMap, Value};

/// Errors produced while loading a theme configuration.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("invalid theme configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A scale entry is an object, array or null.
    #[error("scale `{scale}` entry `{key}` must be a string, number or boolean")]
    UnsupportedScaleValue {
        /// The scale name.
        scale: String,
        /// The entry name.
        key: String,
    },
    /// A breakpoint is not above the one declared before it.
    #[error("breakpoint `{name}` ({min_width}px) must be above the previous breakpoint")]
    UnorderedBreakpoints {
        /// The offending breakpoint.
        name: String,
        /// Its declared minimum width.
        min_width: u32,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThemeConfig {
    breakpoints: OrderedMap<String, u32>,
    scales: OrderedMap<String, ScaleConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScaleConfig {
    Table(OrderedMap<String, serde_json::Value>),
    List(Vec<serde_json::Value>),
}

impl ScaleConfig {
    fn into_entries(self) -> Vec<(String, serde_json::Value)> {
        match self {
            Self::Table(entries) => entries.into_iter().collect(),
            Self::List(values) => values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
        }
    }
}

impl ThemeBuilder {
    /// Creates a builder from a JSON theme configuration.
    ///
    /// The returned builder can be extended further, e.g. with
    /// transformers, before building.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] if the document cannot be parsed, a scale
    /// entry is not a scalar, or breakpoints are not strictly ascending.
    ///
    /// # Example
    ///
    /// ```rust
    /// use understory_style_system::{ThemeBuilder, Value};
    ///
    /// let theme = ThemeBuilder::from_json(
    ///     r#"{ "breakpoints": { "xs": 0, "md": 768 }, "scales": { "space": { "1": "4px" } } }"#,
    /// )?
    /// .build();
    ///
    /// assert_eq!(theme.breakpoints().len(), 2);
    /// assert_eq!(theme.scale("space").and_then(|s| s.get("1")), Some(&Value::from("4px")));
    /// # Ok::<(), understory_style_system::ThemeError>(())
    /// ```
    pub fn from_json(source: &str) -> Result<Self, ThemeError> {
        let config: ThemeConfig = serde_json::from_str(source)?;

        let mut builder = Self::new();
        let mut previous: Option<u32> = None;
        for (name, min_width) in config.breakpoints {
            if previous.is_some_and(|previous| min_width <= previous) {
                return Err(ThemeError::UnorderedBreakpoints { name, min_width });
            }
            previous = Some(min_width);
            builder = builder.breakpoint(name, min_width);
        }

        let scale_count = config.scales.len();
        for (scale, entries) in config.scales {
            let mut table = VariantTable::new();
            for (key, value) in entries.into_entries() {
                let Some(value) = scalar(&value) else {
                    return Err(ThemeError::UnsupportedScaleValue { scale, key });
                };
                table = table.with(key, value);
            }
            builder = builder.scale(scale, table);
        }

        tracing::debug!(scales = scale_count, "loaded theme configuration");
        Ok(builder)
    }
}

fn scalar(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::String(s) => Some(Value::from(s.as_str())),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Num),
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::getter::ThemeGetter;
    use crate::props::PropsBag;
    use crate::theme::Breakpoint;

    #[test]
    fn loads_breakpoints_in_order() {
        let theme = ThemeBuilder::from_json(r#"{ "breakpoints": { "base": 0, "wide": 1400 } }"#)
            .unwrap()
            .build();

        let names: Vec<_> = theme.breakpoints().iter().map(Breakpoint::name).collect();
        assert_eq!(names, ["base", "wide"]);
    }

    #[test]
    fn loads_scalar_scale_entries() {
        let theme = ThemeBuilder::from_json(
            r#"{ "scales": { "misc": { "a": "x", "b": 2, "default": true } } }"#,
        )
        .unwrap()
        .build();

        let misc = theme.scale("misc").unwrap();
        assert_eq!(misc.get("a"), Some(&Value::from("x")));
        assert_eq!(misc.get("b"), Some(&Value::from(2)));
        assert_eq!(misc.get("default"), Some(&Value::from(true)));
    }

    #[test]
    fn loads_color_values_with_hash_signs() {
        let theme = ThemeBuilder::from_json(
            r##"{ "scales": { "colors": { "primary": "#07c", "danger": "#d13438" } } }"##,
        )
        .unwrap()
        .build();

        let colors = theme.scale("colors").unwrap();
        assert_eq!(colors.get("primary"), Some(&Value::from("#07c")));
        assert_eq!(colors.get("danger"), Some(&Value::from("#d13438")));
    }

    #[test]
    fn array_scales_are_keyed_by_index() {
        let theme = ThemeBuilder::from_json(r#"{ "scales": { "space": [0, "4px", 8] } }"#)
            .unwrap()
            .build();

        let space = theme.scale("space").unwrap();
        let keys: Vec<_> = space.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["0", "1", "2"]);
        assert_eq!(space.get("2"), Some(&Value::from(8)));

        let getter = ThemeGetter::builder().key("space").build();
        let props = PropsBag::new().with_theme(theme);
        assert_eq!(getter.get(&Value::from(1), &props), Value::from("4px"));
    }

    #[test]
    fn rejects_nested_array_entries() {
        let err = ThemeBuilder::from_json(r#"{ "scales": { "space": [0, [4]] } }"#).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::UnsupportedScaleValue { ref scale, ref key } if scale == "space" && key == "1"
        ));
    }

    #[test]
    fn rejects_scalar_scales() {
        let err = ThemeBuilder::from_json(r#"{ "scales": { "space": 4 } }"#).unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let theme = ThemeBuilder::from_json("{}").unwrap().build();
        assert_eq!(theme.breakpoints().len(), 5);
    }

    #[test]
    fn rejects_nested_scale_entries() {
        let err = ThemeBuilder::from_json(
            r##"{ "scales": { "colors": { "red": { "500": "#f00" } } } }"##,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ThemeError::UnsupportedScaleValue { ref scale, ref key } if scale == "colors" && key == "red"
        ));
    }

    #[test]
    fn rejects_unordered_breakpoints() {
        let err = ThemeBuilder::from_json(r#"{ "breakpoints": { "md": 768, "sm": 576 } }"#)
            .unwrap_err();
        assert!(matches!(err, ThemeError::UnorderedBreakpoints { min_width: 576, .. }));
        assert_eq!(
            err.to_string(),
            "breakpoint `sm` (576px) must be above the previous breakpoint"
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ThemeBuilder::from_json(r#"{ "colors": {} }"#).unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
    }
}
