//! Used-value helpers for layout.
//!
//! [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)

use crate::cascade::{PropertyMap, lookup};
use crate::style::Value;

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// "Some properties can take the keyword 'auto' as a value. This keyword
/// allows the user agent to compute the value based on other properties."
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoOr {
    /// The value is 'auto' and must be resolved during layout.
    #[default]
    Auto,
    /// The value is a specific length in pixels.
    Length(f32),
}

impl AutoOr {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Get the length value, or a default if 'auto'.
    #[must_use]
    pub const fn to_px_or(&self, default: f32) -> f32 {
        match self {
            Self::Length(v) => *v,
            Self::Auto => default,
        }
    }

    /// `auto` stays auto; everything else resolves to pixels (non-length
    /// keywords to 0).
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if value.is_auto() {
            Self::Auto
        } else {
            Self::Length(value.to_px())
        }
    }
}

/// A margin side: `margin-{side}`, then `margin`, then 0. May be auto.
pub(crate) fn margin(style: &PropertyMap, side: &str) -> AutoOr {
    lookup(style, &format!("margin-{side}"), "margin")
        .map_or(AutoOr::Length(0.0), AutoOr::from_value)
}

/// A padding side: `padding-{side}`, then `padding`, then 0.
///
/// [§ 8.4](https://www.w3.org/TR/CSS2/box.html#padding-properties)
/// "Values for padding values cannot be negative."
pub(crate) fn padding(style: &PropertyMap, side: &str) -> f32 {
    lookup(style, &format!("padding-{side}"), "padding").map_or(0.0, |v| v.to_px().max(0.0))
}

/// A border side: `border-{side}-width`, then `border-width`, then 0.
///
/// [§ 8.5.1](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
/// "Border widths cannot be negative."
pub(crate) fn border_width(style: &PropertyMap, side: &str) -> f32 {
    lookup(style, &format!("border-{side}-width"), "border-width")
        .map_or(0.0, |v| v.to_px().max(0.0))
}

/// `width` when it is a definite length; auto for `auto`, absent or any
/// other keyword (percentages and unsupported units included).
pub(crate) fn width(style: &PropertyMap) -> AutoOr {
    style
        .get("width")
        .filter(|v| v.is_length())
        .map_or(AutoOr::Auto, |v| AutoOr::Length(v.to_px()))
}

/// `height` when it is a definite length; `None` for auto, absent or any
/// other keyword.
pub(crate) fn height(style: &PropertyMap) -> Option<f32> {
    style.get("height").filter(|v| v.is_length()).map(Value::to_px)
}
