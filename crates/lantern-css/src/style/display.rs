//! The `display` property.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use lantern_common::warning::warn_once;
use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};

use super::values::Value;

/// The subset of `display` this engine lays out.
///
/// Inner display types (flex, grid, table) are not modelled: every box
/// establishes plain flow layout for its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    ///
    /// [§ 2](https://www.w3.org/TR/css-display-3/#the-display-properties)
    /// Initial value of `display`.
    #[default]
    Inline,
    /// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
    /// "The element and its descendants generate no boxes or text runs."
    None,
}

impl Display {
    /// Classify a specified `display` value.
    ///
    /// An absent value is `inline`. Keywords this engine does not lay out
    /// (`flex`, `inline-block`, ...) and non-keyword values fall back to
    /// `inline` with a one-time warning.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        if let Some(keyword) = value.as_keyword()
            && let Ok(display) = keyword.parse::<Self>()
        {
            return display;
        }
        warn_once("CSS", &format!("unsupported display value '{value}', using inline"));
        Self::default()
    }
}
