//! Declaration values.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Values are stored exactly as the stylesheet wrote them. Nothing is
//! validated against the property they belong to; an unsupported value for
//! a property simply resolves to that property's default during layout or
//! painting.

use std::fmt;

use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};

/// Base font size used to resolve `em` lengths.
///
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
/// Text measurement is out of scope, so every element shares the initial
/// `medium` size.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// [§ 5.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em,
}

impl Unit {
    /// Resolve a magnitude in this unit to pixels.
    #[must_use]
    pub fn to_px(self, magnitude: f32) -> f32 {
        match self {
            Self::Px => magnitude,
            Self::Em => magnitude * DEFAULT_FONT_SIZE_PX,
        }
    }
}

/// A declaration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// An identifier (`block`, `auto`, `red`) or any token the parser did
    /// not recognise, stored verbatim.
    Keyword(String),
    /// A unitless whole number.
    Integer(i32),
    /// An sRGB color with alpha.
    Color(ColorValue),
    /// A dimension.
    Length(f32, Unit),
}

impl Value {
    /// Shorthand for `Value::Length(magnitude, Unit::Px)`.
    #[must_use]
    pub const fn px(magnitude: f32) -> Self {
        Self::Length(magnitude, Unit::Px)
    }

    /// Shorthand for `Value::Keyword(..)`.
    #[must_use]
    pub fn keyword(word: impl Into<String>) -> Self {
        Self::Keyword(word.into())
    }

    /// The keyword text, if this is a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(word) => Some(word),
            _ => None,
        }
    }

    /// [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    /// True for the `auto` keyword.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.as_keyword() == Some("auto")
    }

    /// True if this value carries a definite length (a dimension or a
    /// unitless integer, which is treated as pixels).
    #[must_use]
    pub const fn is_length(&self) -> bool {
        matches!(self, Self::Length(..) | Self::Integer(_))
    }

    /// Resolve to pixels. Anything that is not a length resolves to 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_px(&self) -> f32 {
        match self {
            Self::Length(magnitude, unit) => unit.to_px(*magnitude),
            Self::Integer(n) => *n as f32,
            Self::Keyword(_) | Self::Color(_) => 0.0,
        }
    }

    /// Resolve to a color: color values directly, keywords through the
    /// named color table.
    #[must_use]
    pub fn to_color(&self) -> Option<ColorValue> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Keyword(word) => ColorValue::from_named(word),
            Self::Integer(_) | Self::Length(..) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(word) => f.write_str(word),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::Length(magnitude, unit) => write!(f, "{magnitude}{}", unit.as_ref()),
        }
    }
}

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Mid gray (#646464), painted for boxes without a `background`.
    pub const MID_GRAY: Self = Self::rgb(100, 100, 100);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        // [§ 4.2.1]
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The basic color keywords plus `orange` and `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "silver" => Self::rgb(192, 192, 192),
            "maroon" => Self::rgb(128, 0, 0),
            "purple" => Self::rgb(128, 0, 128),
            "fuchsia" => Self::rgb(255, 0, 255),
            "lime" => Self::rgb(0, 255, 0),
            "olive" => Self::rgb(128, 128, 0),
            "navy" => Self::rgb(0, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "aqua" => Self::rgb(0, 255, 255),
            "orange" => Self::rgb(255, 165, 0),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}
