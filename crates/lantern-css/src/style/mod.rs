//! Specified values and the properties layout reads from them.

/// The `display` property.
pub mod display;
/// Declaration values, units and colors.
pub mod values;

pub use display::Display;
pub use values::{ColorValue, DEFAULT_FONT_SIZE_PX, Unit, Value};
