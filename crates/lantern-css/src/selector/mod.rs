//! Selector model, matching and specificity.
//!
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
//!
//! Only compound selectors are supported: an optional type name, an optional
//! id and any number of classes (`div#main.note`). There are no combinators,
//! attribute selectors or pseudo-classes.

use std::fmt;

use lantern_dom::ElementData;
use serde::Serialize;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// A compound selector.
///
/// Class names keep their source order so that printing a selector is
/// deterministic; matching treats them as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    pub tag_name: Option<String>,
    /// [§ 6.7 ID selectors](https://www.w3.org/TR/selectors-4/#id-selectors)
    pub id: Option<String>,
    /// [§ 6.6 Class selectors](https://www.w3.org/TR/selectors-4/#class-html)
    pub classes: Vec<String>,
}

impl Selector {
    /// A selector with no parts. Written `*`; matches every element.
    #[must_use]
    pub fn universal() -> Self {
        Self::default()
    }

    /// True if the selector has no type name, id or classes.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.tag_name.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    /// [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// The C component counts the presence of a type name, never its length.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let a = u32::from(self.id.is_some());
        let b = u32::try_from(self.classes.len()).unwrap_or(u32::MAX);
        let c = u32::from(self.tag_name.is_some());
        Specificity(a, b, c)
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// A selector matches when every part it names matches:
    /// - the type name equals the element's tag name,
    /// - the id equals the element's `id` attribute (absent never matches),
    /// - at least one of its classes appears in the element's `class` list.
    ///
    /// The class test is deliberately "any overlap" rather than "all classes".
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag_name) = &self.tag_name
            && *tag_name != element.tag_name
        {
            return false;
        }

        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }

        if !self.classes.is_empty() {
            let element_classes = element.classes();
            if !self
                .classes
                .iter()
                .any(|class| element_classes.contains(class.as_str()))
            {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            return f.write_str("*");
        }
        if let Some(tag_name) = &self.tag_name {
            f.write_str(tag_name)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
