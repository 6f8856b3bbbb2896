//! Stylesheet model and parser.
//!
//! The grammar is a strict subset of CSS:
//!
//! ```text
//! stylesheet  := (ws rule)*
//! rule        := selector (',' selector)* '{' declaration* '}'
//! selector    := ('*' | tag | '#' id | '.' class)+
//! declaration := name ':' value (';' | before '}')
//! value       := number unit? | '#' hex | identifier
//! ```
//!
//! `/* ... */` comments count as whitespace. Any deviation is reported as a
//! [`StylesheetError`] carrying the byte offset where it was detected.

use lantern_common::warning::warn_once;
use lantern_dom::ElementData;
use serde::Serialize;
use thiserror::Error;

use crate::selector::{Selector, Specificity};
use crate::style::{ColorValue, Unit, Value};

/// A parsed stylesheet: rules in source order.
///
/// Source order is the cascade's final tie-breaker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stylesheet {
    /// The stylesheet's rules in document order.
    pub rules: Vec<Rule>,
}

/// [§ 9.1 Style rules](https://www.w3.org/TR/css-syntax-3/#style-rules)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rule {
    /// Selector list; the rule applies if any of them matches.
    pub selectors: Vec<Selector>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// The highest specificity among this rule's selectors that match
    /// `element`, or `None` if none match. A rule with no selectors never
    /// matches.
    #[must_use]
    pub fn matching_specificity(&self, element: &ElementData) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|selector| selector.matches(element))
            .map(Selector::specificity)
            .max()
    }
}

/// A single `name: value` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// Property name, lowercased as written.
    pub name: String,
    /// The single value.
    pub value: Value,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Malformed stylesheet text. Fatal: the parser does not attempt recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylesheetError {
    /// A specific character was required but a different one was found.
    #[error("expected '{expected}' at offset {position}, found '{found}'")]
    UnexpectedChar {
        /// The character the grammar requires here.
        expected: char,
        /// The character actually present.
        found: char,
        /// Byte offset into the input.
        position: usize,
    },

    /// Input ended in the middle of a rule.
    #[error("unexpected end of input at offset {position} while parsing {context}")]
    UnexpectedEof {
        /// What was being parsed.
        context: &'static str,
        /// Byte offset into the input.
        position: usize,
    },

    /// A rule's selector list contains an empty selector.
    #[error("expected a selector at offset {position}")]
    EmptySelector {
        /// Byte offset into the input.
        position: usize,
    },

    /// A property name or identifier was required but none was present.
    #[error("expected an identifier at offset {position}")]
    MissingName {
        /// Byte offset into the input.
        position: usize,
    },

    /// `#` was not followed by 3, 4, 6 or 8 hex digits.
    #[error("invalid color '#{text}' at offset {position}")]
    InvalidColor {
        /// The text after `#`.
        text: String,
        /// Byte offset of the `#`.
        position: usize,
    },

    /// A numeric token could not be read as a number.
    #[error("invalid number '{text}' at offset {position}")]
    InvalidNumber {
        /// The numeric text.
        text: String,
        /// Byte offset into the input.
        position: usize,
    },

    /// A value cannot start with this character.
    #[error("unexpected '{found}' at offset {position} where a value was expected")]
    InvalidValue {
        /// The offending character.
        found: char,
        /// Byte offset into the input.
        position: usize,
    },

    /// A declaration carries more than one value (`margin: 1px 2px`).
    #[error("declaration '{property}' has more than one value at offset {position}")]
    MultipleValues {
        /// The property being declared.
        property: String,
        /// Byte offset of the second value.
        position: usize,
    },
}

impl StylesheetError {
    /// Byte offset into the input where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedChar { position, .. }
            | Self::UnexpectedEof { position, .. }
            | Self::EmptySelector { position }
            | Self::MissingName { position }
            | Self::InvalidColor { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::InvalidValue { position, .. }
            | Self::MultipleValues { position, .. } => *position,
        }
    }
}

/// Cursor state for parsing stylesheet text.
pub struct CSSParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> CSSParser<'a> {
    /// Create a parser positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Parse rules until end of input.
    ///
    /// # Errors
    ///
    /// Returns a [`StylesheetError`] for the first malformed rule.
    pub fn parse_rules(&mut self) -> Result<Vec<Rule>, StylesheetError> {
        let mut rules = Vec::new();
        loop {
            self.consume_whitespace();
            if self.eof() {
                break;
            }
            rules.push(self.parse_rule()?);
        }
        Ok(rules)
    }

    fn parse_rule(&mut self) -> Result<Rule, StylesheetError> {
        let selectors = self.parse_selectors()?;
        let declarations = self.parse_declarations()?;
        Ok(Rule {
            selectors,
            declarations,
        })
    }

    /// Comma-separated selectors up to (not including) the `{`.
    fn parse_selectors(&mut self) -> Result<Vec<Selector>, StylesheetError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            self.consume_whitespace();
            match self.next_char() {
                Some(',') => {
                    let _ = self.consume_char();
                    self.consume_whitespace();
                }
                Some('{') => break,
                Some(found) => {
                    return Err(StylesheetError::UnexpectedChar {
                        expected: '{',
                        found,
                        position: self.position,
                    });
                }
                None => {
                    return Err(StylesheetError::UnexpectedEof {
                        context: "selector list",
                        position: self.position,
                    });
                }
            }
        }
        Ok(selectors)
    }

    /// One compound selector: `div#main.note`, `*`, `.a.b`.
    fn parse_selector(&mut self) -> Result<Selector, StylesheetError> {
        let start = self.position;
        let mut selector = Selector::default();
        let mut saw_universal = false;
        loop {
            match self.next_char() {
                Some('#') => {
                    let _ = self.consume_char();
                    selector.id = Some(self.parse_identifier()?);
                }
                Some('.') => {
                    let _ = self.consume_char();
                    selector.classes.push(self.parse_identifier()?);
                }
                Some('*') => {
                    let _ = self.consume_char();
                    saw_universal = true;
                }
                Some(c) if is_identifier_char(c) => {
                    selector.tag_name = Some(self.parse_identifier()?);
                }
                _ => break,
            }
        }
        if self.position == start && !saw_universal {
            if self.eof() {
                return Err(StylesheetError::UnexpectedEof {
                    context: "selector",
                    position: start,
                });
            }
            return Err(StylesheetError::EmptySelector { position: start });
        }
        Ok(selector)
    }

    /// `{ name: value; ... }`
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, StylesheetError> {
        self.expect('{', "declaration block")?;
        let mut declarations = Vec::new();
        loop {
            self.consume_whitespace();
            match self.next_char() {
                Some('}') => {
                    let _ = self.consume_char();
                    break;
                }
                Some(_) => declarations.push(self.parse_declaration()?),
                None => {
                    return Err(StylesheetError::UnexpectedEof {
                        context: "declaration block",
                        position: self.position,
                    });
                }
            }
        }
        Ok(declarations)
    }

    /// `name: value;`, with the `;` optional before the closing `}`.
    fn parse_declaration(&mut self) -> Result<Declaration, StylesheetError> {
        let name = self.parse_identifier()?.to_ascii_lowercase();
        self.consume_whitespace();
        self.expect(':', "declaration")?;
        self.consume_whitespace();
        let value = self.parse_value()?;
        self.consume_whitespace();
        match self.next_char() {
            Some(';') => {
                let _ = self.consume_char();
            }
            Some('}') => {}
            Some(_) => {
                return Err(StylesheetError::MultipleValues {
                    property: name,
                    position: self.position,
                });
            }
            None => {
                return Err(StylesheetError::UnexpectedEof {
                    context: "declaration",
                    position: self.position,
                });
            }
        }
        Ok(Declaration::new(name, value))
    }

    fn parse_value(&mut self) -> Result<Value, StylesheetError> {
        match self.next_char() {
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('-' | '.') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.parse_number()
            }
            Some('#') => self.parse_color(),
            Some(c) if is_identifier_char(c) => Ok(Value::Keyword(self.parse_identifier()?)),
            Some(found) => Err(StylesheetError::InvalidValue {
                found,
                position: self.position,
            }),
            None => Err(StylesheetError::UnexpectedEof {
                context: "value",
                position: self.position,
            }),
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// `12` is an integer, `12px` and `1.5em` are lengths. Any other unit,
    /// or a unitless fraction, is kept verbatim as a keyword.
    fn parse_number(&mut self) -> Result<Value, StylesheetError> {
        let start = self.position;
        let mut number = String::new();
        if self.next_char() == Some('-') {
            let _ = self.consume_char();
            number.push('-');
        }
        number.push_str(&self.consume_while(|c| c.is_ascii_digit() || c == '.'));
        let unit = self.consume_while(|c| c.is_ascii_alphabetic() || c == '%');

        let invalid = || StylesheetError::InvalidNumber {
            text: format!("{number}{unit}"),
            position: start,
        };

        if unit.is_empty() {
            if number.contains('.') {
                let _ = number.parse::<f32>().map_err(|_| invalid())?;
                warn_once("CSS", &format!("unitless number '{number}' kept as a keyword"));
                return Ok(Value::Keyword(number));
            }
            return number.parse::<i32>().map(Value::Integer).map_err(|_| invalid());
        }

        let magnitude = number.parse::<f32>().map_err(|_| invalid())?;
        match unit.parse::<Unit>() {
            Ok(unit) => Ok(Value::Length(magnitude, unit)),
            Err(_) => {
                warn_once("CSS", &format!("unsupported unit '{unit}', kept as a keyword"));
                Ok(Value::Keyword(format!("{number}{unit}")))
            }
        }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    fn parse_color(&mut self) -> Result<Value, StylesheetError> {
        let start = self.position;
        self.expect('#', "color")?;
        let text = self.consume_while(|c| c.is_ascii_alphanumeric());
        ColorValue::from_hex(&text)
            .map(Value::Color)
            .ok_or(StylesheetError::InvalidColor {
                text,
                position: start,
            })
    }

    fn parse_identifier(&mut self) -> Result<String, StylesheetError> {
        let start = self.position;
        let ident = self.consume_while(is_identifier_char);
        if ident.is_empty() {
            return match self.next_char() {
                Some(_) => Err(StylesheetError::MissingName { position: start }),
                None => Err(StylesheetError::UnexpectedEof {
                    context: "identifier",
                    position: start,
                }),
            };
        }
        Ok(ident)
    }

    // ===== Cursor primitives =====

    fn next_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    const fn eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.next_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if !predicate(c) {
                break;
            }
            result.push(c);
            self.position += c.len_utf8();
        }
        result
    }

    /// Whitespace and comments. An unterminated comment runs to end of input.
    fn consume_whitespace(&mut self) {
        loop {
            let _ = self.consume_while(char::is_whitespace);
            if !self.input[self.position..].starts_with("/*") {
                break;
            }
            let body = self.position + 2;
            self.position = self.input[body..]
                .find("*/")
                .map_or(self.input.len(), |end| body + end + 2);
        }
    }

    fn expect(&mut self, expected: char, context: &'static str) -> Result<(), StylesheetError> {
        let position = self.position;
        match self.consume_char() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(StylesheetError::UnexpectedChar {
                expected,
                found,
                position,
            }),
            None => Err(StylesheetError::UnexpectedEof { context, position }),
        }
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-code-point), ASCII only.
const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Parse stylesheet text.
///
/// # Errors
///
/// Returns a [`StylesheetError`] if the text is malformed.
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, StylesheetError> {
    let mut parser = CSSParser::new(source);
    let rules = parser.parse_rules()?;
    log::debug!(
        "parsed {} rules with {} declarations",
        rules.len(),
        rules.iter().map(|r| r.declarations.len()).sum::<usize>()
    );
    Ok(Stylesheet { rules })
}
