//! Markup parser.
//!
//! The parser is an explicit cursor over the input text. Every `parse_*`
//! method consumes exactly the construct it names and leaves the cursor on
//! the first byte after it; errors carry the byte offset of the cursor at
//! the point of failure.

use lantern_dom::{AttributesMap, Node};
use thiserror::Error;

/// Malformed markup. Fatal: the parser does not attempt recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
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

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input at offset {position} while parsing {context}")]
    UnexpectedEof {
        /// What was being parsed.
        context: &'static str,
        /// Byte offset into the input.
        position: usize,
    },

    /// A closing tag does not match the element it closes.
    #[error("closing tag </{found}> at offset {position} does not match <{expected}>")]
    MismatchedClosingTag {
        /// Tag name of the open element.
        expected: String,
        /// Tag name found in the closing tag.
        found: String,
        /// Byte offset into the input.
        position: usize,
    },

    /// A tag or attribute name was required but none was present.
    #[error("expected a name at offset {position}")]
    MissingName {
        /// Byte offset into the input.
        position: usize,
    },
}

impl MarkupError {
    /// Byte offset into the input where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedChar { position, .. }
            | Self::UnexpectedEof { position, .. }
            | Self::MismatchedClosingTag { position, .. }
            | Self::MissingName { position } => *position,
        }
    }
}

/// Cursor state for parsing markup text.
pub struct HTMLParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> HTMLParser<'a> {
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

    /// Parse a sequence of sibling nodes until end of input or a closing tag.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkupError`] if any node in the sequence is malformed.
    pub fn parse_nodes(&mut self) -> Result<Vec<Node>, MarkupError> {
        let mut nodes = Vec::new();
        loop {
            self.consume_whitespace();
            if self.eof() || self.starts_with("</") {
                break;
            }
            nodes.push(self.parse_node()?);
        }
        Ok(nodes)
    }

    /// Parse a single node: an element if the next character is `<`,
    /// otherwise a text run.
    fn parse_node(&mut self) -> Result<Node, MarkupError> {
        if self.next_char() == Some('<') {
            self.parse_element()
        } else {
            Ok(self.parse_text())
        }
    }

    /// Text runs extend up to the next `<` or end of input.
    fn parse_text(&mut self) -> Node {
        Node::text(self.consume_while(|c| c != '<'))
    }

    /// `<tag attrs>children</tag>`
    fn parse_element(&mut self) -> Result<Node, MarkupError> {
        // Opening tag.
        self.expect('<', "opening tag")?;
        let tag_name = self.parse_name()?;
        let attrs = self.parse_attributes()?;
        self.expect('>', "opening tag")?;

        let children = self.parse_nodes()?;

        // Closing tag.
        self.expect('<', "closing tag")?;
        self.expect('/', "closing tag")?;
        let closing_at = self.position;
        let closing_name = self.parse_name()?;
        if closing_name != tag_name {
            return Err(MarkupError::MismatchedClosingTag {
                expected: tag_name,
                found: closing_name,
                position: closing_at,
            });
        }
        self.expect('>', "closing tag")?;

        Ok(Node::element(tag_name, attrs, children))
    }

    /// Tag and attribute names are runs of ASCII alphanumerics (plus `-`
    /// inside attribute names such as `data-x`).
    fn parse_name(&mut self) -> Result<String, MarkupError> {
        let start = self.position;
        let name = self.consume_while(|c| c.is_ascii_alphanumeric() || c == '-');
        if name.is_empty() {
            if self.eof() {
                return Err(MarkupError::UnexpectedEof {
                    context: "name",
                    position: start,
                });
            }
            return Err(MarkupError::MissingName { position: start });
        }
        Ok(name)
    }

    /// Whitespace-separated `name="value"` pairs up to the closing `>`.
    fn parse_attributes(&mut self) -> Result<AttributesMap, MarkupError> {
        let mut attrs = AttributesMap::new();
        loop {
            self.consume_whitespace();
            match self.next_char() {
                Some('>') => break,
                None => {
                    return Err(MarkupError::UnexpectedEof {
                        context: "attributes",
                        position: self.position,
                    });
                }
                Some(_) => {
                    let (name, value) = self.parse_attribute()?;
                    let _ = attrs.insert(name, value);
                }
            }
        }
        Ok(attrs)
    }

    fn parse_attribute(&mut self) -> Result<(String, String), MarkupError> {
        let name = self.parse_name()?;
        self.expect('=', "attribute")?;
        let value = self.parse_attribute_value()?;
        Ok((name, value))
    }

    /// A value quoted with `"` or `'`, ending at the matching quote.
    fn parse_attribute_value(&mut self) -> Result<String, MarkupError> {
        let open = match self.next_char() {
            Some(quote @ ('"' | '\'')) => quote,
            Some(found) => {
                return Err(MarkupError::UnexpectedChar {
                    expected: '"',
                    found,
                    position: self.position,
                });
            }
            None => {
                return Err(MarkupError::UnexpectedEof {
                    context: "attribute value",
                    position: self.position,
                });
            }
        };
        let _ = self.consume_char();
        let value = self.consume_while(|c| c != open);
        self.expect(open, "attribute value")?;
        Ok(value)
    }

    // ===== Cursor primitives =====

    fn next_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.position..].starts_with(prefix)
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

    fn consume_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }

    fn expect(&mut self, expected: char, context: &'static str) -> Result<(), MarkupError> {
        let position = self.position;
        match self.consume_char() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(MarkupError::UnexpectedChar {
                expected,
                found,
                position,
            }),
            None => Err(MarkupError::UnexpectedEof { context, position }),
        }
    }
}

/// Parse a markup document into a single root node.
///
/// A document with exactly one top-level node returns that node. Any other
/// number of top-level nodes is wrapped in a synthetic `html` element.
///
/// # Errors
///
/// Returns a [`MarkupError`] if the markup is malformed, including stray
/// closing tags at the top level.
pub fn parse_html(source: &str) -> Result<Node, MarkupError> {
    let mut parser = HTMLParser::new(source);
    let mut nodes = parser.parse_nodes()?;

    // parse_nodes stops at "</"; at the top level that is a stray closing tag.
    if !parser.eof() {
        return Err(MarkupError::UnexpectedChar {
            expected: '<',
            found: '/',
            position: parser.position() + 1,
        });
    }

    log::debug!("parsed {} top-level markup nodes", nodes.len());

    if nodes.len() == 1
        && let Some(root) = nodes.pop()
    {
        return Ok(root);
    }
    Ok(Node::element("html", AttributesMap::new(), nodes))
}
