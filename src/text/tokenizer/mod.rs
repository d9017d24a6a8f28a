//! Line tokenizers for the three dialects.
//!
//! All three share the fragment rules in [`LineRules`]; the flat dialect
//! additionally recognises bracketed edges, the indented dialect measures
//! depth instead.

mod graph;
mod tree;
mod tree_graph;

use std::rc::Rc;

use tracing::{trace, warn};

use super::{
    is_file_header,
    scan::{find_top_level, find_unquoted},
    token::{Token, TokenKind},
};
use crate::error::ParseError;

pub use graph::GraphTokenizer;
pub use tree::TreeTokenizer;
pub use tree_graph::TreeGraphTokenizer;

/// Splits one logical line into tokens.
struct LineRules {
    brackets: bool,
    /// Set for the first line only, where a lone dialect keyword is the
    /// document header.
    header: bool,
    depth: Option<usize>,
    line: Rc<str>,
}

impl LineRules {
    fn push(&self, out: &mut Vec<Token>, kind: TokenKind, value: &str) {
        let token = Token::new(kind, value, self.depth, self.line.clone());
        trace!(%token, "token");
        out.push(token);
    }

    fn malformed_property(&self) -> ParseError {
        ParseError::MalformedProperty {
            line: self.line.to_string(),
        }
    }

    fn malformed_edge(&self, reason: &'static str) -> ParseError {
        ParseError::MalformedEdge {
            line: self.line.to_string(),
            reason,
        }
    }

    fn fragment(&self, text: &str, out: &mut Vec<Token>) -> Result<(), ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        if let Some(at) = find_top_level(text, "//") {
            self.fragment(&text[..at], out)?;
            self.push(out, TokenKind::Comment, text[at + 2..].trim());
            return Ok(());
        }
        if let Some(at) = find_top_level(text, "=") {
            return self.property(&text[..at], &text[at + 1..], out);
        }
        if find_unquoted(text, '(').is_some() {
            return self.typed_value(text, out);
        }
        if self.brackets && (find_unquoted(text, '[').is_some() || find_unquoted(text, ']').is_some()) {
            return self.edge(text, out);
        }
        self.words(text, out);
        Ok(())
    }

    fn property(&self, name: &str, rest: &str, out: &mut Vec<Token>) -> Result<(), ParseError> {
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(self.malformed_property());
        }
        let rest = rest.trim();
        if find_top_level(rest, "=").is_some() || find_unquoted(rest, '(').is_none() {
            return Err(self.malformed_property());
        }
        self.push(out, TokenKind::PropertyName, name);
        self.typed_value(rest, out)
    }

    /// `Type(value)`: the value runs from the first `(` to the last `)`.
    fn typed_value(&self, text: &str, out: &mut Vec<Token>) -> Result<(), ParseError> {
        let open = find_unquoted(text, '(').ok_or_else(|| self.malformed_property())?;
        let type_name = text[..open].trim();
        if type_name.is_empty() || type_name.contains(char::is_whitespace) || !text.ends_with(')') {
            return Err(self.malformed_property());
        }
        self.push(out, TokenKind::PropertyType, type_name);
        self.push(out, TokenKind::PropertyValue, &text[open + 1..text.len() - 1]);
        Ok(())
    }

    /// `[ref] middle [ref]`, with nothing outside the two bracket pairs.
    fn edge(&self, text: &str, out: &mut Vec<Token>) -> Result<(), ParseError> {
        let rest = text
            .strip_prefix('[')
            .ok_or_else(|| self.malformed_edge("expected '[' at start"))?;
        let close = find_unquoted(rest, ']').ok_or_else(|| self.malformed_edge("unclosed start reference"))?;
        let start = &rest[..close];
        let rest = &rest[close + 1..];
        let open = find_unquoted(rest, '[').ok_or_else(|| self.malformed_edge("missing end reference"))?;
        let middle = &rest[..open];
        let rest = &rest[open + 1..];
        let close = find_unquoted(rest, ']').ok_or_else(|| self.malformed_edge("unclosed end reference"))?;
        let end = &rest[..close];
        let trailing = &rest[close + 1..];
        if find_unquoted(start, '[').is_some()
            || find_unquoted(middle, ']').is_some()
            || find_unquoted(end, '[').is_some()
        {
            return Err(self.malformed_edge("nested brackets"));
        }
        if !trailing.trim().is_empty() {
            return Err(self.malformed_edge("text after end reference"));
        }
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(self.malformed_edge("empty node reference"));
        }
        self.push(out, TokenKind::NodeRef, start.trim());
        self.fragment(middle, out)?;
        self.push(out, TokenKind::NodeRef, end.trim());
        Ok(())
    }

    /// `label name words...`. The name is the rest of the line, kept
    /// verbatim apart from the ends. A lone word is a label with an empty
    /// name, unless it is the document header.
    fn words(&self, text: &str, out: &mut Vec<Token>) {
        let Some(label) = text.split_whitespace().next() else {
            return;
        };
        let name = text[label.len()..].trim();
        if name.is_empty() && is_file_header(label) {
            if self.header {
                return;
            }
            warn!(line = %self.line, "dialect keyword in document body, reading it as a node");
        }
        self.push(out, TokenKind::Label, label);
        self.push(out, TokenKind::Name, name);
    }
}
