use std::{
    fmt::{Display, Formatter},
    rc::Rc,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    PropertyName,
    PropertyType,
    PropertyValue,
    Label,
    Name,
    NodeRef,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::PropertyName => "PROPERTY_NAME",
            TokenKind::PropertyType => "PROPERTY_TYPE",
            TokenKind::PropertyValue => "PROPERTY_VALUE",
            TokenKind::Label => "LABEL",
            TokenKind::Name => "NAME",
            TokenKind::NodeRef => "NODE_REF",
        })
    }
}

/// A token together with the logical line it came from.
///
/// Tokens from indented input carry the line's depth; tokens from flat
/// input carry none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub depth: Option<usize>,
    pub line: Rc<str>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, depth: Option<usize>, line: Rc<str>) -> Self {
        Self {
            kind,
            value: value.into(),
            depth,
            line,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
