//! Intermediate records collected from tokens before any element exists.

use std::rc::Rc;

use crate::{
    error::ParseError,
    text::{
        scan::reference_key,
        token::{Token, TokenKind},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub type_name: String,
    pub value: String,
    pub line: Rc<str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    pub label: String,
    pub name: String,
    pub properties: Vec<PropertySpec>,
    /// Position of the parent declaration in the same list, for tree input.
    pub parent: Option<usize>,
    pub line: Rc<str>,
}

impl NodeSpec {
    pub(crate) fn new(label: &str, line: Rc<str>) -> Self {
        Self {
            label: label.to_string(),
            name: String::new(),
            properties: Vec::new(),
            parent: None,
            line,
        }
    }

    /// `label:name` without whitespace, as edge references spell it.
    pub fn key(&self) -> String {
        reference_key(&format!("{}:{}", self.label, self.name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSpec {
    pub start: String,
    pub end: String,
    pub label: Option<String>,
    pub name: String,
    pub properties: Vec<PropertySpec>,
    pub line: Rc<str>,
}

impl EdgeSpec {
    pub(crate) fn new(start: &str, line: Rc<str>) -> Self {
        Self {
            start: start.to_string(),
            end: String::new(),
            label: None,
            name: String::new(),
            properties: Vec::new(),
            line,
        }
    }
}

/// Collects `name`, `Type` and `value` tokens into one [`PropertySpec`].
#[derive(Debug, Default)]
pub(crate) struct PropertyAssembler {
    pending: Option<PropertySpec>,
}

impl PropertyAssembler {
    /// Returns the finished property on its value token.
    pub(crate) fn accept(&mut self, token: &Token) -> Result<Option<PropertySpec>, ParseError> {
        let malformed = || ParseError::MalformedProperty {
            line: token.line.to_string(),
        };
        match token.kind {
            TokenKind::PropertyName => {
                if self.pending.is_some() {
                    return Err(malformed());
                }
                self.pending = Some(PropertySpec {
                    name: token.value.clone(),
                    type_name: String::new(),
                    value: String::new(),
                    line: token.line.clone(),
                });
                Ok(None)
            }
            TokenKind::PropertyType => match self.pending.as_mut() {
                Some(spec) if spec.type_name.is_empty() => {
                    spec.type_name = token.value.clone();
                    Ok(None)
                }
                _ => Err(malformed()),
            },
            TokenKind::PropertyValue => match self.pending.take() {
                Some(mut spec) if !spec.type_name.is_empty() => {
                    spec.value = token.value.clone();
                    Ok(Some(spec))
                }
                _ => Err(malformed()),
            },
            _ => self.finish().map(|()| None),
        }
    }

    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        match &self.pending {
            Some(spec) => Err(ParseError::MalformedProperty {
                line: spec.line.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn is_property(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::PropertyName | TokenKind::PropertyType | TokenKind::PropertyValue
        )
    }
}
