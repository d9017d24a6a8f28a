//! Error types shared across the crate.
//!
//! Structural problems abort an import through [`ParseError`]. Resolution
//! problems (unknown property types, missing constructors) are logged by the
//! parsers and never show up here unless a caller asks a factory directly.

use std::io;

/// Errors raised by identity scopes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The scope does not support renaming its identities.
    #[error("scope {scope} does not support renaming")]
    RenameUnsupported { scope: String },
    /// The scope does not support this operation.
    #[error("scope {scope} does not support {operation}")]
    Unsupported {
        scope: String,
        operation: &'static str,
    },
    /// The id is not registered in the scope.
    #[error("unknown id {0}")]
    UnknownId(String),
    /// The id is already registered in the scope.
    #[error("duplicate id {0}")]
    DuplicateId(String),
}

/// Errors raised while reading, writing or converting property values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// No type of this name exists in the type registry.
    #[error("unknown property type {0}")]
    UnknownType(String),
    /// The text could not be parsed as a value of the type.
    #[error("invalid {type_name} value {text:?}: {reason}")]
    InvalidValue {
        type_name: String,
        text: String,
        reason: String,
    },
    /// The element's property list is read-only.
    #[error("property list is read-only, cannot set {0}")]
    ReadOnly(String),
    /// The element carries no property list.
    #[error("element has no property list")]
    NoProperties,
}

/// Errors raised by factories when constructing elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    /// The class has no constructor of the required shape.
    #[error("class {class} has no {shape} constructor")]
    NoMatchingConstructor { class: String, shape: &'static str },
    /// A node handle from another factory was passed in.
    #[error("node {0} belongs to a different factory")]
    ForeignNode(String),
}

/// Errors raised by adjacency queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The node is neither the start nor the end of the edge.
    #[error("node {node} is not an endpoint of edge {edge}")]
    NotAnEndpoint { edge: String, node: String },
}

/// Fatal errors raised while importing text.
///
/// Every variant names the malformed construct, quoting the logical line
/// it came from where one exists.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input contains no header line.
    #[error("empty input")]
    Empty,
    /// The header line names no known dialect.
    #[error("unknown format header {0:?}")]
    UnknownFormat(String),
    /// A `+` continuation was still open at end of input.
    #[error("unclosed line continuation: {0:?}")]
    UnclosedContinuation(String),
    /// A `name = Type(value)` construct is malformed.
    #[error("malformed property format: {line:?}")]
    MalformedProperty { line: String },
    /// A bracketed edge construct is malformed.
    #[error("malformed edge format ({reason}): {line:?}")]
    MalformedEdge { line: String, reason: &'static str },
    /// A name appeared without a preceding label.
    #[error("missing label declaration before name: {line:?}")]
    MissingLabel { line: String },
    /// A node declaration appears where only edges are allowed.
    #[error("node declaration not allowed in cross-link block: {line:?}")]
    UnexpectedNode { line: String },
    /// A property line has no element to attach to.
    #[error("property does not belong to any element: {line:?}")]
    MisplacedProperty { line: String },
    /// A tree line is indented deeper than its predecessor allows.
    #[error("indentation skips a level, no parent for: {line:?}")]
    MissingParent { line: String },
    /// An edge references a node that was never declared.
    #[error("unresolved node reference [{reference}] in edge {edge}")]
    UnresolvedNodeRef { reference: String, edge: String },
    /// A factory failed for a reason the parser could not recover from.
    #[error("factory error: {0}")]
    Factory(#[from] FactoryError),
    /// IO error while reading input.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
