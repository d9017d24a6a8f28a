//! In-memory directed graphs, trees and tree graphs built through
//! factories, with a line-oriented text format for reading and writing
//! them.
//!
//! Nodes and edges live in an arena owned by their [`Factory`]; the
//! [`NodeRef`] and [`EdgeRef`] handles index into it. Containers index
//! node handles and receive every node their factory creates.

pub mod container;
pub mod direction;
pub mod edge;
pub mod element;
pub mod error;
pub mod factory;
pub mod factory_id;
pub mod identity;
pub mod node;
pub mod prelude;
pub mod property;
pub mod record;
pub mod search;
pub mod text;
pub mod tracing_support;

mod format_debug;

#[cfg(test)]
mod graph_test_support;

pub use container::{Graph, Tree, TreeGraph};
pub use edge::{CrossLink, Edge, EdgeRef};
pub use factory::{Factory, GraphFactory, TreeFactory, TreeGraphFactory};
pub use node::{Node, NodeRef, TreeGraphNode, TreeNode};
