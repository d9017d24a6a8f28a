pub use crate::container::{Graph, Tree, TreeGraph};
pub use crate::direction::Direction;
pub use crate::edge::{CrossLink, Edge};
pub use crate::element::GraphElement;
pub use crate::error::{FactoryError, GraphError, ParseError, PropertyError};
pub use crate::factory::{ElementClass, GraphFactory, TreeFactory, TreeGraphFactory};
pub use crate::node::{Node, TreeGraphNode, TreeNode};
pub use crate::property::{Properties, PropertyList, Value};
pub use crate::text::{Imported, ParserConfig, read_file, read_str};
