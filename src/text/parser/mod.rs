//! Token streams to containers.
//!
//! Each parser first folds its tokens into spec records, then builds in a
//! fixed order: header properties configure the factory, nodes are created,
//! then edges are resolved by `label:name` reference. Structural problems
//! are fatal. Resolution problems are logged and the element is built
//! without the offending piece.

mod graph;
pub mod spec;
mod tree;
mod tree_graph;

use std::collections::HashMap;

use tracing::{debug, error, warn};

use self::spec::{EdgeSpec, NodeSpec, PropertySpec};
use super::{config::ParserConfig, scan::reference_key};
use crate::{
    edge::EdgeRef,
    error::{FactoryError, ParseError, PropertyError},
    factory::Factory,
    node::NodeRef,
    property::{Properties, PropertyList, Value},
    record::{HasAdjacency, NodeRecord},
};

pub use graph::GraphParser;
pub use tree::TreeParser;
pub use tree_graph::TreeGraphParser;

/// Header properties with a meaning of their own.
#[derive(Debug, Default)]
struct Header {
    container: Option<String>,
    preset: Option<String>,
    scope: Option<String>,
    /// `(label, class name)` registrations in document order.
    labels: Vec<(String, String)>,
}

/// Nodes built from a list of [`NodeSpec`]s.
struct BuiltNodes<R: NodeRecord> {
    by_key: HashMap<String, NodeRef<R>>,
    /// The node each spec produced, or none for a skipped duplicate.
    per_spec: Vec<Option<NodeRef<R>>>,
}

/// The building steps shared by every dialect.
#[derive(Clone, Copy)]
struct NodeSetParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> NodeSetParser<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    fn header(&self, props: &[PropertySpec]) -> Header {
        let mut header = Header::default();
        for prop in props {
            if prop.type_name != "String" {
                debug!(name = %prop.name, type_name = %prop.type_name, "ignoring non-string header property");
                continue;
            }
            let text = match self.config.types.parse("String", &prop.value) {
                Ok(Value::String(text)) => text,
                _ => prop.value.trim().to_string(),
            };
            match prop.name.as_str() {
                "type" => header.container = Some(text),
                "factory" => header.preset = Some(text),
                "scope" => header.scope = Some(text),
                _ => header.labels.push((prop.name.clone(), text)),
            }
        }
        header
    }

    fn check_container(&self, header: &Header, expected: &str) {
        if let Some(container) = &header.container
            && container != expected
        {
            warn!(%container, expected, "document names another container type, building the default");
        }
    }

    /// A fresh factory configured by the header.
    fn factory<R: NodeRecord>(&self, header: &Header, default_scope: &str) -> Factory<R> {
        let preset = header.preset.as_deref().and_then(|name| {
            let preset = self.config.catalog.preset(name);
            if preset.is_none() {
                error!(factory = name, "unknown factory, using the default");
            }
            preset
        });
        let scope = header
            .scope
            .as_deref()
            .or(preset.and_then(|p| p.scope()))
            .unwrap_or(default_scope);
        let factory = Factory::new(scope);
        if let Some(preset) = preset {
            preset.apply(&factory);
        }
        self.register_labels(&factory, header);
        factory
    }

    fn register_labels<R: NodeRecord>(&self, factory: &Factory<R>, header: &Header) {
        let catalog = &self.config.catalog;
        for (label, class_name) in &header.labels {
            if let Some(class) = catalog.node_class(class_name) {
                factory.register_node_class(label.clone(), class.clone());
            } else if let Some(class) = catalog.edge_class(class_name) {
                factory.register_edge_class(label.clone(), class.clone());
            } else {
                error!(%label, class = %class_name, "unknown class, label keeps the default class");
            }
        }
    }

    /// None when no property was declared. Unknown types drop the property;
    /// unparsable values are kept as null.
    fn properties(&self, specs: &[PropertySpec]) -> Option<Properties> {
        if specs.is_empty() {
            return None;
        }
        let mut list = PropertyList::new();
        for spec in specs {
            match self.config.types.parse(&spec.type_name, &spec.value) {
                Ok(value) => {
                    list.set(spec.name.clone(), value);
                }
                Err(PropertyError::UnknownType(type_name)) => {
                    error!(name = %spec.name, %type_name, line = %spec.line, "unknown property type, dropping property");
                }
                Err(err) => {
                    warn!(name = %spec.name, line = %spec.line, %err, "storing null for unparsable property");
                    list.set(spec.name.clone(), Value::Null);
                }
            }
        }
        Some(list.into())
    }

    fn node<R: NodeRecord>(&self, factory: &Factory<R>, spec: &NodeSpec) -> Result<NodeRef<R>, ParseError> {
        let props = self.properties(&spec.properties);
        match factory.make_labelled_node(&spec.label, Some(&spec.name), props.clone()) {
            Err(FactoryError::NoMatchingConstructor { class, shape }) => {
                error!(%class, shape, line = %spec.line, "no matching constructor, using the default node class");
                let fallback = factory.node_classes().default_for(props.as_ref()).clone();
                Ok(factory.make_node_of_class(&fallback, Some(&spec.label), Some(&spec.name), props)?)
            }
            other => Ok(other?),
        }
    }

    /// Create every node, skipping later declarations of a known key.
    fn nodes<R: NodeRecord>(&self, factory: &Factory<R>, specs: &[NodeSpec]) -> Result<BuiltNodes<R>, ParseError> {
        let mut built = BuiltNodes {
            by_key: HashMap::with_capacity(specs.len()),
            per_spec: Vec::with_capacity(specs.len()),
        };
        for spec in specs {
            let key = spec.key();
            if built.by_key.contains_key(&key) {
                error!(%key, line = %spec.line, "duplicate node declaration, skipping");
                built.per_spec.push(None);
                continue;
            }
            let node = self.node(factory, spec)?;
            built.by_key.insert(key, node.clone());
            built.per_spec.push(Some(node));
        }
        Ok(built)
    }

    fn edge<R: HasAdjacency>(
        &self,
        factory: &Factory<R>,
        spec: &EdgeSpec,
        start: &NodeRef<R>,
        end: &NodeRef<R>,
    ) -> Result<EdgeRef<R>, ParseError> {
        let props = self.properties(&spec.properties);
        let label = match &spec.label {
            Some(label) => label.clone(),
            None => factory.edge_classes().default_label().to_string(),
        };
        match factory.make_labelled_edge(&label, start, end, Some(&spec.name), props.clone()) {
            Err(FactoryError::NoMatchingConstructor { class, shape }) => {
                error!(%class, shape, line = %spec.line, "no matching constructor, using the default edge class");
                let fallback = factory.edge_classes().default_for(props.as_ref()).clone();
                Ok(factory.make_edge_of_class(&fallback, Some(&label), start, end, Some(&spec.name), props)?)
            }
            other => Ok(other?),
        }
    }

    fn edges<R: HasAdjacency>(
        &self,
        factory: &Factory<R>,
        specs: &[EdgeSpec],
        nodes: &HashMap<String, NodeRef<R>>,
    ) -> Result<(), ParseError> {
        let lookup = |reference: &str, spec: &EdgeSpec| {
            nodes
                .get(&reference_key(reference))
                .cloned()
                .ok_or_else(|| ParseError::UnresolvedNodeRef {
                    reference: reference.to_string(),
                    edge: spec.line.to_string(),
                })
        };
        for spec in specs {
            let start = lookup(&spec.start, spec)?;
            let end = lookup(&spec.end, spec)?;
            self.edge(factory, spec, &start, &end)?;
        }
        Ok(())
    }
}
