use tracing::{debug, info_span};

use super::{
    NodeSetParser,
    spec::{EdgeSpec, NodeSpec, PropertyAssembler, PropertySpec},
};
use crate::{
    container::Graph,
    error::ParseError,
    factory::GraphFactory,
    text::{
        config::ParserConfig,
        token::{Token, TokenKind},
        tokenizer::GraphTokenizer,
    },
};

/// The element the next property line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Item {
    Graph,
    Node,
    Edge,
}

/// Folds flat tokens into specs. Also reads the cross-link block of tree
/// graph input, where node declarations and header properties are refused.
#[derive(Debug)]
pub(crate) struct FlatSpecs {
    item: Item,
    allow_nodes: bool,
    props: PropertyAssembler,
    open_node: Option<NodeSpec>,
    open_edge: Option<EdgeSpec>,
    pub(crate) header: Vec<PropertySpec>,
    pub(crate) nodes: Vec<NodeSpec>,
    pub(crate) edges: Vec<EdgeSpec>,
}

impl FlatSpecs {
    fn with_nodes(allow_nodes: bool) -> Self {
        Self {
            item: Item::Graph,
            allow_nodes,
            props: PropertyAssembler::default(),
            open_node: None,
            open_edge: None,
            header: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub(crate) fn graph() -> Self {
        Self::with_nodes(true)
    }

    pub(crate) fn cross_links() -> Self {
        Self::with_nodes(false)
    }

    pub(crate) fn accept(&mut self, token: &Token) -> Result<(), ParseError> {
        if PropertyAssembler::is_property(token.kind) {
            if let Some(prop) = self.props.accept(token)? {
                self.attach(prop)?;
            }
            return Ok(());
        }
        self.props.finish()?;
        match token.kind {
            TokenKind::Label => self.label(token),
            TokenKind::Name => self.name(token),
            TokenKind::NodeRef => {
                self.node_ref(token);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn finish(&mut self) -> Result<(), ParseError> {
        self.props.finish()?;
        match self.open_edge.take() {
            Some(edge) => Err(ParseError::MalformedEdge {
                line: edge.line.to_string(),
                reason: "unterminated edge",
            }),
            None => Ok(()),
        }
    }

    fn attach(&mut self, prop: PropertySpec) -> Result<(), ParseError> {
        let target = match self.item {
            Item::Graph if self.allow_nodes => Some(&mut self.header),
            Item::Graph => None,
            Item::Node => self.nodes.last_mut().map(|n| &mut n.properties),
            Item::Edge => self.edges.last_mut().map(|e| &mut e.properties),
        };
        match target {
            Some(props) => {
                props.push(prop);
                Ok(())
            }
            None => Err(ParseError::MisplacedProperty {
                line: prop.line.to_string(),
            }),
        }
    }

    fn label(&mut self, token: &Token) -> Result<(), ParseError> {
        if let Some(edge) = self.open_edge.as_mut() {
            edge.label = Some(token.value.clone());
            return Ok(());
        }
        if !self.allow_nodes {
            return Err(ParseError::UnexpectedNode {
                line: token.line.to_string(),
            });
        }
        self.open_node = Some(NodeSpec::new(&token.value, token.line.clone()));
        self.item = Item::Node;
        Ok(())
    }

    fn name(&mut self, token: &Token) -> Result<(), ParseError> {
        if let Some(edge) = self.open_edge.as_mut() {
            if edge.label.is_none() {
                return Err(ParseError::MissingLabel {
                    line: token.line.to_string(),
                });
            }
            edge.name = token.value.clone();
            return Ok(());
        }
        match self.open_node.take() {
            Some(mut node) => {
                node.name = token.value.clone();
                self.nodes.push(node);
                Ok(())
            }
            None if !self.allow_nodes => Err(ParseError::UnexpectedNode {
                line: token.line.to_string(),
            }),
            None => Err(ParseError::MissingLabel {
                line: token.line.to_string(),
            }),
        }
    }

    /// The first reference opens an edge, the second closes it.
    fn node_ref(&mut self, token: &Token) {
        match self.open_edge.take() {
            Some(mut edge) => {
                edge.end = token.value.clone();
                self.edges.push(edge);
                self.item = Item::Edge;
            }
            None => self.open_edge = Some(EdgeSpec::new(&token.value, token.line.clone())),
        }
    }
}

/// Builds a [`Graph`] from flat input.
pub struct GraphParser<'c> {
    base: NodeSetParser<'c>,
    factory: Option<GraphFactory>,
}

impl<'c> GraphParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            base: NodeSetParser::new(config),
            factory: None,
        }
    }

    /// Build into an existing factory instead of a fresh one. Header label
    /// registrations still apply; the factory and scope headers do not.
    pub fn with_factory(mut self, factory: &GraphFactory) -> Self {
        self.factory = Some(factory.clone());
        self
    }

    pub fn parse_str(self, text: &str) -> Result<Graph, ParseError> {
        let tokens = GraphTokenizer::new().tokenize(text)?;
        self.parse_tokens(&tokens)
    }

    pub fn parse_tokens(self, tokens: &[Token]) -> Result<Graph, ParseError> {
        let _span = info_span!("parse_graph", tokens = tokens.len()).entered();
        let mut specs = FlatSpecs::graph();
        for token in tokens {
            specs.accept(token)?;
        }
        specs.finish()?;

        let header = self.base.header(&specs.header);
        self.base.check_container(&header, "Graph");
        let factory = match self.factory {
            Some(factory) => {
                self.base.register_labels(&factory, &header);
                factory
            }
            None => self.base.factory(&header, "DGF"),
        };
        let graph = Graph::new(&factory);
        let built = self.base.nodes(&factory, &specs.nodes)?;
        self.base.edges(&factory, &specs.edges, &built.by_key)?;
        debug!(nodes = graph.size(), edges = specs.edges.len(), "parsed graph");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        direction::Direction,
        element::GraphElement,
        factory::ElementClass,
        property::Value,
    };

    fn parse(text: &str) -> Result<Graph, ParseError> {
        GraphParser::new(&ParserConfig::default()).parse_str(text)
    }

    #[test]
    fn test_nodes_edges_and_properties() {
        let graph = parse(
            "graph\n\
             person ann\n\
             \tage = Integer(41)\n\
             person bob\n\
             [person:ann] knows k1 [person:bob]\n\
             \tsince = Integer(2001)\n",
        )
        .unwrap();
        assert_eq!(graph.size(), 2);
        let ann = graph.find_node("ann").unwrap();
        assert_eq!(ann.label(), "person");
        assert_eq!(ann.property("age"), Some(Value::Integer(41)));
        assert_eq!(ann.class_name(), "DataNode");
        let bob = graph.find_node("bob").unwrap();
        assert_eq!(bob.class_name(), "SimpleNode");
        let edge = graph.find_edge("k1").unwrap();
        assert_eq!(edge.label(), "knows");
        assert_eq!(edge.start_node(), ann);
        assert_eq!(edge.property("since"), Some(Value::Integer(2001)));
        assert_eq!(bob.degree(Direction::In), 1);
    }

    #[test]
    fn test_header_registers_catalog_class() {
        let mut config = ParserConfig::default();
        config.catalog.add_node_class(ElementClass::data("Person"));
        let graph = GraphParser::new(&config)
            .parse_str("graph\nperson = String(Person)\nscope = String(PEOPLE)\nperson ann\n\tage = Integer(3)")
            .unwrap();
        let ann = graph.find_node("ann").unwrap();
        assert_eq!(ann.class_name(), "Person");
        assert_eq!(graph.factory().scope_name(), "PEOPLE");
    }

    #[test]
    fn test_edge_without_label_uses_default() {
        let graph = parse("graph\nn a\nn b\n[n:a] [n:b]").unwrap();
        let edges = graph.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label(), "edge");
    }

    #[test]
    fn test_duplicate_declaration_is_skipped() {
        let graph = parse("graph\nn a\n\tx = Integer(1)\nn a\n\tx = Integer(2)").unwrap();
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.nodes()[0].property("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn test_fatal_errors() {
        assert!(matches!(
            parse("graph\nn a\n[n:a] link [n:zz]"),
            Err(ParseError::UnresolvedNodeRef { reference, .. }) if reference == "n:zz"
        ));
        assert!(matches!(
            parse("graph\nn a\n[n:a] link [n:a"),
            Err(ParseError::MalformedEdge { .. })
        ));
        assert!(matches!(parse("graph\n= Integer(1)"), Err(ParseError::MalformedProperty { .. })));
    }

    #[test]
    fn test_into_existing_factory() {
        let factory = GraphFactory::new("shared");
        let existing = factory.make_node(Some("old"), None).unwrap();
        let graph = GraphParser::new(&ParserConfig::default())
            .with_factory(&factory)
            .parse_str("graph\nn a")
            .unwrap();
        assert_eq!(graph.size(), 1);
        assert!(!graph.contains(&existing));
        assert_eq!(factory.node_count(), 2);
    }
}
