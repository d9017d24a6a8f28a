use tracing::{debug, info_span};

use super::{
    BuiltNodes, NodeSetParser,
    spec::{NodeSpec, PropertyAssembler, PropertySpec},
};
use crate::{
    container::Tree,
    error::ParseError,
    factory::TreeFactory,
    record::HasParentChild,
    text::{
        config::ParserConfig,
        token::{Token, TokenKind},
        tokenizer::TreeTokenizer,
    },
};

/// Folds indented tokens into specs. A node's parent is the latest node
/// declared one level up; a property belongs to the latest node one level
/// up from the property line.
#[derive(Debug, Default)]
pub(crate) struct TreeSpecs {
    props: PropertyAssembler,
    open: Option<(NodeSpec, usize)>,
    /// Latest node spec per depth; deeper entries are cleared on each node.
    last_nodes: Vec<Option<usize>>,
    pub(crate) header: Vec<PropertySpec>,
    pub(crate) nodes: Vec<NodeSpec>,
}

impl TreeSpecs {
    fn parent_at(&self, depth: usize) -> Option<usize> {
        depth
            .checked_sub(1)
            .and_then(|up| self.last_nodes.get(up).copied().flatten())
    }

    pub(crate) fn accept(&mut self, token: &Token) -> Result<(), ParseError> {
        let depth = token.depth.unwrap_or(0);
        if PropertyAssembler::is_property(token.kind) {
            if let Some(prop) = self.props.accept(token)? {
                self.attach(prop, depth)?;
            }
            return Ok(());
        }
        self.props.finish()?;
        match token.kind {
            TokenKind::Label => {
                if depth > 0 && self.parent_at(depth).is_none() {
                    return Err(ParseError::MissingParent {
                        line: token.line.to_string(),
                    });
                }
                self.open = Some((NodeSpec::new(&token.value, token.line.clone()), depth));
                Ok(())
            }
            TokenKind::Name => {
                let (mut node, depth) = self.open.take().ok_or_else(|| ParseError::MissingLabel {
                    line: token.line.to_string(),
                })?;
                node.name = token.value.clone();
                node.parent = self.parent_at(depth);
                let index = self.nodes.len();
                self.nodes.push(node);
                self.last_nodes.resize(depth + 1, None);
                self.last_nodes[depth] = Some(index);
                Ok(())
            }
            TokenKind::NodeRef => Err(ParseError::MalformedEdge {
                line: token.line.to_string(),
                reason: "edge reference inside tree block",
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn finish(&mut self) -> Result<(), ParseError> {
        self.props.finish()
    }

    fn attach(&mut self, prop: PropertySpec, depth: usize) -> Result<(), ParseError> {
        if self.nodes.is_empty() && depth == 0 {
            self.header.push(prop);
            return Ok(());
        }
        match self.parent_at(depth) {
            Some(owner) => {
                self.nodes[owner].properties.push(prop);
                Ok(())
            }
            None => Err(ParseError::MisplacedProperty {
                line: prop.line.to_string(),
            }),
        }
    }
}

/// Link every created node to the node its parent spec resolved to.
pub(super) fn link_parents<R: HasParentChild>(specs: &[NodeSpec], built: &BuiltNodes<R>) {
    for (spec, node) in specs.iter().zip(&built.per_spec) {
        let (Some(node), Some(parent)) = (node, spec.parent) else {
            continue;
        };
        if let Some(parent) = built.by_key.get(&specs[parent].key()) {
            parent.connect_child(node);
        }
    }
}

/// Builds a [`Tree`] from indented input.
pub struct TreeParser<'c> {
    base: NodeSetParser<'c>,
    factory: Option<TreeFactory>,
}

impl<'c> TreeParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            base: NodeSetParser::new(config),
            factory: None,
        }
    }

    pub fn with_factory(mut self, factory: &TreeFactory) -> Self {
        self.factory = Some(factory.clone());
        self
    }

    pub fn parse_str(self, text: &str) -> Result<Tree, ParseError> {
        let tokens = TreeTokenizer::new(self.base.config.indent).tokenize(text)?;
        self.parse_tokens(&tokens)
    }

    pub fn parse_tokens(self, tokens: &[Token]) -> Result<Tree, ParseError> {
        let _span = info_span!("parse_tree", tokens = tokens.len()).entered();
        let mut specs = TreeSpecs::default();
        for token in tokens {
            specs.accept(token)?;
        }
        specs.finish()?;

        let header = self.base.header(&specs.header);
        self.base.check_container(&header, "Tree");
        let factory = match self.factory {
            Some(factory) => {
                self.base.register_labels(&factory, &header);
                factory
            }
            None => self.base.factory(&header, "DTF"),
        };
        let tree = Tree::new(&factory);
        let built = self.base.nodes(&factory, &specs.nodes)?;
        link_parents(&specs.nodes, &built);
        debug!(nodes = tree.size(), max_depth = tree.max_depth(), "parsed tree");
        Ok(tree)
    }
}
