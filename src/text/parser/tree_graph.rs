use tracing::{debug, info_span};

use super::{NodeSetParser, graph::FlatSpecs, tree::{TreeSpecs, link_parents}};
use crate::{
    container::TreeGraph,
    error::ParseError,
    factory::TreeGraphFactory,
    text::{config::ParserConfig, token::Token, tokenizer::TreeGraphTokenizer},
};

/// Builds a [`TreeGraph`] from a tree block followed by cross-links.
///
/// Tokens with a depth belong to the tree block, the rest to the cross-link
/// block. The cross-link block may only declare edges and edge properties.
pub struct TreeGraphParser<'c> {
    base: NodeSetParser<'c>,
    factory: Option<TreeGraphFactory>,
}

impl<'c> TreeGraphParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            base: NodeSetParser::new(config),
            factory: None,
        }
    }

    pub fn with_factory(mut self, factory: &TreeGraphFactory) -> Self {
        self.factory = Some(factory.clone());
        self
    }

    pub fn parse_str(self, text: &str) -> Result<TreeGraph, ParseError> {
        let tokens = TreeGraphTokenizer::new(self.base.config.indent).tokenize(text)?;
        self.parse_tokens(&tokens)
    }

    pub fn parse_tokens(self, tokens: &[Token]) -> Result<TreeGraph, ParseError> {
        let _span = info_span!("parse_tree_graph", tokens = tokens.len()).entered();
        let mut tree = TreeSpecs::default();
        let mut links = FlatSpecs::cross_links();
        for token in tokens {
            match token.depth {
                Some(_) => tree.accept(token)?,
                None => links.accept(token)?,
            }
        }
        tree.finish()?;
        links.finish()?;

        let header = self.base.header(&tree.header);
        self.base.check_container(&header, "TreeGraph");
        let factory = match self.factory {
            Some(factory) => {
                self.base.register_labels(&factory, &header);
                factory
            }
            None => self.base.factory(&header, "TGDF"),
        };
        let tree_graph = TreeGraph::new(&factory);
        let built = self.base.nodes(&factory, &tree.nodes)?;
        link_parents(&tree.nodes, &built);
        self.base.edges(&factory, &links.edges, &built.by_key)?;
        debug!(
            nodes = tree_graph.size(),
            cross_links = links.edges.len(),
            "parsed tree graph"
        );
        Ok(tree_graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{direction::Direction, element::GraphElement, property::Value};

    fn parse(text: &str) -> Result<TreeGraph, ParseError> {
        TreeGraphParser::new(&ParserConfig::default()).parse_str(text)
    }

    #[test]
    fn test_tree_and_cross_links() {
        let tg = parse(
            "treegraph\n\
             n r\n\
             \tn a\n\
             \tn b\n\
             [n:a] see s1 [n:b]\n\
             \tweight = Double(0.5)\n",
        )
        .unwrap();
        let r = tg.root().unwrap();
        assert_eq!(r.n_children(), 2);
        let a = tg.find_node("a").unwrap();
        let link = tg.find_edge("s1").unwrap();
        assert_eq!(link.property("weight"), Some(Value::Double(0.5)));
        assert_eq!(a.neighbours(Direction::Out), vec![tg.find_node("b").unwrap()]);
        assert!(a.is_leaf());
    }

    #[test]
    fn test_cross_link_block_rejects_nodes() {
        assert!(matches!(
            parse("treegraph\nn r\n[n:r] l x [n:r]\nn late"),
            Err(ParseError::UnexpectedNode { .. })
        ));
        assert!(matches!(
            parse("treegraph\nn r\n[n:r] l x [n:zz]"),
            Err(ParseError::UnresolvedNodeRef { .. })
        ));
    }
}
