//! The line-oriented text format.
//!
//! A document starts with a header line naming its dialect: `graph` for
//! flat node and edge lines, `tree` for tab-indented hierarchies, or
//! `treegraph` for a tree block followed by bracketed cross-links.
//!
//! ```text
//! graph
//! person = String(Person)
//! person ann
//!     age = Integer(41)
//! person bob
//! [person:ann] knows k1 [person:bob]
//! ```

pub mod config;
pub mod exporter;
mod parser;
pub mod preprocess;
mod scan;
pub mod token;
pub mod tokenizer;

use std::{
    fmt::{Display, Formatter},
    fs,
    path::Path,
};

use tracing::info;

use crate::{
    container::{Graph, Tree, TreeGraph},
    error::ParseError,
};

pub use config::{ClassCatalog, FactoryPreset, ParserConfig};
pub use exporter::Exporter;
pub use parser::{GraphParser, TreeGraphParser, TreeParser, spec};
use tokenizer::{GraphTokenizer, TreeGraphTokenizer, TreeTokenizer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    Graph,
    Tree,
    TreeGraph,
}

impl Dialect {
    /// The dialect a header line announces. Its first word must be
    /// exactly one of the dialect keywords.
    pub fn detect(header: &str) -> Option<Self> {
        let word = header.split_whitespace().next()?;
        [Dialect::Graph, Dialect::TreeGraph, Dialect::Tree]
            .into_iter()
            .find(|d| d.header() == word)
    }

    pub fn header(self) -> &'static str {
        match self {
            Dialect::Graph => "graph",
            Dialect::Tree => "tree",
            Dialect::TreeGraph => "treegraph",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// True for a word that is exactly a dialect header.
pub fn is_file_header(word: &str) -> bool {
    [Dialect::Graph, Dialect::Tree, Dialect::TreeGraph]
        .iter()
        .any(|d| d.header() == word)
}

/// Header property names read as settings, never as label registrations.
pub const HEADER_KEYS: [&str; 3] = ["type", "factory", "scope"];

/// A container read from a document of any dialect.
#[derive(Debug)]
pub enum Imported {
    Graph(Graph),
    Tree(Tree),
    TreeGraph(TreeGraph),
}

impl Imported {
    pub fn dialect(&self) -> Dialect {
        match self {
            Imported::Graph(_) => Dialect::Graph,
            Imported::Tree(_) => Dialect::Tree,
            Imported::TreeGraph(_) => Dialect::TreeGraph,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Imported::Graph(g) => g.size(),
            Imported::Tree(t) => t.size(),
            Imported::TreeGraph(tg) => tg.size(),
        }
    }

    pub fn into_graph(self) -> Option<Graph> {
        match self {
            Imported::Graph(g) => Some(g),
            _ => None,
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Imported::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_tree_graph(self) -> Option<TreeGraph> {
        match self {
            Imported::TreeGraph(tg) => Some(tg),
            _ => None,
        }
    }

    /// The document text that reads back into this container.
    pub fn export(&self, config: &ParserConfig) -> String {
        let exporter = Exporter::new(config);
        match self {
            Imported::Graph(g) => exporter.graph_to_string(g),
            Imported::Tree(t) => exporter.tree_to_string(t),
            Imported::TreeGraph(tg) => exporter.tree_graph_to_string(tg),
        }
    }
}

/// Read a document, choosing the parser from its header line.
pub fn read_str(text: &str, config: &ParserConfig) -> Result<Imported, ParseError> {
    let lines = preprocess::preprocess(text.lines())?;
    let header = lines.first().ok_or(ParseError::Empty)?;
    let dialect = Dialect::detect(header).ok_or_else(|| ParseError::UnknownFormat(header.clone()))?;
    info!(%dialect, lines = lines.len(), "reading document");
    Ok(match dialect {
        Dialect::Graph => {
            let tokens = GraphTokenizer::new().tokenize_lines(&lines)?;
            Imported::Graph(GraphParser::new(config).parse_tokens(&tokens)?)
        }
        Dialect::Tree => {
            let tokens = TreeTokenizer::new(config.indent).tokenize_lines(&lines)?;
            Imported::Tree(TreeParser::new(config).parse_tokens(&tokens)?)
        }
        Dialect::TreeGraph => {
            let tokens = TreeGraphTokenizer::new(config.indent).tokenize_lines(&lines)?;
            Imported::TreeGraph(TreeGraphParser::new(config).parse_tokens(&tokens)?)
        }
    })
}

pub fn read_file(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Imported, ParseError> {
    let text = fs::read_to_string(path)?;
    read_str(&text, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Dialect::detect("graph"), Some(Dialect::Graph));
        assert_eq!(Dialect::detect("  treegraph // x"), Some(Dialect::TreeGraph));
        assert_eq!(Dialect::detect("tree"), Some(Dialect::Tree));
        assert_eq!(Dialect::detect("forest"), None);
        assert_eq!(Dialect::detect("graphite"), None);
        assert_eq!(Dialect::detect("trees x"), None);
        assert_eq!(Dialect::detect(""), None);
        assert!(is_file_header("tree"));
        assert!(!is_file_header("trees"));
    }

    #[test]
    fn test_read_str_dispatch_and_errors() {
        let config = ParserConfig::default();
        let imported = read_str("// only a comment\ntree\nn r\n\tn a", &config).unwrap();
        assert_eq!(imported.dialect(), Dialect::Tree);
        assert_eq!(imported.size(), 2);
        assert!(matches!(read_str("\n// nothing\n", &config), Err(ParseError::Empty)));
        assert!(matches!(
            read_str("forest\nn a", &config),
            Err(ParseError::UnknownFormat(header)) if header == "forest"
        ));
    }

    #[test]
    fn test_export_reads_back() {
        let config = ParserConfig::default();
        let text = "treegraph\nn r\n\tn a\n\t\tw = Integer(4)\n\tn b\n[n:a] see s [n:b]\n";
        let first = read_str(text, &config).unwrap();
        let exported = first.export(&config);
        let second = read_str(&exported, &config).unwrap();
        assert_eq!(second.export(&config), exported);
        let tg = second.into_tree_graph().unwrap();
        assert_eq!(tg.factory().scope_name(), "TGDF");
        assert_eq!(tg.edges().len(), 1);
    }
}
