use super::{GraphTokenizer, TreeTokenizer};
use crate::{
    error::ParseError,
    text::{preprocess::preprocess, token::Token},
};

/// Tokenizer for a tree block followed by a cross-link block. The
/// cross-link block starts at the first line beginning with `[`.
#[derive(Debug, Default)]
pub struct TreeGraphTokenizer {
    tree: TreeTokenizer,
    graph: GraphTokenizer,
}

impl TreeGraphTokenizer {
    pub fn new(indent: char) -> Self {
        Self {
            tree: TreeTokenizer::new(indent),
            graph: GraphTokenizer::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.tree.max_depth()
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        self.tokenize_lines(&preprocess(text.lines())?)
    }

    pub fn tokenize_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<Token>, ParseError> {
        let split = lines
            .iter()
            .position(|line| line.as_ref().trim_start().starts_with('['))
            .unwrap_or(lines.len());
        let mut tokens = self.tree.tokenize_lines(&lines[..split])?;
        tokens.extend(self.graph.tokenize_lines(&lines[split..])?);
        Ok(tokens)
    }
}
