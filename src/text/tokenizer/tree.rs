use std::{cell::Cell, rc::Rc};

use super::LineRules;
use crate::{
    error::ParseError,
    text::{preprocess::preprocess, token::Token},
};

/// Tokenizer for indented input. Each line's depth is its count of leading
/// indent characters and is attached to every token from that line.
#[derive(Debug)]
pub struct TreeTokenizer {
    indent: char,
    max_depth: Cell<usize>,
}

impl Default for TreeTokenizer {
    fn default() -> Self {
        Self::new('\t')
    }
}

impl TreeTokenizer {
    pub fn new(indent: char) -> Self {
        Self {
            indent,
            max_depth: Cell::new(0),
        }
    }

    /// The deepest line seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth.get()
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        self.tokenize_lines(&preprocess(text.lines())?)
    }

    pub fn tokenize_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        for (number, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let depth = line.chars().take_while(|&c| c == self.indent).count();
            self.max_depth.set(self.max_depth.get().max(depth));
            let rules = LineRules {
                brackets: false,
                header: number == 0,
                depth: Some(depth),
                line: Rc::from(line),
            };
            rules.fragment(line, &mut tokens)?;
        }
        Ok(tokens)
    }
}
