use std::rc::Rc;

use super::LineRules;
use crate::{
    error::ParseError,
    text::{preprocess::preprocess, token::Token},
};

/// Tokenizer for flat input: node lines, property lines and bracketed edge
/// lines. Tokens carry no depth.
#[derive(Debug, Default)]
pub struct GraphTokenizer;

impl GraphTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Preprocess and tokenize raw text.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        self.tokenize_lines(&preprocess(text.lines())?)
    }

    /// Tokenize already preprocessed logical lines.
    pub fn tokenize_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        for (number, line) in lines.iter().enumerate() {
            let line: Rc<str> = line.as_ref().into();
            let rules = LineRules {
                brackets: true,
                header: number == 0,
                depth: None,
                line: line.clone(),
            };
            rules.fragment(&line, &mut tokens)?;
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::token::TokenKind;

    #[test]
    fn test_tokenize_document() {
        let text = "graph\nlabel1 = String(MyNode)\n\nlabel1 a\n\tw = Integer(3)\n[label1:a] link e [label1:a]\n";
        let tokens = GraphTokenizer::new().tokenize(text).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::PropertyName,
                TokenKind::PropertyType,
                TokenKind::PropertyValue,
                TokenKind::Label,
                TokenKind::Name,
                TokenKind::PropertyName,
                TokenKind::PropertyType,
                TokenKind::PropertyValue,
                TokenKind::NodeRef,
                TokenKind::Label,
                TokenKind::Name,
                TokenKind::NodeRef,
            ]
        );
        assert!(tokens.iter().all(|t| t.depth.is_none()));
        assert_eq!(&*tokens[5].line, "\tw = Integer(3)");
    }
}
