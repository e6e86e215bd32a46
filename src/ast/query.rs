use crate::ast::Expr;
use crate::lexer::Lexer;
use crate::parser::{ParseError, Parser};

/// A parsed query.
///
/// Built once from a source string and never mutated. Parsing is pure and
/// deterministic: the same source always yields a structurally identical
/// tree.
///
/// # Examples
///
/// ```
/// use sift_lang::Query;
///
/// let query = Query::parse("type = person and birth.date.year >= 1990").unwrap();
/// assert_eq!(query.source(), "type = person and birth.date.year >= 1990");
///
/// assert!(Query::parse("type = (").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    source: String,
    tree: Expr,
}

impl Query {
    /// Parse a query string. Fails on malformed input: unbalanced
    /// parentheses, a missing literal after an operator, trailing tokens,
    /// empty input, or an invalid path token.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let lexer = Lexer::new(source);
        let mut parser = Parser::new(lexer)?;
        let tree = parser.parse()?;
        Ok(Query {
            source: source.to_string(),
            tree,
        })
    }

    /// The original query text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree.
    pub fn tree(&self) -> &Expr {
        &self.tree
    }
}
