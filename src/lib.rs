pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod provider;
pub mod value;

pub use ast::{CompareOp, Comparison, Connective, Expr, Literal, Query, Segment, Term, Token};
pub use evaluator::{EvalError, Evaluator, Resolver};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser, parse_path};
pub use provider::{RecordProvider, iter_entities};
pub use value::Value;

/// Errors from the convenience entry points: either the query text does not
/// parse or evaluation hit a configuration problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Query text does not match the grammar
    Parse(ParseError),
    /// Evaluation failed (missing dereference resolver)
    Eval(EvalError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Eval(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::Eval(e)
    }
}

/// Parse a query string into a [`Query`].
pub fn parse(query: &str) -> Result<Query, ParseError> {
    Query::parse(query)
}

/// Match a single record against a query string.
///
/// Convenience entry point that parses and evaluates in one call, without a
/// dereference resolver. Parse the query once with [`parse`] and reuse an
/// [`Evaluator`] when matching many records.
///
/// # Examples
///
/// ```
/// use sift_lang::{matches, Value};
///
/// let record = Value::from(serde_json::json!({"one": {"two": "x"}}));
/// assert!(matches("one.two = x", &record).unwrap());
/// assert!(!matches("one.missing = x", &record).unwrap());
/// ```
pub fn matches(query: &str, record: &Value) -> Result<bool, Error> {
    let parsed = Query::parse(query)?;
    Ok(Evaluator::new().matches(&parsed, record)?)
}
