use crate::ast::{CompareOp, Connective, Segment};

/// Abstract syntax tree node representing a parsed query expression.
///
/// A query is a tree of comparison terms joined by `and`/`or`. Grouping is
/// structural: parentheses only decide where binary nodes nest, so redundant
/// parentheses collapse to the same tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A single path comparison or truthiness test
    ///
    /// # Examples
    /// ```text
    /// name = "John"
    /// media_list.length
    /// ```
    Term(Term),

    /// Two sub-expressions joined by a logical connective
    ///
    /// # Examples
    /// ```text
    /// type = person and private
    /// ```
    Binary {
        op: Connective,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// A path with an optional comparison.
///
/// Without a comparison the term tests the truthiness of the resolved value
/// (non-null, non-zero, non-empty).
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Traversal segments, evaluated left to right
    pub path: Vec<Segment>,
    /// Operator and right-hand literal, absent for bare truthiness terms
    pub comparison: Option<Comparison>,
}

/// Operator plus the right-hand literal it compares against.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub op: CompareOp,
    pub literal: Literal,
}

/// A right-hand literal, coerced from its source token at parse time.
///
/// Bare all-digit words become integers; everything else, including quoted
/// digits, stays a string with one layer of quotes already stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    String(String),
}

impl Literal {
    /// Coerce a bare word token. Digits parse as an integer; a digit run too
    /// large for `i64` degrades to a string.
    pub fn from_word(word: String) -> Self {
        if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = word.parse::<i64>() {
                return Literal::Integer(n);
            }
        }
        Literal::String(word)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}
