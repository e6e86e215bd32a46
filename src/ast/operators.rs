use std::fmt;

/// Comparison operators applicable to a path's resolved value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    /// Equal (`=`) — case-insensitive for textual values
    Eq,
    /// Not equal (`!=`)
    NotEq,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    GtEq,
    /// Contains (`~`) — substring for strings, membership for sequences
    Contains,
    /// Not-contains (`!~`)
    NotContains,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Contains => "~",
            CompareOp::NotContains => "!~",
        };
        write!(f, "{}", symbol)
    }
}

/// Logical connectives joining terms. `and` binds tighter than `or`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Connective {
    /// Logical AND (word, not symbol)
    And,
    /// Logical OR (word, not symbol)
    Or,
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "and"),
            Connective::Or => write!(f, "or"),
        }
    }
}
