use std::cmp::Ordering;
use std::fmt;

use crate::{
    ast::{CompareOp, Comparison, Connective, Expr, Literal, Query, Segment, Term},
    value::Value,
};

/// Resolves an opaque reference key to the nested-mapping form of a record
/// in a named category.
///
/// This is the seam behind `get_<category>` path segments. A `None` return is
/// a lookup miss (unknown key or unknown category) and makes the enclosing
/// term false; only a missing resolver is an error.
pub trait Resolver {
    fn resolve(&self, category: &str, key: &str) -> Option<Value>;
}

/// Errors that can occur during query evaluation.
///
/// Failing to resolve a path against a record is never an error: missing
/// keys, bad indexes, null intermediates, and incomparable types all make the
/// enclosing term false. The only evaluation error is a configuration
/// problem.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A `get_<category>` segment was evaluated with no resolver configured
    MissingResolver { category: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::MissingResolver { category } => write!(
                f,
                "No resolver configured for dereference segment 'get_{}'",
                category
            ),
        }
    }
}

impl std::error::Error for EvalError {}

/// The query evaluator.
///
/// Walks a parsed expression tree against a candidate record and produces a
/// boolean verdict. Stateless per call; an evaluator can be reused across
/// queries and records.
///
/// # Examples
///
/// ```
/// use sift_lang::{Evaluator, Query, Value};
///
/// let query = Query::parse("name = \"john\" and tags ~ urgent").unwrap();
/// let record = Value::from(serde_json::json!({
///     "name": "John",
///     "tags": ["urgent", "todo"]
/// }));
///
/// let evaluator = Evaluator::new();
/// assert!(evaluator.matches(&query, &record).unwrap());
/// ```
#[derive(Default)]
pub struct Evaluator<'a> {
    resolver: Option<&'a dyn Resolver>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with no dereference resolver. Queries using
    /// `get_<category>` segments will fail with
    /// [`EvalError::MissingResolver`].
    pub fn new() -> Self {
        Evaluator { resolver: None }
    }

    /// Create an evaluator whose `get_<category>` segments look up records
    /// through `resolver`.
    pub fn with_resolver(resolver: &'a dyn Resolver) -> Self {
        Evaluator {
            resolver: Some(resolver),
        }
    }

    /// Evaluate a query against a candidate record.
    pub fn matches(&self, query: &Query, record: &Value) -> Result<bool, EvalError> {
        self.eval_expr(query.tree(), record)
    }

    fn eval_expr(&self, expr: &Expr, record: &Value) -> Result<bool, EvalError> {
        match expr {
            Expr::Term(term) => self.eval_term(term, record),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left, record)?;
                let right = self.eval_expr(right, record)?;
                Ok(match op {
                    Connective::And => left && right,
                    Connective::Or => left || right,
                })
            }
        }
    }

    fn eval_term(&self, term: &Term, record: &Value) -> Result<bool, EvalError> {
        self.walk(&term.path, record, term.comparison.as_ref())
    }

    /// Resolve segments left to right against `start`, then apply the
    /// comparison to the final value. Quantifier segments take over the rest
    /// of the walk for each element.
    fn walk(
        &self,
        segments: &[Segment],
        start: &Value,
        comparison: Option<&Comparison>,
    ) -> Result<bool, EvalError> {
        let mut current = start.clone();

        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    current = match current {
                        Value::Object(map) => match map.get(name) {
                            Some(value) => value.clone(),
                            None => return Ok(false),
                        },
                        _ => return Ok(false),
                    };
                }
                Segment::Index(n) => {
                    current = match current {
                        Value::Array(items) => match items.get(*n) {
                            Some(value) => value.clone(),
                            None => return Ok(false),
                        },
                        _ => return Ok(false),
                    };
                }
                Segment::Length => {
                    let count = match &current {
                        Value::String(s) => s.chars().count(),
                        Value::Array(items) => items.len(),
                        Value::Object(map) => map.len(),
                        _ => return Ok(false),
                    };
                    current = Value::Integer(count as i64);
                }
                Segment::Any | Segment::All => {
                    let Value::Array(items) = &current else {
                        return Ok(false);
                    };
                    let rest = &segments[i + 1..];
                    let mut verdicts = Vec::with_capacity(items.len());
                    for item in items {
                        let matched = if rest.is_empty() {
                            match_values(item, comparison)
                        } else {
                            self.walk(rest, item, comparison)?
                        };
                        verdicts.push(matched);
                    }
                    return Ok(match segment {
                        Segment::Any => verdicts.iter().any(|m| *m),
                        // `all` over an empty sequence is not vacuously true
                        _ => !verdicts.is_empty() && verdicts.iter().all(|m| *m),
                    });
                }
                Segment::Deref(category) => {
                    let Some(resolver) = self.resolver else {
                        return Err(EvalError::MissingResolver {
                            category: category.clone(),
                        });
                    };
                    // The current value is the opaque reference key; at the
                    // first segment that is the candidate itself.
                    let resolved = match current.as_str() {
                        Some(key) => resolver.resolve(category, key),
                        None => return Ok(false),
                    };
                    current = match resolved {
                        Some(value) => value,
                        None => return Ok(false),
                    };
                }
            }

            if current == Value::Null {
                return Ok(false);
            }
        }

        Ok(match_values(&current, comparison))
    }
}

/// Apply the comparison to a fully resolved value. Without an operator the
/// term is a truthiness test.
fn match_values(value: &Value, comparison: Option<&Comparison>) -> bool {
    match comparison {
        None => value.is_truthy(),
        Some(Comparison { op, literal }) => compare(value, *op, literal),
    }
}

fn compare(value: &Value, op: CompareOp, literal: &Literal) -> bool {
    match op {
        CompareOp::Eq => folded_eq(value, literal),
        CompareOp::NotEq => !folded_eq(value, literal),
        CompareOp::Contains => contains(value, literal),
        CompareOp::NotContains => !contains(value, literal),
        CompareOp::Lt => matches!(ordering(value, literal), Some(Ordering::Less)),
        CompareOp::LtEq => matches!(
            ordering(value, literal),
            Some(Ordering::Less | Ordering::Equal)
        ),
        CompareOp::Gt => matches!(ordering(value, literal), Some(Ordering::Greater)),
        CompareOp::GtEq => matches!(
            ordering(value, literal),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

/// Equality for `=` / `!=`: textual operands fold case, numeric operands
/// bridge integer/float, booleans equal their 0/1 integer form.
fn folded_eq(value: &Value, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::String(s), Literal::String(l)) => s.to_lowercase() == l.to_lowercase(),
        (Value::Integer(a), Literal::Integer(b)) => a == b,
        (Value::Float(a), Literal::Integer(b)) => *a == *b as f64,
        (Value::Boolean(b), Literal::Integer(n)) => i64::from(*b) == *n,
        _ => false,
    }
}

/// Exact equality used for sequence membership: no case folding.
fn exact_eq(value: &Value, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::String(s), Literal::String(l)) => s == l,
        (Value::Integer(a), Literal::Integer(b)) => a == b,
        (Value::Float(a), Literal::Integer(b)) => *a == *b as f64,
        _ => false,
    }
}

/// `~`: case-insensitive substring for strings, exact membership for
/// sequences. Anything else cannot contain and is false.
fn contains(value: &Value, literal: &Literal) -> bool {
    match value {
        Value::String(s) => s
            .to_lowercase()
            .contains(&literal.to_string().to_lowercase()),
        Value::Array(items) => items.iter().any(|item| exact_eq(item, literal)),
        _ => false,
    }
}

/// Native ordering for `<` `<=` `>` `>=`. Incomparable operand types yield
/// `None`, which the caller treats as no match.
fn ordering(value: &Value, literal: &Literal) -> Option<Ordering> {
    match (value, literal) {
        (Value::String(s), Literal::String(l)) => Some(s.as_str().cmp(l.as_str())),
        (Value::Integer(a), Literal::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Literal::Integer(b)) => a.partial_cmp(&(*b as f64)),
        _ => None,
    }
}
