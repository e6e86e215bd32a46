use super::CliError;
use crate::{Evaluator, Query, Value};

/// Options for the `check` command
pub struct CheckOptions {
    /// The query to validate and run
    pub query: String,
    /// JSON input, if any
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Outcome of a `check` invocation
pub enum CheckResult {
    /// Query parsed; nothing was evaluated
    SyntaxValid,
    /// Evaluation output: a filtered array for array input, a boolean
    /// verdict for any other input
    Success(serde_json::Value),
}

pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = Query::parse(&options.query)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json: serde_json::Value = serde_json::from_str(input)?;
    let evaluator = Evaluator::new();

    let output = match Value::from(json) {
        Value::Array(items) => {
            let mut kept = Vec::new();
            for item in items {
                if evaluator.matches(&query, &item)? {
                    kept.push(serde_json::Value::from(item));
                }
            }
            serde_json::Value::Array(kept)
        }
        value => serde_json::Value::Bool(evaluator.matches(&query, &value)?),
    };

    Ok(CheckResult::Success(output))
}
