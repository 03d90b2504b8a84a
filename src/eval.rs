use std::collections::HashMap;

use miette::Diagnostic;
use thiserror::Error;

use crate::parse::{Expr, Op};

/// Lookup context threaded through evaluation.
///
/// Neither map is consulted yet: they are the extension point for resolving
/// keyword and identifier tokens once the grammar grows names and calls. A
/// context can be reused read-only across any number of evaluations.
#[derive(Debug, Default)]
pub struct Context {
    pub functions: HashMap<String, Expr>,
    pub variables: HashMap<String, Expr>,
}

#[derive(Error, Debug, Diagnostic)]
#[error("operand evaluated to no value")]
#[diagnostic(help("both sides of a binary operation must produce a number"))]
pub struct EvaluationError;

impl Expr {
    /// Walk the tree to a numeric result. Comparisons yield 1.0 or 0.0, and
    /// division by zero follows float semantics rather than failing.
    pub fn evaluate(&self, context: &Context) -> Result<Option<f64>, EvaluationError> {
        match self {
            Expr::Number(n) => Ok(Some(*n)),
            Expr::Binary(op, left, right) => {
                let (Some(lhs), Some(rhs)) = (left.evaluate(context)?, right.evaluate(context)?)
                else {
                    return Err(EvaluationError);
                };

                Ok(Some(match op {
                    Op::Plus => lhs + rhs,
                    Op::Minus => lhs - rhs,
                    Op::Slash => lhs / rhs,
                    Op::Star => lhs * rhs,
                    Op::Greater => {
                        if lhs > rhs {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    Op::Less => {
                        if lhs < rhs {
                            1.0
                        } else {
                            0.0
                        }
                    }
                }))
            }
        }
    }
}
