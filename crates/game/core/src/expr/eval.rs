//! Tree-walking evaluation over a fixed variable whitelist.
//!
//! Evaluation is total and bounded: one pass over the tree, no host calls,
//! no mutation. Every failure is a typed [`EvalError`] the resolution
//! engine converts into "not triggered" plus a diagnostic.

use super::{CmpOp, Expr};

/// Evaluation failures. Never propagated out of a tick; triggers that fail
/// to evaluate count as not triggered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("variable {0:?} is not in the trigger whitelist")]
    UnknownVariable(String),
    #[error("expected a {expected} operand, found a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("trigger expression did not produce a boolean")]
    NonBooleanResult,
}

/// Runtime value of a sub-expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    fn kind(self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
        }
    }

    fn as_number(self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(n),
            Value::Bool(_) => Err(EvalError::TypeMismatch {
                expected: "number",
                found: self.kind(),
            }),
        }
    }

    fn as_bool(self) -> Result<bool, EvalError> {
        match self {
            Value::Bool(b) => Ok(b),
            Value::Number(_) => Err(EvalError::TypeMismatch {
                expected: "boolean",
                found: self.kind(),
            }),
        }
    }
}

/// The complete set of variables trigger expressions may reference.
///
/// This struct IS the whitelist: [`EvalContext::lookup`] matches
/// exhaustively and anything else is [`EvalError::UnknownVariable`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EvalContext {
    pub hunger: f64,
    pub thirst: f64,
    pub fatigue: f64,
    pub body_temperature: f64,
    pub wetness: f64,
    pub wind_chill: f64,
    pub has_warmth_source_in_location: bool,
    pub provides_some_shelter: bool,
    pub provides_good_shelter: bool,
    pub provides_excellent_shelter: bool,
}

impl EvalContext {
    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        match name {
            "hunger" => Ok(Value::Number(self.hunger)),
            "thirst" => Ok(Value::Number(self.thirst)),
            "fatigue" => Ok(Value::Number(self.fatigue)),
            "body_temperature" => Ok(Value::Number(self.body_temperature)),
            "wetness" => Ok(Value::Number(self.wetness)),
            "wind_chill" => Ok(Value::Number(self.wind_chill)),
            "has_warmth_source_in_location" => {
                Ok(Value::Bool(self.has_warmth_source_in_location))
            }
            "provides_some_shelter" => Ok(Value::Bool(self.provides_some_shelter)),
            "provides_good_shelter" => Ok(Value::Bool(self.provides_good_shelter)),
            "provides_excellent_shelter" => Ok(Value::Bool(self.provides_excellent_shelter)),
            other => Err(EvalError::UnknownVariable(other.to_string())),
        }
    }
}

/// Evaluate an expression to its value.
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Variable(name) => ctx.lookup(name),
        Expr::Comparison { operands, ops } => {
            // chain semantics: every adjacent pair must hold, with the
            // shared operand evaluated once and carried through
            let mut lhs = evaluate(&operands[0], ctx)?.as_number()?;
            for (op, operand) in ops.iter().zip(&operands[1..]) {
                let rhs = evaluate(operand, ctx)?.as_number()?;
                if !op.holds(lhs, rhs) {
                    return Ok(Value::Bool(false));
                }
                lhs = rhs;
            }
            Ok(Value::Bool(true))
        }
        Expr::And(operands) => {
            for operand in operands {
                if !evaluate(operand, ctx)?.as_bool()? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        Expr::Or(operands) => {
            for operand in operands {
                if evaluate(operand, ctx)?.as_bool()? {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        Expr::Not(inner) => Ok(Value::Bool(!evaluate(inner, ctx)?.as_bool()?)),
    }
}

/// Evaluate a trigger, requiring a boolean result.
///
/// A bare numeric expression ("hunger") is not a valid trigger even though
/// it evaluates; the grammar has no truthiness.
pub fn evaluate_trigger(expr: &Expr, ctx: &EvalContext) -> Result<bool, EvalError> {
    match evaluate(expr, ctx)? {
        Value::Bool(b) => Ok(b),
        Value::Number(_) => Err(EvalError::NonBooleanResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse_expression;

    fn ctx() -> EvalContext {
        EvalContext {
            hunger: 150.0,
            thirst: 600.0,
            fatigue: 300.0,
            body_temperature: 250.0,
            wetness: 120.0,
            wind_chill: 40.0,
            has_warmth_source_in_location: false,
            provides_some_shelter: true,
            provides_good_shelter: false,
            provides_excellent_shelter: false,
        }
    }

    fn run(source: &str) -> Result<bool, EvalError> {
        evaluate_trigger(&parse_expression(source).unwrap(), &ctx())
    }

    #[test]
    fn comparisons_against_state() {
        assert_eq!(run("hunger <= 200"), Ok(true));
        assert_eq!(run("thirst <= 200"), Ok(false));
        assert_eq!(run("wetness >= 100"), Ok(true));
        assert_eq!(run("fatigue != 300"), Ok(false));
    }

    #[test]
    fn chained_comparison_is_a_conjunction() {
        assert_eq!(run("100 <= body_temperature <= 300"), Ok(true));
        assert_eq!(run("100 <= body_temperature <= 200"), Ok(false));
        assert_eq!(run("300 <= body_temperature <= 400"), Ok(false));
    }

    #[test]
    fn boolean_operators_short_circuit_over_arity() {
        assert_eq!(run("hunger <= 200 and wetness >= 100 and thirst >= 500"), Ok(true));
        assert_eq!(run("hunger <= 50 or thirst <= 50 or wetness >= 100"), Ok(true));
        // short circuit: the unknown variable after a decisive operand is
        // never reached
        assert_eq!(run("thirst >= 500 or unknown_thing <= 1"), Ok(true));
    }

    #[test]
    fn not_negates() {
        assert_eq!(run("not provides_some_shelter"), Ok(false));
        assert_eq!(run("not provides_good_shelter"), Ok(true));
    }

    #[test]
    fn boolean_variables_from_whitelist() {
        assert_eq!(run("provides_some_shelter"), Ok(true));
        assert_eq!(run("has_warmth_source_in_location"), Ok(false));
    }

    #[test]
    fn unknown_variable_fails_closed() {
        assert_eq!(
            run("mana <= 200"),
            Err(EvalError::UnknownVariable("mana".into()))
        );
    }

    #[test]
    fn type_confusion_fails_closed() {
        assert!(matches!(
            run("provides_some_shelter <= 200"),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert!(matches!(
            run("hunger and thirst"),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn bare_number_is_not_a_trigger() {
        assert_eq!(run("hunger"), Err(EvalError::NonBooleanResult));
        assert_eq!(run("42"), Err(EvalError::NonBooleanResult));
    }
}
