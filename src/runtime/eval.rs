use std::collections::HashMap;

use super::builtin;
use crate::{
    error::{Error, EvalError},
    syntax::{self, BinOp, Expr, UnOp},
};

/// Depth-first numeric reduction of an expression tree against a table of
/// variable bindings. Arithmetic follows native float semantics: division
/// by zero yields an infinity or NaN rather than an error.
pub struct Interpreter<'src> {
    bindings: HashMap<&'src str, f64>,
}

impl<'src> Interpreter<'src> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, name: &'src str, value: f64) {
        let _ = self.bindings.insert(name, value);
    }

    /// Parse and evaluate in one step.
    pub fn eval_str(&self, src: &'src str) -> Result<f64, Error> {
        let expr = syntax::parse(src)?;
        Ok(self.eval(&expr)?)
    }

    pub fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(value) => Ok(*value),
            Expr::Var(name) => match self.bindings.get(name) {
                Some(value) => Ok(*value),
                None => Err(EvalError::UnboundVariable(name.to_string())),
            },
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnOp::Plus => Ok(value),
                    UnOp::Neg => Ok(-value),
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                match op {
                    BinOp::Add => Ok(lhs + rhs),
                    BinOp::Sub => Ok(lhs - rhs),
                    BinOp::Mul => Ok(lhs * rhs),
                    BinOp::Div => Ok(lhs / rhs),
                }
            }
            Expr::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                builtin::call(name, &args)
            }
        }
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::Interpreter;
    use crate::error::{Error, EvalError};

    #[test]
    fn precedence_round_trip() {
        let mut interp = Interpreter::new();
        interp.bind("a", 7.0);
        assert_eq!(interp.eval_str("1 * a+3").unwrap(), 10.0);
    }

    #[test]
    fn nested_calls() {
        let interp = Interpreter::new();
        assert_eq!(interp.eval_str("sqrt(abs(-64))").unwrap(), 8.0);
        assert_eq!(interp.eval_str("max(1+2, 3)").unwrap(), 3.0);
        assert_eq!(interp.eval_str("pow(2, min(3, 10))").unwrap(), 8.0);
    }

    #[test]
    fn unary_chains() {
        let interp = Interpreter::new();
        assert_eq!(interp.eval_str("--1").unwrap(), 1.0);
        assert_eq!(interp.eval_str("+-+2").unwrap(), -2.0);
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let interp = Interpreter::new();
        assert_eq!(interp.eval_str("1/0").unwrap(), f64::INFINITY);
        assert!(interp.eval_str("0/0").unwrap().is_nan());
    }

    #[test]
    fn unbound_variable() {
        let interp = Interpreter::new();
        assert_eq!(
            interp.eval_str("a + 1"),
            Err(Error::Eval(EvalError::UnboundVariable("a".into())))
        );
    }

    #[test]
    fn unknown_function_and_arity() {
        let interp = Interpreter::new();
        assert_eq!(
            interp.eval_str("tan(1)"),
            Err(Error::Eval(EvalError::UnknownFunction("tan".into())))
        );
        assert_eq!(
            interp.eval_str("sin(1, 2)"),
            Err(Error::Eval(EvalError::ArityMismatch {
                name: "sin".into(),
                expected: 1,
                found: 2,
            }))
        );
    }

    #[test]
    fn parse_failures_surface_through_eval_str() {
        let interp = Interpreter::new();
        assert!(matches!(interp.eval_str("(1+2"), Err(Error::Parse(_))));
    }
}
