use crate::error::EvalError;

/// Dispatch a call against the fixed built-in table. Arguments arrive
/// already evaluated, in source order.
pub(super) fn call(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    match name {
        "sin" => Ok(one(name, args)?.sin()),
        "cos" => Ok(one(name, args)?.cos()),
        "sqrt" => Ok(one(name, args)?.sqrt()),
        "abs" => Ok(one(name, args)?.abs()),
        "pow" => {
            let (base, exponent) = two(name, args)?;
            Ok(base.powf(exponent))
        }
        "min" => {
            let (a, b) = two(name, args)?;
            Ok(a.min(b))
        }
        "max" => {
            let (a, b) = two(name, args)?;
            Ok(a.max(b))
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

fn one(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    match args {
        [x] => Ok(*x),
        _ => Err(mismatch(name, 1, args.len())),
    }
}

fn two(name: &str, args: &[f64]) -> Result<(f64, f64), EvalError> {
    match args {
        [a, b] => Ok((*a, *b)),
        _ => Err(mismatch(name, 2, args.len())),
    }
}

fn mismatch(name: &str, expected: usize, found: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: name.to_string(),
        expected,
        found,
    }
}
