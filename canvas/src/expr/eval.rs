//! Tree-walking evaluation of a parsed formula.

use super::ast::{BinOp, Expr};

/// Hard failures while evaluating at one `x`.
///
/// Out-of-domain arguments to the table functions are not errors; they
/// produce NaN or an infinity the way IEEE arithmetic does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("zero raised to a negative power")]
    ZeroToNegativePower,
}

impl Expr {
    /// Evaluate with the variable bound to `x`.
    ///
    /// # Errors
    ///
    /// See [`EvalError`].
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Num(v) => Ok(*v),
            Self::X => Ok(x),
            Self::Neg(inner) => Ok(-inner.eval(x)?),
            Self::Call { func, arg } => Ok(func.apply(arg.eval(x)?)),
            Self::Binary { op, lhs, rhs } => binary(*op, lhs.eval(x)?, rhs.eval(x)?),
        }
    }
}

fn binary(op: BinOp, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        BinOp::Add => Ok(a + b),
        BinOp::Sub => Ok(a - b),
        BinOp::Mul => Ok(a * b),
        BinOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(a / b)
        }
        BinOp::Rem => {
            if b == 0.0 {
                return Err(EvalError::ModuloByZero);
            }
            Ok(floored_rem(a, b))
        }
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(EvalError::ZeroToNegativePower);
            }
            Ok(a.powf(b))
        }
    }
}

fn floored_rem(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
}
