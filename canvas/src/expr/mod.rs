//! Restricted single-variable formula language.
//!
//! Parses formulas in `x` into an AST whose only free names come from a fixed
//! symbol table (`x`, `pi`, `sin`, `cos`, `tan`, `exp`, `log`, `sqrt`, and the
//! same names behind a `math.` or `np.` prefix). Nothing else resolves, so a
//! formula can only ever compute a number.

pub mod ast;
pub mod eval;
pub mod parse;

pub use ast::{BinOp, Expr, Func};
pub use eval::EvalError;
pub use parse::{ExpressionError, parse};


/// A parsed formula together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    ast: Expr,
}

impl Formula {
    /// Parse `source` without evaluating it.
    ///
    /// # Errors
    ///
    /// Any syntax or name-resolution failure.
    pub fn compile(source: &str) -> Result<Self, ExpressionError> {
        let ast = parse(source)?;
        Ok(Self { source: source.trim().to_owned(), ast })
    }

    /// Parse `source` and evaluate it once at `x = 0`.
    ///
    /// # Errors
    ///
    /// Any compile error, or [`ExpressionError::Evaluation`] when the single
    /// evaluation fails.
    pub fn preflight(source: &str) -> Result<Self, ExpressionError> {
        let formula = Self::compile(source)?;
        formula.eval(0.0)?;
        Ok(formula)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate at a single `x`.
    ///
    /// # Errors
    ///
    /// See [`EvalError`].
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        self.ast.eval(x)
    }

    /// Evaluate at every `x`; failures and non-finite results become NaN.
    #[must_use]
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter()
            .map(|&x| match self.ast.eval(x) {
                Ok(y) if y.is_finite() => y,
                _ => f64::NAN,
            })
            .collect()
    }
}

/// Sample `source` at every `x`. An expression that does not compile yields
/// all-NaN output of the same length.
#[must_use]
pub fn sample(source: &str, xs: &[f64]) -> Vec<f64> {
    match Formula::compile(source) {
        Ok(formula) => formula.sample(xs),
        Err(e) => {
            tracing::debug!(error = %e, "formula did not compile; sampling as gaps");
            vec![f64::NAN; xs.len()]
        }
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let step = (end - start) / (n - 1) as f64;
            #[allow(clippy::cast_precision_loss)]
            let mut out: Vec<f64> = (0..n).map(|i| step.mul_add(i as f64, start)).collect();
            out[n - 1] = end;
            out
        }
    }
}
