//! AST and symbol table for formulas in `x`.

use std::f64::consts::PI;

/// A parsed formula. Every name is resolved at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    /// The bound variable `x`.
    X,
    Neg(Box<Expr>),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { func: Func, arg: Box<Expr> },
}

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Floored remainder; the result takes the sign of the divisor.
    Rem,
    Pow,
}

/// The one-argument functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm.
    Log,
    Sqrt,
}

impl Func {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }

    /// IEEE semantics: out-of-domain input yields NaN or an infinity.
    #[must_use]
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Exp => v.exp(),
            Self::Log => v.ln(),
            Self::Sqrt => v.sqrt(),
        }
    }
}

/// What a bare name refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol {
    Var,
    Const(f64),
    Func(Func),
}

/// Namespace prefixes accepted in front of a table name (`math.sin`).
pub const NAMESPACES: &[&str] = &["math", "np"];

/// Words that introduce statements or control flow. They get a dedicated
/// error instead of "unknown name".
pub const RESERVED: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "exec", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or",
    "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Look up a bare name in the fixed table.
#[must_use]
pub fn resolve(name: &str) -> Option<Symbol> {
    let sym = match name {
        "x" => Symbol::Var,
        "pi" => Symbol::Const(PI),
        "sin" => Symbol::Func(Func::Sin),
        "cos" => Symbol::Func(Func::Cos),
        "tan" => Symbol::Func(Func::Tan),
        "exp" => Symbol::Func(Func::Exp),
        "log" => Symbol::Func(Func::Log),
        "sqrt" => Symbol::Func(Func::Sqrt),
        _ => return None,
    };
    Some(sym)
}

/// Look up `namespace.name`. The variable is not reachable through a namespace.
#[must_use]
pub fn resolve_qualified(name: &str) -> Option<Symbol> {
    match resolve(name)? {
        Symbol::Var => None,
        other => Some(other),
    }
}
