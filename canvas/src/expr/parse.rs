//! Tokenizer and recursive descent parser for formulas in `x`.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := term (("+" | "-") term)*
//! term    := unary (("*" | "/" | "%") unary)*
//! unary   := ("+" | "-") unary | power
//! power   := primary (("**" | "^") unary)?
//! primary := NUMBER | name | name "(" sum ")" | "(" sum ")"
//! name    := IDENT | ("math" | "np") "." IDENT
//! ```
//!
//! Power is right associative and binds tighter than a unary sign on its
//! left, so `-x**2` is `-(x**2)` and `2**-1` is `0.5`.

use super::ast::{BinOp, Expr, NAMESPACES, RESERVED, Symbol, resolve, resolve_qualified};
use super::eval::EvalError;

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

/// Nesting limit for parentheses, signs, and calls.
const MAX_DEPTH: usize = 64;

/// Limit on binary operators in one formula. Operator chains fold into a
/// left-deep tree, so this bounds the tree depth that evaluation and drop
/// recurse through.
const MAX_OPERATORS: usize = 512;

/// Why a formula was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    #[error("enter an expression")]
    Empty,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown name '{0}'")]
    UnknownIdentifier(String),
    #[error("{0} is not allowed in an expression")]
    Disallowed(String),
    #[error("{name}() takes exactly one argument ({found} given)")]
    WrongArity { name: String, found: usize },
    #[error("'{0}' is a function; call it like {0}(x)")]
    NotCalled(String),
    #[error("'{0}' is not a function")]
    NotCallable(String),
    #[error("expression is too long or nests too deeply")]
    TooDeep,
    #[error("evaluation failed at x = 0: {0}")]
    Evaluation(#[from] EvalError),
}

/// Parse a formula into an AST with every name resolved.
///
/// # Errors
///
/// Returns the first syntax or name-resolution problem found.
pub fn parse(input: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(input)?;
    if tokens.len() == 1 {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0, depth: 0, operators: 0 };
    let expr = parser.sum()?;
    match parser.peek() {
        Tok::End => Ok(expr),
        _ => Err(parser.unexpected()),
    }
}

// =============================================================
// Tokens
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Caret,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
    Dot,
    End,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Self::Num(v) => format!("number {v}"),
            Self::Ident(name) => format!("name '{name}'"),
            Self::Plus => "'+'".into(),
            Self::Minus => "'-'".into(),
            Self::Star => "'*'".into(),
            Self::StarStar => "'**'".into(),
            Self::Caret => "'^'".into(),
            Self::Slash => "'/'".into(),
            Self::Percent => "'%'".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::Comma => "','".into(),
            Self::Dot => "'.'".into(),
            Self::End => "end of expression".into(),
        }
    }
}

static END: Tok = Tok::End;

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    pos: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            i = scan_number(&chars, i);
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| ExpressionError::InvalidNumber { text: text.clone(), pos: start })?;
            tokens.push(Token { tok: Tok::Num(value), pos: start });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            tokens.push(Token { tok: Tok::Ident(name), pos: start });
            continue;
        }

        let tok = match c {
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Tok::StarStar
            }
            '*' => Tok::Star,
            '^' => Tok::Caret,
            '/' => Tok::Slash,
            '%' => Tok::Percent,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            ',' => Tok::Comma,
            '.' => Tok::Dot,
            '=' if chars.get(i + 1) != Some(&'=') => return Err(ExpressionError::Disallowed("assignment".into())),
            ';' => return Err(ExpressionError::Disallowed("more than one statement".into())),
            ':' => return Err(ExpressionError::Disallowed("a block or slice".into())),
            _ => return Err(ExpressionError::UnexpectedChar { ch: c, pos: start }),
        };
        i += 1;
        tokens.push(Token { tok, pos: start });
    }

    tokens.push(Token { tok: Tok::End, pos: chars.len() });
    Ok(tokens)
}

/// Advance past `digits [. digits] [(e|E) [+|-] digits]` starting at `i`.
fn scan_number(chars: &[char], mut i: usize) -> usize {
    let digits = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };
    i = digits(i);
    if chars.get(i) == Some(&'.') {
        i = digits(i + 1);
    }
    if matches!(chars.get(i), Some('e' | 'E')) {
        let mut j = i + 1;
        if matches!(chars.get(j), Some('+' | '-')) {
            j += 1;
        }
        // A dangling exponent is kept in the text so the number fails to parse.
        i = if chars.get(j).is_some_and(char::is_ascii_digit) { digits(j) } else { j };
    }
    i
}

// =============================================================
// Parser
// =============================================================

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> &Tok {
        self.tokens.get(self.pos).map_or(&END, |t| &t.tok)
    }

    fn bump(&mut self) -> Tok {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self) -> ExpressionError {
        match self.tokens.get(self.pos) {
            Some(Token { tok: Tok::End, .. }) | None => ExpressionError::UnexpectedEnd,
            Some(Token { tok: Tok::Ident(name), .. }) if RESERVED.contains(&name.as_str()) => {
                ExpressionError::Disallowed(format!("'{name}'"))
            }
            Some(t) => ExpressionError::UnexpectedToken { found: t.tok.describe(), pos: t.pos },
        }
    }

    fn eat(&mut self, want: &Tok) -> Result<(), ExpressionError> {
        if self.peek() == want {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn enter(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Count one binary operator against [`MAX_OPERATORS`].
    fn fold(&mut self) -> Result<(), ExpressionError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ExpressionError::TooDeep);
        }
        Ok(())
    }

    fn sum(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump();
            self.fold()?;
            let rhs = self.term()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                Tok::Percent => BinOp::Rem,
                _ => return Ok(lhs),
            };
            self.bump();
            self.fold()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek() {
            Tok::Plus | Tok::Minus => {
                let negate = self.bump() == Tok::Minus;
                self.enter()?;
                let inner = self.unary()?;
                self.leave();
                Ok(if negate { Expr::Neg(Box::new(inner)) } else { inner })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.primary()?;
        if matches!(self.peek(), Tok::StarStar | Tok::Caret) {
            self.bump();
            self.fold()?;
            self.enter()?;
            let exponent = self.unary()?;
            self.leave();
            return Ok(Expr::Binary { op: BinOp::Pow, lhs: Box::new(base), rhs: Box::new(exponent) });
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek().clone() {
            Tok::Num(v) => {
                self.bump();
                Ok(Expr::Num(v))
            }
            Tok::LParen => {
                self.bump();
                self.enter()?;
                let inner = self.sum()?;
                self.leave();
                self.eat(&Tok::RParen)?;
                Ok(inner)
            }
            Tok::Ident(name) => {
                self.bump();
                self.name(&name)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Resolve a name (possibly namespaced) and parse a call if it is a function.
    fn name(&mut self, first: &str) -> Result<Expr, ExpressionError> {
        if RESERVED.contains(&first) {
            return Err(ExpressionError::Disallowed(format!("'{first}'")));
        }

        let (display, symbol) = if NAMESPACES.contains(&first) && *self.peek() == Tok::Dot {
            self.bump();
            let Tok::Ident(member) = self.peek().clone() else {
                return Err(self.unexpected());
            };
            self.bump();
            let display = format!("{first}.{member}");
            let symbol = resolve_qualified(&member)
                .ok_or_else(|| ExpressionError::UnknownIdentifier(display.clone()))?;
            (display, symbol)
        } else {
            let symbol = resolve(first).ok_or_else(|| ExpressionError::UnknownIdentifier(first.to_owned()))?;
            (first.to_owned(), symbol)
        };

        match symbol {
            Symbol::Func(func) => {
                if *self.peek() != Tok::LParen {
                    return Err(ExpressionError::NotCalled(display));
                }
                self.bump();
                self.enter()?;
                let args = self.arguments()?;
                self.leave();
                let found = args.len();
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(arg), None) => Ok(Expr::Call { func, arg: Box::new(arg) }),
                    _ => Err(ExpressionError::WrongArity { name: display, found }),
                }
            }
            Symbol::Var | Symbol::Const(_) if *self.peek() == Tok::LParen => {
                Err(ExpressionError::NotCallable(display))
            }
            Symbol::Var => Ok(Expr::X),
            Symbol::Const(v) => Ok(Expr::Num(v)),
        }
    }

    /// Comma-separated arguments after an opening parenthesis, through `)`.
    fn arguments(&mut self) -> Result<Vec<Expr>, ExpressionError> {
        let mut args = Vec::new();
        if *self.peek() == Tok::RParen {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.sum()?);
            match self.peek() {
                Tok::Comma => {
                    self.bump();
                }
                Tok::RParen => {
                    self.bump();
                    return Ok(args);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }
}
