//! Arithmetic expression text: parsing and evaluation.
//!
//! This parser is deliberately independent of the search layer, which builds
//! expression text by string concatenation. Replay verification re-reads that
//! text through this module, so a formatting bug in the generator shows up as
//! a verdict mismatch instead of being trusted.
//!
//! # Grammar
//!
//! ```text
//! expr   := term   (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')' | '-' factor
//! number := [0-9.]+
//! ```
//!
//! Binary operators are left-associative. Whitespace is ignored between tokens.

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The operator's symbol as it appears in expression text.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Apply the operator with IEEE-754 semantics (division by zero yields an
    /// infinity or NaN, never a panic).
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal. A unary minus directly applied to a literal is
    /// folded into it, so `-3` is one leaf.
    Num(f64),
    /// Unary negation of a compound expression.
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree.
    #[must_use]
    pub fn eval(&self) -> f64 {
        match self {
            Self::Num(n) => *n,
            Self::Neg(inner) => -inner.eval(),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(), rhs.eval()),
        }
    }

    /// Literal leaves in left-to-right order.
    #[must_use]
    pub fn leaves(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<f64>) {
        match self {
            Self::Num(n) => out.push(*n),
            Self::Neg(inner) => inner.collect_leaves(out),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_leaves(out);
                rhs.collect_leaves(out);
            }
        }
    }

    /// Number of binary operators in the tree.
    #[must_use]
    pub fn operator_count(&self) -> usize {
        match self {
            Self::Num(_) => 0,
            Self::Neg(inner) => inner.operator_count(),
            Self::Binary { lhs, rhs, .. } => 1 + lhs.operator_count() + rhs.operator_count(),
        }
    }
}

/// Typed parse failure. Positions are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A character that cannot start or continue a token.
    UnexpectedChar { pos: usize, ch: char },
    /// Input ended where an operand or `)` was required.
    UnexpectedEnd,
    /// A `(` group was not closed.
    ExpectedCloseParen { pos: usize },
    /// A run of digits and dots that is not a valid number.
    InvalidNumber { pos: usize, text: String },
    /// A complete expression was followed by more input.
    TrailingInput { pos: usize },
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedChar { pos, ch } => write!(f, "unexpected character {ch:?} at {pos}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::ExpectedCloseParen { pos } => write!(f, "expected ')' at {pos}"),
            Self::InvalidNumber { pos, text } => write!(f, "invalid number {text:?} at {pos}"),
            Self::TrailingInput { pos } => write!(f, "trailing input at {pos}"),
        }
    }
}

impl std::error::Error for ExprError {}

/// Parse expression text into an [`Expr`].
///
/// # Errors
///
/// Returns an [`ExprError`] describing the first syntax problem found.
pub fn parse(src: &str) -> Result<Expr, ExprError> {
    let mut parser = Parser { src, pos: 0 };
    let expr = parser.expr()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(ExprError::TrailingInput { pos: parser.pos });
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            self.skip_ws();
            let op = match self.peek() {
                Some('+') => BinOp::Add,
                Some('-') => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.factor()?;
        loop {
            self.skip_ws();
            let op = match self.peek() {
                Some('*') => BinOp::Mul,
                Some('/') => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn factor(&mut self) -> Result<Expr, ExprError> {
        self.skip_ws();
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                let inner = self.expr()?;
                self.skip_ws();
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    None => Err(ExprError::UnexpectedEnd),
                    Some(_) => Err(ExprError::ExpectedCloseParen { pos: self.pos }),
                }
            }
            Some('-') => {
                self.pos += 1;
                Ok(match self.factor()? {
                    Expr::Num(n) => Expr::Num(-n),
                    other => Expr::Neg(Box::new(other)),
                })
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(ch) => Err(ExprError::UnexpectedChar { pos: self.pos, ch }),
        }
    }

    fn number(&mut self) -> Result<Expr, ExprError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Expr::Num)
            .map_err(|_| ExprError::InvalidNumber {
                pos: start,
                text: text.to_string(),
            })
    }
}
