//! Replay verification: re-evaluate a solution expression from its text.
//!
//! A solution is accepted only if (a) the text parses, (b) its value is within
//! [`TARGET_TOLERANCE`] of the target, and (c) its literal leaves are exactly
//! the input operands as a multiset. The search engine's own bookkeeping is
//! never consulted.

use crate::expr::{parse, ExprError};

/// Absolute tolerance for "equals the target".
pub const TARGET_TOLERANCE: f64 = 1e-5;

/// Outcome of a replay verification.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayVerdict {
    /// The expression reproduces the target from exactly the given operands.
    Match { value: f64 },
    /// The expression evaluates to something other than the target.
    ValueMismatch { expected: f64, actual: f64 },
    /// The expression's leaves differ from the operands (sorted).
    OperandMismatch { expected: Vec<f64>, actual: Vec<f64> },
}

impl ReplayVerdict {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Stable lowercase tag used in reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Match { .. } => "match",
            Self::ValueMismatch { .. } => "value_mismatch",
            Self::OperandMismatch { .. } => "operand_mismatch",
        }
    }
}

/// Replay failure: the expression could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    Parse(ExprError),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "solution expression does not parse: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<ExprError> for ReplayError {
    fn from(e: ExprError) -> Self {
        Self::Parse(e)
    }
}

/// Verify that `expression` combines exactly `operands` into `target`.
///
/// Accepts either a bare expression or the display form `"<expr> = <target>"`;
/// anything after `=` is ignored.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] if the expression text is malformed.
pub fn replay_verify(
    expression: &str,
    operands: &[f64],
    target: f64,
) -> Result<ReplayVerdict, ReplayError> {
    let text = expression
        .split_once('=')
        .map_or(expression, |(lhs, _)| lhs);
    let expr = parse(text)?;

    let mut expected = operands.to_vec();
    let mut actual = expr.leaves();
    expected.sort_by(f64::total_cmp);
    actual.sort_by(f64::total_cmp);
    if expected != actual {
        return Ok(ReplayVerdict::OperandMismatch { expected, actual });
    }

    let value = expr.eval();
    if (value - target).abs() <= TARGET_TOLERANCE {
        Ok(ReplayVerdict::Match { value })
    } else {
        Ok(ReplayVerdict::ValueMismatch {
            expected: target,
            actual: value,
        })
    }
}
