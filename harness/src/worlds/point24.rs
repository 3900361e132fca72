//! `Point24`: the "make 24" arithmetic puzzle as a search world.
//!
//! A state is the ordered list of terms still to be combined. Each expansion
//! picks two terms, combines them with one binary operator, and appends the
//! result to the untouched remainder. A goal is a single term equal to the
//! target within [`TARGET_TOLERANCE`].

use arbor_kernel::proof::replay::TARGET_TOLERANCE;
use arbor_search::contract::SearchWorld;

/// The classic target value.
pub const DEFAULT_TARGET: f64 = 24.0;

/// The fixed battery the CLI runs when given no numbers.
pub const CLASSIC_PUZZLES: [[f64; 4]; 4] = [
    [3.0, 3.0, 8.0, 8.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 2.0, 3.0, 4.0],
    [5.0, 5.0, 5.0, 1.0],
];

/// Divisors with magnitude at or below this are skipped.
pub const DIVISION_EPSILON: f64 = 1e-6;

/// Fingerprints keep this many decimal digits of each value.
const FINGERPRINT_SCALE: f64 = 1e5;

/// Scaled magnitudes at or above 2^52 have no fractional part left to round.
const EXACT_SCALED_LIMIT: f64 = 4_503_599_627_370_496.0;

/// A value rounded to five decimals, as an exact float key.
///
/// Values too large to carry decimals are kept as they are; `-0.0` folds into
/// `0.0` and every NaN into one canonical NaN.
fn fingerprint_key(value: f64) -> f64 {
    let scaled = value * FINGERPRINT_SCALE;
    let key = if scaled.is_finite() && scaled.abs() < EXACT_SCALED_LIMIT {
        scaled.round() / FINGERPRINT_SCALE
    } else {
        value
    };
    if key.is_nan() {
        f64::NAN
    } else {
        key + 0.0
    }
}

/// One remaining number and the expression text that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub value: f64,
    pub expr: String,
}

impl Term {
    #[must_use]
    pub fn new(value: f64, expr: impl Into<String>) -> Self {
        Self {
            value,
            expr: expr.into(),
        }
    }

    /// A leaf term for an input number.
    #[must_use]
    pub fn literal(value: f64) -> Self {
        Self::new(value, format_number(value))
    }

    fn combine(&self, other: &Self, symbol: char, value: f64) -> Self {
        Self::new(value, format!("({} {symbol} {})", self.expr, other.expr))
    }
}

/// Render an input number: integral values print without a fractional part.
#[must_use]
pub fn format_number(value: f64) -> String {
    // Adding zero folds `-0.0` into `0.0`.
    format!("{}", value + 0.0)
}

/// The 24-point world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point24 {
    target: f64,
}

impl Default for Point24 {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
        }
    }
}

impl Point24 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same rules, different target value.
    #[must_use]
    pub fn with_target(target: f64) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    fn hits_target(&self, value: f64) -> bool {
        (value - self.target).abs() <= TARGET_TOLERANCE
    }

    /// Initial state for a list of input numbers, in input order.
    #[must_use]
    pub fn initial_state(numbers: &[f64]) -> Vec<Term> {
        numbers.iter().copied().map(Term::literal).collect()
    }
}

impl SearchWorld for Point24 {
    type State = Vec<Term>;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "point24"
    }

    fn generate(&self, state: &Vec<Term>) -> Vec<Vec<Term>> {
        let n = state.len();
        let mut successors = Vec::new();
        if n < 2 {
            return successors;
        }

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = (&state[i], &state[j]);
                let rest: Vec<Term> = state
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| *k != i && *k != j)
                    .map(|(_, t)| t.clone())
                    .collect();
                let mut emit = |term: Term| {
                    let mut next = rest.clone();
                    next.push(term);
                    successors.push(next);
                };

                // Commutative operators once per unordered pair.
                if i < j {
                    emit(a.combine(b, '+', a.value + b.value));
                    emit(a.combine(b, '*', a.value * b.value));
                }
                emit(a.combine(b, '-', a.value - b.value));
                if b.value.abs() > DIVISION_EPSILON {
                    emit(a.combine(b, '/', a.value / b.value));
                }
            }
        }
        successors
    }

    fn evaluate(&self, state: &Vec<Term>) -> f64 {
        if state.is_empty() {
            return 0.0;
        }
        if state.iter().any(|t| self.hits_target(t.value)) {
            return 1.0;
        }
        let closest = state
            .iter()
            .map(|t| (t.value - self.target).abs())
            .fold(f64::INFINITY, f64::min);
        1.0 / (1.0 + closest)
    }

    fn is_goal(&self, state: &Vec<Term>) -> bool {
        matches!(state.as_slice(), [only] if self.hits_target(only.value))
    }

    fn identity_bytes(&self, state: &Vec<Term>) -> Vec<u8> {
        let mut keys: Vec<f64> = state.iter().map(|t| fingerprint_key(t.value)).collect();
        keys.sort_by(f64::total_cmp);
        keys.iter().flat_map(|k| k.to_bits().to_le_bytes()).collect()
    }
}
