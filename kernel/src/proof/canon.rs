//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order), at every depth.
//! 2. Compact form, no whitespace.
//! 3. Numbers must be integers. Floats are rejected so that digests never
//!    depend on float formatting.
//! 4. Strings and literals are encoded by `serde_json`.
//!
//! Key order does not rely on `serde_json`'s map representation, so enabling
//! `preserve_order` anywhere in the dependency graph cannot change digests.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
    /// The underlying encoder failed on a scalar.
    Encode { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::Encode { detail } => write!(f, "canonical JSON encode failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is a float.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_scalar(buf, key)?;
                buf.push(b':');
                write_value(buf, item)?;
            }
            buf.push(b'}');
        }
        serde_json::Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item)?;
            }
            buf.push(b']');
        }
        serde_json::Value::Number(n) if n.is_f64() => {
            return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
        }
        scalar => write_scalar(buf, scalar)?,
    }
    Ok(())
}

fn write_scalar<T: serde::Serialize + ?Sized>(buf: &mut Vec<u8>, v: &T) -> Result<(), CanonError> {
    serde_json::to_writer(&mut *buf, v).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })
}
