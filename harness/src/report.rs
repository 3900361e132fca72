//! Solve report: a canonical, hash-committed summary of one solver run.
//!
//! The report binds the input, the strategy, the solution text, an
//! independent replay verdict and the digest of the full search graph. It
//! contains no floats: numbers are recorded in their printed form, scores
//! are already integer micro-units inside the graph.

use std::path::Path;

use arbor_kernel::proof::canon::{canonical_json_bytes, CanonError};
use arbor_kernel::proof::hash::{canonical_hash, ContentHash};
use arbor_kernel::proof::hash_domain::HashDomain;
use arbor_kernel::proof::replay::ReplayError;

use crate::solver::SolveRun;
use crate::worlds::point24::format_number;

/// Error building or persisting a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Canonical JSON serialization failed.
    Canon(CanonError),
    /// The solution expression could not be replayed.
    Replay(ReplayError),
    /// Filesystem failure while writing.
    Io { detail: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
            Self::Replay(e) => write!(f, "replay failed: {e}"),
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<CanonError> for ReportError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

impl From<ReplayError> for ReportError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e)
    }
}

/// A built report: canonical bytes plus their digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// Canonical JSON bytes.
    pub bytes: Vec<u8>,
    /// `sha256:` digest of `bytes` under the solve-report domain.
    pub digest: ContentHash,
}

impl SolveReport {
    /// Build the report for a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the solution does not parse or the
    /// report cannot be canonicalised.
    pub fn build(run: &SolveRun) -> Result<Self, ReportError> {
        let graph_digest = run.graph.digest()?;
        let meta = &run.graph.metadata;

        let (solution, replay) = match &run.solution {
            Some(s) => {
                let verdict = s.verify(&run.numbers)?;
                (
                    serde_json::json!({
                        "depth": s.depth,
                        "expression": s.expression,
                        "text": s.to_string(),
                    }),
                    serde_json::Value::from(verdict.kind()),
                )
            }
            None => (serde_json::Value::Null, serde_json::Value::Null),
        };

        let value = serde_json::json!({
            "graph_digest": graph_digest.as_str(),
            "input": run.numbers.iter().map(|n| format_number(*n)).collect::<Vec<_>>(),
            "max_expansions": meta.policy.max_expansions,
            "replay": replay,
            "schema_version": "solve_report.v1",
            "search": {
                "duplicates_suppressed": meta.total_duplicates_suppressed,
                "expansions": meta.total_expansions,
                "frontier_high_water": meta.frontier_high_water,
                "nodes": run.graph.node_summaries.len(),
                "pruned": meta.total_pruned,
                "termination": meta.termination_reason.kind(),
            },
            "solution": solution,
            "strategy": meta.policy.strategy.as_str(),
            "target": format_number(run.target),
            "world_id": meta.world_id,
        });

        let bytes = canonical_json_bytes(&value)?;
        let digest = canonical_hash(HashDomain::SolveReport, &bytes);
        Ok(Self { bytes, digest })
    }

    /// Write the canonical bytes to `path` via temp file + rename.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] on any filesystem failure.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let dir = path.parent().ok_or_else(|| ReportError::Io {
            detail: format!("{} has no parent directory", path.display()),
        })?;
        let file_name = path.file_name().ok_or_else(|| ReportError::Io {
            detail: format!("{} has no file name", path.display()),
        })?;
        let temp_path = dir.join(format!(".tmp_{}", file_name.to_string_lossy()));

        std::fs::write(&temp_path, &self.bytes).map_err(|e| ReportError::Io {
            detail: format!("write {}: {e}", temp_path.display()),
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| ReportError::Io {
            detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
        })?;

        tracing::debug!(path = %path.display(), digest = %self.digest, "report written");
        Ok(())
    }
}
