//! Structured errors, following `vcad_kernel_step::error::StepError`'s use
//! of `thiserror` with one variant per distinguishable failure kind.

use thiserror::Error;

/// Failures the optimizer can report.
///
/// Only [`OptimizeError::VertexCapacityExceeded`],
/// [`OptimizeError::EdgeCapacityExceeded`] and
/// [`OptimizeError::InvariantViolation`] are fatal — they abort the group
/// being processed and propagate to the caller. Everything else the
/// pipeline can hit (a backwards input triangle, a missing opposite edge,
/// a normal flip on emission) is logged via `log::warn!` and the offending
/// item is skipped; those cases never construct an `OptimizeError`.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("vertex arena exhausted: more than {limit} distinct projected vertices in one group")]
    VertexCapacityExceeded { limit: usize },

    #[error("edge arena exhausted: more than {limit} edges in one group")]
    EdgeCapacityExceeded { limit: usize },

    #[error("internal invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

impl OptimizeError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        OptimizeError::InvariantViolation {
            detail: detail.into(),
        }
    }
}
