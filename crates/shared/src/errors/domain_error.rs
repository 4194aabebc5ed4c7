use thiserror::Error;

/// Domain-level errors representing business logic violations.
///
/// spec.md §6 enumerates `CreateScheduling`'s error codes as exactly
/// `{InvalidInput, SlotUnavailable, LockUnavailable}`, and §7 classifies a
/// non-existent tenant/worker/client/appointment reference as `InvalidInput`
/// ("not retryable"), not a distinct not-found kind. There is deliberately
/// no `*NotFound` variant here: a reference that fails to resolve is
/// `InvalidInput` regardless of which reference it was.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("requested slot is no longer available")]
    SlotUnavailable,

    #[error("could not acquire the worker lock before the deadline")]
    LockUnavailable,
}
