use shared::DomainError;

/// Error type threaded through the scheduling repositories: either a
/// business-rule violation (`DomainError`) or an infrastructure failure
/// (`sqlx::Error`), matching spec.md §7's "Persistence errors surface
/// unchanged" policy.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
