use thiserror::Error;

/// Caller-contract violations for pagination parameters. Everything else in
/// this crate degrades instead of failing: empty inputs produce empty
/// outputs, unmatched tag patterns pass through unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("page limit must be positive, got {0}")]
    InvalidLimit(i64),
    #[error("page offset must be non-negative, got {0}")]
    InvalidSkip(i64),
}
