use thiserror::Error;
use tokio::sync::AcquireError;
use tokio::task::JoinError;

/// Conditions that stop a sweep. A probe that fails is not one of them, it is
/// simply recorded as unreachable.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid scan target: {0}")]
    TargetGeneration(String),

    #[error("could not resolve {host} to an IPv4 address")]
    Resolve {
        host: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("probe task failed: {0}")]
    TaskFailed(#[from] JoinError),

    #[error("probe limiter closed: {0}")]
    Semaphore(#[from] AcquireError),
}

impl ScanError {
    /// True when the error comes from what the user typed rather than from the
    /// scanner itself.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::TargetGeneration(_) | Self::Resolve { .. })
    }
}

pub type NetworkResult<T> = Result<T, ScanError>;
