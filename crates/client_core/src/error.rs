use shared::{domain::ItemId, error::RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("capture text must not be empty")]
    EmptyCapture,
    #[error("no signed-in user")]
    SignedOut,
    #[error("inbox is empty")]
    NoCurrentItem,
    #[error("details for item {0} are still pending")]
    DetailsPending(ItemId),
    #[error("no details step is open")]
    NoPendingDetails,
    #[error("item {0} is not loaded")]
    UnknownItem(ItemId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TriageError {
    /// Whether retrying the same operation can succeed without other changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TriageError::Repository(_))
    }
}
