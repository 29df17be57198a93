use thiserror::Error;

/// Any persistence failure surfaced by an item repository.
///
/// Callers treat every variant of the underlying cause the same way, so the
/// cause is kept opaque and only the failing operation is named.
#[derive(Debug, Error)]
#[error("repository {operation} failed: {source}")]
pub struct RepositoryError {
    pub operation: &'static str,
    #[source]
    pub source: anyhow::Error,
}

impl RepositoryError {
    pub fn new(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn msg(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            source: anyhow::anyhow!(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_operation_and_cause() {
        let err = RepositoryError::msg("delete_item", "connection refused");
        assert_eq!(
            err.to_string(),
            "repository delete_item failed: connection refused"
        );
        assert_eq!(err.operation, "delete_item");
    }
}
