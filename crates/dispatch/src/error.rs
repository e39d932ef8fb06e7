use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unexpected event for accessor {accessor}: expected {expected}")]
    UnexpectedEvent {
        accessor: String,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DispatchError::UnexpectedEvent {
            accessor: "user.created".to_string(),
            expected: "UserCreated",
        };
        let message = error.to_string();
        assert!(message.contains("user.created"));
        assert!(message.contains("UserCreated"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: DispatchError = io.into();
        assert!(matches!(error, DispatchError::Io(_)));
    }
}
