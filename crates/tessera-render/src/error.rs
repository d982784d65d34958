/// Errors returned by batch construction and the begin/draw/end state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// A batch was created or resized with room for zero items.
    InvalidCapacity { capacity: usize },

    /// `begin` was called while a session was already open.
    AlreadyRecording,

    /// A draw or `end` was issued without a matching `begin`.
    NotRecording,

    /// The batch was used after `dispose`.
    Disposed,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::InvalidCapacity { capacity } => {
                write!(f, "Invalid batch capacity: {} (must be at least 1)", capacity)
            }
            BatchError::AlreadyRecording => {
                write!(f, "Batch is already recording; call end() before begin()")
            }
            BatchError::NotRecording => write!(f, "Batch is not recording; call begin() first"),
            BatchError::Disposed => write!(f, "Batch has been disposed"),
        }
    }
}

impl std::error::Error for BatchError {}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
