//! Render errors.

/// Error raised when a render operation's contract is violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The operation was handed a context of the wrong kind, or a context
    /// missing state the operation depends on (such as the parent style).
    #[error("{operation} was called with an incorrect render context")]
    ContextIncorrect {
        /// Name of the failing operation.
        operation: &'static str,
    },
}

impl RenderError {
    pub(crate) fn context_incorrect(operation: &'static str) -> Self {
        Self::ContextIncorrect { operation }
    }
}
