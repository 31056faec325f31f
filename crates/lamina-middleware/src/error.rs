//! Chain error types.

use thiserror::Error;

/// Errors reported by the strict chain operations.
///
/// The lenient operations ([`Chain::from_layers`](crate::Chain::from_layers),
/// [`Chain::compose`](crate::Chain::compose)) report the same conditions as
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// An absent layer was passed to the constructor.
    #[error("absent layer at position {index}")]
    AbsentLayer {
        /// Position of the first absent layer among the arguments.
        index: usize,
    },

    /// The chain has neither layers nor a terminal function.
    #[error("nothing to compose: chain has no layers and no terminal function")]
    Empty,
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChainError::AbsentLayer { index: 2 };
        assert_eq!(err.to_string(), "absent layer at position 2");
        assert_eq!(
            ChainError::Empty.to_string(),
            "nothing to compose: chain has no layers and no terminal function"
        );
    }
}
