//! Error type carried by deferred chains.
//!
//! A deferred chain settles to `Result<V, ChainError>`. Every clone of a
//! handle observes the same settled result, so the error has to be `Clone`;
//! the original cause is kept behind an `Arc` and stays reachable through
//! [`std::error::Error::source`] and [`ChainError::downcast_ref`].

use std::error::Error;
use std::sync::Arc;

/// The failure cause of a deferred chain.
///
/// The chain never recovers, retries or translates a failure: whatever cause
/// entered the chain is the cause every downstream handle settles with.
///
/// # Examples
///
/// ```rust
/// use chainwrap::chain::ChainError;
///
/// let error = ChainError::msg("boom");
/// assert_eq!(error.to_string(), "boom");
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// let error = ChainError::new(io);
/// assert_eq!(
///     error.downcast_ref::<std::io::Error>().map(std::io::Error::kind),
///     Some(std::io::ErrorKind::NotFound)
/// );
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// A failure raised by a future or a callback inside the chain.
    #[error(transparent)]
    Failed(Arc<dyn Error + Send + Sync + 'static>),
    /// A failure described only by a message.
    #[error("{0}")]
    Message(Arc<str>),
    /// A spawned chain panicked or was aborted before it settled.
    #[error("deferred chain did not complete: {0}")]
    Panicked(String),
}

impl ChainError {
    /// Wraps an arbitrary error as the failure cause of a chain.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Failed(Arc::new(error))
    }

    /// Creates a failure cause from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(Arc::from(message.into()))
    }

    /// Returns the original cause if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        match self {
            Self::Failed(cause) => cause.downcast_ref::<E>(),
            Self::Message(_) | Self::Panicked(_) => None,
        }
    }
}

impl From<std::io::Error> for ChainError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<std::convert::Infallible> for ChainError {
    fn from(error: std::convert::Infallible) -> Self {
        match error {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("custom failure {code}")]
    struct CustomError {
        code: u8,
    }

    #[rstest]
    fn message_displays_verbatim() {
        let error = ChainError::msg("something failed");
        assert_eq!(format!("{error}"), "something failed");
    }

    #[rstest]
    fn failed_is_transparent() {
        let error = ChainError::new(CustomError { code: 7 });
        assert_eq!(format!("{error}"), "custom failure 7");
    }

    #[rstest]
    fn downcast_recovers_original_cause() {
        let error = ChainError::new(CustomError { code: 3 });
        assert_eq!(
            error.downcast_ref::<CustomError>(),
            Some(&CustomError { code: 3 })
        );
        assert!(error.downcast_ref::<std::io::Error>().is_none());
    }

    #[rstest]
    fn clones_share_the_same_cause() {
        let error = ChainError::new(CustomError { code: 1 });
        let clone = error.clone();
        match (error, clone) {
            (ChainError::Failed(left), ChainError::Failed(right)) => {
                assert!(Arc::ptr_eq(&left, &right));
            }
            _ => panic!("expected Failed variants"),
        }
    }

    #[rstest]
    fn message_has_no_downcast() {
        assert!(ChainError::msg("x").downcast_ref::<CustomError>().is_none());
    }
}
