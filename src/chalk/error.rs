//! Errors raised by the colour table and the generator.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::chain::ChainError;

/// Represents errors that can occur while resolving colours or generating
/// source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChalkError {
    /// No colour has the given name.
    #[error("unknown color `{0}`")]
    UnknownColor(String),
    /// The generated source could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// A deferred generation chain failed for a reason other than writing.
    #[error(transparent)]
    Chain(ChainError),
}

impl ChalkError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

/// A generator error travelling through a deferred chain keeps its identity.
impl From<ChalkError> for ChainError {
    fn from(error: ChalkError) -> Self {
        Self::new(error)
    }
}

impl From<ChainError> for ChalkError {
    fn from(error: ChainError) -> Self {
        if let Some(chalk) = error.downcast_ref::<Self>() {
            return chalk.clone();
        }
        Self::Chain(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_color_display() {
        let error = ChalkError::UnknownColor("teal".to_string());
        assert_eq!(format!("{error}"), "unknown color `teal`");
    }

    #[rstest]
    fn write_display_names_path() {
        let error = ChalkError::write(
            "out/chalk.inc",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(format!("{error}"), "failed to write out/chalk.inc");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[rstest]
    fn round_trip_through_chain_error_keeps_variant() {
        let original = ChalkError::UnknownColor("x".to_string());
        let back = ChalkError::from(ChainError::from(original));
        assert!(matches!(back, ChalkError::UnknownColor(name) if name == "x"));
    }

    #[rstest]
    fn foreign_chain_error_is_wrapped() {
        let back = ChalkError::from(ChainError::msg("other"));
        assert!(matches!(back, ChalkError::Chain(_)));
        assert_eq!(back.to_string(), "other");
    }
}
