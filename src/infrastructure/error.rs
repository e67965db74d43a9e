//! Errors raised at the process boundary

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures of the service layer, plus stream I/O that bypasses
/// [`FileSystem`](crate::infrastructure::traits::FileSystem): stdin and stdout.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn given_io_failure_when_wrapping_then_context_shown_and_source_kept() {
        let err = InfraError::io("write stdout", io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "I/O error: write stdout");
        assert_eq!(err.source().map(|s| s.to_string()), Some("pipe closed".to_string()));
    }
}
