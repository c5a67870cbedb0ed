use thiserror::Error;

/// Failures raised while building, writing, or loading an index.
///
/// Both variants are fatal for the operation that produced them: a build or
/// load never yields a partial index.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed index line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("metadata error: {0}")]
    Meta(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse { line, reason: reason.into() }
    }
}
