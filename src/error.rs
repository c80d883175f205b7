use thiserror::Error;

/// User-facing failure conditions. Every variant is recoverable: the REPL
/// prints the message and returns to the prompt.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("index cannot be empty")]
    EmptyIndex,

    #[error("student {0} already registered")]
    DuplicateIndex(String),

    #[error("session file not found: {0}")]
    SessionNotFound(String),

    #[error("invalid status '{0}', use P, A or L")]
    InvalidStatus(char),

    #[error("cannot write {path}: {source}")]
    FileWriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path}: {source}")]
    FileReadFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path}: {reason}")]
    MalformedRecord { path: String, reason: String },

    #[error("{0}")]
    BadCommand(String),
}

impl AppError {
    pub fn bad_command(msg: impl Into<String>) -> AppError {
        AppError::BadCommand(msg.into())
    }
}
