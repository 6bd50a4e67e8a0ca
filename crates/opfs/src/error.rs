use crate::HandleKind;
use thiserror::Error;

/// Errors generated by the in-memory file system.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when an entry does not exist.
    #[error("entry '{0}' could not be found")]
    NotFound(String),

    /// Error generated when an entry exists with the other kind.
    #[error("entry '{0}' exists but is not a {1}")]
    TypeMismatch(String, HandleKind),

    /// Error generated removing a directory that has children
    /// without the recursive option.
    #[error("directory '{0}' is not empty")]
    NotEmpty(String),

    /// Error generated when a file already has an open
    /// synchronous access handle.
    #[error("file '{0}' is locked by an open access handle")]
    AlreadyLocked(String),

    /// Error generated using an access handle after it was closed.
    #[error("access handle is closed")]
    Closed,

    /// Error generated using a stream after it was closed.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Error generated for malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Error generated when a numeric argument is out of range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Error generated using a stream after it was aborted.
    #[error("stream was aborted{}", .0.as_ref().map(|r| format!(": {r}")).unwrap_or_default())]
    Aborted(Option<String>),

    /// Errors generated by the io module.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Errors generated parsing TOML configuration.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Name of the DOM exception this error corresponds to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFoundError",
            Self::TypeMismatch(_, _) => "TypeMismatchError",
            Self::NotEmpty(_) => "InvalidModificationError",
            Self::AlreadyLocked(_) => "NoModificationAllowedError",
            Self::Closed | Self::InvalidState(_) => "InvalidStateError",
            Self::InvalidArgument(_) => "TypeError",
            Self::OutOfRange(_) => "RangeError",
            Self::Aborted(_) => "AbortError",
            Self::Io(_) | Self::Toml(_) => "UnknownError",
        }
    }
}
