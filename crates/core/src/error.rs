use thiserror::Error;

/// Top-level error type used across the entire status bar.
///
/// The first group are usage errors: they indicate an integration bug in the
/// caller and are returned immediately, never retried or swallowed.
#[derive(Debug, Error)]
pub enum StatusBarError {
    #[error("status bar manager already has a container")]
    AlreadyBound,

    #[error("status bar item '{id}' has been disposed")]
    ItemDisposed { id: String },

    #[error("{operation} must be called from the owning thread")]
    WrongThread { operation: &'static str },

    #[error("no tokio runtime available to schedule a temporary message")]
    NoRuntime,

    #[error("owning thread stopped processing status bar commands")]
    OwnerGone,

    #[error("config error: {0}")]
    Config(String),

    #[error("wayland error: {0}")]
    Wayland(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = StatusBarError> = std::result::Result<T, E>;
