//! Error types for the player host

use thiserror::Error;

/// Result type alias for host view operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the player host
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A pass-through command was issued before initialization completed.
    /// This is a caller programming error and is never swallowed internally.
    #[error("the player has not been initialized (attempted `{operation}`)")]
    UninitializedAccess { operation: &'static str },

    /// A command was issued after the view was released
    #[error("the player has been released (attempted `{operation}`)")]
    Released { operation: &'static str },

    /// The embedded player rejected or failed a command
    #[error("Player surface error: {0}")]
    Surface(String),

    /// Subscribing to the connectivity source failed
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Name of the operation that tripped a lifecycle precondition, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::UninitializedAccess { operation } | Error::Released { operation } => {
                Some(*operation)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_access_names_operation() {
        let err = Error::UninitializedAccess { operation: "play_video" };
        assert_eq!(err.operation(), Some("play_video"));
        assert!(err.to_string().contains("play_video"));
    }

    #[test]
    fn surface_error_has_no_operation() {
        assert_eq!(Error::Surface("boom".into()).operation(), None);
    }
}
